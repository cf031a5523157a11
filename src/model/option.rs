use super::types::OptionKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyOption {
    #[serde(rename = "type")]
    pub kind: OptionKind,

    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl TaxonomyOption {
    pub fn new(kind: OptionKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            parent_category: None,
            code: None,
        }
    }

    pub fn category(value: impl Into<String>) -> Self {
        Self::new(OptionKind::Category, value)
    }

    pub fn department(value: impl Into<String>, code: Option<&str>) -> Self {
        Self::new(OptionKind::Department, value).with_code(code.map(str::to_string))
    }

    pub fn sub_category(value: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::new(OptionKind::SubCategory, value).with_parent(Some(parent.into()))
    }

    pub fn with_parent(mut self, parent: Option<String>) -> Self {
        self.parent_category = parent;
        self
    }

    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code.filter(|c| !c.is_empty());
        self
    }

    /// Case-insensitive comparison against the stored value.
    pub fn matches_value(&self, value: &str) -> bool {
        self.value.trim().eq_ignore_ascii_case(value.trim())
    }

    /// True when this option hangs under `category`, compared case-insensitively.
    pub fn belongs_to(&self, category: &str) -> bool {
        self.parent_category
            .as_deref()
            .is_some_and(|p| p.trim().eq_ignore_ascii_case(category.trim()))
    }

    /// Identity key: (type, value, parentCategory), all lowercased.
    pub fn key(&self) -> (OptionKind, String, Option<String>) {
        (
            self.kind,
            self.value.trim().to_lowercase(),
            self.parent_category
                .as_ref()
                .map(|p| p.trim().to_lowercase()),
        )
    }
}
