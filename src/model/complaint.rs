use super::types::{ComplaintStatus, Priority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of the file stored alongside a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Name the file was uploaded with.
    pub file_name: String,
    /// Name under the complaint's attachment directory.
    pub stored_as: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: String,
    pub tracking_id: String,
    pub email: String,
    pub department: String,
    pub category: String,
    pub sub_category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_other: Option<String>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: ComplaintStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,

    #[serde(default)]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub description: String,
}

impl Complaint {
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: ComplaintStatus) {
        self.status = status;
        self.touch();
    }

    pub fn is_open(&self) -> bool {
        !self.status.is_closed()
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    /// Subcategory as shown to people: the free text for `other`.
    pub fn display_sub_category(&self) -> &str {
        match self.sub_other.as_deref() {
            Some(text) if self.sub_category.eq_ignore_ascii_case("other") => text,
            _ => &self.sub_category,
        }
    }
}
