//! Built-in taxonomy used to seed a fresh store and as the fallback when the
//! store cannot be read.

use super::OptionSource;
use crate::error::Result;
use crate::model::{OptionKind, TaxonomyOption};

pub static CATEGORIES: &[&str] = &["facility", "request", "hostel"];

/// Department names with their optional codes.
pub static DEPARTMENTS: &[(&str, Option<&str>)] = &[
    ("Computer Science", Some("24510")),
    ("Electrical Engineering", Some("29310")),
    ("Mechanical Engineering", Some("61210")),
    ("Civil Engineering", Some("19110")),
    ("Information Technology", None),
];

/// Subcategories keyed by their parent category.
pub static SUBCATEGORIES: &[(&str, &[&str])] = &[
    (
        "facility",
        &["washroom", "Water-Cooler", "Garbage", "tap", "Fan", "Lights"],
    ),
    (
        "request",
        &["wheelchair", "mat", "Table-Cloth", "Sound-System", "Seminar-Hall"],
    ),
    ("hostel", &["electricity", "cleaning", "water"]),
];

/// Known department code for `department`, compared case-insensitively.
pub fn department_code(department: &str) -> Option<&'static str> {
    DEPARTMENTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(department.trim()))
        .and_then(|(_, code)| *code)
}

/// Option source backed by the constant tables above.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinOptions;

impl BuiltinOptions {
    /// Every built-in option, categories first, then departments, then
    /// subcategories.
    pub fn all() -> Vec<TaxonomyOption> {
        let mut options: Vec<TaxonomyOption> = CATEGORIES
            .iter()
            .map(|c| TaxonomyOption::category(*c))
            .collect();
        options.extend(
            DEPARTMENTS
                .iter()
                .map(|(name, code)| TaxonomyOption::department(*name, *code)),
        );
        for (parent, subs) in SUBCATEGORIES {
            options.extend(
                subs.iter()
                    .map(|sub| TaxonomyOption::sub_category(*sub, *parent)),
            );
        }
        options
    }
}

impl OptionSource for BuiltinOptions {
    fn list(&self, kind: OptionKind, parent: Option<&str>) -> Result<Vec<TaxonomyOption>> {
        Ok(super::filter_options(Self::all(), kind, parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_counts() {
        let builtin = BuiltinOptions;
        assert_eq!(builtin.list(OptionKind::Category, None).unwrap().len(), 3);
        assert_eq!(builtin.list(OptionKind::Department, None).unwrap().len(), 5);
        assert_eq!(
            builtin
                .list(OptionKind::SubCategory, Some("facility"))
                .unwrap()
                .len(),
            6
        );
    }

    #[test]
    fn test_builtin_unknown_parent_is_empty() {
        let subs = BuiltinOptions
            .list(OptionKind::SubCategory, Some("library"))
            .unwrap();
        assert!(subs.is_empty());
    }

    #[test]
    fn test_department_code_lookup() {
        assert_eq!(department_code("computer science"), Some("24510"));
        assert_eq!(department_code("Information Technology"), None);
        assert_eq!(department_code("Philosophy"), None);
    }

    #[test]
    fn test_every_builtin_subcategory_has_known_parent() {
        for (parent, _) in SUBCATEGORIES {
            assert!(CATEGORIES.contains(parent));
        }
    }
}
