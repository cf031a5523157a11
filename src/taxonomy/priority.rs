//! Priority derivation from a (category, subcategory) selection.
//!
//! This is the only place the urgency table lives. The intake path, the HTTP
//! preview endpoint, and the CLI all call [`derive_priority`].

use crate::model::Priority;

/// Derives the priority of a complaint from its category and subcategory.
///
/// Total and case-insensitive: unknown categories or subcategories fall
/// through to [`Priority::Medium`].
pub fn derive_priority(category: &str, sub_category: &str) -> Priority {
    let category = category.trim().to_lowercase();
    let sub_category = sub_category.trim().to_lowercase();

    match (category.as_str(), sub_category.as_str()) {
        ("facility", "washroom" | "water-cooler" | "garbage") => Priority::High,
        ("facility", "tap" | "fan") => Priority::Medium,
        ("facility", "lights") => Priority::Low,

        ("request", "wheelchair") => Priority::Urgent,
        ("request", "mat" | "table-cloth") => Priority::Low,
        ("request", "sound-system" | "seminar-hall") => Priority::Medium,

        ("hostel", "electricity") => Priority::Urgent,
        ("hostel", "cleaning" | "water") => Priority::High,

        _ => Priority::Medium,
    }
}
