//! Data models for plaints.
//!
//! - [`Complaint`]: a submitted complaint and its lifecycle state
//! - [`Attachment`]: metadata of the file stored with a complaint
//! - [`TaxonomyOption`]: a category, department, or subcategory entry
//! - [`Priority`], [`ComplaintStatus`], [`OptionKind`]: the enumerations

mod complaint;
mod option;
mod types;

pub use complaint::{Attachment, Complaint};
pub use option::TaxonomyOption;
pub use types::{ComplaintStatus, OptionKind, Priority};
