use crate::error::{PlaintsError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Complaint urgency. Variants are declared from least to most urgent so the
/// derived ordering ranks them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

impl FromStr for Priority {
    type Err = PlaintsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "normal" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" | "critical" => Ok(Priority::Urgent),
            _ => Err(PlaintsError::Parse(format!("Invalid priority: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    #[default]
    Open,
    #[serde(rename = "in-progress")]
    InProgress,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, ComplaintStatus::Resolved | ComplaintStatus::Rejected)
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplaintStatus::Open => write!(f, "open"),
            ComplaintStatus::InProgress => write!(f, "in-progress"),
            ComplaintStatus::Resolved => write!(f, "resolved"),
            ComplaintStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ComplaintStatus {
    type Err = PlaintsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" | "pending" => Ok(ComplaintStatus::Open),
            "in-progress" | "inprogress" | "in_progress" | "in progress" => {
                Ok(ComplaintStatus::InProgress)
            }
            "resolved" | "closed" | "done" => Ok(ComplaintStatus::Resolved),
            "rejected" => Ok(ComplaintStatus::Rejected),
            _ => Err(PlaintsError::InvalidStatus(s.to_string())),
        }
    }
}

/// The three kinds of taxonomy entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    #[serde(rename = "category")]
    Category,
    #[serde(rename = "department")]
    Department,
    #[serde(rename = "subCategory")]
    SubCategory,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Category => write!(f, "category"),
            OptionKind::Department => write!(f, "department"),
            OptionKind::SubCategory => write!(f, "subCategory"),
        }
    }
}

impl FromStr for OptionKind {
    type Err = PlaintsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "category" | "categories" => Ok(OptionKind::Category),
            "department" | "departments" => Ok(OptionKind::Department),
            "subcategory" | "sub-category" | "sub_category" | "subcategories" => {
                Ok(OptionKind::SubCategory)
            }
            _ => Err(PlaintsError::Parse(format!("Invalid option type: {}", s))),
        }
    }
}
