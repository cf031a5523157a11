//! Complaint intake: validation of a raw submission and the authoritative
//! write of the resulting complaint.
//!
//! The server owns the priority. Whatever priority a client sends is
//! discarded and replaced by [`derive_priority`] on the validated
//! category/subcategory pair.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use slug::slugify;

use crate::config::StoreSettings;
use crate::error::{PlaintsError, Result};
use crate::model::{Attachment, Complaint, ComplaintStatus, OptionKind, Priority};
use crate::storage::ComplaintStore;
use crate::taxonomy::{TaxonomyResolver, derive_priority};
use crate::validation;

/// Escape value for a subcategory outside the taxonomy. Requires `subOther`.
pub const OTHER_SUBCATEGORY: &str = "other";

const ID_LENGTH: usize = 12;
const TRACKING_ID_ATTEMPTS: usize = 5;

const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

const TRACKING_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// A complaint as submitted, before any validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub sub_other: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Client-side priority preview. Never stored.
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(skip)]
    pub attachment: Option<Upload>,
}

/// A file received with a submission.
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// A file input left empty by the browser: no name and no content.
    pub fn is_blank(&self) -> bool {
        self.file_name.trim().is_empty() && self.bytes.is_empty()
    }
}

/// An attachment that passed the type and size checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedUpload {
    pub file_name: String,
    pub stored_as: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl AcceptedUpload {
    fn metadata(&self) -> Attachment {
        Attachment {
            file_name: self.file_name.clone(),
            stored_as: self.stored_as.clone(),
            size: self.bytes.len() as u64,
            content_type: self.content_type.clone(),
        }
    }
}

/// A submission that passed validation, with its server-derived priority.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedComplaint {
    pub email: String,
    pub department: String,
    pub category: String,
    pub sub_category: String,
    pub sub_other: Option<String>,
    pub description: String,
    pub priority: Priority,
    pub attachment: Option<AcceptedUpload>,
}

/// Validates a submission against the stored taxonomy.
///
/// The taxonomy is read from the store only; a store failure is reported as
/// `StoreUnavailable` instead of validating against the built-in tables.
pub fn validate(
    submission: Submission,
    resolver: &TaxonomyResolver,
) -> Result<NormalizedComplaint> {
    let email = validation::require("email", &submission.email)?;
    let department = validation::require("department", &submission.department)?;
    let category = validation::require("category", &submission.category)?;
    let sub_category = validation::require("subCategory", &submission.sub_category)?;
    let description = validation::require("description", &submission.description)?;

    let is_other = sub_category.eq_ignore_ascii_case(OTHER_SUBCATEGORY);
    let sub_other = if is_other {
        Some(validation::require_present(
            "subOther",
            submission.sub_other.as_deref(),
        )?)
    } else {
        None
    };

    let attachment = match submission.attachment {
        Some(upload) if !upload.is_blank() => Some(accept_upload(upload)?),
        _ => None,
    };

    let categories = resolver
        .store_list(OptionKind::Category, None)
        .map_err(PlaintsError::into_store_unavailable)?;
    let category = categories
        .iter()
        .find(|c| c.matches_value(&category))
        .map(|c| c.value.clone())
        .ok_or_else(|| PlaintsError::UnknownCategory(category.clone()))?;

    let sub_category = if is_other {
        OTHER_SUBCATEGORY.to_string()
    } else {
        let subs = resolver
            .store_list(OptionKind::SubCategory, Some(&category))
            .map_err(PlaintsError::into_store_unavailable)?;
        subs.iter()
            .find(|s| s.matches_value(&sub_category))
            .map(|s| s.value.clone())
            .ok_or_else(|| PlaintsError::InvalidSubcategory {
                category: category.clone(),
                sub_category: sub_category.clone(),
            })?
    };

    let priority = derive_priority(&category, &sub_category);
    if let Some(claimed) = submission.priority.as_deref().filter(|p| !p.trim().is_empty()) {
        if claimed.parse::<Priority>().ok() != Some(priority) {
            tracing::debug!(
                claimed,
                derived = %priority,
                "Ignoring client-supplied priority"
            );
        }
    }

    Ok(NormalizedComplaint {
        email,
        department,
        category,
        sub_category,
        sub_other,
        description,
        priority,
        attachment,
    })
}

fn accept_upload(upload: Upload) -> Result<AcceptedUpload> {
    let extension = validation::attachment_extension(&upload.file_name)?;
    validation::validate_attachment_size(upload.size())?;

    let stem = std::path::Path::new(upload.file_name.trim())
        .file_stem()
        .map(|s| slugify(s.to_string_lossy()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "attachment".to_string());

    Ok(AcceptedUpload {
        stored_as: format!("{}.{}", stem, extension),
        file_name: upload.file_name.trim().to_string(),
        content_type: upload.content_type,
        bytes: upload.bytes,
    })
}

/// Validates and persists submissions.
#[derive(Clone)]
pub struct Intake {
    resolver: Arc<TaxonomyResolver>,
    store: Arc<dyn ComplaintStore>,
    tracking_prefix: String,
    tracking_length: usize,
}

impl Intake {
    pub fn new(
        resolver: Arc<TaxonomyResolver>,
        store: Arc<dyn ComplaintStore>,
        settings: &StoreSettings,
    ) -> Self {
        Self {
            resolver,
            store,
            tracking_prefix: settings.tracking_prefix.clone(),
            tracking_length: settings.tracking_length.max(4),
        }
    }

    pub fn validate(&self, submission: Submission) -> Result<NormalizedComplaint> {
        validate(submission, &self.resolver)
    }

    /// Validates `submission` and stores it as a new open complaint.
    pub fn submit(&self, submission: Submission) -> Result<Complaint> {
        let normalized = self.validate(submission)?;

        let tracking_id = self
            .next_tracking_id()
            .map_err(PlaintsError::into_store_unavailable)?;
        let id = nanoid::format(nanoid::rngs::default, &ID_ALPHABET, ID_LENGTH);
        let now = Utc::now();

        let complaint = Complaint {
            id,
            tracking_id,
            email: normalized.email,
            department: normalized.department,
            category: normalized.category,
            sub_category: normalized.sub_category,
            sub_other: normalized.sub_other,
            priority: normalized.priority,
            status: ComplaintStatus::Open,
            attachment: normalized.attachment.as_ref().map(AcceptedUpload::metadata),
            created_at: now,
            updated_at: now,
            description: normalized.description,
        };

        self.store
            .insert(
                &complaint,
                normalized.attachment.as_ref().map(|a| a.bytes.as_slice()),
            )
            .map_err(PlaintsError::into_store_unavailable)?;

        tracing::info!(
            tracking_id = %complaint.tracking_id,
            priority = %complaint.priority,
            "Complaint submitted"
        );
        Ok(complaint)
    }

    fn next_tracking_id(&self) -> Result<String> {
        for _ in 0..TRACKING_ID_ATTEMPTS {
            let suffix =
                nanoid::format(nanoid::rngs::default, &TRACKING_ALPHABET, self.tracking_length);
            let candidate = format!("{}{}", self.tracking_prefix, suffix);
            if !self.store.tracking_id_exists(&candidate)? {
                return Ok(candidate);
            }
            tracing::debug!(candidate = %candidate, "Tracking id collision, drawing again");
        }
        Err(PlaintsError::Storage(
            "Could not allocate a unique tracking id".to_string(),
        ))
    }
}
