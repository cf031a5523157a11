//! File-based storage for complaints and taxonomy options.
//!
//! ## Layout
//!
//! ```text
//! .plaints/
//! ├── options.yml                         # taxonomy options (YAML sequence)
//! ├── complaints/
//! │   └── k3v9x0a1b2c4--hostel-electricity.md
//! └── attachments/
//!     └── k3v9x0a1b2c4/
//!         └── fuse-box.jpg
//! ```
//!
//! Complaint files are markdown with YAML frontmatter; the description is
//! the body:
//!
//! ```markdown
//! ---
//! id: k3v9x0a1b2c4
//! trackingId: CMP-7QK2M9ZD
//! email: s@x.com
//! department: Computer Science
//! category: hostel
//! subCategory: electricity
//! priority: urgent
//! status: open
//! createdAt: 2024-01-15T10:30:00Z
//! updatedAt: 2024-01-15T10:30:00Z
//! ---
//!
//! No power in block C since morning.
//! ```
//!
//! ## Components
//!
//! - [`ComplaintStore`]: persistence capability used by intake and the server
//! - [`ComplaintRepository`]: the file-backed complaint store
//! - [`OptionRepository`]: the file-backed option source, with seeding

mod markdown;
mod options;
mod repository;

use crate::error::{PlaintsError, Result};
use crate::model::Complaint;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub use markdown::{parse_markdown, render_markdown};
pub use options::OptionRepository;
pub use repository::ComplaintRepository;

/// Persistence for complaint records.
pub trait ComplaintStore: Send + Sync {
    /// Stores a new complaint. `attachment` holds the bytes for
    /// `complaint.attachment`, when there is one.
    fn insert(&self, complaint: &Complaint, attachment: Option<&[u8]>) -> Result<()>;

    fn get(&self, id: &str) -> Result<Complaint>;

    fn find_by_tracking_id(&self, tracking_id: &str) -> Result<Complaint>;

    /// All complaints, oldest first.
    fn list(&self) -> Result<Vec<Complaint>>;

    /// Overwrites an existing complaint.
    fn update(&self, complaint: &Complaint) -> Result<()>;

    fn tracking_id_exists(&self, tracking_id: &str) -> Result<bool> {
        match self.find_by_tracking_id(tracking_id) {
            Ok(_) => Ok(true),
            Err(PlaintsError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Complaints submitted by `email`, compared case-insensitively.
    fn list_by_email(&self, email: &str) -> Result<Vec<Complaint>> {
        let mut complaints = self.list()?;
        complaints.retain(|c| c.is_owned_by(email));
        Ok(complaints)
    }
}

/// Writes `content` to a temp file next to `target_path`, syncs it, and
/// renames it over the target.
pub(crate) fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    let target_dir = target_path
        .parent()
        .ok_or_else(|| PlaintsError::Storage("Target path has no parent directory".to_string()))?;

    let mut temp_file = NamedTempFile::new_in(target_dir)
        .map_err(|e| PlaintsError::Storage(format!("Failed to create temp file: {}", e)))?;

    temp_file
        .write_all(content)
        .map_err(|e| PlaintsError::Storage(format!("Failed to write to temp file: {}", e)))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| PlaintsError::Storage(format!("Failed to sync temp file: {}", e)))?;

    temp_file
        .persist(target_path)
        .map_err(|e| PlaintsError::Storage(format!("Failed to persist temp file: {}", e)))?;

    Ok(())
}
