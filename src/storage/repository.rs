use super::markdown::{parse_markdown, render_markdown};
use super::{ComplaintStore, atomic_write};
use crate::{
    config::PlaintsConfig,
    error::{PlaintsError, Result},
    model::Complaint,
    validation,
};
use slug::slugify;
use std::path::{Path, PathBuf};

const COMPLAINTS_DIR: &str = "complaints";
const ATTACHMENTS_DIR: &str = "attachments";

/// Complaint store keeping one markdown file per complaint.
///
/// Holds no cached state, so a single instance can be shared across request
/// handlers.
#[derive(Debug, Clone)]
pub struct ComplaintRepository {
    complaints_path: PathBuf,
    attachments_path: PathBuf,
}

impl ComplaintRepository {
    pub fn new(config: &PlaintsConfig, project_root: &Path) -> Self {
        Self::at(&config.data_path(project_root))
    }

    pub fn at(data_path: &Path) -> Self {
        Self {
            complaints_path: data_path.join(COMPLAINTS_DIR),
            attachments_path: data_path.join(ATTACHMENTS_DIR),
        }
    }

    pub fn complaints_path(&self) -> &Path {
        &self.complaints_path
    }

    pub fn generate_filename(&self, complaint: &Complaint) -> String {
        let slug = slugify(format!("{} {}", complaint.category, complaint.sub_category));
        let slug = if slug.len() > 50 {
            slug[..50].to_string()
        } else {
            slug
        };
        format!("{}--{}.md", complaint.id, slug)
    }

    /// Directory holding the attachment files of complaint `id`.
    pub fn attachment_dir(&self, id: &str) -> PathBuf {
        self.attachments_path.join(id)
    }

    /// Full path of the stored attachment, if the complaint has one.
    pub fn attachment_path(&self, complaint: &Complaint) -> Option<PathBuf> {
        complaint
            .attachment
            .as_ref()
            .map(|a| self.attachment_dir(&complaint.id).join(&a.stored_as))
    }

    pub fn find_file_by_id(&self, id: &str) -> Result<PathBuf> {
        validation::validate_id(id)?;
        let prefix = format!("{}--", id);

        if self.complaints_path.exists() {
            for entry in std::fs::read_dir(&self.complaints_path)? {
                let entry = entry?;
                let path = entry.path();

                if path.is_file() {
                    let Some(filename) = path.file_name() else {
                        continue;
                    };
                    if filename.to_string_lossy().starts_with(&prefix) {
                        return Ok(path);
                    }
                }
            }
        }

        Err(PlaintsError::NotFound(id.to_string()))
    }

    fn write_attachment(&self, complaint: &Complaint, bytes: &[u8]) -> Result<()> {
        let Some(path) = self.attachment_path(complaint) else {
            return Err(PlaintsError::Storage(
                "Attachment bytes given for a complaint without attachment metadata".to_string(),
            ));
        };
        let dir = self.attachment_dir(&complaint.id);
        std::fs::create_dir_all(&dir)?;
        atomic_write(&path, bytes)
    }

    fn remove_attachments(&self, id: &str) {
        let dir = self.attachment_dir(id);
        if !dir.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&dir) {
            tracing::warn!(id = %id, error = %e, "Failed to remove orphaned attachment");
        }
    }

    fn list_in_path(&self, path: &Path) -> Result<Vec<Complaint>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut complaints = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && path.extension().map(|e| e == "md").unwrap_or(false) {
                match std::fs::read_to_string(&path) {
                    Ok(content) => match parse_markdown(&content) {
                        Ok(complaint) => complaints.push(complaint),
                        Err(e) => tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse complaint file"
                        ),
                    },
                    Err(e) => tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read complaint file"
                    ),
                }
            }
        }

        complaints.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(complaints)
    }
}

impl ComplaintStore for ComplaintRepository {
    fn insert(&self, complaint: &Complaint, attachment: Option<&[u8]>) -> Result<()> {
        tracing::info!(
            id = %complaint.id,
            tracking_id = %complaint.tracking_id,
            category = %complaint.category,
            priority = %complaint.priority,
            "Storing complaint"
        );

        validation::validate_id(&complaint.id)?;
        std::fs::create_dir_all(&self.complaints_path)?;

        let file_path = self.complaints_path.join(self.generate_filename(complaint));
        if self.find_file_by_id(&complaint.id).is_ok() {
            return Err(PlaintsError::Storage(format!(
                "Complaint already exists: {}",
                complaint.id
            )));
        }

        let content = render_markdown(complaint)?;

        if let Some(bytes) = attachment {
            self.write_attachment(complaint, bytes)?;
        }

        if let Err(e) = atomic_write(&file_path, content.as_bytes()) {
            if attachment.is_some() {
                self.remove_attachments(&complaint.id);
            }
            return Err(e);
        }

        Ok(())
    }

    fn get(&self, id: &str) -> Result<Complaint> {
        let file_path = self.find_file_by_id(id)?;
        let content = std::fs::read_to_string(&file_path)?;
        parse_markdown(&content)
    }

    fn find_by_tracking_id(&self, tracking_id: &str) -> Result<Complaint> {
        let tracking_id = tracking_id.trim();
        self.list()?
            .into_iter()
            .find(|c| c.tracking_id.eq_ignore_ascii_case(tracking_id))
            .ok_or_else(|| PlaintsError::NotFound(tracking_id.to_string()))
    }

    fn list(&self) -> Result<Vec<Complaint>> {
        self.list_in_path(&self.complaints_path)
    }

    fn update(&self, complaint: &Complaint) -> Result<()> {
        tracing::info!(
            id = %complaint.id,
            status = %complaint.status,
            "Updating complaint"
        );

        let old_path = self.find_file_by_id(&complaint.id)?;
        let new_path = self.complaints_path.join(self.generate_filename(complaint));

        let content = render_markdown(complaint)?;
        atomic_write(&new_path, content.as_bytes())?;

        if old_path != new_path {
            std::fs::remove_file(&old_path)?;
        }

        Ok(())
    }
}
