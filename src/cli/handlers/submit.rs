use crate::intake::{Submission, Upload};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use super::CommandContext;
use super::utils::format_priority;

/// Parameters for submit operation
pub struct SubmitParams {
    pub email: String,
    pub department: String,
    pub category: String,
    pub sub_category: String,
    pub sub_other: Option<String>,
    pub description: String,
    pub file: Option<PathBuf>,
    pub json: bool,
}

pub fn handle_submit(ctx: &CommandContext, params: SubmitParams) -> Result<()> {
    let attachment = match params.file {
        Some(ref path) => Some(read_upload(path)?),
        None => None,
    };

    let submission = Submission {
        email: params.email,
        department: params.department,
        category: params.category,
        sub_category: params.sub_category,
        sub_other: params.sub_other,
        description: params.description,
        priority: None,
        attachment,
    };

    let complaint = ctx.intake().submit(submission)?;

    if params.json {
        println!("{}", serde_json::to_string_pretty(&complaint)?);
    } else {
        println!(
            "{} {} [{}]",
            "Submitted".green(),
            complaint.tracking_id.cyan().bold(),
            format_priority(complaint.priority)
        );
        println!("Keep this tracking ID to follow up on your complaint.");
    }
    Ok(())
}

fn read_upload(path: &PathBuf) -> Result<Upload> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read attachment {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Upload {
        file_name,
        content_type: None,
        bytes,
    })
}
