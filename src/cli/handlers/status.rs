use crate::model::ComplaintStatus;
use crate::storage::ComplaintStore;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{find_complaint, format_status};

pub fn handle_status(
    ctx: &CommandContext,
    id: String,
    new_status: ComplaintStatus,
    json: bool,
) -> Result<()> {
    let mut complaint = find_complaint(ctx, &id)?;
    complaint.set_status(new_status);
    ctx.complaints.update(&complaint)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&complaint)?);
    } else {
        println!(
            "{} {} is now {}",
            "Updated".green(),
            complaint.tracking_id.cyan(),
            format_status(new_status)
        );
    }
    Ok(())
}
