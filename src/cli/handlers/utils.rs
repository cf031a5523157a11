use crate::error::PlaintsError;
use crate::model::{Complaint, ComplaintStatus, Priority};
use crate::storage::ComplaintStore;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

/// Looks a complaint up by tracking ID first, then by internal ID.
pub fn find_complaint(ctx: &CommandContext, id: &str) -> Result<Complaint> {
    match ctx.complaints.find_by_tracking_id(id) {
        Ok(complaint) => Ok(complaint),
        Err(PlaintsError::NotFound(_)) => Ok(ctx.complaints.get(id)?),
        Err(e) => Err(e.into()),
    }
}

/// Format status with color coding
pub fn format_status(status: ComplaintStatus) -> colored::ColoredString {
    match status {
        ComplaintStatus::Open => "open".white(),
        ComplaintStatus::InProgress => "in-progress".yellow(),
        ComplaintStatus::Resolved => "resolved".green(),
        ComplaintStatus::Rejected => "rejected".red(),
    }
}

/// Format priority with color coding
pub fn format_priority(priority: Priority) -> colored::ColoredString {
    match priority {
        Priority::Urgent => "urgent".red().bold(),
        Priority::High => "high".red(),
        Priority::Medium => "medium".white(),
        Priority::Low => "low".dimmed(),
    }
}

/// Print a single complaint with details
pub fn print_complaint(complaint: &Complaint) {
    println!(
        "{} {}",
        complaint.tracking_id.cyan().bold(),
        format!("({})", complaint.id).dimmed()
    );
    println!("Status:     {}", format_status(complaint.status));
    println!("Priority:   {}", format_priority(complaint.priority));
    println!(
        "Category:   {} / {}",
        complaint.category.blue(),
        complaint.display_sub_category().blue()
    );
    println!("Department: {}", complaint.department);
    println!("Email:      {}", complaint.email);
    if let Some(ref attachment) = complaint.attachment {
        println!(
            "Attachment: {} ({} bytes)",
            attachment.file_name.magenta(),
            attachment.size
        );
    }
    println!(
        "Created:    {}",
        complaint
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .dimmed()
    );
    println!(
        "Updated:    {}",
        complaint
            .updated_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .dimmed()
    );

    if !complaint.description.is_empty() {
        println!();
        println!("{}", complaint.description);
    }
}

/// Print a list of complaints (compact format)
pub fn print_complaint_list(complaints: &[Complaint]) {
    if complaints.is_empty() {
        println!("No complaints found.");
        return;
    }

    for complaint in complaints {
        println!(
            "{} {} [{}] {} / {}",
            complaint.tracking_id.cyan(),
            format_status(complaint.status),
            format_priority(complaint.priority),
            complaint.category,
            complaint.display_sub_category()
        );
    }
}
