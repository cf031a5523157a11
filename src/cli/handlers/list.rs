use crate::cli::commands::{PriorityArg, StatusArg};
use crate::model::{ComplaintStatus, Priority};
use crate::storage::ComplaintStore;
use anyhow::Result;

use super::CommandContext;
use super::utils::print_complaint_list;

/// Parameters for list operation
pub struct ListParams {
    pub email: Option<String>,
    pub status: Option<StatusArg>,
    pub priority: Option<PriorityArg>,
    pub open: bool,
    pub json: bool,
}

pub fn handle_list(ctx: &CommandContext, params: ListParams) -> Result<()> {
    let mut complaints = match params.email {
        Some(ref email) => ctx.complaints.list_by_email(email)?,
        None => ctx.complaints.list()?,
    };

    // Apply filters
    if let Some(s) = params.status {
        let filter_status: ComplaintStatus = s.into();
        complaints.retain(|c| c.status == filter_status);
    }
    if let Some(p) = params.priority {
        let filter_priority: Priority = p.into();
        complaints.retain(|c| c.priority == filter_priority);
    }

    if params.open {
        complaints.retain(|c| c.is_open());
    }

    if params.json {
        println!("{}", serde_json::to_string_pretty(&complaints)?);
    } else {
        print_complaint_list(&complaints);
    }
    Ok(())
}
