use anyhow::Result;

use super::CommandContext;
use super::utils::{find_complaint, print_complaint};

pub fn handle_show(ctx: &CommandContext, id: String, json: bool) -> Result<()> {
    let complaint = find_complaint(ctx, &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&complaint)?);
    } else {
        print_complaint(&complaint);
    }
    Ok(())
}
