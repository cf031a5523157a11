use crate::taxonomy::derive_priority;
use anyhow::Result;

use super::utils::format_priority;

pub fn handle_priority(category: String, sub_category: String) -> Result<()> {
    let priority = derive_priority(&category, &sub_category);
    println!("{} / {}: {}", category, sub_category, format_priority(priority));
    Ok(())
}
