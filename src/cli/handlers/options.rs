use crate::model::OptionKind;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_options(
    ctx: &CommandContext,
    kind: Option<OptionKind>,
    parent: Option<String>,
    json: bool,
) -> Result<()> {
    let resolver = ctx.resolver();
    let resolved = match kind {
        None => resolver.list_all(),
        Some(OptionKind::SubCategory) => {
            let Some(parent) = parent.as_deref() else {
                anyhow::bail!("--parent is required when listing subcategories");
            };
            resolver.list_subcategories(parent)
        }
        Some(kind) => resolver.list(kind, None),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved.options)?);
        return Ok(());
    }

    if resolved.is_fallback() {
        eprintln!(
            "{} option store unavailable, showing built-in values",
            "warning:".yellow()
        );
    }
    if resolved.is_empty() {
        println!("No options found.");
        return Ok(());
    }

    for option in &resolved.options {
        let kind = format!("{:<12}", option.kind.to_string());
        let mut line = format!("{} {}", kind.blue(), option.value);
        if let Some(ref parent) = option.parent_category {
            line.push_str(&format!(" {}", format!("({})", parent).dimmed()));
        }
        if let Some(ref code) = option.code {
            line.push_str(&format!(" {}", format!("[{}]", code).cyan()));
        }
        println!("{}", line);
    }
    Ok(())
}
