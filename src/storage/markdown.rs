use crate::error::{PlaintsError, Result};
use crate::model::Complaint;
use serde_yaml::{Mapping, Value};

const FRONTMATTER_DELIMITER: &str = "---";
const BODY_FIELD: &str = "description";

/// Parses a complaint file: YAML frontmatter followed by the description as
/// the markdown body.
pub fn parse_markdown(content: &str) -> Result<Complaint> {
    let content = content.trim();

    if !content.starts_with(FRONTMATTER_DELIMITER) {
        return Err(PlaintsError::Parse(
            "Missing YAML frontmatter delimiter".to_string(),
        ));
    }

    let after_first = &content[FRONTMATTER_DELIMITER.len()..];
    let end_index = after_first
        .find(&format!("\n{}", FRONTMATTER_DELIMITER))
        .ok_or_else(|| PlaintsError::Parse("Missing closing frontmatter delimiter".to_string()))?;

    let yaml_content = after_first[..end_index].trim();
    let body_start = FRONTMATTER_DELIMITER.len() + end_index + 1 + FRONTMATTER_DELIMITER.len();
    let body = content[body_start..].trim().to_string();

    let mut header: Mapping = serde_yaml::from_str(yaml_content)?;
    header.insert(Value::from(BODY_FIELD), Value::from(body));

    Ok(serde_yaml::from_value(Value::Mapping(header))?)
}

pub fn render_markdown(complaint: &Complaint) -> Result<String> {
    let mut header = match serde_yaml::to_value(complaint)? {
        Value::Mapping(map) => map,
        _ => {
            return Err(PlaintsError::Parse(
                "Complaint did not serialize to a mapping".to_string(),
            ));
        }
    };
    header.remove(BODY_FIELD);

    let yaml = serde_yaml::to_string(&header)?;
    let yaml = yaml.trim();

    let mut output = String::new();
    output.push_str(FRONTMATTER_DELIMITER);
    output.push('\n');
    output.push_str(yaml);
    output.push('\n');
    output.push_str(FRONTMATTER_DELIMITER);
    output.push('\n');

    if !complaint.description.is_empty() {
        output.push('\n');
        output.push_str(&complaint.description);
        output.push('\n');
    }

    Ok(output)
}
