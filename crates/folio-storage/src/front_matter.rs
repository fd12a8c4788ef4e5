//! Front matter parsing.
//!
//! A content unit may start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Introduction
//! description: Where it all begins
//! order: 1
//! ---
//! # Introduction
//! ```
//!
//! Units without an opening fence have empty front matter and the whole text
//! as their body.
//!
//! Field values are read leniently: a mistyped field counts as missing and
//! is defaulted later. Only YAML that does not parse, or is not a mapping,
//! is rejected.

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// Fence line opening and closing a front matter block.
const FENCE: &str = "---";

/// Metadata fields recognized in front matter.
///
/// All fields are optional; defaults are applied by
/// [`RawChapter::meta`](crate::RawChapter::meta). Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Chapter title.
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Short chapter summary.
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    /// Position in the locale's chapter sequence.
    ///
    /// Integers and integer strings (`"3"`) are accepted.
    #[serde(deserialize_with = "lenient_order")]
    pub order: Option<i64>,
}

/// Read a text field; numbers and booleans are stringified, other values are missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Read the order field; anything but an integer or integer string is missing.
fn lenient_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Error for front matter that cannot be interpreted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// Opening fence without a closing one.
    #[error("front matter is not closed by a `---` line")]
    Unterminated,
    /// YAML is malformed or not a mapping.
    #[error("invalid front matter: {0}")]
    Parse(String),
}

/// Split a content unit into front matter and body.
///
/// The body starts on the line after the closing fence. A leading byte order
/// mark is ignored.
///
/// # Errors
///
/// Returns [`MetadataError`] when the block is unterminated or its YAML
/// cannot be deserialized into [`FrontMatter`].
pub fn parse_chapter(text: &str) -> Result<(FrontMatter, &str), MetadataError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(rest) = strip_opening_fence(text) else {
        return Ok((FrontMatter::default(), text));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_fence(line) {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((parse_yaml(yaml)?, body));
        }
        offset += line.len();
    }

    Err(MetadataError::Unterminated)
}

/// Return the text after the opening fence line, if the text starts with one.
fn strip_opening_fence(text: &str) -> Option<&str> {
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    is_fence(first).then_some(rest)
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

fn parse_yaml(yaml: &str) -> Result<FrontMatter, MetadataError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| MetadataError::Parse(e.to_string()))?;
    match value {
        // Comment-only block
        Value::Null => Ok(FrontMatter::default()),
        Value::Mapping(_) => {
            serde_yaml::from_value(value).map_err(|e| MetadataError::Parse(e.to_string()))
        }
        _ => Err(MetadataError::Parse("front matter is not a mapping".to_owned())),
    }
}
