use serde::{Deserialize, Serialize};

/// Domain label for records without one.
pub const OTHER_DOMAIN: &str = "Other";
/// Sentinel domain filter matching every record.
pub const ALL_DOMAINS: &str = "All";

/// One internship listing from the catalog (e.g. "PFE-26-DEV1").
///
/// Missing descriptive fields deserialize to empty strings and missing tags to
/// an empty list. The long-form fields are classified into [`RichText`] when the
/// record is loaded, not on every render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternshipRecord {
    /// Listing identifier, unique across the catalog.
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub subdomain: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub level: String,
    /// Display order matters: cards show only the first few.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Short card blurb.
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, deserialize_with = "rich_text")]
    pub description: RichText,
    #[serde(default, alias = "Objectives", deserialize_with = "rich_text")]
    pub objectives: RichText,
    #[serde(default, alias = "Scope", deserialize_with = "rich_text")]
    pub scope: RichText,
    #[serde(
        default,
        alias = "Deliverables",
        alias = "Delivrables",
        alias = "delivrables",
        deserialize_with = "rich_text"
    )]
    pub deliverables: RichText,
}

impl InternshipRecord {
    /// The domain used for grouping and filtering.
    pub fn domain_label(&self) -> &str {
        if self.domain.is_empty() {
            OTHER_DOMAIN
        } else {
            &self.domain
        }
    }

    /// Card blurb: the excerpt, falling back to the description's first
    /// paragraph or item. Raw markup is returned as written.
    pub fn summary(&self) -> &str {
        if !self.excerpt.is_empty() {
            return &self.excerpt;
        }
        match &self.description {
            RichText::Empty => "",
            RichText::PlainText(text) | RichText::RawHtml(text) => text,
            RichText::Paragraphs(parts) | RichText::List(parts) => {
                parts.first().map(String::as_str).unwrap_or_default()
            }
        }
    }
}

/// Author-supplied long-form content, classified once at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RichText {
    #[default]
    Empty,
    /// A single paragraph of plain text.
    PlainText(String),
    /// Plain text split on blank lines.
    Paragraphs(Vec<String>),
    /// Bullet items.
    List(Vec<String>),
    /// Author-embedded markup. Classified by the presence of `<` or `>`, which
    /// also catches plain prose such as "a < b".
    RawHtml(String),
}

impl RichText {
    /// Classify a raw JSON field. Anything other than a string or an array is
    /// treated as empty; array items that are not strings are stringified.
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Self::from_text(text),
            serde_json::Value::Array(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect();
                if items.is_empty() {
                    Self::Empty
                } else {
                    Self::List(items)
                }
            }
            _ => Self::Empty,
        }
    }

    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::Empty;
        }
        if text.contains('<') || text.contains('>') {
            return Self::RawHtml(text.to_string());
        }
        let mut paragraphs = split_paragraphs(text);
        match paragraphs.len() {
            0 => Self::Empty,
            1 => Self::PlainText(paragraphs.remove(0)),
            _ => Self::Paragraphs(paragraphs),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Split on runs of two or more newlines (blank lines may contain spaces).
fn split_paragraphs(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in normalized.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n").trim().to_string());
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n").trim().to_string());
    }
    paragraphs
}

fn rich_text<'de, D>(deserializer: D) -> Result<RichText, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(RichText::from_value(&value))
}
