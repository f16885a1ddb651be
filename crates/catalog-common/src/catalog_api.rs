/// Request and response types for the catalog tool surface.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchInternshipsParams {
    /// Free-text query matched as a case-insensitive substring against title,
    /// company, tags, excerpt and location. Empty matches everything.
    #[serde(default)]
    pub query: String,
    /// Domain filter: "All" (default) or one value returned by `list_domains`.
    pub domain: Option<String>,
    /// Maximum number of cards to return (default: all matches).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetInternshipParams {
    /// Listing identifier such as "PFE-26-DEV1".
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RenderRichTextParams {
    /// A string (plain text, blank-line separated paragraphs, or raw HTML) or
    /// an array of strings rendered as a bullet list. Other values render empty.
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DomainListResponse {
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextSpan {
    pub text: String,
    /// True when this span is an occurrence of the query.
    pub matched: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InternshipCard {
    pub id: String,
    pub title: String,
    pub company: String,
    pub domain: String,
    pub level: String,
    pub location: String,
    pub tags: Vec<String>,
    pub id_spans: Vec<TextSpan>,
    pub title_spans: Vec<TextSpan>,
    pub location_spans: Vec<TextSpan>,
    pub excerpt_spans: Vec<TextSpan>,
    /// Staggered reveal delay for this card, in milliseconds.
    pub reveal_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchInternshipsResponse {
    pub query: String,
    pub domain: String,
    pub total: usize,
    /// "1 result" or "N results".
    pub label: String,
    pub results: Vec<InternshipCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DetailSection {
    pub heading: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InternshipDetailResponse {
    pub id: String,
    pub title: String,
    pub company: String,
    pub domain: String,
    pub subdomain: String,
    pub location: String,
    pub duration: String,
    pub level: String,
    pub tags: Vec<String>,
    /// Sanitized HTML sections; empty sections are omitted.
    pub sections: Vec<DetailSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderRichTextResponse {
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CountdownInfo {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub expired: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApplicationStatusResponse {
    pub open: bool,
    /// Deadline in `YYYY-MM-DDTHH:MM:SS` local form.
    pub deadline: String,
    pub countdown: CountdownInfo,
    pub listings: usize,
}
