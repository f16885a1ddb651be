/// Catalog queries: domain listing, literal substring search, and match
/// highlighting.
///
/// All functions are pure and total. Results keep the catalog's original order;
/// nothing is ranked or re-sorted.
use crate::model::{InternshipRecord, ALL_DOMAINS};

/// Cards show at most this many tags.
pub const CARD_TAG_LIMIT: usize = 12;

/// A run of text, flagged when it is an occurrence of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub text: String,
    pub matched: bool,
}

impl HighlightSpan {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: true,
        }
    }
}

/// `"All"` followed by each distinct domain in first-seen order. Records with
/// no domain are listed as `"Other"`.
pub fn list_domains(records: &[InternshipRecord]) -> Vec<String> {
    let mut domains = vec![ALL_DOMAINS.to_string()];
    for record in records {
        let label = record.domain_label();
        if !domains[1..].iter().any(|d| d == label) {
            domains.push(label.to_string());
        }
    }
    domains
}

/// Lower-cased text the query is matched against: title, company, tags,
/// excerpt and location joined by single spaces.
pub fn haystack(record: &InternshipRecord) -> String {
    let tags = record.tags.join(" ");
    [
        record.title.as_str(),
        record.company.as_str(),
        tags.as_str(),
        record.excerpt.as_str(),
        record.location.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Records matching both the text query and the domain filter, in catalog order.
///
/// An empty query matches everything; otherwise the query must occur verbatim
/// (ignoring case) in the record's [`haystack`]. The filter is `"All"` or an
/// exact domain label.
pub fn search<'a>(
    records: &'a [InternshipRecord],
    query: &str,
    domain_filter: &str,
) -> Vec<&'a InternshipRecord> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|record| domain_filter == ALL_DOMAINS || record.domain_label() == domain_filter)
        .filter(|record| query.is_empty() || haystack(record).contains(&query))
        .collect()
}

/// Split `text` into plain and matched spans for every non-overlapping,
/// case-insensitive occurrence of `query`, scanning left to right.
///
/// Matched spans keep the original casing of `text`. With an empty query or no
/// occurrence the result is the whole text as a single plain span.
pub fn highlight(text: &str, query: &str) -> Vec<HighlightSpan> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return vec![HighlightSpan::plain(text)];
    }

    // Lower-casing can change byte lengths, so map each byte of the lowered
    // text back to the original char that produced it (start and end offsets).
    let mut lowered = String::with_capacity(text.len());
    let mut char_start: Vec<usize> = Vec::with_capacity(text.len());
    let mut char_end: Vec<usize> = Vec::with_capacity(text.len());
    for (offset, ch) in text.char_indices() {
        let before = lowered.len();
        lowered.extend(ch.to_lowercase());
        let produced = lowered.len() - before;
        char_start.extend(std::iter::repeat(offset).take(produced));
        char_end.extend(std::iter::repeat(offset + ch.len_utf8()).take(produced));
    }

    let mut spans = Vec::new();
    let mut copied = 0;
    let mut cursor = 0;
    while let Some(found) = lowered[cursor..].find(&needle) {
        let start = cursor + found;
        let end = start + needle.len();
        cursor = end;
        // A match touching part of a char's lower-case expansion covers the
        // whole source char.
        let (orig_start, orig_end) = (char_start[start], char_end[end - 1]);
        if orig_start < copied {
            continue;
        }
        if orig_start > copied {
            spans.push(HighlightSpan::plain(&text[copied..orig_start]));
        }
        spans.push(HighlightSpan::marked(&text[orig_start..orig_end]));
        copied = orig_end;
    }

    if copied < text.len() || spans.is_empty() {
        spans.push(HighlightSpan::plain(&text[copied..]));
    }
    spans
}

/// The tags shown on a card: the first `limit`, in insertion order.
pub fn card_tags(record: &InternshipRecord, limit: usize) -> &[String] {
    &record.tags[..record.tags.len().min(limit)]
}

pub fn result_count_label(count: usize) -> String {
    if count == 1 {
        "1 result".to_string()
    } else {
        format!("{count} results")
    }
}
