/// Rich-text rendering for detail views.
///
/// Every fragment goes through `ammonia`'s allow-list sanitizer, which drops
/// `<script>`/`<style>` elements with their contents, `on*` handler attributes
/// and non-http(s)/mailto URLs, while keeping structural tags (`p`, `ul`, `li`,
/// `strong`, `a`, headings, ...). The assembled markup is sanitized once more
/// before it is returned.
use crate::model::{InternshipRecord, RichText};

pub fn sanitize_fragment(html: &str) -> String {
    ammonia::clean(html)
}

/// Render an arbitrary JSON field to safe HTML. Strings and arrays of strings
/// are rendered; every other value yields an empty string.
pub fn to_safe_html(value: &serde_json::Value) -> String {
    render_rich_text(&RichText::from_value(value))
}

/// Render classified rich text to safe HTML. `Empty` renders as `""` so the
/// caller can omit the section entirely.
pub fn render_rich_text(text: &RichText) -> String {
    let assembled = match text {
        RichText::Empty => return String::new(),
        RichText::PlainText(paragraph) => paragraph_html(paragraph),
        RichText::Paragraphs(paragraphs) => paragraphs.iter().map(|p| paragraph_html(p)).collect(),
        RichText::List(items) => {
            let entries: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", sanitize_fragment(item)))
                .collect();
            format!("<ul>{entries}</ul>")
        }
        RichText::RawHtml(html) => {
            let cleaned = sanitize_fragment(html);
            if cleaned.trim().is_empty() {
                return String::new();
            }
            // Markup reduced to bare text renders like plain text, so feeding
            // the output back in classifies it as markup again.
            if cleaned.contains('<') {
                cleaned
            } else {
                format!("<p>{cleaned}</p>")
            }
        }
    };
    sanitize_fragment(&assembled)
}

fn paragraph_html(paragraph: &str) -> String {
    format!("<p>{}</p>", sanitize_fragment(paragraph))
}

/// One titled, sanitized block of a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub heading: &'static str,
    pub html: String,
}

/// The long-form sections of a record in display order, skipping empty ones.
pub fn render_detail(record: &InternshipRecord) -> Vec<RenderedSection> {
    [
        ("Description", &record.description),
        ("Objectives", &record.objectives),
        ("Scope", &record.scope),
        ("Deliverables", &record.deliverables),
    ]
    .into_iter()
    .filter_map(|(heading, text)| {
        let html = render_rich_text(text);
        (!html.is_empty()).then_some(RenderedSection { heading, html })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::loader::Catalog;

    #[test]
    fn empty_inputs_render_nothing() {
        assert_eq!(to_safe_html(&json!(null)), "");
        assert_eq!(to_safe_html(&json!("")), "");
        assert_eq!(to_safe_html(&json!([])), "");
        assert_eq!(to_safe_html(&json!({"a": 1})), "");
        assert_eq!(to_safe_html(&json!(true)), "");
    }

    #[test]
    fn strips_scripts() {
        let html = to_safe_html(&json!("<script>alert(1)</script>"));
        assert!(!html.to_lowercase().contains("<script"));
        assert!(!html.contains("alert(1)"));
    }

    #[test]
    fn strips_handlers_and_javascript_urls() {
        let html = to_safe_html(&json!(
            r#"<p onclick="steal()">Hi <a href="javascript:alert(1)">there</a> <img src=x onerror="boom()"></p>"#
        ));
        assert!(html.contains("<p>"));
        assert!(!html.contains("onclick"));
        assert!(!html.contains("onerror"));
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(html.contains("there"));
    }

    #[test]
    fn keeps_benign_markup() {
        let html = to_safe_html(&json!("<p>Build <strong>secure</strong> apps</p><ul><li>one</li></ul>"));
        assert_eq!(html, "<p>Build <strong>secure</strong> apps</p><ul><li>one</li></ul>");
    }

    #[test]
    fn arrays_become_one_list() {
        let html = to_safe_html(&json!(["a", "b"]));
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(html.matches("<ul>").count(), 1);
    }

    #[test]
    fn list_items_are_sanitized_individually() {
        let html = to_safe_html(&json!(["<script>x()</script>safe", "<em>ok</em>"]));
        assert_eq!(html, "<ul><li>safe</li><li><em>ok</em></li></ul>");
    }

    #[test]
    fn blank_lines_split_paragraphs() {
        let html = to_safe_html(&json!("Para one.\n\nPara two."));
        assert_eq!(html, "<p>Para one.</p><p>Para two.</p>");
    }

    #[test]
    fn markup_without_tags_is_wrapped_as_paragraph() {
        assert_eq!(to_safe_html(&json!("a < b")), "<p>a &lt; b</p>");
        assert_eq!(to_safe_html(&json!("x > y")), "<p>x &gt; y</p>");
    }

    #[test]
    fn plain_text_is_escaped() {
        assert_eq!(to_safe_html(&json!("R&D team")), "<p>R&amp;D team</p>");
    }

    #[test]
    fn sanitizing_is_a_fixed_point() {
        for input in [
            json!("Para one.\n\nPara two."),
            json!(["a", "<strong>b</strong>"]),
            json!(r#"<p>Visit <a href="https://example.com">us</a><script>x()</script></p>"#),
            json!("Tom & Jerry"),
            json!("a < b"),
            json!("x > y"),
            json!("Duration > 3 months"),
        ] {
            let once = to_safe_html(&input);
            let twice = to_safe_html(&json!(once.clone()));
            assert_eq!(once, twice, "input {input}");
            assert!(!twice.contains("<script"));
        }
    }

    #[test]
    fn detail_sections_follow_display_order() {
        let catalog = Catalog::bundled().unwrap();
        let record = catalog.get("PFE-26-DEV1").unwrap();
        let sections = render_detail(record);
        let headings: Vec<&str> = sections.iter().map(|s| s.heading).collect();
        assert_eq!(headings, vec!["Objectives", "Scope", "Deliverables"]);
        assert!(sections.iter().all(|s| s.html.starts_with("<p>")));
    }
}
