/// Turning the backend's summary text into display blocks
use regex::Regex;
use std::sync::OnceLock;

/// One rendered line of a summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryBlock {
    Paragraph(String),
    ListItem(String),
}

/// Display form of a summary
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryMarkup {
    blocks: Vec<SummaryBlock>,
}

impl SummaryMarkup {
    pub fn blocks(&self) -> &[SummaryBlock] {
        &self.blocks
    }

    /// A summary with at least one bullet is wrapped in a list as a whole
    pub fn is_list(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, SummaryBlock::ListItem(_)))
    }

    #[cfg(test)]
    pub fn list_items(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                SummaryBlock::ListItem(text) => Some(text.as_str()),
                SummaryBlock::Paragraph(_) => None,
            })
            .collect()
    }

    /// Render as an HTML fragment. Text is escaped.
    pub fn to_html(&self) -> String {
        let inner: String = self
            .blocks
            .iter()
            .map(|block| match block {
                SummaryBlock::ListItem(text) => format!("<li>{}</li>", escape_html(text)),
                SummaryBlock::Paragraph(text) => format!("<p>{}</p>", escape_html(text)),
            })
            .collect();

        if self.is_list() {
            format!("<ul>{}</ul>", inner)
        } else {
            inner
        }
    }
}

/// Split a summary into paragraphs and bullet items
///
/// Algorithm:
/// 1. Split the text on '\n'
/// 2. Trim each line; if it starts with a bullet marker ("-", "•", or the
///    mis-decoded "â€¢" some pages produce), strip the marker and the
///    whitespace around it → list item
/// 3. Otherwise keep the line untouched → paragraph
///
/// Examples:
/// - "- a\n- b" → [ListItem("a"), ListItem("b")], rendered inside a list
/// - "Intro\n• point" → [Paragraph("Intro"), ListItem("point")], also a list
/// - "One.\nTwo." → two paragraphs, no list
pub fn format_summary(text: &str) -> SummaryMarkup {
    let blocks = text
        .split('\n')
        .map(|line| match bullet_text(line) {
            Some(item) => SummaryBlock::ListItem(item.to_string()),
            None => SummaryBlock::Paragraph(line.to_string()),
        })
        .collect();

    SummaryMarkup { blocks }
}

/// Text of a bullet line with its marker removed, or None for other lines
fn bullet_text(line: &str) -> Option<&str> {
    static BULLET: OnceLock<Option<Regex>> = OnceLock::new();

    let bullet = BULLET
        .get_or_init(|| Regex::new(r"^(?:-|•|â€¢)\s*(.*)$").ok())
        .as_ref()?;

    bullet
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn escape_html(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
        out
    })
}
