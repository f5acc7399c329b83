//! Percentage figures (`42%`, `12.5 %`) inside digest text.

use crate::digest::item::ScoredItem;
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn percent_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?\s*%").expect("percent pattern is valid"))
}

/// Byte ranges of every percentage in `text`.
pub fn percent_spans(text: &str) -> Vec<Range<usize>> {
    percent_regex().find_iter(text).map(|m| m.range()).collect()
}

/// Percentage spans for each text field of an item, annotated independently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemHighlights {
    pub headline: Vec<Range<usize>>,
    pub subheader: Vec<Range<usize>>,
    pub blurb: Vec<Range<usize>>,
}

pub fn annotate(item: &ScoredItem) -> ItemHighlights {
    ItemHighlights {
        headline: percent_spans(&item.headline),
        subheader: percent_spans(&item.subheader),
        blurb: percent_spans(&item.blurb),
    }
}

/// HTML-escape `text` and wrap each percentage in `<span class="pct">`.
pub fn highlight_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for span in percent_spans(text) {
        out.push_str(&escape_html(&text[last..span.start]));
        out.push_str("<span class=\"pct\">");
        out.push_str(&escape_html(&text[span.clone()]));
        out.push_str("</span>");
        last = span.end;
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
