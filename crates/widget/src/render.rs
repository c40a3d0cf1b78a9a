//! Text-to-markup rendering for chat bubbles.
//!
//! Bubble text is plain content. The only markup the renderer ever produces is
//! an anchor around `http(s)://` runs, which stop at the next whitespace.

use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://\S+").expect("URL_PATTERN is a valid static regex pattern")
});

/// One run of bubble text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment<'a> {
    Text(&'a str),
    Link(&'a str),
}

/// Splits text into plain and link runs, preserving every byte in order.
pub fn fragments(text: &str) -> Vec<Fragment<'_>> {
    let mut parts = Vec::new();
    let mut cursor = 0;

    for found in URL_PATTERN.find_iter(text) {
        if found.start() > cursor {
            parts.push(Fragment::Text(&text[cursor..found.start()]));
        }
        parts.push(Fragment::Link(found.as_str()));
        cursor = found.end();
    }

    if cursor < text.len() {
        parts.push(Fragment::Text(&text[cursor..]));
    }

    parts
}

/// Renders bubble text as HTML with escaped content and auto-linked URLs.
pub fn to_html(text: &str) -> String {
    let mut html = String::with_capacity(text.len());
    for fragment in fragments(text) {
        match fragment {
            Fragment::Text(plain) => html.push_str(&escape_html(plain)),
            Fragment::Link(url) => {
                let url = escape_html(url);
                html.push_str(&format!(
                    "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\" \
                     style=\"color:inherit; text-decoration:underline;\">{url}</a>"
                ));
            }
        }
    }
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
