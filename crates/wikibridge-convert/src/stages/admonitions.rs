//! Admonition rewriting: `> [!kind] title` callout blocks to plain quote
//! blocks with a bolded title line.
//!
//! The target dialect renders `[!kind]` markers literally, so the marker
//! line becomes `> **Title**` (explicit title, or the kind capitalized)
//! and the remaining lines stay quote lines.

use regex::Regex;
use std::sync::LazyLock;

/// Matches `> [!TYPE]`, with optional fold marker and title.
static ADMONITION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*>\s*\[!(?P<kind>\w+)\][+-]?\s*(?P<title>.*?)\s*$").unwrap());

/// Matches quote continuation lines.
static QUOTE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*>\s?(?P<body>.*)$").unwrap());

fn capitalize(kind: &str) -> String {
    let lower = kind.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => lower,
    }
}

/// Rewrite admonition blocks into plain quote blocks.
pub fn rewrite_admonitions(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_block = false;

    for line in text.lines() {
        if let Some(caps) = ADMONITION_HEADER.captures(line) {
            let title = caps.name("title").map(|m| m.as_str()).unwrap_or("");
            let title = if title.is_empty() {
                capitalize(&caps["kind"])
            } else {
                title.to_string()
            };
            out.push(format!("> **{title}**"));
            in_block = true;
            continue;
        }

        if in_block {
            if let Some(caps) = QUOTE_LINE.captures(line) {
                out.push(format!("> {}", &caps["body"]));
                continue;
            }
            in_block = false;
        }
        out.push(line.to_string());
    }

    let mut result = out.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    result
}
