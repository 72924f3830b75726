use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("HTML tag pattern is valid"));

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Strips markup from helpdesk text and decodes HTML entities.
pub fn clean_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let stripped = HTML_TAG.replace_all(content, "");
    html_escape::decode_html_entities(&stripped).trim().to_string()
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// GitHub-style heading slug restricted to ASCII word characters.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut separator_pending = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if separator_pending && !slug.is_empty() {
                slug.push('-');
            }
            separator_pending = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '_' || ch == '-' {
            separator_pending = true;
        }
    }

    slug
}

/// Escapes a value for a double-quoted front-matter scalar.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

pub fn table_cell(value: &str) -> Cow<'_, str> {
    if value.contains('|') || value.contains('\n') {
        Cow::Owned(value.replace('|', "\\|").replace('\n', " "))
    } else {
        Cow::Borrowed(value)
    }
}
