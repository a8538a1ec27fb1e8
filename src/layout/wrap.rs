use crate::foundation::error::CalwallResult;

/// Greedy word-wrap of `text` into lines whose measured width stays within `max_width`.
///
/// Explicit newlines split paragraphs first and every paragraph wraps on its own; an empty
/// paragraph yields one empty line. A single word wider than `max_width` is kept whole on its
/// own line and overflows.
pub fn wrap_text<F>(text: &str, max_width: f64, mut measure: F) -> CalwallResult<Vec<String>>
where
    F: FnMut(&str) -> CalwallResult<f64>,
{
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut words = paragraph.split_whitespace();
        let Some(first) = words.next() else {
            lines.push(String::new());
            continue;
        };

        let mut current = first.to_string();
        for word in words {
            let candidate = format!("{current} {word}");
            if measure(&candidate)? <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    Ok(lines)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
