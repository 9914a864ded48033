//! Utilities - text wrapping and truncation in character columns

/// Greedy word wrap used for the description block.
///
/// Breaks at the last space at or before `width`; a word longer than the line
/// is cut hard at `width`. Always returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    let mut lines = Vec::new();
    let mut start = 0;

    while chars.len() - start > width {
        let window = &chars[start..=start + width];
        match window.iter().rposition(|c| *c == ' ') {
            Some(space) => {
                lines.push(chars[start..start + space].iter().collect());
                start += space + 1;
            }
            None => {
                lines.push(chars[start..start + width].iter().collect());
                start += width;
            }
        }
    }

    lines.push(chars[start..].iter().collect());
    lines
}

/// First `width` characters of `text`
pub fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
