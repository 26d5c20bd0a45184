//! Heading detection and slug generation.
//!
//! The renderer (heading `id` attributes) and the inner-link extractor
//! (anchor targets) both go through [`slug`], so the two always agree.

/// Headings cap at this level; deeper `#` runs clamp to it.
pub const MAX_HEADING_LEVEL: u8 = 7;

/// Generate the anchor id for a heading title: every letter lowercased,
/// every space replaced with `-`, all other characters passed through
/// unchanged (no normalization or punctuation stripping).
///
/// # Examples
///
/// ```rust
/// use quern_markdown::slug;
///
/// assert_eq!(slug("Hello World"), "hello-world");
/// assert_eq!(slug("C# 12.0!"), "c#-12.0!");
/// ```
pub fn slug(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            let mapped = if c == ' ' { '-' } else { c };
            mapped.to_lowercase()
        })
        .collect()
}

/// Detect a heading line: 1–[`MAX_HEADING_LEVEL`] leading `#` characters
/// followed by the title. Returns the level and the trimmed title text.
///
/// # Examples
///
/// ```rust
/// use quern_markdown::detect_heading;
///
/// assert_eq!(detect_heading("## Setup"), Some((2, "Setup")));
/// assert_eq!(detect_heading("plain text"), None);
/// ```
pub fn detect_heading(line: &str) -> Option<(u8, &str)> {
    let mut level = 0u8;
    let mut rest = line;
    while let Some(stripped) = rest.strip_prefix('#') {
        level += 1;
        rest = stripped;
        if level == MAX_HEADING_LEVEL {
            break;
        }
    }
    if level == 0 {
        return None;
    }
    Some((level, rest.trim()))
}
