//! Block letter font for the vitrine hero banner.

/// Glyph height in rows.
pub const HEIGHT: usize = 5;

/// Block letters A-Z (5 lines tall, 5 chars wide)
pub static LETTERS: [[&str; HEIGHT]; 26] = [
    // A
    [" ███ ", "█   █", "█████", "█   █", "█   █"],
    // B
    ["████ ", "█   █", "████ ", "█   █", "████ "],
    // C
    [" ████", "█    ", "█    ", "█    ", " ████"],
    // D
    ["████ ", "█   █", "█   █", "█   █", "████ "],
    // E
    ["█████", "█    ", "████ ", "█    ", "█████"],
    // F
    ["█████", "█    ", "████ ", "█    ", "█    "],
    // G
    [" ████", "█    ", "█  ██", "█   █", " ████"],
    // H
    ["█   █", "█   █", "█████", "█   █", "█   █"],
    // I
    ["█████", "  █  ", "  █  ", "  █  ", "█████"],
    // J
    ["█████", "   █ ", "   █ ", "█  █ ", " ██  "],
    // K
    ["█   █", "█  █ ", "███  ", "█  █ ", "█   █"],
    // L
    ["█    ", "█    ", "█    ", "█    ", "█████"],
    // M
    ["█   █", "██ ██", "█ █ █", "█   █", "█   █"],
    // N
    ["█   █", "██  █", "█ █ █", "█  ██", "█   █"],
    // O
    [" ███ ", "█   █", "█   █", "█   █", " ███ "],
    // P
    ["████ ", "█   █", "████ ", "█    ", "█    "],
    // Q
    [" ███ ", "█   █", "█ █ █", "█  █ ", " ██ █"],
    // R
    ["████ ", "█   █", "████ ", "█  █ ", "█   █"],
    // S
    [" ████", "█    ", " ███ ", "    █", "████ "],
    // T
    ["█████", "  █  ", "  █  ", "  █  ", "  █  "],
    // U
    ["█   █", "█   █", "█   █", "█   █", " ███ "],
    // V
    ["█   █", "█   █", "█   █", " █ █ ", "  █  "],
    // W
    ["█   █", "█   █", "█ █ █", "██ ██", "█   █"],
    // X
    ["█   █", " █ █ ", "  █  ", " █ █ ", "█   █"],
    // Y
    ["█   █", " █ █ ", "  █  ", "  █  ", "  █  "],
    // Z
    ["█████", "   █ ", "  █  ", " █   ", "█████"],
];

/// Word gap (3 chars wide)
pub const SPACE: [&str; HEIGHT] = ["   "; HEIGHT];

/// Hyphen
pub const HYPHEN: [&str; HEIGHT] = ["    ", "    ", "████", "    ", "    "];

/// Full stop
pub const PERIOD: [&str; HEIGHT] = ["  ", "  ", "  ", "  ", "██"];

/// Apostrophe
pub const APOSTROPHE: [&str; HEIGHT] = ["█", "█", " ", " ", " "];

/// Glyph for a character, case-insensitive. Unsupported characters have none.
pub fn glyph(c: char) -> Option<&'static [&'static str; HEIGHT]> {
    match c.to_ascii_uppercase() {
        letter @ 'A'..='Z' => LETTERS.get((letter as u8 - b'A') as usize),
        ' ' => Some(&SPACE),
        '-' => Some(&HYPHEN),
        '.' => Some(&PERIOD),
        '\'' => Some(&APOSTROPHE),
        _ => None,
    }
}

/// Build a block letter banner for `text`.
///
/// Glyphs are separated by one blank column. Characters without a glyph are
/// skipped. Returns [`HEIGHT`] lines of equal width, or an empty vector if
/// nothing in `text` can be drawn.
pub fn build_banner(text: &str) -> Vec<String> {
    let glyphs: Vec<_> = text.chars().filter_map(glyph).collect();
    if glyphs.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(HEIGHT);
    for row in 0..HEIGHT {
        let mut line = String::new();
        for (i, g) in glyphs.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(g[row]);
        }
        lines.push(line);
    }
    lines
}

/// Width in columns of the banner for `text`.
pub fn banner_width(text: &str) -> usize {
    let widths: Vec<usize> = text
        .chars()
        .filter_map(glyph)
        .map(|g| g[0].chars().count())
        .collect();
    match widths.len() {
        0 => 0,
        n => widths.iter().sum::<usize>() + n - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_uniform() {
        for (i, letter) in LETTERS.iter().enumerate() {
            for row in letter {
                assert_eq!(row.chars().count(), 5, "letter {}", (b'A' + i as u8) as char);
            }
        }
    }

    #[test]
    fn test_banner_lines_share_width() {
        let lines = build_banner("Alex Morgan");
        assert_eq!(lines.len(), HEIGHT);
        let width = banner_width("Alex Morgan");
        for line in &lines {
            assert_eq!(line.chars().count(), width);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(build_banner("abc"), build_banner("ABC"));
    }

    #[test]
    fn test_unsupported_characters_are_skipped() {
        assert_eq!(build_banner("A!B"), build_banner("AB"));
        assert!(build_banner("!?").is_empty());
        assert_eq!(banner_width(""), 0);
    }

    #[test]
    fn test_width_of_two_letters() {
        assert_eq!(banner_width("HI"), 11);
        assert_eq!(banner_width("A B"), 5 + 1 + 3 + 1 + 5);
    }
}
