//! Color code handling
//!
//! Two output dialects are supported: section-sign legacy codes (`§a`) and
//! MiniMessage tags (`<green>`). Input may use either `&` or `§` as the code
//! prefix.

use serde::{Deserialize, Serialize};

/// Output dialect for color codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// `&a` becomes `§a`
    #[default]
    Legacy,
    /// Legacy codes become MiniMessage tags
    MiniMessage,
}

impl ColorMode {
    /// Translate color codes in `text` into this dialect
    pub fn apply(&self, text: &str) -> String {
        match self {
            ColorMode::Legacy => translate_legacy(text),
            ColorMode::MiniMessage => legacy_to_mini(text),
        }
    }
}

/// Section sign used by the client for formatting codes
pub const SECTION: char = '§';

const LEGACY_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Replace `&x` by `§x` wherever `x` is a valid formatting code
pub fn translate_legacy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(next) if c == '&' && LEGACY_CODES.contains(*next) => {
                out.push(SECTION);
                out.push(next.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

fn mini_tag(code: char) -> Option<&'static str> {
    let tag = match code.to_ascii_lowercase() {
        '0' => "black",
        '1' => "dark_blue",
        '2' => "dark_green",
        '3' => "dark_aqua",
        '4' => "dark_red",
        '5' => "dark_purple",
        '6' => "gold",
        '7' => "gray",
        '8' => "dark_gray",
        '9' => "blue",
        'a' => "green",
        'b' => "aqua",
        'c' => "red",
        'd' => "light_purple",
        'e' => "yellow",
        'f' => "white",
        'l' => "bold",
        'm' => "strikethrough",
        'n' => "underlined",
        'o' => "italic",
        'r' => "reset",
        _ => return None,
    };
    Some(tag)
}

/// Replace `&x` / `§x` by the matching MiniMessage tag.
///
/// Codes without a tag equivalent (`k`, hex) are left in place.
pub fn legacy_to_mini(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' || c == SECTION {
            if let Some(tag) = chars.peek().copied().and_then(mini_tag) {
                out.push('<');
                out.push_str(tag);
                out.push('>');
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Remove every `§x` / `&x` formatting code
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' || c == SECTION {
            if let Some(next) = chars.peek() {
                if LEGACY_CODES.contains(*next) {
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_legacy() {
        assert_eq!(translate_legacy("&aHello &lWorld"), "§aHello §lWorld");
        assert_eq!(translate_legacy("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(translate_legacy("trailing &"), "trailing &");
    }

    #[test]
    fn test_legacy_to_mini() {
        assert_eq!(legacy_to_mini("&aGo §lnow"), "<green>Go <bold>now");
        assert_eq!(legacy_to_mini("&kmagic"), "&kmagic");
    }

    #[test]
    fn test_mode_apply() {
        assert_eq!(ColorMode::Legacy.apply("&cRed"), "§cRed");
        assert_eq!(ColorMode::MiniMessage.apply("&cRed"), "<red>Red");
    }

    #[test]
    fn test_strip_codes() {
        assert_eq!(strip_codes("§aNext &lPage"), "Next Page");
    }
}
