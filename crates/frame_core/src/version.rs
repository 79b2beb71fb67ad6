//! Loose game version parsing
//!
//! Versions are compared component-wise on their numeric parts, with missing
//! components read as zero, so `"1.20"` equals `"1.20.0"`.

use core::cmp::Ordering;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Numeric version such as `1.20.4`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameVersion {
    parts: Vec<u32>,
}

impl GameVersion {
    /// Create from components
    pub fn new(parts: impl Into<Vec<u32>>) -> Self {
        Self {
            parts: parts.into(),
        }
    }

    /// Extract every digit group from a string, ignoring everything else
    pub fn parse(text: &str) -> Self {
        let mut parts = Vec::new();
        let mut current: Option<u32> = None;
        for c in text.chars() {
            match c.to_digit(10) {
                Some(d) => {
                    current = Some(current.unwrap_or(0).saturating_mul(10).saturating_add(d));
                }
                None => {
                    if let Some(n) = current.take() {
                        parts.push(n);
                    }
                }
            }
        }
        if let Some(n) = current {
            parts.push(n);
        }
        Self { parts }
    }

    /// Extract the native version from a server banner like
    /// `"git-Paper-196 (MC: 1.20.4)"`, falling back to the leading token of
    /// `fallback` (e.g. `"1.20.4-R0.1-SNAPSHOT"`)
    pub fn native_from_server_string(banner: &str, fallback: &str) -> Self {
        if let Some(start) = banner.find("(MC:") {
            let rest = &banner[start + 4..];
            if let Some(end) = rest.find(')') {
                let inner = rest[..end].trim();
                if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit() || c == '.') {
                    return Self::parse(inner);
                }
            }
        }
        let head = fallback.split(['-', ' ']).next().unwrap_or_default();
        Self::parse(head)
    }

    /// Components
    pub fn parts(&self) -> &[u32] {
        &self.parts
    }

    /// True when no numeric component was found
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Check if this version lies in `[min, max]`; `max` is open when absent
    pub fn is_supported(&self, min: &GameVersion, max: Option<&GameVersion>) -> bool {
        if self < min {
            return false;
        }
        match max {
            Some(max) => self <= max,
            None => true,
        }
    }

    fn component(&self, i: usize) -> u32 {
        self.parts.get(i).copied().unwrap_or(0)
    }
}

impl PartialEq for GameVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GameVersion {}

impl PartialOrd for GameVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            match self.component(i).cmp(&other.component(i)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", text.join("."))
    }
}

impl From<&str> for GameVersion {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digit_groups() {
        assert_eq!(GameVersion::parse("1.20.4").parts(), &[1, 20, 4]);
        assert_eq!(GameVersion::parse("1.8.x").parts(), &[1, 8]);
        assert_eq!(GameVersion::parse("v1_19_R3").parts(), &[1, 19, 3]);
        assert!(GameVersion::parse("latest").is_empty());
    }

    #[test]
    fn test_compare_pads_with_zero() {
        assert_eq!(GameVersion::parse("1.20"), GameVersion::parse("1.20.0"));
        assert!(GameVersion::parse("1.20.1") > GameVersion::parse("1.20"));
        assert!(GameVersion::parse("1.9") < GameVersion::parse("1.16"));
    }

    #[test]
    fn test_native_from_banner() {
        let v = GameVersion::native_from_server_string("git-Paper-196 (MC: 1.20.4)", "");
        assert_eq!(v.to_string(), "1.20.4");
        let v = GameVersion::native_from_server_string("CraftBukkit", "1.19.2-R0.1-SNAPSHOT");
        assert_eq!(v.to_string(), "1.19.2");
    }

    #[test]
    fn test_supported_range() {
        let client = GameVersion::parse("1.18.2");
        assert!(client.is_supported(&"1.16".into(), None));
        assert!(client.is_supported(&"1.16".into(), Some(&"1.19".into())));
        assert!(!client.is_supported(&"1.19".into(), None));
        assert!(!client.is_supported(&"1.8".into(), Some(&"1.12".into())));
    }
}
