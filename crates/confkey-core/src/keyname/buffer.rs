//! The dual-representation name buffer.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::escape::{escape_part, is_valid_name, unescape_part};
use super::level::{Levels, last_level_start};

/// A canonical key name in both of its representations.
///
/// The escaped form is what callers see and what `Display` renders. The
/// unescaped projection holds every part with its escapes resolved and a
/// terminating `0x00` after each, so two names can be compared as plain byte
/// runs without ever re-escaping; equality, ordering and hashing all go
/// through it. Both buffers are rebuilt together by [`KeyName::finalize`],
/// which is the only way a non-empty `KeyName` comes into existence.
#[derive(Debug, Clone)]
pub struct KeyName {
    escaped: String,
    unescaped: Vec<u8>,
}

impl KeyName {
    /// The distinguished empty name: zero parts, one terminator byte.
    pub fn empty() -> Self {
        KeyName {
            escaped: String::new(),
            unescaped: vec![0],
        }
    }

    /// Builds the unescaped projection for a canonical escaped name.
    ///
    /// A cascading name contributes an empty root part, so `/a` projects to
    /// `\0a\0` and the bare root `/` to a single terminator.
    pub fn finalize(escaped: String) -> Self {
        let mut unescaped = Vec::with_capacity(escaped.len() + 1);
        if escaped.is_empty() || escaped.starts_with('/') {
            unescaped.push(0);
        }
        for level in Levels::new(&escaped) {
            unescaped.extend_from_slice(unescape_part(level).as_bytes());
            unescaped.push(0);
        }
        KeyName { escaped, unescaped }
    }

    pub fn is_empty(&self) -> bool {
        self.escaped.is_empty()
    }

    /// The escaped name, `""` for the empty name.
    pub fn as_str(&self) -> &str {
        &self.escaped
    }

    /// Bytes needed to store the escaped name including its terminator.
    /// The empty name needs exactly one byte.
    pub fn size(&self) -> usize {
        self.escaped.len() + 1
    }

    /// The unescaped projection: raw parts, each followed by `0x00`.
    pub fn unescaped(&self) -> &[u8] {
        &self.unescaped
    }

    pub fn unescaped_size(&self) -> usize {
        self.unescaped.len()
    }

    /// Iterates the escaped levels of this name.
    pub fn levels(&self) -> Levels<'_> {
        Levels::new(&self.escaped)
    }

    /// The last level re-escaped for display.
    ///
    /// Names with only a root level (including the cascading root) and the
    /// empty name have no base name and yield `""`.
    pub fn base_name(&self) -> String {
        match last_level_start(&self.escaped) {
            Some(start) if start > 0 => escape_part(&unescape_part(&self.escaped[start..])),
            _ => String::new(),
        }
    }
}

impl Default for KeyName {
    fn default() -> Self {
        KeyName::empty()
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.escaped)
    }
}

impl PartialEq for KeyName {
    fn eq(&self, other: &Self) -> bool {
        self.unescaped == other.unescaped
    }
}

impl Eq for KeyName {}

impl PartialOrd for KeyName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.unescaped.cmp(&other.unescaped)
    }
}

impl Hash for KeyName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unescaped.hash(state);
    }
}

impl Serialize for KeyName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.escaped)
    }
}

impl<'de> Deserialize<'de> for KeyName {
    /// Expects a canonical escaped name, as produced by `Serialize`.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let escaped = String::deserialize(deserializer)?;
        if !is_valid_name(&escaped) {
            return Err(serde::de::Error::custom(format!(
                "invalid key name: {escaped}"
            )));
        }
        Ok(KeyName::finalize(escaped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_one_terminator() {
        let name = KeyName::empty();
        assert!(name.is_empty());
        assert_eq!(name.as_str(), "");
        assert_eq!(name.size(), 1);
        assert_eq!(name.unescaped(), &[0]);
        assert_eq!(name.unescaped_size(), 1);
    }

    #[test]
    fn test_unescaped_projection() {
        let name = KeyName::finalize("user/b/c".to_string());
        assert_eq!(name.unescaped(), b"user\0b\0c\0");
        assert_eq!(name.size(), 9);
        assert_eq!(name.unescaped_size(), 9);
    }

    #[test]
    fn test_cascading_projection_has_empty_root_part() {
        assert_eq!(KeyName::finalize("/".to_string()).unescaped(), &[0]);
        assert_eq!(KeyName::finalize("/a".to_string()).unescaped(), b"\0a\0");
    }

    #[test]
    fn test_escapes_resolved_in_projection() {
        let name = KeyName::finalize("user/a\\/b/\\.".to_string());
        assert_eq!(name.unescaped(), b"user\0a/b\0.\0");
    }

    #[test]
    fn test_ordering_uses_unescaped_form() {
        // escaped forms would sort `a\/b` after `a.c` by the backslash,
        // the raw forms compare `a/b` < `a.c` is false ('.' < '/'), so
        // check both directions explicitly
        let slash = KeyName::finalize("user/a\\/b".to_string());
        let dot = KeyName::finalize("user/a.c".to_string());
        assert!(dot < slash);

        let same_a = KeyName::finalize("user/x".to_string());
        let same_b = KeyName::finalize("user/x".to_string());
        assert_eq!(same_a, same_b);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(KeyName::finalize("user/a/b".to_string()).base_name(), "b");
        assert_eq!(KeyName::finalize("user".to_string()).base_name(), "");
        assert_eq!(KeyName::finalize("/".to_string()).base_name(), "");
        assert_eq!(KeyName::finalize("/a".to_string()).base_name(), "a");
        assert_eq!(KeyName::finalize("user/\\.".to_string()).base_name(), "\\.");
    }

    #[test]
    fn test_serde_string_form() {
        let name = KeyName::finalize("system/a/b".to_string());
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, r#""system/a/b""#);

        let back: KeyName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);

        assert!(serde_json::from_str::<KeyName>(r#""system/a\\""#).is_err());
    }
}
