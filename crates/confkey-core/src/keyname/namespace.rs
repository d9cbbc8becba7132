//! Namespace classification for key names.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The storage domain a key name belongs to, fixed by its first level.
///
/// Classification is total: every string maps to exactly one namespace.
/// `Meta` is the catch-all for anything that is not a recognized root and is
/// only accepted as a name through the meta-name path (it is how metadata
/// names such as `owner` or `comment/#0` are parsed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// The empty string, the distinguished empty name.
    Empty,
    /// Leading `/`: a namespace-agnostic lookup key.
    Cascading,
    Spec,
    Proc,
    Dir,
    User,
    System,
    /// Anything else, reserved for metadata names.
    Meta,
}

impl Namespace {
    /// Classifies a candidate key name.
    ///
    /// A root token only matches when followed by `/`, `:` or the end of the
    /// string, so `system2/x` is `Meta`, not `System`.
    pub fn classify(name: &str) -> Namespace {
        if name.is_empty() {
            Namespace::Empty
        } else if name.starts_with('/') {
            Namespace::Cascading
        } else if has_root(name, "spec") {
            Namespace::Spec
        } else if has_root(name, "proc") {
            Namespace::Proc
        } else if has_root(name, "dir") {
            Namespace::Dir
        } else if has_root(name, "user") {
            Namespace::User
        } else if has_root(name, "system") {
            Namespace::System
        } else {
            Namespace::Meta
        }
    }

    /// The canonical root token, as it appears as the first level of a name.
    pub fn root_token(&self) -> &'static str {
        match self {
            Namespace::Empty => "",
            Namespace::Cascading => "/",
            Namespace::Spec => "spec",
            Namespace::Proc => "proc",
            Namespace::Dir => "dir",
            Namespace::User => "user",
            Namespace::System => "system",
            Namespace::Meta => "meta",
        }
    }
}

fn has_root(name: &str, root: &str) -> bool {
    match name.strip_prefix(root) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with(':'),
        None => false,
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_roots() {
        assert_eq!(Namespace::classify(""), Namespace::Empty);
        assert_eq!(Namespace::classify("/sw/app"), Namespace::Cascading);
        assert_eq!(Namespace::classify("spec/sw"), Namespace::Spec);
        assert_eq!(Namespace::classify("proc"), Namespace::Proc);
        assert_eq!(Namespace::classify("dir/x"), Namespace::Dir);
        assert_eq!(Namespace::classify("user:alice/x"), Namespace::User);
        assert_eq!(Namespace::classify("system/hosts"), Namespace::System);
    }

    #[test]
    fn test_partial_prefix_is_meta() {
        assert_eq!(Namespace::classify("system2/x"), Namespace::Meta);
        assert_eq!(Namespace::classify("users"), Namespace::Meta);
        assert_eq!(Namespace::classify("owner"), Namespace::Meta);
        assert_eq!(Namespace::classify("comment/#0"), Namespace::Meta);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Namespace::Cascading).unwrap(),
            r#""cascading""#
        );
        let ns: Namespace = serde_json::from_str(r#""system""#).unwrap();
        assert_eq!(ns, Namespace::System);
    }
}
