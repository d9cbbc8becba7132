//! The key entity: a canonical name plus generic metadata.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::keyname::level::last_level_start;
use crate::keyname::{KeyName, Levels, Namespace, escape_part, is_valid_name};

const OWNER_META: &str = "owner";

/// Outcome of a successful name mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameUpdate {
    /// The name changed; carries the new name size in bytes including the
    /// terminator.
    Changed(usize),
    /// The name was reset to the distinguished empty name.
    Cleared,
    /// The input amounted to a no-op and the name is untouched.
    Unchanged,
}

/// Whether the name may still be mutated.
///
/// Once a key has been indexed by name in an ordered collection, renaming it
/// in place would break the collection's ordering invariant, so the
/// collection marks the key `Indexed` and every mutator refuses to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameState {
    Mutable,
    Indexed,
}

/// A key of the configuration database, addressed by a canonical
/// hierarchical name.
///
/// Equality, ordering and hashing compare the name's unescaped projection
/// only; metadata does not participate.
#[derive(Debug, Clone)]
pub struct Key {
    name: KeyName,
    state: NameState,
    meta: IndexMap<String, String>,
}

impl Key {
    /// Creates a key with the empty name.
    pub fn new() -> Key {
        Key {
            name: KeyName::empty(),
            state: NameState::Mutable,
            meta: IndexMap::new(),
        }
    }

    /// Creates a key and sets its name in one step.
    pub fn with_name(name: &str) -> Result<Key> {
        let mut key = Key::new();
        key.set_name(name)?;
        Ok(key)
    }

    // ----- name views -----

    /// The canonical escaped name, `""` for the empty name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Bytes needed to store the escaped name including its terminator;
    /// 1 for the empty name.
    pub fn name_size(&self) -> usize {
        self.name.size()
    }

    /// The unescaped projection: raw parts, each terminated by `0x00`.
    pub fn unescaped_name(&self) -> &[u8] {
        self.name.unescaped()
    }

    pub fn unescaped_name_size(&self) -> usize {
        self.name.unescaped_size()
    }

    /// The structured name value, for collections that index keys by name.
    pub fn key_name(&self) -> &KeyName {
        &self.name
    }

    pub fn namespace(&self) -> Namespace {
        Namespace::classify(self.name.as_str())
    }

    // ----- read-only enforcement -----

    /// Marks the name read-only. Called by an owning collection once the key
    /// has been indexed by name; there is no way back.
    pub fn mark_indexed(&mut self) {
        self.state = NameState::Indexed;
    }

    pub fn is_read_only(&self) -> bool {
        self.state == NameState::Indexed
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.is_read_only() {
            debug!("rejected rename of indexed key {}", self.name);
            return Err(Error::ReadOnlyName);
        }
        Ok(())
    }

    // ----- whole-name mutation -----

    /// Replaces the whole name with the canonical form of `name`.
    ///
    /// `.`, `..` and repeated separators are resolved as in filesystem
    /// paths, e.g. `user///sw/../sw//././app` becomes `user/sw/app`. The
    /// deprecated `user:owner/...` form stores the owner into metadata and
    /// canonicalizes the root to plain `user`.
    ///
    /// An empty `name` resets the key to the empty name and returns
    /// `Ok(Cleared)`; invalid input also resets it, by contract, but
    /// returns `Err(InvalidName)`.
    pub fn set_name(&mut self, name: &str) -> Result<NameUpdate> {
        self.set_name_impl(name, false)
    }

    /// Like [`Key::set_name`], but additionally accepts metadata names
    /// (namespace [`Namespace::Meta`]), whose first level is taken verbatim.
    /// Unlike `set_name` it leaves the owner attribute alone.
    pub fn set_meta_name(&mut self, name: &str) -> Result<NameUpdate> {
        self.set_name_impl(name, true)
    }

    fn set_name_impl(&mut self, name: &str, meta_name: bool) -> Result<NameUpdate> {
        self.ensure_mutable()?;

        self.name = KeyName::empty();
        if !meta_name {
            self.set_meta(OWNER_META, None);
        }

        let (root, rest) = match Namespace::classify(name) {
            Namespace::Empty => return Ok(NameUpdate::Cleared),
            Namespace::Cascading => ("/".to_string(), &name[1..]),
            Namespace::Spec => ("spec".to_string(), &name["spec".len()..]),
            Namespace::Proc => ("proc".to_string(), &name["proc".len()..]),
            Namespace::Dir => ("dir".to_string(), &name["dir".len()..]),
            Namespace::System => ("system".to_string(), &name["system".len()..]),
            Namespace::User => self.split_user_root(name),
            Namespace::Meta => {
                if !meta_name {
                    debug!("rejected metadata name {name} outside the meta-name mode");
                    return Err(Error::InvalidName(name.to_string()));
                }
                // the whole first level is the name, verbatim
                let first = Levels::new(name).next().unwrap_or(name);
                (first.to_string(), &name[first.len()..])
            }
        };

        self.name = KeyName::finalize(root);
        if rest.is_empty() {
            return Ok(NameUpdate::Changed(self.name.size()));
        }

        match self.add_name(rest) {
            Ok(NameUpdate::Unchanged) => Ok(NameUpdate::Changed(self.name.size())),
            Ok(update) => Ok(update),
            Err(err) => {
                // never leave a half-updated name behind
                self.name = KeyName::empty();
                Err(err)
            }
        }
    }

    /// Splits the deprecated `user:owner` root off `name`, storing the owner
    /// as metadata. The canonical root is always plain `user`.
    fn split_user_root<'a>(&mut self, name: &'a str) -> (String, &'a str) {
        let first = Levels::new(name).next().unwrap_or(name);
        if let Some(owner) = first.strip_prefix("user:") {
            self.set_owner(Some(owner));
        }
        ("user".to_string(), &name[first.len()..])
    }

    /// Appends an escaped path expression to the existing name,
    /// canonicalizing it level by level.
    ///
    /// A `.` level is skipped, `..` removes one level (the cascading root is
    /// sticky), anything else is appended after a separator. Input that
    /// resolves to nothing (empty, only separators and dots) leaves the name
    /// untouched and returns `Ok(Unchanged)`.
    pub fn add_name(&mut self, path: &str) -> Result<NameUpdate> {
        self.ensure_mutable()?;
        if self.name.is_empty() {
            return Err(Error::MissingName);
        }
        if path.is_empty() {
            return Ok(NameUpdate::Unchanged);
        }
        if !is_valid_name(path) {
            debug!("rejected invalid path expression {path}");
            return Err(Error::InvalidName(path.to_string()));
        }

        let mut out = self.name.as_str().to_owned();
        let mut avoid_slash = out == "/";
        for level in Levels::new(path) {
            match level {
                "." => {}
                ".." => remove_last_level(&mut out, &mut avoid_slash),
                _ => {
                    if avoid_slash {
                        avoid_slash = false;
                    } else {
                        out.push('/');
                    }
                    out.push_str(level);
                }
            }
        }

        if out == self.name.as_str() {
            return Ok(NameUpdate::Unchanged);
        }
        self.name = KeyName::finalize(out);
        Ok(NameUpdate::Changed(self.name.size()))
    }

    // ----- base name manipulation -----

    /// The last level re-escaped for display; `""` for root-only names.
    pub fn base_name(&self) -> String {
        self.name.base_name()
    }

    /// Bytes needed to store the escaped base name including its terminator.
    pub fn base_name_size(&self) -> usize {
        self.base_name().len() + 1
    }

    /// Escapes `base` as one part and appends it after a fresh separator.
    pub fn add_base_name(&mut self, base: &str) -> Result<NameUpdate> {
        self.ensure_mutable()?;
        if self.name.is_empty() {
            return Err(Error::MissingName);
        }

        let mut out = self.name.as_str().to_owned();
        if out != "/" {
            out.push('/');
        }
        out.push_str(&escape_part(base));
        self.name = KeyName::finalize(out);
        Ok(NameUpdate::Changed(self.name.size()))
    }

    /// Replaces the last level with `base`, escaped as one part, or removes
    /// it entirely when `base` is `None`.
    ///
    /// Root-only names have no removable base name and yield
    /// `Err(NoBaseName)`.
    pub fn set_base_name(&mut self, base: Option<&str>) -> Result<NameUpdate> {
        self.ensure_mutable()?;
        if self.name.is_empty() {
            return Err(Error::MissingName);
        }

        let start = match last_level_start(self.name.as_str()) {
            Some(start) if start > 0 => start,
            _ => return Err(Error::NoBaseName),
        };

        let mut out = self.name.as_str()[..start - 1].to_owned();
        if out.is_empty() {
            // parent of a first-level cascading key is the bare root
            out.push('/');
        }
        if let Some(base) = base {
            if out != "/" {
                out.push('/');
            }
            out.push_str(&escape_part(base));
        }
        self.name = KeyName::finalize(out);
        Ok(NameUpdate::Changed(self.name.size()))
    }

    // ----- owner and full name -----

    /// The full presentation name: `user:` + owner + remainder for user keys
    /// with an owner attribute, otherwise the canonical name.
    pub fn full_name(&self) -> String {
        if self.namespace() == Namespace::User {
            if let Some(owner) = self.owner() {
                let rest = &self.name.as_str()["user".len()..];
                return format!("user:{owner}{rest}");
            }
        }
        self.name.as_str().to_owned()
    }

    /// Bytes needed to store the full name including its terminator;
    /// 1 for the empty name.
    pub fn full_name_size(&self) -> usize {
        self.full_name().len() + 1
    }

    pub fn owner(&self) -> Option<&str> {
        self.meta(OWNER_META)
    }

    /// Bytes needed to store the owner including its terminator; 1 when
    /// there is no owner.
    pub fn owner_size(&self) -> usize {
        self.owner().map_or(1, |owner| owner.len() + 1)
    }

    /// Sets or clears the owner attribute. `Some("")` clears, like the
    /// deprecated owner-in-name syntax does.
    pub fn set_owner(&mut self, owner: Option<&str>) {
        match owner {
            Some(owner) if !owner.is_empty() => self.set_meta(OWNER_META, Some(owner)),
            _ => self.set_meta(OWNER_META, None),
        }
    }

    // ----- generic metadata -----

    pub fn meta(&self, name: &str) -> Option<&str> {
        self.meta.get(name).map(String::as_str)
    }

    pub fn set_meta(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.meta.insert(name.to_string(), value.to_string());
            }
            None => {
                self.meta.shift_remove(name);
            }
        }
    }
}

/// Drops the last level of an accumulating canonical name.
///
/// A cascading name is stripped down to its root at most, which sets
/// `avoid_slash` so the caller does not produce `//` on the next append.
/// Non-cascading root-only names are left alone.
fn remove_last_level(out: &mut String, avoid_slash: &mut bool) {
    let levels = Levels::new(out).count();
    if levels > 1 {
        if let Some(start) = last_level_start(out) {
            out.truncate(start - 1);
        }
    } else if out.starts_with('/') {
        out.truncate(1);
        *avoid_slash = true;
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::new()
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
