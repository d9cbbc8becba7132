//! Naming core of the confkey hierarchical key-value configuration
//! database.
//!
//! Every stored value is addressed by a canonical key name: a namespace
//! root (`system`, `user`, `spec`, `proc`, `dir`, or `/` for cascading
//! lookups) followed by `/`-separated name parts. Parts may contain the
//! separator and other reserved characters through an escaping grammar, and
//! every name is kept in two synchronized representations: the escaped
//! display form and an unescaped projection used for comparisons.
//!
//! [`Key`] is the entity under mutation, [`KeyName`] its name value, and the
//! `keyname` module holds the codec, level iterator and namespace
//! classifier underneath.

pub mod error;
pub mod key;
pub mod keyname;

pub use error::{Error, Result};
pub use key::{Key, NameUpdate};
pub use keyname::{KeyName, Levels, Namespace, escape_part, is_valid_name, unescape_part};
