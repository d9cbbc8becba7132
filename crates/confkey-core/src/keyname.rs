//! Key name representation: codec, level iteration, namespaces and the
//! dual-representation buffer.

pub mod buffer;
pub mod escape;
pub mod level;
pub mod namespace;

pub use buffer::KeyName;
pub use escape::{escape_part, is_valid_name, unescape_part};
pub use level::{Levels, last_level_start};
pub use namespace::Namespace;
