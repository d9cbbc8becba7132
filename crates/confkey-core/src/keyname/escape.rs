//! Escaping and unescaping of single key name parts.
//!
//! `\` is the only escape character. The codec guarantees
//! `unescape_part(escape_part(p)) == p` for every raw part `p`, and
//! `escape_part` emits the minimal escaped form:
//!
//! - an empty part becomes `%`; the literal parts `.` and `..` become `\.`
//!   and `\..`; a literal leading `%` becomes `\%` so it cannot be read as
//!   the empty-part marker;
//! - a `/` inside a part is preceded by an odd run of backslashes, a real
//!   separator by an even run (possibly zero);
//! - raw backslash runs immediately before `.`, `%` or the end of the part
//!   are doubled, so they can never be mistaken for one of the escapes
//!   above; backslashes in front of any other character stay single.

/// Escapes one raw key name part.
pub fn escape_part(part: &str) -> String {
    if part.is_empty() {
        return "%".to_string();
    }
    if part == "." {
        return "\\.".to_string();
    }
    if part == ".." {
        return "\\..".to_string();
    }

    let mut out = String::with_capacity(2 * part.len() + 2);
    let mut rest = part;
    if let Some(stripped) = part.strip_prefix('%') {
        out.push_str("\\%");
        rest = stripped;
    }

    let mut run = 0usize;
    for c in rest.chars() {
        match c {
            '\\' => {
                run += 1;
                out.push(c);
            }
            '/' => {
                // odd total parity marks the separator as part content
                for _ in 0..run + 1 {
                    out.push('\\');
                }
                out.push(c);
                run = 0;
            }
            '.' | '%' => {
                // double the run so the last backslash cannot be taken
                // as an escape of the token
                for _ in 0..run {
                    out.push('\\');
                }
                out.push(c);
                run = 0;
            }
            _ => {
                out.push(c);
                run = 0;
            }
        }
    }
    for _ in 0..run {
        out.push('\\');
    }
    out
}

/// Unescapes one escaped key name part.
///
/// A backslash run is resolved against the character that follows it:
/// halved before `/`, `.` and `%` (the escapable characters), kept literal
/// before anything else. A stray trailing backslash is kept as a literal
/// backslash.
pub fn unescape_part(part: &str) -> String {
    if part == "%" {
        return String::new();
    }

    let mut out = String::with_capacity(part.len());
    let mut run = 0usize;
    for c in part.chars() {
        match c {
            '\\' => run += 1,
            '/' | '.' | '%' => {
                for _ in 0..run / 2 {
                    out.push('\\');
                }
                out.push(c);
                run = 0;
            }
            _ => {
                for _ in 0..run {
                    out.push('\\');
                }
                out.push(c);
                run = 0;
            }
        }
    }
    for _ in 0..(run + 1) / 2 {
        out.push('\\');
    }
    out
}

/// Checks that an escaped name is structurally sound.
///
/// A name ending in an odd run of backslashes leaves an escape without a
/// target, which would make level splitting ambiguous.
pub fn is_valid_name(name: &str) -> bool {
    let trailing = name.len() - name.trim_end_matches('\\').len();
    trailing % 2 == 0
}
