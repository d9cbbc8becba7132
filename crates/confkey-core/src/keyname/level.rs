//! Iteration over the `/`-delimited levels of an escaped key name.

/// Iterator over the levels of an escaped name.
///
/// Repeated separators are skipped, and a separator preceded by an odd run
/// of backslashes is escaped content rather than a level boundary. Yielded
/// levels are subslices of the input, still in escaped form.
pub struct Levels<'a> {
    name: &'a str,
    pos: usize,
}

impl<'a> Levels<'a> {
    pub fn new(name: &'a str) -> Self {
        Levels { name, pos: 0 }
    }
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.name.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos] == b'/' {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        let mut run = 0usize;
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\\' => run += 1,
                b'/' => {
                    if run % 2 == 0 {
                        break;
                    }
                    run = 0;
                }
                _ => run = 0,
            }
            self.pos += 1;
        }
        Some(&self.name[start..self.pos])
    }
}

/// Byte offset at which the last level of `name` starts.
///
/// `None` when the name has no levels at all (empty or separators only).
pub fn last_level_start(name: &str) -> Option<usize> {
    let mut levels = Levels::new(name);
    let mut start = None;
    while let Some(level) = levels.next() {
        start = Some(levels.pos - level.len());
    }
    start
}
