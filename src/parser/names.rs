//! Function display names declared by DEF records.
//!
//! All dump files of one run come from the same instrumented binary, so
//! the id→name mapping is shared across files; a later DEF overwrites.

/// Id-indexed table of function display names
///
/// **Public** - shared across every file of an analysis run
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or overwrite) the name for a function id
    pub fn define(&mut self, id: u64, name: impl Into<String>) {
        let idx = id as usize;
        if self.names.len() <= idx {
            self.names.resize(idx + 1, String::new());
        }
        self.names[idx] = name.into();
    }

    /// Name for an id; an id without a DEF yields the empty placeholder
    pub fn get(&self, id: u64) -> &str {
        self.names.get(id as usize).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut names = NameTable::new();
        names.define(3, "doCompute");
        assert_eq!(names.get(3), "doCompute");
        // Gap ids and unknown ids fall back to the placeholder.
        assert_eq!(names.get(1), "");
        assert_eq!(names.get(99), "");
    }

    #[test]
    fn test_redefine_overwrites() {
        let mut names = NameTable::new();
        names.define(0, "old");
        names.define(0, "new");
        assert_eq!(names.get(0), "new");
    }
}
