/// Purely syntactic path helpers exposed to plugins as `modules.path`.
///
/// All functions are driven by a single separator character supplied by the
/// host; nothing here touches the filesystem or makes locale assumptions.
#[derive(Debug, Clone, Copy)]
pub struct PathModule {
    sep: char,
}

impl PathModule {
    pub const fn new(sep: char) -> Self {
        Self { sep }
    }

    /// The platform separator, used for real batches.
    pub fn native() -> Self {
        Self::new(std::path::MAIN_SEPARATOR)
    }

    pub fn sep(&self) -> char {
        self.sep
    }

    /// Substring after the last separator, or the whole input if none.
    pub fn basename<'a>(&self, p: &'a str) -> &'a str {
        match p.rfind(self.sep) {
            Some(index) => &p[index + self.sep.len_utf8()..],
            None => p,
        }
    }

    /// Substring before the last separator, or empty if none.
    pub fn dirname<'a>(&self, p: &'a str) -> &'a str {
        match p.rfind(self.sep) {
            Some(index) => &p[..index],
            None => "",
        }
    }

    /// Substring of `basename(p)` from the last `.` inclusive, or empty if
    /// the basename has no dot. An extension-free name yields `""`, not the
    /// whole name.
    pub fn extname<'a>(&self, p: &'a str) -> &'a str {
        let basename = self.basename(p);
        match basename.rfind('.') {
            Some(index) => &basename[index..],
            None => "",
        }
    }

    /// Parts concatenated with the separator.
    pub fn join(&self, parts: &[&str]) -> String {
        let mut joined = String::new();
        for (index, part) in parts.iter().enumerate() {
            if index > 0 {
                joined.push(self.sep);
            }
            joined.push_str(part);
        }
        joined
    }
}
