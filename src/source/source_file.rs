/// A single downloaded file: its repository path and its text contents
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct FileEntry {
    pub path: String,
    pub contents: String,
}

impl<P: Into<String>, C: Into<String>> From<(P, C)> for FileEntry {
    fn from((path, contents): (P, C)) -> Self {
        FileEntry {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Suffix-based filter deciding which files get collected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(suffixes: I) -> ExtensionFilter
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExtensionFilter {
            suffixes: suffixes
                .into_iter()
                .map(Into::into)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// True if the file name ends with any of the configured suffixes
    pub fn matches(&self, name: &str) -> bool {
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}
