mod contents;
pub use contents::*;

mod source_file;
pub use source_file::*;

mod providers;
pub use providers::*;

/// Everything we need to know to render a set of repository folders as a book
#[derive(Default, Debug)]
pub struct Source {
    /// The title of the book, used for the document metadata
    pub title: Option<String>,

    /// All the files that will be printed in the book, in the order they were discovered
    pub files: Vec<FileEntry>,
}

impl Source {
    pub fn set_title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn add_file<F: Into<FileEntry>>(&mut self, file: F) -> &mut Self {
        self.files.push(file.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
