//! Depth-first collection of files from remote repository folders.
//!
//! Every remote call is a single best-effort attempt. A folder that can't be listed
//! and a file that can't be downloaded are logged and skipped, so one bad path never
//! stops its siblings or the folders configured after it.

use super::SourceProvider;
use crate::source::{ContentEntry, ContentsApi, EntryKind, ExtensionFilter, FileEntry, Source};
use anyhow::Result;
use log::{debug, error, info, warn};

pub struct FolderWalker<'a> {
    api: &'a dyn ContentsApi,
    folders: Vec<String>,
    filter: ExtensionFilter,
}

impl<'a> FolderWalker<'a> {
    pub fn new(api: &'a dyn ContentsApi, folders: Vec<String>, filter: ExtensionFilter) -> Self {
        FolderWalker {
            api,
            folders,
            filter,
        }
    }

    fn walk_folder(&self, path: &str, files: &mut Vec<FileEntry>) {
        let entries = match self.api.list_folder(path) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error fetching folder contents for `{path}`: {e:#}");
                Vec::default()
            }
        };
        if entries.is_empty() {
            warn!("Skipping empty or inaccessible folder: {path}");
            return;
        }

        for entry in entries {
            match entry.kind {
                EntryKind::File if self.filter.matches(&entry.name) => {
                    if let Some(file) = self.download(&entry) {
                        files.push(file);
                    }
                }
                EntryKind::File => debug!("Ignoring {} (extension not collected)", entry.path),
                EntryKind::Dir => self.walk_folder(&entry.path, files),
                EntryKind::Other => debug!("Ignoring {} (not a file or folder)", entry.path),
            }
        }
    }

    fn download(&self, entry: &ContentEntry) -> Option<FileEntry> {
        let Some(url) = entry.download_url.as_deref() else {
            warn!("Skipping {}: no download URL", entry.path);
            return None;
        };

        info!("Downloading {}", entry.path);
        match self.api.download(url) {
            Ok(contents) => {
                info!("Downloaded {} ({} bytes)", entry.path, contents.len());
                Some(FileEntry {
                    path: entry.path.clone(),
                    contents,
                })
            }
            Err(e) => {
                error!("Error downloading {}: {e:#}", entry.path);
                None
            }
        }
    }
}

impl SourceProvider for FolderWalker<'_> {
    fn apply(&self, source: &mut Source) -> Result<()> {
        debug!(
            "Collecting files ending in {}",
            self.filter.suffixes().join(", ")
        );
        for folder in self.folders.iter() {
            info!("Processing folder: {}", if folder.is_empty() { "/" } else { folder });
            let mut files = Vec::default();
            self.walk_folder(folder, &mut files);
            info!("Collected {} file(s) from {}", files.len(), folder);
            for file in files {
                source.add_file(file);
            }
        }
        Ok(())
    }
}
