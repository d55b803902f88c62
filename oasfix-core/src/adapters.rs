//! Default port implementations.

use crate::error::FileError;
use crate::ports::{DocumentStore, StatusSink};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::{Pattern, glob};
use oasfix_types::{FileOutcome, FixSummary};
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// File-system backed `DocumentStore`.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentStore;

impl DocumentStore for FsDocumentStore {
    fn list(&self, dir: &Utf8Path, extension: &str) -> anyhow::Result<Vec<Utf8PathBuf>> {
        // glob yields nothing for a missing directory; surface that as an error.
        let meta = fs::metadata(dir).with_context(|| format!("list {}", dir))?;
        if !meta.is_dir() {
            anyhow::bail!("list {}: not a directory", dir);
        }

        let pattern = format!(
            "{}/*{}",
            Pattern::escape(dir.as_str()),
            Pattern::escape(extension)
        );
        debug!(pattern = %pattern, "scanning for documents");

        let mut out = Vec::new();
        for entry in glob(&pattern).with_context(|| format!("glob {}", pattern))? {
            let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
            match Utf8PathBuf::from_path_buf(path) {
                Ok(p) => out.push(p),
                Err(p) => warn!(path = %p.display(), "skipping non UTF-8 path"),
            }
        }

        // Deterministic order matters.
        out.sort();
        Ok(out)
    }

    fn read(&self, path: &Utf8Path) -> anyhow::Result<String> {
        fs::read_to_string(path).with_context(|| format!("read {}", path))
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }
}

/// In-memory `DocumentStore` for embedding and testing.
///
/// Entries registered with [`InMemoryDocumentStore::insert_unreadable`] fail
/// on read, the way a directory named like a document does on disk.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    files: RefCell<BTreeMap<Utf8PathBuf, Option<String>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) {
        self.files
            .borrow_mut()
            .insert(path.into(), Some(contents.into()));
    }

    pub fn insert_unreadable(&self, path: impl Into<Utf8PathBuf>) {
        self.files.borrow_mut().insert(path.into(), None);
    }

    pub fn get(&self, path: &Utf8Path) -> Option<String> {
        self.files.borrow().get(path).cloned().flatten()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn list(&self, dir: &Utf8Path, extension: &str) -> anyhow::Result<Vec<Utf8PathBuf>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter(|p| p.file_name().is_some_and(|n| n.ends_with(extension)))
            .cloned()
            .collect())
    }

    fn read(&self, path: &Utf8Path) -> anyhow::Result<String> {
        match self.files.borrow().get(path) {
            Some(Some(contents)) => Ok(contents.clone()),
            Some(None) => anyhow::bail!("read {}: not a readable file", path),
            None => anyhow::bail!("read {}: no such file", path),
        }
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), Some(contents.to_string()));
        Ok(())
    }
}

/// Prints status lines to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleStatusSink;

impl StatusSink for ConsoleStatusSink {
    fn file_done(&mut self, outcome: &FileOutcome, patch: Option<&str>) {
        if let Some(patch) = patch {
            print!("{}", patch);
        }
        println!("Fixed: {}", outcome.path);
    }

    fn file_failed(&mut self, file_name: &str, error: &FileError) {
        println!("Error processing {}: {}", file_name, error);
    }

    fn finished(&mut self, _summary: &FixSummary) {
        println!("All files processed!");
    }
}

/// Collects the lines a console sink would print.
#[derive(Debug, Clone, Default)]
pub struct RecordingStatusSink {
    pub lines: Vec<String>,
    pub patches: Vec<String>,
}

impl StatusSink for RecordingStatusSink {
    fn file_done(&mut self, outcome: &FileOutcome, patch: Option<&str>) {
        if let Some(patch) = patch {
            self.patches.push(patch.to_string());
        }
        self.lines.push(format!("Fixed: {}", outcome.path));
    }

    fn file_failed(&mut self, file_name: &str, error: &FileError) {
        self.lines
            .push(format!("Error processing {}: {}", file_name, error));
    }

    fn finished(&mut self, _summary: &FixSummary) {
        self.lines.push("All files processed!".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_list_filters_by_dir_and_extension() {
        let store = InMemoryDocumentStore::new();
        store.insert("specs/b.yaml", "b");
        store.insert("specs/a.yaml", "a");
        store.insert("specs/notes.md", "n");
        store.insert("specs/nested/c.yaml", "c");
        store.insert("other/d.yaml", "d");

        let listed = store.list(Utf8Path::new("specs"), ".yaml").unwrap();
        assert_eq!(
            listed,
            vec![
                Utf8PathBuf::from("specs/a.yaml"),
                Utf8PathBuf::from("specs/b.yaml")
            ]
        );
    }

    #[test]
    fn in_memory_unreadable_entry_fails_on_read() {
        let store = InMemoryDocumentStore::new();
        store.insert_unreadable("specs/dir.yaml");

        let err = store.read(Utf8Path::new("specs/dir.yaml")).unwrap_err();
        assert!(err.to_string().contains("specs/dir.yaml"));
    }

    #[test]
    fn fs_list_missing_directory_is_an_error() {
        let td = tempfile::tempdir().unwrap();
        let missing = Utf8PathBuf::from_path_buf(td.path().join("missing")).unwrap();

        assert!(FsDocumentStore.list(&missing, ".yaml").is_err());
    }

    #[test]
    fn fs_list_is_sorted_and_shallow() {
        let td = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();
        fs::write(root.join("b.yaml"), "b").unwrap();
        fs::write(root.join("a.yaml"), "a").unwrap();
        fs::write(root.join("c.yml"), "c").unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("d.yaml"), "d").unwrap();

        let listed = FsDocumentStore.list(&root, ".yaml").unwrap();
        assert_eq!(listed, vec![root.join("a.yaml"), root.join("b.yaml")]);
    }
}
