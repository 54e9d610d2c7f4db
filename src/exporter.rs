#![allow(async_fn_in_trait)]
use std::path::Path;

use log::{debug, info};
use tokio::{
    fs::{DirBuilder, OpenOptions},
    io::AsyncWriteExt,
};

use crate::error::Result;

/// Appends rendered note blocks to the notes file.
pub trait NoteExporter: Send + Sync {
    async fn append_note(&self, note: &str, notes_path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct NoteExporterImpl();

impl NoteExporterImpl {
    pub fn new() -> Self {
        Default::default()
    }
}

impl NoteExporter for NoteExporterImpl {
    /// Creates the file if absent and appends a newline separator followed
    /// by the note block.
    async fn append_note(&self, note: &str, notes_path: &Path) -> Result<()> {
        info!("Appending note block to {notes_path:?}");
        if let Some(parent) = notes_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            debug!("Creating notes directory at {parent:?}");
            DirBuilder::new().recursive(true).create(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(notes_path)
            .await?;
        file.write_all(b"\n").await?;
        file.write_all(note.as_bytes()).await?;
        file.flush().await?;
        debug!("Successfully appended note block to {notes_path:?}");
        Ok(())
    }
}

#[cfg(test)]
mod local_tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[tokio::test]
    async fn test_append_creates_missing_file() {
        let temp_dir = tempdir().unwrap();
        let notes_path = temp_dir.path().join("AINotesDump.md");

        let exporter = NoteExporterImpl::new();
        exporter.append_note("# [A]\n\n---\n", &notes_path).await.unwrap();

        assert!(notes_path.exists());
        assert_eq!(fs::read_to_string(&notes_path).unwrap(), "\n# [A]\n\n---\n");
    }

    #[tokio::test]
    async fn test_sequential_appends_keep_call_order() {
        let temp_dir = tempdir().unwrap();
        let notes_path = temp_dir.path().join("AINotesDump.md");
        fs::write(&notes_path, "existing content\n").unwrap();

        let exporter = NoteExporterImpl::new();
        exporter.append_note("# [First]\n---\n", &notes_path).await.unwrap();
        exporter.append_note("# [Second]\n---\n", &notes_path).await.unwrap();

        let content = fs::read_to_string(&notes_path).unwrap();
        assert_eq!(
            content,
            "existing content\n\n# [First]\n---\n\n# [Second]\n---\n"
        );
        let first = content.find("# [First]").unwrap();
        let second = content.find("# [Second]").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_append_creates_parent_directory() {
        let temp_dir = tempdir().unwrap();
        let notes_path = temp_dir.path().join("notes/AINotesDump.md");

        let exporter = NoteExporterImpl::new();
        exporter.append_note("note\n", &notes_path).await.unwrap();
        assert_eq!(fs::read_to_string(&notes_path).unwrap(), "\nnote\n");
    }
}
