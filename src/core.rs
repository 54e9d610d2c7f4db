use std::path::Path;

use log::{error, info};

use crate::error::Result;
use crate::exporter::NoteExporter;
use crate::extractor::MetadataExtractor;
use crate::fetcher::MetadataFetcher;
use crate::generator::NoteGenerator;
use crate::models::VideoMetadata;
use crate::utils::extract_video_id;

/// One-shot pipeline: resolve the identifier, fetch a record, render the
/// note, append it. Nothing touches the notes file unless a complete
/// (possibly degraded) record was produced.
pub struct NoteTaskHandler<P, F, E> {
    fetcher: MetadataFetcher<P, F>,
    generator: NoteGenerator,
    exporter: E,
}

impl<P: MetadataExtractor, F: MetadataExtractor, E: NoteExporter> NoteTaskHandler<P, F, E> {
    pub fn new(fetcher: MetadataFetcher<P, F>, exporter: E) -> Self {
        NoteTaskHandler {
            fetcher,
            generator: NoteGenerator::new(),
            exporter,
        }
    }

    pub async fn capture(&self, url: &str, notes_path: &Path) -> Result<VideoMetadata> {
        info!("Processing video: {url}");
        let video_id = extract_video_id(url);

        let record = self.fetcher.fetch(&video_id).await.map_err(|e| {
            error!("Failed to get video information for {video_id}: {e}");
            e
        })?;

        let note = self.generator.generate_note(&record)?;
        self.exporter.append_note(&note, notes_path).await?;
        info!("Successfully appended video information to {notes_path:?}");
        Ok(record)
    }
}
