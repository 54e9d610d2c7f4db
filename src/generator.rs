pub mod view_model;

use lazy_static::lazy_static;
use log::{debug, info};
use tera::{Context as TeraContext, Tera};

use crate::error::Result;
use crate::models::VideoMetadata;
use view_model::NoteView;

lazy_static! {
    pub static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        tera.add_raw_template("note.md", include_str!("../templates/note.md"))
            .unwrap();
        tera.autoescape_on(Vec::new());
        tera
    };
}

/// Renders a complete metadata record into one markdown note block.
#[derive(Debug, Clone, Default)]
pub struct NoteGenerator;

impl NoteGenerator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn generate_note(&self, record: &VideoMetadata) -> Result<String> {
        info!("Generating note block for video {}", record.video_id);
        let view = NoteView::from_record(record);
        let context = TeraContext::from_serialize(&view)?;
        let note = TEMPLATES.render("note.md", &context)?;
        debug!("note block rendered, {} bytes", note.len());
        Ok(note)
    }
}

#[cfg(test)]
mod local_tests {
    use super::*;
    use crate::mock::sample_record;
    use crate::models::VideoMetadata;

    #[test]
    fn test_generate_note_full_record() {
        let note = NoteGenerator::new()
            .generate_note(&sample_record("abc"))
            .unwrap();

        assert!(note.starts_with("# [Sample Video]\n"));
        assert!(note.contains(
            "- **Channel:** [Sample Channel](https://www.youtube.com/@sample) \
             (Subscribers: Unknown)"
        ));
        assert!(note.contains("- **Published:** 2024-03-11"));
        assert!(note.contains("- **Captured:** 2024-03-12"));
        assert!(note.contains("- **Duration:** 0:02:05"));
        assert!(note.contains("- **Views:** 1,234,567"));
        assert!(note.contains("- **Likes:** Unknown"));
        assert!(note.contains("#foo #bar"));
        assert!(note.contains("[Watch on YouTube](https://youtube.com/watch?v=abc)"));
        assert!(note.ends_with("---\n"));
    }

    #[test]
    fn test_generate_note_degraded_record() {
        let record = VideoMetadata::degraded("abc", Some("Scraped Title".to_string()));
        let note = NoteGenerator::new().generate_note(&record).unwrap();

        assert!(note.starts_with("# [Scraped Title]\n"));
        assert!(note.contains("- **Channel:** Unknown (Fallback Method) (Subscribers: Unknown)"));
        assert!(note.contains("- **Duration:** Unknown"));
        assert!(note.contains("- **Views:** Unknown"));
        assert!(note.contains("- **Category:** Unknown"));
        assert!(note.contains("Description unavailable..."));
        assert!(note.contains("## Hashtags\nNone"));
        assert!(note.contains(
            "![Video Thumbnail](https://img.youtube.com/vi/abc/maxresdefault.jpg)"
        ));
    }

    #[test]
    fn test_generate_note_synthetic_title() {
        let record = VideoMetadata::degraded("abc123", None);
        let note = NoteGenerator::new().generate_note(&record).unwrap();
        assert!(note.starts_with("# [YouTube Video abc123]\n"));
    }
}
