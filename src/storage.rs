// Storage module: writes each generation result to its own UTF-8 text file
// under the output directory and lists what has been saved. Files are never
// updated or deleted here; cleanup is left to the user.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::generator::{GenerationResult, Outcome};

/// Topic portion of a filename is capped at this many bytes.
const TOPIC_FILENAME_LIMIT: usize = 30;

/// Listings show at most this many of the newest artifacts.
const LISTING_LIMIT: usize = 10;

/// Flat-file store for generated content.
pub struct ContentStore {
    output_dir: PathBuf,
}

impl ContentStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = dir.into();
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
        Ok(ContentStore { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one result to `{type}_{topic}_{timestamp}.txt` and return the
    /// path. Failed results store their error message as the body.
    pub fn save(&self, result: &GenerationResult) -> Result<PathBuf> {
        let timestamp = result.created_at.format("%Y%m%d_%H%M%S");
        let filename = format!(
            "{}_{}_{}.txt",
            result.content_type.label(),
            sanitize_topic(&result.topic),
            timestamp
        );
        let path = self.output_dir.join(filename);

        let body = match &result.outcome {
            Outcome::Generated(text) => text,
            Outcome::Failed(msg) => msg,
        };
        let artifact = format!(
            "Topic: {}\nType: {}\nGenerated: {}\n{}\n\n{}",
            result.topic,
            result.content_type.label(),
            result.created_at.to_rfc3339(),
            "=".repeat(50),
            body
        );
        fs::write(&path, artifact)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Display names of the most recent saved artifacts, oldest first,
    /// capped at ten entries.
    pub fn list_recent(&self) -> Result<Vec<String>> {
        let mut files: Vec<(std::time::SystemTime, String)> = Vec::new();
        for entry in fs::read_dir(&self.output_dir).context("Failed to read output directory")? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let modified = entry.metadata()?.modified()?;
            files.push((modified, stem.replace('_', " ")));
        }
        files.sort();
        let skip = files.len().saturating_sub(LISTING_LIMIT);
        Ok(files.into_iter().skip(skip).map(|(_, name)| name).collect())
    }
}

/// Lowercase the topic, replace spaces with underscores and cap the length,
/// respecting char boundaries.
fn sanitize_topic(topic: &str) -> String {
    let mut cleaned: String = topic.to_lowercase().replace(' ', "_");
    if cleaned.len() > TOPIC_FILENAME_LIMIT {
        let mut cut = TOPIC_FILENAME_LIMIT;
        while !cleaned.is_char_boundary(cut) {
            cut -= 1;
        }
        cleaned.truncate(cut);
    }
    cleaned
}
