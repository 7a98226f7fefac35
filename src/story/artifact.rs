use crate::error::{Result, StoryError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_OUTPUT_DIR: &str = "generated_images";

const ARTIFACT_EXTENSION: &str = "txt";

/// Detailed visual description generated for one scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneArtifact {
    /// Deterministic name derived from the scene's 1-based position.
    pub name: String,
    pub title: String,
    pub storytelling: String,
    pub detail: String,
}

impl SceneArtifact {
    pub fn new(
        index: usize,
        title: impl Into<String>,
        storytelling: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            name: artifact_name(index),
            title: title.into(),
            storytelling: storytelling.into(),
            detail: detail.into(),
        }
    }

    /// Plain-text body: title, original storytelling, detailed description.
    pub fn render(&self) -> String {
        format!(
            "Scene: {}\nOriginal storytelling: {}\nDetailed visual description: {}\n",
            self.title, self.storytelling, self.detail
        )
    }
}

pub fn artifact_name(index: usize) -> String {
    format!("scene_{}_description", index)
}

/// Sink for scene artifacts. A later write with the same name replaces the
/// earlier one.
#[async_trait]
pub trait ArtifactWriter: Send + Sync {
    async fn write(&self, artifact: &SceneArtifact) -> Result<()>;
}

/// Artifacts stored as `<dir>/<name>.txt`.
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    output_dir: PathBuf,
}

impl FileArtifactStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Creates the output directory if it is missing.
    pub async fn create(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(output_dir);
        tokio::fs::create_dir_all(&store.output_dir).await?;
        Ok(store)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", name, ARTIFACT_EXTENSION))
    }

    /// Reads a stored file by its bare file name.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>> {
        if !is_plain_file_name(filename) {
            return Err(StoryError::NotFound(filename.to_string()));
        }

        match tokio::fs::read(self.output_dir.join(filename)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoryError::NotFound(filename.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ArtifactWriter for FileArtifactStore {
    async fn write(&self, artifact: &SceneArtifact) -> Result<()> {
        let path = self.path_for(&artifact.name);
        tokio::fs::write(&path, artifact.render()).await?;
        info!("Visual description saved to: {}", path.display());
        Ok(())
    }
}

// Rejects anything that could step outside the output directory.
fn is_plain_file_name(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\'])
}
