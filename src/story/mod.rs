mod artifact;
mod pipeline;
mod service;

pub use artifact::{
    artifact_name, ArtifactWriter, FileArtifactStore, SceneArtifact, DEFAULT_OUTPUT_DIR,
};
pub use pipeline::{breakdown_prompt, detail_prompt, StoryPipeline};
pub use service::{StoryService, NOT_INITIALIZED};
