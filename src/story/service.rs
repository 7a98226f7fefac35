use super::artifact::FileArtifactStore;
use super::pipeline::StoryPipeline;
use crate::api::{GeminiClient, GeminiConfig, TextCompletion};
use crate::error::{Result, StoryError};
use crate::scene::{PipelineResult, Scene, SceneBreakdown, StoryRequest};
use std::sync::Arc;
use tracing::{info, warn};

pub const NOT_INITIALIZED: &str = "Story Generator not initialized. Check API_KEY.";

/// Process-wide handle to the story pipeline.
///
/// Built once at startup and handed to every request handler. When the
/// completion client could not be constructed the handle stays usable but
/// every operation fails with `Configuration` before any call is made.
#[derive(Clone)]
pub struct StoryService {
    pipeline: Option<Arc<StoryPipeline>>,
}

impl StoryService {
    pub fn new(pipeline: StoryPipeline) -> Self {
        Self {
            pipeline: Some(Arc::new(pipeline)),
        }
    }

    pub fn uninitialized() -> Self {
        Self { pipeline: None }
    }

    /// Wires a pipeline from the outcome of client construction.
    pub fn from_client(
        client: Result<Arc<dyn TextCompletion>>,
        artifacts: FileArtifactStore,
    ) -> Self {
        match client {
            Ok(client) => {
                info!("Story Generator initialized successfully!");
                Self::new(StoryPipeline::new(client, Arc::new(artifacts)))
            }
            Err(e) => {
                warn!("Error initializing Story Generator: {}", e);
                Self::uninitialized()
            }
        }
    }

    /// Builds the Gemini-backed service.
    pub fn from_gemini(config: &GeminiConfig, artifacts: FileArtifactStore) -> Self {
        let client = GeminiClient::new(config).map(|c| Arc::new(c) as Arc<dyn TextCompletion>);
        Self::from_client(client, artifacts)
    }

    pub fn is_initialized(&self) -> bool {
        self.pipeline.is_some()
    }

    fn pipeline(&self) -> Result<&StoryPipeline> {
        self.pipeline
            .as_deref()
            .ok_or_else(|| StoryError::Configuration(NOT_INITIALIZED.to_string()))
    }

    pub async fn generate_story(&self, request: &StoryRequest) -> Result<PipelineResult> {
        let pipeline = self.pipeline()?;
        request.validate()?;
        pipeline.run(request).await
    }

    pub async fn generate_scenes(&self, request: &StoryRequest) -> Result<SceneBreakdown> {
        let pipeline = self.pipeline()?;
        request.validate()?;
        pipeline.generate_scenes(request).await
    }

    pub async fn describe_scenes(&self, scenes: &[Scene]) -> Result<usize> {
        self.pipeline()?.describe_scenes(scenes).await
    }
}
