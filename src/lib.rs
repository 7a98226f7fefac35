//! Breaks story prompts into structured scenes with a generative text model.
//!
//! The model's free-text breakdown is parsed by [`scene::parse_scenes`];
//! [`story::StoryPipeline`] sequences the model calls around it and can
//! expand every scene into a stored visual description.

pub mod api;
pub mod config;
pub mod error;
pub mod scene;
pub mod server;
pub mod story;

pub use api::{GeminiClient, GeminiConfig, TextCompletion};
pub use config::Config;
pub use error::{Result, StoryError};
pub use scene::{parse_scenes, PipelineResult, Scene, SceneBreakdown, StoryRequest};
pub use server::{create_router, AppState};
pub use story::{ArtifactWriter, FileArtifactStore, SceneArtifact, StoryPipeline, StoryService};
