mod parser;

pub use parser::{parse_scenes, DESCRIPTION_MARKER, SCENE_DELIMITER, STORYTELLING_MARKER};

use crate::error::{Result, StoryError};
use serde::{Deserialize, Serialize};

/// Title used when a scene block yields no title text.
pub const UNTITLED_SCENE: &str = "Untitled Scene";

pub const MIN_SCENES: u32 = 1;
pub const MAX_SCENES: u32 = 10;

/// One scene recovered from a model completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    title: String,
    description: String,
    storytelling: String,
}

impl Scene {
    pub(crate) fn new(title: String, description: String, storytelling: String) -> Self {
        Self {
            title,
            description,
            storytelling,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn storytelling(&self) -> &str {
        &self.storytelling
    }
}

/// Request to break a story prompt into scenes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryRequest {
    pub story_prompt: String,
    #[serde(default = "default_num_scenes")]
    pub num_scenes: u32,
    #[serde(default = "default_generate_images")]
    pub generate_images: bool,
}

fn default_num_scenes() -> u32 {
    3
}

fn default_generate_images() -> bool {
    true
}

impl StoryRequest {
    pub fn new(story_prompt: impl Into<String>, num_scenes: u32, generate_images: bool) -> Self {
        Self {
            story_prompt: story_prompt.into(),
            num_scenes,
            generate_images,
        }
    }

    /// Checks the scene count range.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SCENES..=MAX_SCENES).contains(&self.num_scenes) {
            return Err(StoryError::Validation(format!(
                "num_scenes must be between {} and {}, got {}",
                MIN_SCENES, MAX_SCENES, self.num_scenes
            )));
        }
        Ok(())
    }
}

/// Scenes parsed from one breakdown completion, plus the raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneBreakdown {
    pub story_prompt: String,
    pub num_scenes: u32,
    pub scenes: Vec<Scene>,
    pub scenes_text: String,
}

/// Outcome of a full pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub story_prompt: String,
    pub num_scenes: u32,
    pub scenes: Vec<Scene>,
    pub scenes_text: String,
    pub images_generated: bool,
}

impl PipelineResult {
    pub(crate) fn from_breakdown(breakdown: SceneBreakdown, images_generated: bool) -> Self {
        Self {
            story_prompt: breakdown.story_prompt,
            num_scenes: breakdown.num_scenes,
            scenes: breakdown.scenes,
            scenes_text: breakdown.scenes_text,
            images_generated,
        }
    }
}
