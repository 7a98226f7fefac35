#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use story_scenes::{ArtifactWriter, Result, SceneArtifact, StoryError, TextCompletion};

pub const TWO_SCENE_COMPLETION: &str = "Sure! Here is the story in two scenes.

### Scene 1: Awakening
**Description:** A robot powers on in a dusty studio.
**Storytelling for Creative Images:** Sunlight cuts through the dust
as the robot's optics flicker to life.
---

### Scene 2: First Canvas
**Description:** The robot attempts its first painting.
**Storytelling for Creative Images:** A trembling metal hand drags crimson across white linen.
---
";

/// Returns the breakdown text first, then a numbered detail for every later call.
pub struct StubClient {
    breakdown: String,
    calls: AtomicUsize,
}

impl StubClient {
    pub fn new(breakdown: &str) -> Self {
        Self {
            breakdown: breakdown.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Skips the breakdown reply; every call yields a detail.
    pub fn details_only() -> Self {
        Self {
            breakdown: String::new(),
            calls: AtomicUsize::new(1),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextCompletion for StubClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n == 0 {
            assert!(prompt.starts_with("Break this story into"));
            Ok(self.breakdown.clone())
        } else {
            Ok(format!("detailed view #{}", n))
        }
    }
}

/// Every call fails.
pub struct FailingClient;

#[async_trait]
impl TextCompletion for FailingClient {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(StoryError::UpstreamGeneration("model unavailable".to_string()))
    }
}

#[derive(Default)]
pub struct MemoryWriter {
    pub written: Mutex<Vec<SceneArtifact>>,
}

#[async_trait]
impl ArtifactWriter for MemoryWriter {
    async fn write(&self, artifact: &SceneArtifact) -> Result<()> {
        self.written.lock().unwrap().push(artifact.clone());
        Ok(())
    }
}
