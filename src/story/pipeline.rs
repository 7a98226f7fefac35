use super::artifact::{ArtifactWriter, SceneArtifact};
use crate::api::TextCompletion;
use crate::error::Result;
use crate::scene::{parse_scenes, PipelineResult, Scene, SceneBreakdown, StoryRequest};
use std::sync::Arc;
use tracing::info;

/// Prompt asking the model to break a story into `num_scenes` scenes.
pub fn breakdown_prompt(story_prompt: &str, num_scenes: u32) -> String {
    format!(
        "Break this story into {} short scenes.\n\
         For each scene, provide:\n\
         1. title\n\
         2. a short description\n\
         3. storytelling suitable for generating creative images\n\n\
         Story: {}",
        num_scenes, story_prompt
    )
}

/// Prompt asking the model to expand one scene's storytelling text.
pub fn detail_prompt(storytelling: &str) -> String {
    format!(
        "Create a detailed visual description for this scene: {}",
        storytelling
    )
}

/// Sequences the breakdown call, the parse, and the optional per-scene
/// detail calls. Every call is awaited before the next one starts.
#[derive(Clone)]
pub struct StoryPipeline {
    client: Arc<dyn TextCompletion>,
    writer: Arc<dyn ArtifactWriter>,
}

impl StoryPipeline {
    pub fn new(client: Arc<dyn TextCompletion>, writer: Arc<dyn ArtifactWriter>) -> Self {
        Self { client, writer }
    }

    /// Full run: breakdown, parse, and detail generation when requested.
    pub async fn run(&self, request: &StoryRequest) -> Result<PipelineResult> {
        let breakdown = self.generate_scenes(request).await?;

        if request.generate_images {
            self.describe_scenes(&breakdown.scenes).await?;
        }

        Ok(PipelineResult::from_breakdown(breakdown, request.generate_images))
    }

    /// Breakdown and parse only.
    pub async fn generate_scenes(&self, request: &StoryRequest) -> Result<SceneBreakdown> {
        info!("Generating scenes for: {}", request.story_prompt);

        let prompt = breakdown_prompt(&request.story_prompt, request.num_scenes);
        let scenes_text = self
            .client
            .complete(&prompt)
            .await
            .map_err(|e| e.into_upstream())?;

        let scenes = parse_scenes(&scenes_text);
        info!("Parsed {} scenes (requested {})", scenes.len(), request.num_scenes);

        Ok(SceneBreakdown {
            story_prompt: request.story_prompt.clone(),
            num_scenes: request.num_scenes,
            scenes,
            scenes_text,
        })
    }

    /// Generates and stores a detailed description for each scene, in order.
    ///
    /// Stops at the first failure; artifacts already written are kept.
    /// Returns the number of artifacts written.
    pub async fn describe_scenes(&self, scenes: &[Scene]) -> Result<usize> {
        let scene_count = scenes.len();
        info!("Generating visual descriptions for {} scenes", scene_count);

        for (idx, scene) in scenes.iter().enumerate() {
            let index = idx + 1;
            info!("=== {} ===", scene.title());

            let detail = self
                .client
                .complete(&detail_prompt(scene.storytelling()))
                .await
                .map_err(|e| e.into_upstream())?;

            let artifact = SceneArtifact::new(index, scene.title(), scene.storytelling(), detail);
            self.writer.write(&artifact).await?;

            info!("Described scene {} ({}/{})", scene.title(), index, scene_count);
        }

        Ok(scene_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoryError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies from a script and records every prompt it receives.
    struct ScriptedClient {
        replies: Mutex<Vec<Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextCompletion for ScriptedClient {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(StoryError::UpstreamGeneration("script exhausted".into())))
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        written: Mutex<Vec<SceneArtifact>>,
    }

    #[async_trait]
    impl ArtifactWriter for RecordingWriter {
        async fn write(&self, artifact: &SceneArtifact) -> Result<()> {
            self.written.lock().unwrap().push(artifact.clone());
            Ok(())
        }
    }

    const RAW: &str = "### Scene 1: Wake\n\
        **Storytelling for Creative Images:** Gears hum.\n\
        ### Scene 2: Paint\n\
        **Storytelling for Creative Images:** Blue meets canvas.";

    #[test]
    fn test_breakdown_prompt_template() {
        assert_eq!(
            breakdown_prompt("A robot learns to paint", 2),
            "Break this story into 2 short scenes.\n\
             For each scene, provide:\n\
             1. title\n\
             2. a short description\n\
             3. storytelling suitable for generating creative images\n\n\
             Story: A robot learns to paint"
        );
    }

    #[tokio::test]
    async fn test_generate_scenes_keeps_raw_text() {
        let client = Arc::new(ScriptedClient::new(vec![Ok(RAW.to_string())]));
        let writer = Arc::new(RecordingWriter::default());
        let pipeline = StoryPipeline::new(client.clone(), writer.clone());

        let breakdown = pipeline
            .generate_scenes(&StoryRequest::new("A robot learns to paint", 2, true))
            .await
            .unwrap();

        assert_eq!(breakdown.scenes.len(), 2);
        assert_eq!(breakdown.scenes_text, RAW);
        assert_eq!(client.prompts().len(), 1);
        assert!(writer.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_breakdown_failure_is_upstream_error() {
        let client = Arc::new(ScriptedClient::new(vec![Err(StoryError::UpstreamGeneration(
            "quota exceeded".into(),
        ))]));
        let pipeline = StoryPipeline::new(client, Arc::new(RecordingWriter::default()));

        let err = pipeline
            .run(&StoryRequest::new("p", 2, false))
            .await
            .unwrap_err();
        assert!(matches!(err, StoryError::UpstreamGeneration(msg) if msg == "quota exceeded"));
    }

    #[tokio::test]
    async fn test_detail_loop_is_fail_fast() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(RAW.to_string()),
            Err(StoryError::UpstreamGeneration("boom".into())),
            Ok("never requested".to_string()),
        ]));
        let writer = Arc::new(RecordingWriter::default());
        let pipeline = StoryPipeline::new(client.clone(), writer.clone());

        let err = pipeline
            .run(&StoryRequest::new("p", 2, true))
            .await
            .unwrap_err();

        assert!(matches!(err, StoryError::UpstreamGeneration(_)));
        assert_eq!(client.prompts().len(), 2);
        assert!(writer.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_detail_prompts_follow_scene_order() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(RAW.to_string()),
            Ok("one".to_string()),
            Ok("two".to_string()),
        ]));
        let writer = Arc::new(RecordingWriter::default());
        let pipeline = StoryPipeline::new(client.clone(), writer.clone());

        pipeline.run(&StoryRequest::new("p", 2, true)).await.unwrap();

        let prompts = client.prompts();
        assert_eq!(prompts[1], detail_prompt("Gears hum."));
        assert_eq!(prompts[2], detail_prompt("Blue meets canvas."));

        let written = writer.written.lock().unwrap();
        assert_eq!(written[0].detail, "one");
        assert_eq!(written[1].detail, "two");
    }
}
