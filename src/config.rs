use crate::api::{GeminiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::story::DEFAULT_OUTPUT_DIR;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "story-scenes")]
#[command(about = "Story scene generation service using a generative text model", long_about = None)]
pub struct Config {
    /// Gemini API key; without it the service starts uninitialized
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Address to bind
    #[arg(long, env = "STORY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "STORY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory for generated scene descriptions
    #[arg(short, long, env = "STORY_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Gemini REST API base URL
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Timeout for each model request, in seconds
    #[arg(long, env = "STORY_TIMEOUT_SECS", default_value_t = 300)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
