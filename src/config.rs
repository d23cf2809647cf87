use anyhow::{Context, Result, anyhow};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama3-8b-8192";
const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub bind_addr: SocketAddr,
    pub output_dir: PathBuf,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. `GROQ_API_KEY` is required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("GROQ_API_KEY must be set"))?;

        let mut api_url = lookup("GROQ_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        while api_url.ends_with('/') {
            api_url.pop();
        }

        let model = lookup("QUIZGEN_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let bind_addr = lookup("QUIZGEN_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse()
            .context("QUIZGEN_BIND is not a socket address")?;

        let output_dir = lookup("QUIZGEN_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let request_timeout = match lookup("QUIZGEN_REQUEST_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .context("QUIZGEN_REQUEST_TIMEOUT_SECS is not a number")?,
            ),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let max_upload_bytes = match lookup("QUIZGEN_MAX_UPLOAD_BYTES") {
            Some(bytes) => bytes
                .parse()
                .context("QUIZGEN_MAX_UPLOAD_BYTES is not a number")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Config {
            api_key,
            api_url,
            model,
            bind_addr,
            output_dir,
            request_timeout,
            max_upload_bytes,
        })
    }
}
