//! Process configuration read from the environment at startup.

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the generative model endpoints. Required.
    pub api_key: String,
    /// TCP port to bind. Defaults to 8000.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY missing")?;
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        Ok(Config { api_key, port })
    }
}
