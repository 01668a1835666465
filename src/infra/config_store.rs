// ============================================================
// Layer 6 — Config Store
// ============================================================
// Reads a FlashcardConfig from a JSON file.
//
// Example file:
//   {
//     "model": "llama3-8b-8192",
//     "max_retries": 5,
//     "retry_delay_secs": 10
//   }
//
// Missing fields take their defaults. The file is only ever
// read; nothing in this tool writes to disk.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::application::config::FlashcardConfig;

/// Load the config at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<FlashcardConfig> {
    let Some(path) = path else {
        return Ok(FlashcardConfig::default());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

    let cfg: FlashcardConfig = serde_json::from_str(&json)
        .with_context(|| format!("Invalid config in '{}'", path.display()))?;

    tracing::debug!("Loaded config from '{}': model={}", path.display(), cfg.model);
    Ok(cfg)
}
