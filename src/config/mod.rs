use crate::error::MuxError;
use serde::Deserialize;

/// Tunables for a [`crate::pipeline::Pipeline`].
///
/// Currently the only knob is the bounded buffer size each source channel is
/// created with (the "small bounded buffer" backpressure mechanism); more may
/// be added without breaking callers since every field has a default.
#[derive(Debug, Clone, Deserialize)]
pub struct MuxConfig {
    /// Capacity of each per-source `mpsc` channel. Producers that outrun the
    /// merger block once this many updates are queued.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,
}

fn default_channel_buffer() -> usize {
    64
}

impl Default for MuxConfig {
    fn default() -> Self {
        Self {
            channel_buffer: default_channel_buffer(),
        }
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &str) -> Result<MuxConfig, MuxError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| MuxError::Config(format!("failed to read {}: {}", path, e)))?;
    toml::from_str(&contents).map_err(|e| MuxError::Config(format!("failed to parse {}: {}", path, e)))
}

/// Load configuration, falling back to [`MuxConfig::default`] (with a logged
/// warning) if the file is missing or malformed.
pub fn load_config_or_default(path: &str) -> MuxConfig {
    load_config(path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load mux config, using defaults");
        MuxConfig::default()
    })
}
