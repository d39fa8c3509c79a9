use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid viewer config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("viewer config has an empty model url")]
    EmptyModelUrl,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub viewer: ViewerConfig,
}

/// Parameters handed to the external viewer on startup.
/// Read as snake_case from TOML, passed to JS as camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ViewerConfig {
    pub model_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub show_stats: bool,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

fn default_verbose() -> bool {
    true
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[viewer]
model_url = "https://app.speckle.systems/projects/c832429e56/models/53793399af"
show_stats = false
verbose = true
"#;

/// Parse a TOML document with a `[viewer]` table.
///
/// `token_override` (normally the `SPECKLE_TOKEN` value captured at build
/// time) replaces the token from the document. Empty tokens count as absent.
pub fn parse_config(contents: &str, token_override: Option<&str>) -> Result<ViewerConfig, ConfigError> {
    let config: Config = toml::from_str(contents)?;
    let mut viewer = config.viewer;

    if viewer.model_url.trim().is_empty() {
        return Err(ConfigError::EmptyModelUrl);
    }

    if let Some(token) = token_override {
        viewer.token = Some(token.to_string());
    }
    viewer.token = viewer.token.filter(|t| !t.trim().is_empty());

    Ok(viewer)
}

/// Load the embedded default configuration
pub fn load_config(token_override: Option<&str>) -> Result<ViewerConfig, ConfigError> {
    let config = parse_config(DEFAULT_CONFIG, token_override)?;
    log::info!(
        "Viewer config: model={}, token={}",
        config.model_url,
        if config.token.is_some() { "set" } else { "none" }
    );
    Ok(config)
}
