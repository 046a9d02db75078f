//! Server configuration loader.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`ServerConfig`]. Falls back to defaults when the file is missing or
//! malformed. Every key is optional:
//!
//! ```toml
//! host = "127.0.0.1"      # bind address
//! port = 8000
//! log_format = "text"     # or "json"
//! otel = false            # export spans over OTLP
//! pastebin_routes = true  # mount the open /pastebin/snippets/ set
//! ```
//!
//! CLI flags (`--host`, `--port`) override the file for `serve`.

use std::path::Path;

use pastebin_types::config::ServerConfig;

/// Load server configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_server_config(data_dir: &Path) -> ServerConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}
