//! Configuration loader for Facegate.
//!
//! Reads `config.toml` from the data directory (`~/.facegate/` in
//! production) and deserializes it into [`ServiceConfig`], falling back to
//! defaults when the file is missing or malformed. A handful of
//! deployment-critical values can be overridden by environment variables
//! after the file is loaded.

use std::path::{Path, PathBuf};

use facegate_types::config::ServiceConfig;

/// Resolve the data directory: `FACEGATE_DATA_DIR`, else `~/.facegate`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FACEGATE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".facegate")
}

/// Database URL inside the data directory.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("facegate.db").display())
}

/// Load service configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Env overrides (`FACEGATE_ENCODER_URL`, `FACEGATE_ADMIN_EMAIL`,
///   `FACEGATE_ADMIN_PASSWORD`) are applied last in all cases.
pub async fn load_config(data_dir: &Path) -> ServiceConfig {
    let config_path = data_dir.join("config.toml");

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<ServiceConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                ServiceConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    };

    apply_env_overrides(&mut config);
    config
}

fn apply_env_overrides(config: &mut ServiceConfig) {
    if let Ok(url) = std::env::var("FACEGATE_ENCODER_URL") {
        config.encoder.base_url = url;
    }
    if let Ok(email) = std::env::var("FACEGATE_ADMIN_EMAIL") {
        config.admin.email = Some(email);
    }
    if let Ok(password) = std::env::var("FACEGATE_ADMIN_PASSWORD") {
        config.admin.password = Some(password.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facegate_types::config::MetricKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.matching.threshold, 0.5);
        assert_eq!(config.encoder.dimension, 512);
    }

    #[tokio::test]
    async fn test_valid_toml_is_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[matching]
metric = "distance"
threshold = 0.45

[encoder]
base_url = "http://encoder:9000"
timeout_secs = 3
dimension = 128
model = "dlib"

[schedule]
clock_in_deadline = "09:00"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.matching.metric, MetricKind::Distance);
        assert_eq!(config.encoder.dimension, 128);
        assert_eq!(config.schedule.clock_in_deadline, "09:00");
        // Unset sections keep defaults
        assert_eq!(config.schedule.utc_offset_hours, 7);
    }

    #[tokio::test]
    async fn test_invalid_toml_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml")
            .await
            .unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.matching.threshold, 0.5);
    }

    #[test]
    fn test_database_url_shape() {
        let url = database_url(Path::new("/tmp/fg"));
        assert!(url.starts_with("sqlite://"));
        assert!(url.contains("facegate.db"));
    }
}
