//! Configuration loading for medbridge.
//!
//! Resolves the data directory, reads `config.toml` from it into
//! [`AppConfig`], and applies environment overrides. Falls back to
//! defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use medbridge_types::ai::ProviderKind;
use medbridge_types::config::AppConfig;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `MEDBRIDGE_DATA_DIR` environment variable
/// 2. Platform home directory (`~/.medbridge` on macOS/Linux)
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MEDBRIDGE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".medbridge");
    }

    // Last resort: current directory
    PathBuf::from(".medbridge")
}

/// Load application configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - The `AI_PROVIDER` environment variable overrides the configured
///   provider; unknown values fall back to the default with a warning.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    };

    if let Some(kind) = provider_from_env() {
        config.ai.provider = kind;
    }

    config
}

/// Read the `AI_PROVIDER` override, if set.
fn provider_from_env() -> Option<ProviderKind> {
    let raw = std::env::var("AI_PROVIDER").ok()?;
    match raw.parse::<ProviderKind>() {
        Ok(kind) => Some(kind),
        Err(_) => {
            tracing::warn!(
                "Unknown AI_PROVIDER value '{}', using {}",
                raw.trim(),
                ProviderKind::default()
            );
            Some(ProviderKind::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Serializes tests that touch the shared process environment.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[tokio::test]
    async fn test_load_config_missing_file_returns_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        // SAFETY: env mutation is confined to tests holding ENV_LOCK.
        unsafe { std::env::remove_var("AI_PROVIDER") };

        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.conversation_key, "default");
        assert_eq!(config.ai.provider, ProviderKind::OpenAi);
        assert_eq!(config.ai.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.ai.max_output_tokens, 1500);
    }

    #[tokio::test]
    async fn test_load_config_valid_toml_returns_parsed() {
        let _guard = ENV_LOCK.lock().unwrap();
        // SAFETY: env mutation is confined to tests holding ENV_LOCK.
        unsafe { std::env::remove_var("AI_PROVIDER") };

        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
conversation_key = "clinic-3"

[ai]
provider = "gemini"
request_timeout_secs = 10
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.conversation_key, "clinic-3");
        assert_eq!(config.ai.provider, ProviderKind::Gemini);
        assert_eq!(config.ai.request_timeout_secs, 10);
        // Unspecified fields keep their defaults
        assert_eq!(config.ai.openai_model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_load_config_invalid_toml_returns_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        // SAFETY: env mutation is confined to tests holding ENV_LOCK.
        unsafe { std::env::remove_var("AI_PROVIDER") };

        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.ai.provider, ProviderKind::OpenAi);
        assert_eq!(config.conversation_key, "default");
    }

    #[tokio::test]
    async fn test_provider_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        // SAFETY: env mutation is confined to tests holding ENV_LOCK.
        unsafe { std::env::set_var("AI_PROVIDER", "Gemini ") };

        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.ai.provider, ProviderKind::Gemini);

        unsafe { std::env::remove_var("AI_PROVIDER") };
    }

    #[tokio::test]
    async fn test_unknown_provider_env_falls_back_to_default() {
        let _guard = ENV_LOCK.lock().unwrap();
        // SAFETY: env mutation is confined to tests holding ENV_LOCK.
        unsafe { std::env::set_var("AI_PROVIDER", "claude") };

        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "[ai]\nprovider = \"gemini\"\n")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.ai.provider, ProviderKind::OpenAi);

        unsafe { std::env::remove_var("AI_PROVIDER") };
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        // SAFETY: env mutation is confined to tests holding ENV_LOCK.
        unsafe { std::env::set_var("MEDBRIDGE_DATA_DIR", "/tmp/test-medbridge") };

        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-medbridge"));

        unsafe { std::env::remove_var("MEDBRIDGE_DATA_DIR") };
    }
}
