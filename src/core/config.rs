//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.skillswap/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Page;
use crate::core::seed::{DEMO_CONVERSATION_ID, DEMO_REPLY_TEXT};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SkillSwapConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub messaging: MessagingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_page: Option<Page>,
    pub user_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MessagingConfig {
    pub demo_conversation: Option<String>,
    pub reply_delay_ms: Option<u64>,
    pub typing_clear_ms: Option<u64>,
    pub reply_text: Option<String>,
    pub audio_placeholder_secs: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub login_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_USER_NAME: &str = "Você";
pub const DEFAULT_REPLY_DELAY_MS: u64 = 2000;
pub const DEFAULT_TYPING_CLEAR_MS: u64 = 3000;
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;
pub const DEFAULT_AUDIO_PLACEHOLDER_SECS: u32 = 120;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Knobs for the simulated real-time chat.
#[derive(Debug, Clone, PartialEq)]
pub struct MessagingSettings {
    /// The one thread that answers back.
    pub demo_conversation: String,
    pub reply_delay: Duration,
    pub typing_clear_delay: Duration,
    pub reply_text: String,
    pub audio_placeholder_secs: u32,
}

impl Default for MessagingSettings {
    fn default() -> Self {
        Self {
            demo_conversation: DEMO_CONVERSATION_ID.to_string(),
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            typing_clear_delay: Duration::from_millis(DEFAULT_TYPING_CLEAR_MS),
            reply_text: DEMO_REPLY_TEXT.to_string(),
            audio_placeholder_secs: DEFAULT_AUDIO_PLACEHOLDER_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub start_page: Page,
    pub user_name: String,
    pub messaging: MessagingSettings,
    pub login_delay: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.skillswap/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".skillswap").join("config.toml"))
}

/// Load config from `~/.skillswap/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SkillSwapConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SkillSwapConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SkillSwapConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<SkillSwapConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(SkillSwapConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SkillSwapConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# SkillSwap Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_page = "login"               # "login", "register", "forgot-password", "messages",
                                     # "matches", "network", "history", "reviews", "achievements"
# user_name = "Você"                 # Or set SKILLSWAP_USER_NAME env var

# [messaging]
# demo_conversation = "1"            # Thread that sends a simulated reply
# reply_delay_ms = 2000              # Or set SKILLSWAP_REPLY_DELAY_MS env var
# typing_clear_ms = 3000
# reply_text = "Perfeito! Amanhã às 15h funciona para você?"
# audio_placeholder_secs = 120

# [auth]
# login_delay_ms = 1500              # Simulated login, sign-up and recovery requests
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn env_millis(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(ms) => Some(ms),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}

fn env_page(name: &str) -> Option<Page> {
    let raw = std::env::var(name).ok()?;
    match <Page as clap::ValueEnum>::from_str(raw.trim(), true) {
        Ok(page) => Some(page),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_page` is from the `--page` flag (None = not specified).
pub fn resolve(config: &SkillSwapConfig, cli_page: Option<Page>) -> ResolvedConfig {
    // Start page: CLI → env → config → default
    let start_page = cli_page
        .or_else(|| env_page("SKILLSWAP_START_PAGE"))
        .or(config.general.start_page)
        .unwrap_or_default();

    // User name: env → config → default
    let user_name = std::env::var("SKILLSWAP_USER_NAME")
        .ok()
        .or_else(|| config.general.user_name.clone())
        .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());

    // Reply delay: env → config → default
    let reply_delay_ms = env_millis("SKILLSWAP_REPLY_DELAY_MS")
        .or(config.messaging.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY_MS);

    let defaults = MessagingSettings::default();
    let messaging = MessagingSettings {
        demo_conversation: config
            .messaging
            .demo_conversation
            .clone()
            .unwrap_or(defaults.demo_conversation),
        reply_delay: Duration::from_millis(reply_delay_ms),
        typing_clear_delay: config
            .messaging
            .typing_clear_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.typing_clear_delay),
        reply_text: config
            .messaging
            .reply_text
            .clone()
            .unwrap_or(defaults.reply_text),
        audio_placeholder_secs: config
            .messaging
            .audio_placeholder_secs
            .unwrap_or(defaults.audio_placeholder_secs),
    };

    ResolvedConfig {
        start_page,
        user_name,
        messaging,
        login_delay: Duration::from_millis(
            config.auth.login_delay_ms.unwrap_or(DEFAULT_LOGIN_DELAY_MS),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = SkillSwapConfig::default();
        assert!(config.general.start_page.is_none());
        assert!(config.messaging.reply_delay_ms.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&SkillSwapConfig::default(), Some(Page::Login));
        assert_eq!(resolved.start_page, Page::Login);
        assert_eq!(resolved.messaging.demo_conversation, "1");
        assert_eq!(resolved.messaging.typing_clear_delay, Duration::from_secs(3));
        assert_eq!(resolved.messaging.reply_text, DEMO_REPLY_TEXT);
        assert_eq!(resolved.login_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = SkillSwapConfig {
            messaging: MessagingConfig {
                demo_conversation: Some("3".into()),
                typing_clear_ms: Some(10),
                reply_text: Some("Combinado!".into()),
                audio_placeholder_secs: Some(30),
                ..Default::default()
            },
            auth: AuthConfig {
                login_delay_ms: Some(0),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.messaging.demo_conversation, "3");
        assert_eq!(resolved.messaging.typing_clear_delay, Duration::from_millis(10));
        assert_eq!(resolved.messaging.reply_text, "Combinado!");
        assert_eq!(resolved.messaging.audio_placeholder_secs, 30);
        assert_eq!(resolved.login_delay, Duration::ZERO);
    }

    #[test]
    fn test_resolve_cli_page_wins() {
        let config = SkillSwapConfig {
            general: GeneralConfig {
                start_page: Some(Page::History),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some(Page::Matches));
        assert_eq!(resolved.start_page, Page::Matches);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
start_page = "messages"
user_name = "Ana"

[messaging]
reply_delay_ms = 500
reply_text = "Até amanhã!"

[auth]
login_delay_ms = 100
"#;
        let config: SkillSwapConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.start_page, Some(Page::Messages));
        assert_eq!(config.general.user_name.as_deref(), Some("Ana"));
        assert_eq!(config.messaging.reply_delay_ms, Some(500));
        assert_eq!(config.auth.login_delay_ms, Some(100));
        assert!(config.messaging.demo_conversation.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[auth]
login_delay_ms = 10
"#;
        let config: SkillSwapConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.auth.login_delay_ms, Some(10));
        assert!(config.general.start_page.is_none());
    }

    #[test]
    fn test_multi_word_pages_are_kebab_case() {
        let config: SkillSwapConfig =
            toml::from_str("[general]\nstart_page = \"forgot-password\"\n").unwrap();
        assert_eq!(config.general.start_page, Some(Page::ForgotPassword));
        assert_eq!(
            <Page as clap::ValueEnum>::from_str("forgot-password", true),
            Ok(Page::ForgotPassword)
        );
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("skillswap-cfg-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\nstart_page = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("skillswap-cfg-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.general.start_page.is_none());

        // Everything in the generated file is commented out, so it parses to defaults
        let generated = fs::read_to_string(&path).unwrap();
        assert!(generated.contains("# reply_delay_ms = 2000"));
        let reparsed: SkillSwapConfig = toml::from_str(&generated).unwrap();
        assert!(reparsed.messaging.reply_delay_ms.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }
}
