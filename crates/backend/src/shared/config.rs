use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub telegram: TelegramConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    /// Токен бота; переменная окружения TELEGRAM_BOT_TOKEN имеет приоритет
    #[serde(default)]
    pub bot_token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Публичный URL вебхука; если задан, регистрируется при старте
    pub webhook_url: Option<String>,
    /// Секрет для заголовка X-Telegram-Bot-Api-Secret-Token
    pub webhook_secret: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Json,
    Firestore,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub kind: StoreKind,
    /// Путь к JSON-снимку (для kind = "json")
    pub json_path: Option<String>,
    /// Настройки Firestore (для kind = "firestore")
    pub firestore: Option<FirestoreConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    #[serde(default = "default_firestore_database")]
    pub database: String,
    #[serde(default = "default_firestore_base")]
    pub api_base: String,
    /// API key (query-параметр `key`)
    pub api_key: Option<String>,
    /// OAuth access token; переменная окружения FIRESTORE_ACCESS_TOKEN имеет приоритет
    pub access_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_button_label_limit")]
    pub button_label_limit: usize,
    /// Максимум кнопок выбора в одном сообщении
    #[serde(default = "default_max_choices")]
    pub max_choices: usize,
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
    /// Таймаут полного чтения коллекции клиентов при поиске
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub send_timeout_secs: u64,
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
    #[serde(default)]
    pub admin_chat_ids: Vec<i64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            button_label_limit: default_button_label_limit(),
            max_choices: default_max_choices(),
            lookup_timeout_secs: default_lookup_timeout_secs(),
            search_timeout_secs: default_search_timeout_secs(),
            send_timeout_secs: default_request_timeout_secs(),
            session_ttl_minutes: default_session_ttl_minutes(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            admin_chat_ids: Vec::new(),
        }
    }
}

impl BotConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }
}

fn default_api_base() -> String {
    "https://api.telegram.org".into()
}

fn default_firestore_base() -> String {
    "https://firestore.googleapis.com/v1".into()
}

fn default_firestore_database() -> String {
    "(default)".into()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_button_label_limit() -> usize {
    60
}

fn default_lookup_timeout_secs() -> u64 {
    5
}

fn default_search_timeout_secs() -> u64 {
    15
}

fn default_max_choices() -> usize {
    30
}

fn default_session_ttl_minutes() -> i64 {
    30
}

fn default_cleanup_interval_secs() -> u64 {
    60
}

/// Default configuration embedded in the binary
pub(crate) const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[telegram]
bot_token = ""

[store]
kind = "json"
json_path = "data/store.json"

[bot]
button_label_limit = 60
admin_chat_ids = []
"#;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Path from BOT_CONFIG environment variable
/// 2. Next to the executable (for production)
/// 3. Current working directory
/// 4. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match find_config_file() {
        Some(path) => {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            parse_config(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            parse_config(DEFAULT_CONFIG)?
        }
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("BOT_CONFIG") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
        tracing::warn!("BOT_CONFIG points to missing file: {}", path.display());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    let cwd_path = Path::new(CONFIG_FILE_NAME);
    if cwd_path.exists() {
        return Some(cwd_path.to_path_buf());
    }

    tracing::warn!("{} not found next to executable or in working directory", CONFIG_FILE_NAME);
    None
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
        if !token.trim().is_empty() {
            config.telegram.bot_token = token.trim().to_string();
        }
    }
    if let Ok(token) = std::env::var("FIRESTORE_ACCESS_TOKEN") {
        if let Some(firestore) = config.store.firestore.as_mut() {
            firestore.access_token = Some(token.trim().to_string());
        }
    }
}

/// Resolve a relative data path against the executable directory,
/// falling back to the working directory
pub fn resolve_data_path(path: &str) -> PathBuf {
    let candidate = Path::new(path);

    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved = exe_dir.join(candidate);
            if resolved.exists() {
                return resolved;
            }
        }
    }

    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.kind, StoreKind::Json);
        assert_eq!(config.store.json_path.as_deref(), Some("data/store.json"));
        assert_eq!(config.bot.button_label_limit, 60);
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
    }

    #[test]
    fn test_bot_section_is_optional() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [telegram]
            bot_token = "123:abc"
            webhook_secret = "s3cret"

            [store]
            kind = "firestore"

            [store.firestore]
            project_id = "paper-rolls"
            "#,
        )
        .unwrap();

        assert_eq!(config.bot.session_ttl_minutes, 30);
        assert_eq!(config.bot.lookup_timeout(), Duration::from_secs(5));
        assert_eq!(config.bot.search_timeout(), Duration::from_secs(15));
        assert_eq!(config.bot.max_choices, 30);
        let firestore = config.store.firestore.unwrap();
        assert_eq!(firestore.database, "(default)");
        assert_eq!(firestore.api_base, "https://firestore.googleapis.com/v1");
        assert_eq!(config.telegram.webhook_secret.as_deref(), Some("s3cret"));
    }
}
