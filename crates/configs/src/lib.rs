use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    /// Directory holding one `<user_id>.json` per user. Empty means
    /// "resolve from CONFIG_DIR or the built-in default".
    #[serde(default)]
    pub config_dir: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// Shared secret expected in the X-Auth-Token header. When unset the
    /// server still boots and answers every guarded request with a 500.
    #[serde(default)]
    pub token: Option<String>,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Env-only configuration for deployments that ship no config.toml.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        // 配置文件缺失时，退回环境变量
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.store.normalize_from_env();
        cfg.auth.normalize_from_env();
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        // 归一化 store / auth（支持从环境变量填充）
        self.store.normalize_from_env();
        self.store.validate()?;
        self.auth.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 {
                self.worker_threads = Some(4);
            }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StoreConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; CONFIG_DIR fills the gap, then the built-in default
        if self.config_dir.trim().is_empty() {
            self.config_dir = std::env::var("CONFIG_DIR")
                .ok()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "data/configs".to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.config_dir.trim().is_empty() {
            return Err(anyhow!(
                "store.config_dir is empty; set it in config.toml or via CONFIG_DIR"
            ));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            self.token = std::env::var("AUTH_TOKEN").ok().filter(|t| !t.trim().is_empty());
        }
    }
}
