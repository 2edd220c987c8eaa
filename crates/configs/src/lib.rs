use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
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
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

/// Where documents and the audit log live, and who the status probe names as owner.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Relative paths are resolved against `data_dir`.
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_owner")]
    pub owner: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), log_file: default_log_file(), owner: default_owner() }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_log_file() -> String { "log.txt".into() }
fn default_owner() -> String { "andrew maney".into() }

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

    /// Build a config purely from env vars, for runs without a config file.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        if let Ok(dir) = std::env::var("STORE_DATA_DIR") {
            cfg.store.data_dir = dir;
        }
        if let Ok(owner) = std::env::var("STORE_OWNER") {
            cfg.store.owner = owner;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.normalize()?;
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
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StoreConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("store.data_dir must not be empty"));
        }
        if self.log_file.trim().is_empty() {
            self.log_file = default_log_file();
        }
        if self.owner.trim().is_empty() {
            self.owner = default_owner();
        }
        Ok(())
    }

    /// Full path of the audit log.
    pub fn log_path(&self) -> std::path::PathBuf {
        let log = std::path::Path::new(&self.log_file);
        if log.is_absolute() {
            log.to_path_buf()
        } else {
            std::path::Path::new(&self.data_dir).join(log)
        }
    }
}
