use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub rpc: RpcConfig,
}

/// Bind address of the JSON-RPC storage server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5001, worker_threads: Some(4) }
    }
}

/// Bind address of the REST user front end.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    pub host: String,
    pub port: u16,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080 }
    }
}

/// Where the front end forwards created users over JSON-RPC.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    #[serde(default)]
    pub url: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self { url: default_rpc_url() }
    }
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:5001/rpc".to_string()
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

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.frontend.normalize()?;
        self.rpc.normalize_from_env();
        self.rpc.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be nonzero"));
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

impl FrontendConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("frontend.port must be nonzero"));
        }
        Ok(())
    }
}

impl RpcConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; the env var only fills in a missing URL.
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("RPC_URL") {
                self.url = url;
            }
        }
        if self.url.trim().is_empty() {
            self.url = default_rpc_url();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("rpc.url must start with http:// or https://"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 5001

            [frontend]
            host = "0.0.0.0"
            port = 8080

            [rpc]
            url = "http://127.0.0.1:5001/rpc"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 5001);
        assert_eq!(cfg.frontend.port, 8080);
        assert_eq!(cfg.rpc.url, "http://127.0.0.1:5001/rpc");
    }

    #[test]
    fn missing_sections_take_defaults() {
        let mut cfg: AppConfig = toml::from_str("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 5001);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert!(cfg.rpc.url.starts_with("http://"));
    }

    #[test]
    fn rejects_non_http_rpc_url() {
        let mut cfg = AppConfig::default();
        cfg.rpc.url = "ftp://example.com/rpc".into();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
