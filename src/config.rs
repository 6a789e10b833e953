use anyhow::{Context, bail};
use envconfig::Envconfig;

/// Service name reported by the root endpoint and startup logs.
pub const APP_NAME: &str = "RentVerse AI Service";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Envconfig)]
pub struct ServerConfig {
    #[envconfig(from = "RENTVERSE_HOST", default = "0.0.0.0")]
    pub host: String,

    #[envconfig(from = "RENTVERSE_PORT", default = "8000")]
    pub port: u16,

    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: log::Level,

    #[envconfig(from = "RENTVERSE_DEBUG", default = "false")]
    pub debug: bool,
}

#[derive(Debug, Clone, Envconfig)]
pub struct ModelConfig {
    #[envconfig(from = "RENTVERSE_MODEL_DIR", default = "models")]
    pub model_dir: String,
}

#[derive(Debug, Clone, Envconfig)]
pub struct ApiConfig {
    #[envconfig(from = "RENTVERSE_API_PREFIX", default = "/api/v1")]
    pub prefix: String,

    #[envconfig(from = "RENTVERSE_MAX_BATCH_SIZE", default = "100")]
    pub max_batch_size: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub api: ApiConfig,
}

impl AppConfig {
    /// Read a `.env` file when one is present, then resolve the full
    /// configuration from the environment.
    pub fn load() -> anyhow::Result<Self> {
        match dotenv::dotenv() {
            Ok(path) => log::debug!("loaded environment from {}", path.display()),
            Err(_) => log::debug!("no .env file, using process environment only"),
        }
        Self::fetch()
    }

    pub fn fetch() -> anyhow::Result<Self> {
        let server = ServerConfig::init_from_env().context("Failed to load server config")?;
        let model = ModelConfig::init_from_env().context("Failed to load model config")?;
        let api = ApiConfig::init_from_env().context("Failed to load api config")?;

        validate_api_prefix(&api.prefix)?;
        validate_max_batch_size(api.max_batch_size)?;

        Ok(Self { server, model, api })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn validate_api_prefix(prefix: &str) -> anyhow::Result<()> {
    if !prefix.starts_with('/') || prefix.len() < 2 {
        bail!("RENTVERSE_API_PREFIX must be a non-root path starting with '/', got {prefix}");
    }
    if prefix.ends_with('/') {
        bail!("RENTVERSE_API_PREFIX must not end with '/', got {prefix}");
    }
    Ok(())
}

fn validate_max_batch_size(max_batch_size: usize) -> anyhow::Result<()> {
    if max_batch_size == 0 {
        bail!("RENTVERSE_MAX_BATCH_SIZE must be greater than 0");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_api_prefix, validate_max_batch_size};

    #[test]
    fn rejects_prefix_without_leading_slash() {
        let err = validate_api_prefix("api/v1").unwrap_err();
        assert!(err.to_string().contains("starting with '/'"));
    }

    #[test]
    fn rejects_bare_root_prefix() {
        assert!(validate_api_prefix("/").is_err());
    }

    #[test]
    fn rejects_prefix_with_trailing_slash() {
        let err = validate_api_prefix("/api/v1/").unwrap_err();
        assert!(err.to_string().contains("must not end with '/'"));
    }

    #[test]
    fn accepts_default_prefix() {
        validate_api_prefix("/api/v1").expect("default prefix should pass validation");
    }

    #[test]
    fn rejects_zero_batch_size() {
        let err = validate_max_batch_size(0).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn accepts_positive_batch_size() {
        validate_max_batch_size(100).expect("positive batch size should pass validation");
    }
}
