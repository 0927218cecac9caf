use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use yubin_client::DEFAULT_BASE_URL;
use yubin_core::AppError;

/// Server configuration, from flags or environment (a `.env` file is
/// loaded first if present).
#[derive(Debug, Clone, Parser)]
#[command(name = "yubin", version, about = "Japan Post Digital Address API proxy")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Host name printed in the access URL (defaults to the bind host)
    #[arg(long, env = "PUBLIC_HOST")]
    pub public_host: Option<String>,

    /// Port printed in the access URL (defaults to the listen port)
    #[arg(long, env = "PUBLIC_PORT")]
    pub public_port: Option<u16>,

    /// Directory holding index.html and its assets
    #[arg(long, env = "YUBIN_FRONTEND_DIR", default_value = "shared/frontend")]
    pub frontend_dir: PathBuf,

    /// Operator-supplied credentials document sent to the token endpoint
    #[arg(
        long,
        env = "YUBIN_CREDENTIALS",
        default_value = "shared/config/credentials.json"
    )]
    pub credentials_file: PathBuf,

    /// Where the access token is cached
    #[arg(
        long,
        env = "YUBIN_TOKEN_FILE",
        default_value = "shared/runtime/access_token.json"
    )]
    pub token_file: PathBuf,

    /// Digital Address API base URL
    #[arg(long, env = "YUBIN_UPSTREAM_URL", default_value = DEFAULT_BASE_URL)]
    pub upstream_base_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "YUBIN_UPSTREAM_TIMEOUT", default_value_t = 30)]
    pub upstream_timeout: u64,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.port == 0 {
            return Err(AppError::ConfigError("PORT must be between 1 and 65535".into()));
        }
        if self.upstream_timeout == 0 {
            return Err(AppError::ConfigError(
                "YUBIN_UPSTREAM_TIMEOUT must be at least 1 second".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL a user on the host machine should open.
    pub fn access_url(&self) -> String {
        let host = match &self.public_host {
            Some(host) => host.as_str(),
            None if self.host == "0.0.0.0" => "127.0.0.1",
            None => self.host.as_str(),
        };
        let port = self.public_port.unwrap_or(self.port);
        format!("http://{host}:{port}")
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}
