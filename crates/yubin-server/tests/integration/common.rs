use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use httpmock::MockServer;
use tempfile::TempDir;

use yubin_client::ReqwestAddressApi;
use yubin_core::{CachedToken, FileTokenStore, ProxyService};
use yubin_server::routes;
use yubin_server::state::AppState;

pub const CREDENTIALS: &str =
    r#"{"grant_type":"client_credentials","client_id":"test-client","secret_key":"test-secret"}"#;
pub const INDEX_HTML: &str = "<!doctype html><h1>yubin</h1>";

pub struct TestApp {
    pub router: Router,
    pub upstream: MockServer,
    pub dir: TempDir,
}

impl TestApp {
    pub fn token_file(&self) -> PathBuf {
        self.dir.path().join("runtime/access_token.json")
    }

    /// Token currently persisted on disk, if any.
    pub fn cached_token(&self) -> Option<CachedToken> {
        let raw = std::fs::read(self.token_file()).ok()?;
        serde_json::from_slice(&raw).ok()
    }
}

#[derive(Default)]
pub struct Options {
    pub without_credentials: bool,
    pub without_frontend: bool,
    pub cached_token: Option<CachedToken>,
    pub upstream_base_url: Option<String>,
}

/// Router wired to a fresh mock upstream, with credentials and a front-end
/// in a temporary directory.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(Options::default()).await
}

pub async fn setup_test_app_with(options: Options) -> TestApp {
    let upstream = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let credentials_file = dir.path().join("config/credentials.json");
    if !options.without_credentials {
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::write(&credentials_file, CREDENTIALS).unwrap();
    }

    let frontend_dir = dir.path().join("frontend");
    std::fs::create_dir_all(&frontend_dir).unwrap();
    if !options.without_frontend {
        std::fs::write(frontend_dir.join("index.html"), INDEX_HTML).unwrap();
        std::fs::write(frontend_dir.join("style.css"), "body { margin: 0; }").unwrap();
    }

    let token_file = dir.path().join("runtime/access_token.json");
    if let Some(token) = &options.cached_token {
        std::fs::create_dir_all(dir.path().join("runtime")).unwrap();
        std::fs::write(&token_file, serde_json::to_vec(token).unwrap()).unwrap();
    }

    let base_url = options
        .upstream_base_url
        .unwrap_or_else(|| upstream.base_url());
    let api = ReqwestAddressApi::with_base_url(&base_url).expect("Failed to build client");

    let state = Arc::new(AppState {
        proxy: ProxyService::new(FileTokenStore::new(&token_file), api, credentials_file),
        frontend_dir,
    });

    TestApp {
        router: routes::router(state),
        upstream,
        dir,
    }
}
