use std::path::PathBuf;

use yubin_client::ReqwestAddressApi;
use yubin_core::{FileTokenStore, ProxyService};

pub type Proxy = ProxyService<FileTokenStore, ReqwestAddressApi>;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub proxy: Proxy,
    /// Directory holding `index.html` and its assets.
    pub frontend_dir: PathBuf,
}
