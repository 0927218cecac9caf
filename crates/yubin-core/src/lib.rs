pub mod classify;
pub mod error;
pub mod models;
pub mod proxy;
pub mod store;
pub mod token;
pub mod traits;

#[cfg(test)]
pub mod testutil;

pub use classify::{SearchKind, classify};
pub use error::AppError;
pub use models::{CachedToken, TokenResponse, UpstreamResponse};
pub use proxy::ProxyService;
pub use store::{FileTokenStore, MemoryTokenStore};
pub use token::TokenResolver;
pub use traits::{AddressApi, TokenStore};
