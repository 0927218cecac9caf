pub mod api;

pub use api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ReqwestAddressApi};
