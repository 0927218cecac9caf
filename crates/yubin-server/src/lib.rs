//! HTTP front for the proxy: routing, CORS/method middleware, error mapping and configuration.

pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
