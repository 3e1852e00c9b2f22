//! Storefront - session state service for a café storefront
//!
//! Provides a dual-tier TTL cache for catalog payloads and a cart store
//! with lazy product hydration, exposed over a small REST API.

pub mod api;
pub mod cache;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
