//! HTTP inbound adapter exposing REST endpoints.

pub mod asset_histories;
pub mod assets;
pub mod employees;
pub mod error;
pub mod filters;
pub mod state;

pub use error::ApiResult;
