//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod campaigns;
pub mod comments;
pub mod donations;
pub mod error;
pub mod health;
pub mod news;
pub mod profile;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod weather;

pub use error::ApiResult;
