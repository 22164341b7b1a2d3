//! Weather provider adapters.

mod dto;
mod http_source;

pub use http_source::AccuWeatherSource;
