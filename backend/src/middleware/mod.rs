//! Actix middleware used across inbound adapters.

pub mod trace;
