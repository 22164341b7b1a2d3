//! Inbound adapters translating external requests into domain service calls.
//!
//! REST handlers live under [`http`]; the comment-stream WebSocket entry
//! lives under [`ws`]. Both depend only on driving ports so transports can
//! be tested against fixtures.

pub mod http;
pub mod ws;
