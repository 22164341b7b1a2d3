//! Outbound adapters implementing the domain ports.

pub mod broadcast;
pub mod memory;
pub mod rest;
pub mod weather;
