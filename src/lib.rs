//! MTX Entitlements - Monetization entitlement core for multiplayer games
//!
//! This crate grants developer product receipts exactly once despite
//! redelivery, and reconciles game pass ownership with the platform when
//! a player joins.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
