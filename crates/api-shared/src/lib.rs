//! # API Shared
//!
//! Wire types and utilities shared by Ward's API surfaces.
//!
//! The `dto` module defines the JSON request/response shapes exposed over
//! HTTP, kept separate from the core value types so that the wire contract
//! can evolve without touching core semantics.

#![warn(rust_2018_idioms)]

pub mod dto;
pub mod health;

pub use health::HealthService;
