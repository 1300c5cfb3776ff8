//! fanout - message propagation and broadcast building blocks
//!
//! A severity-filtered handler chain, a publish/subscribe newsletter, a chat
//! room mediator and a shared-glyph factory. Every side effect is emitted as
//! a `Record` into an injectable `Sink`.

pub mod app;
pub mod chain;
pub mod cli;
pub mod config;
pub mod core;
pub mod flyweight;
pub mod formatting;
pub mod mediator;
pub mod notification;
pub mod outputs;
pub mod types;

// Re-export core types for convenience
pub use crate::core::*;
