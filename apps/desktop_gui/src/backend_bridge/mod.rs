//! Backend worker: owns the async runtime and the chat transport.

pub mod commands;
pub mod runtime;
