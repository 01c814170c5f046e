//! Shared library for the Tamariba room server.
//!
//! Cross-cutting utilities used by the server binary and its tests:
//! time handling with a clock abstraction, and logging setup.

pub mod logger;
pub mod time;
