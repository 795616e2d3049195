//! Core library components.
//!
//! Everything below here is independent of the command line: discovery,
//! storage backends, encryption, matching and tree rendering.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod matcher;
pub mod registry;
pub mod settings;
pub mod store;
pub mod tree;
