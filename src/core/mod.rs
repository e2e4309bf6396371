//! Core library components.
//!
//! Configuration, credential storage, the Acquia Cloud client, and alias
//! derivation. Nothing here prompts or prints.

pub mod alias;
pub mod cloud;
pub mod config;
pub mod constants;
pub mod credentials;
