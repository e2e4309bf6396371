//! blt - Drush alias generation for Acquia Cloud.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── aliases       # generate:aliases:acquia
//! │   ├── prompt        # Confirm / choice / required-input prompts
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # .blt.toml management
//!     ├── credentials   # ~/.acquia/cloud_api.conf
//!     ├── cloud         # Acquia Cloud API v2 client
//!     └── alias         # Environment -> Drush alias derivation
//! ```

pub mod cli;
pub mod core;
pub mod error;
