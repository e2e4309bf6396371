//! Constants used throughout blt.
//!
//! Centralizes magic strings and default values.

/// Project configuration file name, relative to the repository root.
pub const CONFIG_FILE: &str = ".blt.toml";

/// Credential directory relative to HOME (~/.acquia).
pub const CREDENTIALS_DIR: &str = ".acquia";

/// Credential file name inside [`CREDENTIALS_DIR`].
pub const CREDENTIALS_FILE: &str = "cloud_api.conf";

/// Alias directory relative to the repository root.
pub const ALIAS_DIR: &str = "drush/site-aliases";

/// Alias file suffix, appended to the site id.
pub const ALIAS_SUFFIX: &str = ".alias.yml";

/// Remote docroot prefix for every Acquia environment.
pub const REMOTE_WEB_ROOT: &str = "/var/www/html";

/// Acquia Cloud API v2 base URL.
pub const DEFAULT_API_URL: &str = "https://cloud.acquia.com/api";

/// OAuth token endpoint for Acquia Cloud API v2.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.acquia.com/api/auth/oauth/token";

/// Prompt-and-authenticate cycles allowed before giving up.
pub const DEFAULT_AUTH_ATTEMPTS: u32 = 3;

/// Timeout for each HTTP request, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "BLT_CLOUD_API_URL";

/// Environment variable that overrides the token endpoint.
pub const TOKEN_URL_ENV: &str = "BLT_CLOUD_TOKEN_URL";
