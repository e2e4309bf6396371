//! Error types.
//!
//! Domain errors are grouped per subsystem and folded into [`Error`] with
//! `#[from]`, so every layer can propagate with `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for all blt operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error(transparent)]
    Alias(#[from] AliasError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The user declined a confirmation that guards a destructive step.
    #[error("aborted at user request")]
    Aborted,

    /// Fetching, deriving or writing aliases for a site failed.
    #[error("did not write aliases for {site}: {source}")]
    SiteFailed {
        site: String,
        #[source]
        source: Box<Error>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reading or writing `.blt.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors from the local credential file.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("unable to determine home directory")]
    NoHomeDir,

    #[error("malformed credentials in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode credentials: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Outcome of a failed credential check against the cloud API.
///
/// `Rejected` means the service answered and refused the credentials, so
/// asking again makes sense. `Transport` means the service could not be
/// reached at all, and `Unavailable` that it answered with a server error.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("credentials rejected ({status}): {message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("could not reach Acquia Cloud: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Acquia Cloud failed to authenticate ({status}): {message}")]
    Unavailable {
        status: reqwest::StatusCode,
        message: String,
    },
}

/// Errors talking to the Acquia Cloud API.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("gave up after {0} failed authentication attempts")]
    TooManyAttempts(u32),

    #[error("no applications are visible to these credentials")]
    NoApplications,
}

/// Malformed data in an API response that blocks alias derivation, or an
/// alias file that cannot be rendered.
#[derive(Error, Debug)]
pub enum AliasError {
    #[error("hosting id '{0}' is not of the form realm:site")]
    HostingId(String),

    #[error("ssh url '{url}' for environment '{env}' is not of the form user@host")]
    SshUrl { env: String, url: String },

    #[error("environment '{0}' has no domains")]
    NoDomains(String),

    #[error("failed to encode aliases: {0}")]
    Encode(#[from] serde_yaml::Error),
}

/// Errors from interactive prompts.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("input closed before an answer was given")]
    Closed,

    #[error("no options to choose from")]
    NoOptions,

    #[error("prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),

    #[error("prompt failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Suggested next step for the user, if one applies.
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::Credentials(CredentialsError::Malformed { path, .. }) => Some(format!(
                "delete {} and run the command again to re-enter credentials",
                path.display()
            )),
            Error::Cloud(CloudError::TooManyAttempts(_)) => {
                Some("check your key and secret at https://cloud.acquia.com".to_string())
            }
            Error::Aborted => Some("re-run with --yes to overwrite without asking".to_string()),
            Error::SiteFailed { source, .. } => source.hint(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
