//! Acquia Cloud API v2 client.
//!
//! Authentication is OAuth2 client credentials: the API key and secret are
//! exchanged for a bearer token, which every later request carries.
//! Collection endpoints answer in HAL form, with the records under
//! `_embedded.items`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::credentials::Credentials;
use crate::error::{AuthError, CloudError, Result};

/// A hosted application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Application {
    pub uuid: String,
    pub name: String,
    pub hosting: Hosting,
}

/// Where an application is hosted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Hosting {
    /// `realm:site`
    pub id: String,
}

/// One deployment target of an application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Environment {
    pub name: String,
    #[serde(default)]
    pub domains: Vec<String>,
    pub ssh_url: String,
}

#[derive(Deserialize)]
struct Collection<T> {
    #[serde(rename = "_embedded")]
    embedded: Embedded<T>,
}

#[derive(Deserialize)]
struct Embedded<T> {
    items: Vec<T>,
}

#[derive(Deserialize)]
struct Token {
    access_token: String,
}

#[derive(Deserialize)]
struct OAuthError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Read access to the Acquia Cloud API.
pub trait CloudApi {
    /// All applications visible to the authenticated user.
    fn applications(&self) -> Result<Vec<Application>>;

    /// One application by UUID.
    fn application(&self, id: &str) -> Result<Application>;

    /// Environments of an application, in API order.
    fn environments(&self, application_uuid: &str) -> Result<Vec<Environment>>;
}

/// Turns credentials into a live API handle.
pub trait Connector {
    type Api: CloudApi;

    /// Build a client and make one read-only call to prove the credentials
    /// work.
    ///
    /// # Errors
    ///
    /// `AuthError::Rejected` if the service refused the credentials,
    /// `AuthError::Transport` if it could not be reached.
    fn authenticate(&self, credentials: &Credentials) -> std::result::Result<Self::Api, AuthError>;
}

/// Connector for the real HTTP API.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    api_url: String,
    token_url: String,
    http: reqwest::blocking::Client,
}

impl HttpConnector {
    /// # Errors
    ///
    /// Returns `CloudError::Client` if the HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>, token_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(constants::HTTP_TIMEOUT_SECS))
            .user_agent(concat!("blt/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CloudError::Client)?;

        Ok(Self {
            api_url: api_url.into(),
            token_url: token_url.into(),
            http,
        })
    }

    fn request_token(
        &self,
        credentials: &Credentials,
    ) -> std::result::Result<Zeroizing<String>, AuthError> {
        debug!(url = %self.token_url, "requesting access token");

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.key.as_str()),
                ("client_secret", credentials.secret.as_str()),
            ])
            .send()
            .map_err(AuthError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = match serde_json::from_str::<OAuthError>(&body) {
                Ok(e) => e.error_description.unwrap_or(e.error),
                Err(_) => body.trim().to_string(),
            };
            return Err(refusal(status, message));
        }

        let token: Token = response.json().map_err(AuthError::Transport)?;
        Ok(Zeroizing::new(token.access_token))
    }
}

impl Connector for HttpConnector {
    type Api = CloudClient;

    fn authenticate(&self, credentials: &Credentials) -> std::result::Result<CloudClient, AuthError> {
        let token = self.request_token(credentials)?;
        let client = CloudClient {
            api_url: self.api_url.clone(),
            token,
            http: self.http.clone(),
        };

        // The token endpoint alone does not prove API access.
        client
            .get::<Collection<Application>>("/applications")
            .map_err(|e| match e {
                CloudError::Status { status, url } => {
                    refusal(status, format!("{} refused the token", url))
                }
                CloudError::Request { source, .. } => AuthError::Transport(source),
                CloudError::Auth(e) => e,
                other => AuthError::Rejected {
                    status: reqwest::StatusCode::UNAUTHORIZED,
                    message: other.to_string(),
                },
            })?;

        debug!("authenticated");
        Ok(client)
    }
}

/// Client errors mean the credentials were refused; anything else is the
/// service failing.
fn refusal(status: reqwest::StatusCode, message: String) -> AuthError {
    if status.is_client_error() {
        AuthError::Rejected { status, message }
    } else {
        AuthError::Unavailable { status, message }
    }
}

/// Authenticated API handle.
pub struct CloudClient {
    api_url: String,
    token: Zeroizing<String>,
    http: reqwest::blocking::Client,
}

impl CloudClient {
    fn get<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, CloudError> {
        let url = format!("{}{}", self.api_url, path);
        debug!(url = %url, "GET");

        let request_failed = |source: reqwest::Error| CloudError::Request {
            url: url.clone(),
            source,
        };

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CloudError::Status {
                url: url.clone(),
                status,
            });
        }

        response.json().map_err(request_failed)
    }
}

impl CloudApi for CloudClient {
    fn applications(&self) -> Result<Vec<Application>> {
        let apps: Collection<Application> = self.get("/applications")?;
        Ok(apps.embedded.items)
    }

    fn application(&self, id: &str) -> Result<Application> {
        Ok(self.get(&format!("/applications/{}", id))?)
    }

    fn environments(&self, application_uuid: &str) -> Result<Vec<Environment>> {
        let envs: Collection<Environment> =
            self.get(&format!("/applications/{}/environments", application_uuid))?;
        Ok(envs.embedded.items)
    }
}
