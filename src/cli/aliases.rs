//! `generate:aliases:acquia` command.
//!
//! Fetches the environments of an Acquia Cloud application and writes a
//! Drush alias file for its site.
//!
//! The flow runs in order: resolve the application ID, resolve and check
//! credentials, fetch the application and its environments, derive the
//! aliases, confirm any overwrite, and write the file. Everything the steps
//! share lives in a [`Session`] rather than on a long-lived command object.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::cli::output;
use crate::cli::prompt::{Backend, Console, Prompter};
use crate::core::alias::{self, HostingId, SiteAliases};
use crate::core::cloud::{Application, CloudApi, Connector, HttpConnector};
use crate::core::config::Config;
use crate::core::constants;
use crate::core::credentials::{CredentialStore, Credentials};
use crate::error::{AuthError, CloudError, Error, Result};

/// Inputs for one run of the command.
#[derive(Debug, Clone)]
pub struct Request {
    /// Repository root; aliases land under `drush/site-aliases`.
    pub repo_root: PathBuf,
    /// Application ID given on the command line or through the environment.
    pub app_id: Option<String>,
    /// Pick the application from a list instead of typing its ID.
    pub select_app: bool,
}

/// Where the application ID came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppIdSource {
    Flag,
    Config,
    Prompt,
    Selection,
}

impl AppIdSource {
    fn is_interactive(self) -> bool {
        matches!(self, AppIdSource::Prompt | AppIdSource::Selection)
    }
}

/// State built up while the command runs.
pub struct Session<A> {
    pub app_id: String,
    pub app_id_source: AppIdSource,
    pub api: A,
}

/// Run the command against the real Acquia Cloud API.
pub fn execute(request: Request, assume_yes: bool) -> Result<()> {
    let mut config = Config::load(&request.repo_root)?;
    let connector = HttpConnector::new(config.api_url(), config.token_url())?;
    let store = CredentialStore::locate()?;
    let mut prompter = Prompter::new(Console::detect(), assume_yes);

    generate(&request, &mut config, &store, &connector, &mut prompter)?;
    Ok(())
}

/// Generate the alias file for the requested application.
///
/// Returns the path written.
///
/// # Errors
///
/// Credential, configuration and authentication problems are returned as
/// is. Anything that goes wrong once the application is known is wrapped in
/// [`Error::SiteFailed`] naming the site.
pub fn generate<C: Connector, B: Backend>(
    request: &Request,
    config: &mut Config,
    store: &CredentialStore,
    connector: &C,
    prompter: &mut Prompter<B>,
) -> Result<PathBuf> {
    let session = open_session(request, config, store, connector, prompter)?;

    output::info("Gathering site info from Acquia Cloud.");
    let app = session.api.application(&session.app_id)?;
    debug!(uuid = %app.uuid, name = %app.name, "application found");

    if session.app_id_source.is_interactive() {
        remember_app_id(config, &request.repo_root, &session.app_id)?;
    }

    match write_site_aliases(&session, &app, &request.repo_root, prompter) {
        Ok(path) => {
            info!(path = %path.display(), "aliases written");
            output::success("Aliases were written, type 'drush sa' to see them.");
            Ok(path)
        }
        Err(e) => {
            error!(site = %app.name, error = %e, "did not write aliases");
            Err(Error::SiteFailed {
                site: app.name,
                source: Box::new(e),
            })
        }
    }
}

fn open_session<C: Connector, B: Backend>(
    request: &Request,
    config: &Config,
    store: &CredentialStore,
    connector: &C,
    prompter: &mut Prompter<B>,
) -> Result<Session<C::Api>> {
    let attempts = config.auth_attempts();

    let known = match (&request.app_id, &config.cloud.app_id) {
        (Some(id), _) => Some((id.clone(), AppIdSource::Flag)),
        (None, Some(id)) => Some((id.clone(), AppIdSource::Config)),
        (None, None) => None,
    };

    let session = match known {
        Some((app_id, app_id_source)) => Session {
            app_id,
            app_id_source,
            api: resolve_credentials(store, connector, prompter, attempts)?,
        },
        None if request.select_app => {
            let api = resolve_credentials(store, connector, prompter, attempts)?;
            Session {
                app_id: select_application(&api, prompter)?,
                app_id_source: AppIdSource::Selection,
                api,
            }
        }
        None => {
            let app_id = prompter.ask_required("Please enter your Acquia Cloud application ID")?;
            Session {
                app_id,
                app_id_source: AppIdSource::Prompt,
                api: resolve_credentials(store, connector, prompter, attempts)?,
            }
        }
    };

    debug!(app_id = %session.app_id, source = ?session.app_id_source, "session ready");
    Ok(session)
}

/// Load stored credentials, or ask for new ones until they authenticate.
///
/// Newly entered credentials are saved once they work. Stored credentials
/// the API rejects fall through to asking; a malformed credential file or
/// an unreachable API stops the run.
pub fn resolve_credentials<C: Connector, B: Backend>(
    store: &CredentialStore,
    connector: &C,
    prompter: &mut Prompter<B>,
    attempts: u32,
) -> Result<C::Api> {
    if let Some(credentials) = store.load()? {
        match connector.authenticate(&credentials) {
            Ok(api) => return Ok(api),
            Err(e @ AuthError::Rejected { .. }) => {
                error!(error = %e, "failed to authenticate with Acquia Cloud API");
                output::warn(&format!(
                    "credentials in {} were rejected",
                    output::path(store.path())
                ));
            }
            Err(e) => return Err(CloudError::Auth(e).into()),
        }
    }

    let (credentials, api) = ask_for_credentials(connector, prompter, attempts)?;
    store.save(&credentials)?;
    output::success(&format!(
        "Credentials were written to {}.",
        output::path(store.path())
    ));

    Ok(api)
}

fn ask_for_credentials<C: Connector, B: Backend>(
    connector: &C,
    prompter: &mut Prompter<B>,
    attempts: u32,
) -> Result<(Credentials, C::Api)> {
    for attempt in 1..=attempts {
        let key = prompter.ask_required("Please enter your Acquia cloud API key:")?;
        let secret = prompter.ask_secret("Please enter your Acquia cloud API secret:")?;
        let credentials = Credentials::new(key, secret);

        match connector.authenticate(&credentials) {
            Ok(api) => return Ok((credentials, api)),
            Err(e @ AuthError::Rejected { .. }) => {
                error!(attempt, attempts, error = %e, "failed to authenticate with Acquia Cloud API");
            }
            Err(e) => return Err(CloudError::Auth(e).into()),
        }
    }

    Err(CloudError::TooManyAttempts(attempts).into())
}

fn select_application<A: CloudApi, B: Backend>(api: &A, prompter: &mut Prompter<B>) -> Result<String> {
    let applications = api.applications()?;
    if applications.is_empty() {
        return Err(CloudError::NoApplications.into());
    }

    let labels: Vec<String> = applications
        .iter()
        .map(|a| format!("{} ({})", a.name, a.uuid))
        .collect();

    let choice = prompter.ask_choice("Select your Acquia Cloud application", &labels, None)?;

    applications
        .into_iter()
        .zip(labels)
        .find(|(_, label)| *label == choice)
        .map(|(app, _)| app.uuid)
        .ok_or_else(|| CloudError::NoApplications.into())
}

fn remember_app_id(config: &mut Config, repo_root: &Path, app_id: &str) -> Result<()> {
    if config.cloud.app_id.as_deref() == Some(app_id) {
        return Ok(());
    }

    config.cloud.app_id = Some(app_id.to_string());
    config.save(repo_root)?;
    output::success(&format!(
        "Application ID saved to {}.",
        output::path(&Config::config_path(repo_root))
    ));
    Ok(())
}

fn write_site_aliases<A: CloudApi, B: Backend>(
    session: &Session<A>,
    app: &Application,
    repo_root: &Path,
    prompter: &mut Prompter<B>,
) -> Result<PathBuf> {
    let environments = session.api.environments(&app.uuid)?;
    output::info(&format!(
        "Found {} environments for site {}, writing aliases...",
        environments.len(),
        app.name
    ));

    let hosting = HostingId::parse(&app.hosting.id)?;
    debug!(realm = %hosting.realm, site = %hosting.site, "hosting id");

    let aliases = SiteAliases::from_environments(&hosting.site, &environments)?;
    let path = alias::alias_file(repo_root, &hosting.site);

    if path.exists() {
        let question = format!(
            "File {} already exists and will be overwritten. Continue?",
            path.display()
        );
        if !prompter.confirm(&question, false)? {
            return Err(Error::Aborted);
        }
    }

    alias::write(&path, &aliases)?;
    debug!(count = aliases.len(), dir = constants::ALIAS_DIR, "alias file written");

    Ok(path)
}
