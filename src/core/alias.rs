//! Drush site alias derivation.
//!
//! Turns Acquia environment records into the `{root, uri, host, user}`
//! entries Drush reads from `drush/site-aliases/<site>.alias.yml`.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::cloud::Environment;
use crate::core::constants;
use crate::error::{AliasError, Result};

/// How to reach one remote environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub root: String,
    pub uri: String,
    pub host: String,
    pub user: String,
}

/// A hosting identifier split into its realm and site parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingId {
    pub realm: String,
    pub site: String,
}

impl HostingId {
    /// Parse `realm:site`.
    ///
    /// # Errors
    ///
    /// Returns `AliasError::HostingId` unless there is exactly one `:` with
    /// text on both sides.
    pub fn parse(id: &str) -> std::result::Result<Self, AliasError> {
        match id.split(':').collect::<Vec<_>>().as_slice() {
            [realm, site] if !realm.is_empty() && !site.is_empty() => Ok(Self {
                realm: realm.to_string(),
                site: site.to_string(),
            }),
            _ => Err(AliasError::HostingId(id.to_string())),
        }
    }
}

/// Split `user@host`.
///
/// # Errors
///
/// Returns `AliasError::SshUrl` unless there is exactly one `@` with text on
/// both sides.
pub fn split_ssh_url(env: &str, url: &str) -> std::result::Result<(String, String), AliasError> {
    match url.split('@').collect::<Vec<_>>().as_slice() {
        [user, host] if !user.is_empty() && !host.is_empty() => {
            Ok((user.to_string(), host.to_string()))
        }
        _ => Err(AliasError::SshUrl {
            env: env.to_string(),
            url: url.to_string(),
        }),
    }
}

/// Remote docroot for an environment of a site.
pub fn docroot(site: &str, env: &str) -> String {
    format!("{}/{}.{}/docroot", constants::REMOTE_WEB_ROOT, site, env)
}

impl AliasRecord {
    /// Derive the alias for one environment of `site`.
    ///
    /// # Errors
    ///
    /// Returns `AliasError` if the environment has no domain or a malformed
    /// SSH URL.
    pub fn from_environment(site: &str, env: &Environment) -> std::result::Result<Self, AliasError> {
        let uri = env
            .domains
            .first()
            .ok_or_else(|| AliasError::NoDomains(env.name.clone()))?;
        let (user, host) = split_ssh_url(&env.name, &env.ssh_url)?;

        Ok(Self {
            root: docroot(site, &env.name),
            uri: uri.clone(),
            host,
            user,
        })
    }
}

/// Aliases for one site, keyed by environment name, in API order.
///
/// Serializes as a YAML mapping. Re-inserting a name replaces the record but
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteAliases(IndexMap<String, AliasRecord>);

impl SiteAliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive aliases for every environment, in the order given.
    pub fn from_environments(
        site: &str,
        environments: &[Environment],
    ) -> std::result::Result<Self, AliasError> {
        let mut aliases = Self::new();
        for env in environments {
            aliases.insert(env.name.clone(), AliasRecord::from_environment(site, env)?);
        }
        Ok(aliases)
    }

    pub fn insert(&mut self, name: String, record: AliasRecord) {
        self.0.insert(name, record);
    }

    pub fn get(&self, name: &str) -> Option<&AliasRecord> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, AliasError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

/// Alias file location for a site under a repository root.
pub fn alias_file(repo_root: &Path, site: &str) -> PathBuf {
    repo_root
        .join(constants::ALIAS_DIR)
        .join(format!("{}{}", site, constants::ALIAS_SUFFIX))
}

/// Write aliases to `path`, creating the parent directory and replacing any
/// existing file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write(path: &Path, aliases: &SiteAliases) -> Result<()> {
    let yaml = aliases.to_yaml()?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, yaml)?;

    Ok(())
}
