//! Task configuration, resolved once at startup.
//!
//! Sources, highest precedence first: environment variables, the JSON config
//! file, built-in defaults. The compose project name and database service
//! have no default; when neither the environment nor the file supplies them,
//! `TaskConfig::resolve` fails with a single error naming every missing key.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};
use crate::io::read_existing;
use crate::paths;

pub const PROJECT_NAME_VAR: &str = "OJS_COMPOSE_PROJECTNAME";
pub const DB_SERVICE_VAR: &str = "OJS_COMPOSE_DBSERVICE";

pub const DEFAULT_COMPOSE_FILE: &str = "z/docker-compose.yml";
pub const DEFAULT_SCRATCH_DIR: &str = "z/fabscratch";
pub const DEFAULT_BASE_BRANCH: &str = "main";
pub const DEFAULT_BRANCH: &str = "rqc34";

/// Optional overrides read from `ztasks.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    #[serde(default)]
    pub compose_file: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub db_service: Option<String>,
    #[serde(default)]
    pub scratch_dir: Option<String>,
    #[serde(default)]
    pub base_branch: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

impl FileConfig {
    /// Load the config file; a missing file yields all-`None` overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        match read_existing(path, &format!("read {}", display))? {
            None => Ok(Self::default()),
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| Error::config_invalid_json(display, e))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfig {
    pub compose_file: String,
    pub project_name: String,
    pub db_service: String,
    pub scratch_dir: String,
    pub base_branch: String,
    pub branch: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require_single_word(key: &str, value: &str) -> Result<()> {
    if value.contains(char::is_whitespace) {
        return Err(Error::config_invalid_value(
            key,
            Some(value.to_string()),
            format!("{} must not contain whitespace", key),
        ));
    }
    Ok(())
}

impl TaskConfig {
    /// Resolve from the process environment and the default config file.
    pub fn load() -> Result<Self> {
        let file = FileConfig::load(&paths::config_file()?)?;
        Self::resolve(|key| env::var(key).ok(), file)
    }

    /// Resolve from an explicit environment lookup and file overrides.
    pub fn resolve<F>(env_lookup: F, file: FileConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_name = non_empty(env_lookup(PROJECT_NAME_VAR)).or(non_empty(file.project_name));
        let db_service = non_empty(env_lookup(DB_SERVICE_VAR)).or(non_empty(file.db_service));

        let (project_name, db_service) = match (project_name, db_service) {
            (Some(project), Some(db)) => (project, db),
            (project, db) => {
                let mut missing = Vec::new();
                if project.is_none() {
                    missing.push(PROJECT_NAME_VAR.to_string());
                }
                if db.is_none() {
                    missing.push(DB_SERVICE_VAR.to_string());
                }
                return Err(Error::config_missing_keys(missing));
            }
        };

        require_single_word(PROJECT_NAME_VAR, &project_name)?;
        require_single_word(DB_SERVICE_VAR, &db_service)?;

        Ok(Self {
            compose_file: non_empty(file.compose_file)
                .unwrap_or_else(|| DEFAULT_COMPOSE_FILE.to_string()),
            project_name,
            db_service,
            scratch_dir: non_empty(file.scratch_dir)
                .unwrap_or_else(|| DEFAULT_SCRATCH_DIR.to_string()),
            base_branch: non_empty(file.base_branch)
                .unwrap_or_else(|| DEFAULT_BASE_BRANCH.to_string()),
            branch: non_empty(file.branch).unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        })
    }
}
