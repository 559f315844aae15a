//! environment files and groups
//!
//! Each environment is a single json file `<directory>/<name>.json` holding one object.
//! Groups of environments are defined in a yaml config file:
//! ```yaml
//! environment_groups:
//!   production:
//!     - prod-eu
//!     - prod-us
//! ```
use crate::value::{Object, Value};
use std::path::{Path, PathBuf};

const ENVIRONMENT_FILE_EXTENSION: &str = "json";

/// Directory containing environment files
#[derive(Debug, Clone, derive_new::new)]
pub struct EnvironmentStore {
    directory: PathBuf,
}

impl EnvironmentStore {
    pub fn path(&self, environment: &str) -> PathBuf {
        self.directory
            .join(format!("{environment}.{ENVIRONMENT_FILE_EXTENSION}"))
    }

    pub fn load(&self, environment: &str) -> Result<Object, StoreError> {
        load_document(&self.path(environment))
    }

    pub fn write(&self, environment: &str, document: &Object) -> Result<(), StoreError> {
        write_document(&self.path(environment), document)
    }
}

/// Read a json file into an order preserving [Object]
pub fn load_document(file_path: &Path) -> Result<Object, StoreError> {
    tracing::info!(path=%file_path.display(), "loading environment");

    let file_contents = std::fs::read_to_string(file_path).map_err(|source| StoreError::Io {
        path: file_path.to_owned(),
        source,
    })?;

    match serde_json::from_str(&file_contents) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(StoreError::NotAnObject {
            path: file_path.to_owned(),
            found: other.kind(),
        }),
        Err(source) => Err(StoreError::JsonParseFailed {
            path: file_path.to_owned(),
            source,
        }),
    }
}

/// Write a document as pretty json (2 space indent), keeping key order
pub fn write_document(file_path: &Path, document: &Object) -> Result<(), StoreError> {
    tracing::info!(path=%file_path.display(), "writing environment");

    let json = serde_json::to_string_pretty(document).map_err(|source| {
        StoreError::JsonSerializeFailed {
            path: file_path.to_owned(),
            source,
        }
    })?;

    std::fs::write(file_path, json).map_err(|source| StoreError::Io {
        path: file_path.to_owned(),
        source,
    })
}

/// Contents of the config file
#[derive(Debug, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub environment_groups: indexmap::IndexMap<String, Vec<String>>,
}

impl Config {
    pub fn load(file_path: &Path) -> Result<Self, StoreError> {
        tracing::info!(path=%file_path.display(), "loading config");

        let file_contents = std::fs::read_to_string(file_path).map_err(|source| StoreError::Io {
            path: file_path.to_owned(),
            source,
        })?;

        serde_yaml::from_str(&file_contents).map_err(|source| StoreError::YamlParseFailed {
            path: file_path.to_owned(),
            source,
        })
    }

    pub fn group(&self, name: &str) -> Result<&[String], StoreError> {
        self.environment_groups
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::UnknownGroup(name.to_string()))
    }
}

/// Drop environments whose name contains `exclude`
pub fn select_environments<'a>(
    environments: &'a [String],
    exclude: Option<&'a str>,
) -> impl Iterator<Item = &'a String> {
    environments.iter().filter(move |environment| match exclude {
        Some(exclude) if environment.contains(exclude) => {
            tracing::info!(%environment, %exclude, "excluded");
            false
        }
        _ => true,
    })
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error at {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unable to handle json file {}", path.display())]
    JsonParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Unable to serialize environment for {}", path.display())]
    JsonSerializeFailed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Expected a json object in {}, found {found}", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },
    #[error("Unable to parse config file {}", path.display())]
    YamlParseFailed {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Unknown environment group `{0}`")]
    UnknownGroup(String),
}
