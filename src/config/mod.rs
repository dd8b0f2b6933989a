// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::Location;
use crate::export;
use crate::loader::{Loader, Source};
use crate::{ConfigError, Value};

mod access;
mod conversion;
mod helpers;
mod validation;

/// A resolved configuration: the top-level mapping of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    values: IndexMap<String, Value>,
    origin: Option<PathBuf>,
}

impl Config {
    /// Load a config file with the process-wide store and no run mode.
    ///
    /// # Example
    /// ```no_run
    /// # use tfexp_cfg::Config;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config::from_file("experiments/mnist.yaml")?;
    /// let epochs: u32 = config.get("fit_kwds.epochs")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load(&Loader::new(), Source::path(path.as_ref()))
    }

    /// Load from `primary`, or from `fallback` if `primary` cannot be read.
    ///
    /// Only a missing or unreadable top-level file falls through; any other
    /// error in `primary` is returned as is.
    pub fn from_file_with_fallback<P: AsRef<Path>>(
        loader: &Loader,
        primary: P,
        fallback: P,
    ) -> Result<Self, ConfigError> {
        match Self::load(loader, Source::path(primary.as_ref())) {
            Err(ConfigError::FileError { .. }) => {
                Self::load(loader, Source::path(fallback.as_ref()))
            }
            other => other,
        }
    }

    /// Parse a config from a string. Includes resolve against the current
    /// directory.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Self::load(&Loader::new(), Source::text(content))
    }

    pub fn from_reader<R: Read + 'static>(reader: R) -> Result<Self, ConfigError> {
        Self::load(&Loader::new(), Source::reader(reader))
    }

    /// Load `source` through `loader`.
    pub fn load(loader: &Loader, source: impl Into<Source>) -> Result<Self, ConfigError> {
        let source = source.into();
        let origin = match &source {
            Source::Path(path) => Some(path.clone()),
            Source::Reader { name, .. } => name.clone(),
            Source::Text(_) => None,
        };
        let value = loader.load(source)?;
        Self::from_value(value, origin)
    }

    /// Wrap a resolved value, which must be a mapping.
    pub fn from_value(value: Value, origin: Option<PathBuf>) -> Result<Self, ConfigError> {
        match value {
            Value::Mapping(values) => Ok(Self { values, origin }),
            other => Err(ConfigError::Conversion {
                expected: "a top-level mapping",
                found: format!("a {}", other.kind()),
            }),
        }
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.values)
    }

    /// Merge `overrides` into the configuration.
    ///
    /// A mapping override merges into an existing mapping key by key, so
    /// `{mlflow: {enable: false}}` keeps the other `mlflow.*` entries. Any
    /// other override replaces the value. Existing keys keep their position.
    pub fn with_overrides<I, K>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in overrides {
            helpers::merge_entry(&mut self.values, key.into(), value);
        }
        self
    }

    /// Boxed key/value table, nested mappings flattened to dotted keys.
    pub fn summary(&self, width: usize) -> String {
        helpers::render_summary(&self.values, width)
    }

    fn location(&self, path: &str) -> Location {
        Location {
            file: self.origin.clone(),
            node: path.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        export::to_json_pretty(&Value::Mapping(self.values.clone()))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        export::to_yaml(&Value::Mapping(self.values.clone()))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary(helpers::DEFAULT_WIDTH))
    }
}
