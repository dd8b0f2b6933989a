// Author: Dustin Pilgrim
// License: MIT

use super::*;

impl Config {
    /// Get a typed value using dot notation.
    ///
    /// Segments match `snake_case` and `kebab-case` spellings alike, and
    /// numeric segments index into sequences.
    ///
    /// # Examples
    /// ```no_run
    /// # use tfexp_cfg::Config;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = Config::from_file("experiment.yaml")?;
    /// let name: String = config.get("experiment_name")?;
    /// let units: i64 = config.get("model_kwds.layers.0.units")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// `MissingKey` if the path does not exist, or the conversion error of
    /// `T` wrapped with the path.
    pub fn get<T>(&self, path: &str) -> Result<T, ConfigError>
    where
        T: TryFrom<Value, Error = ConfigError>,
    {
        let value = self.get_value(path)?;
        T::try_from(value).map_err(|e| e.at(self.location(path)))
    }

    /// Like [`get`](Self::get), but a missing key is `Ok(None)`.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, ConfigError>
    where
        T: TryFrom<Value, Error = ConfigError>,
    {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::MissingKey { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// ```no_run
    /// # use tfexp_cfg::Config;
    /// # let config = Config::from_file("experiment.yaml").unwrap();
    /// let seed = config.get_or("seed", 42i64);
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = ConfigError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// The raw value at `path`. An empty path is the whole mapping.
    pub fn get_value(&self, path: &str) -> Result<Value, ConfigError> {
        let path = path.trim();
        if path.is_empty() {
            return Ok(Value::Mapping(self.values.clone()));
        }

        let segments: Vec<&str> = path.split('.').collect();
        helpers::lookup(&self.values, &segments)
            .cloned()
            .ok_or_else(|| ConfigError::MissingKey {
                path: path.to_string(),
            })
    }

    /// Keys of the mapping at `path`, in document order.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, ConfigError> {
        match self.get_value(path)? {
            Value::Mapping(items) => Ok(items.into_keys().collect()),
            other => Err(ConfigError::Conversion {
                expected: "a mapping",
                found: format!("a {} at `{}`", other.kind(), path),
            }),
        }
    }

    pub fn has(&self, path: &str) -> bool {
        self.get_value(path).is_ok()
    }
}
