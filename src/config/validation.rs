use super::*;

impl Config {
    /// Get a typed value and check it with `validator`. `valid_values`
    /// describes what was expected for the error message.
    pub fn get_validated<T, F>(&self, path: &str, validator: F, valid_values: &'static str) -> Result<T, ConfigError>
    where
        T: TryFrom<Value, Error = ConfigError>,
        F: FnOnce(&T) -> bool,
    {
        let raw = self.get_value(path)?;
        let found = raw.to_string();
        let typed: T = self.get(path)?;

        if !validator(&typed) {
            return Err(ConfigError::Conversion {
                expected: valid_values,
                found,
            }
            .at(self.location(path)));
        }

        Ok(typed)
    }

    /// Get a string and check it is one of `allowed_values`, ignoring case.
    pub fn get_string_enum(&self, path: &str, allowed_values: &[&str]) -> Result<String, ConfigError> {
        let value: String = self.get(path)?;
        let lower_value = value.to_lowercase();

        if !allowed_values.iter().any(|v| v.to_lowercase() == lower_value) {
            return Err(ConfigError::Conversion {
                expected: "one of the allowed values",
                found: format!("`{}` (allowed: {})", value, allowed_values.join(", ")),
            }
            .at(self.location(path)));
        }

        Ok(value)
    }
}
