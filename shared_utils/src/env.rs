use thiserror::Error;

/// Errors raised while reading process environment variables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// An environment variable required by the application is not set.
    #[error("Missing environment variable: {0}")]
    Missing(String),

    /// The variable is set but its value is not valid Unicode.
    #[error("Environment variable {0} is not valid unicode")]
    NotUnicode(String),

    /// The variable is set but could not be read as a boolean.
    #[error("Environment variable {name} has invalid boolean value '{value}'")]
    InvalidBool {
        /// Variable name.
        name: String,
        /// Raw value found in the environment.
        value: String,
    },
}

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, EnvError> {
    match std::env::var(name) {
        Ok(v) => Ok(v),
        Err(std::env::VarError::NotPresent) => Err(EnvError::Missing(name.to_string())),
        Err(std::env::VarError::NotUnicode(_)) => Err(EnvError::NotUnicode(name.to_string())),
    }
}

/// Like [`get_env_var`] but treats an unset or blank variable as `None`.
pub fn get_env_var_opt(name: &str) -> Result<Option<String>, EnvError> {
    match get_env_var(name) {
        Ok(v) if v.trim().is_empty() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(EnvError::Missing(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Reads a boolean flag. Accepts `1/0`, `true/false`, `yes/no`, `on/off`
/// (case-insensitive); unset falls back to `default`.
pub fn get_env_bool(name: &str, default: bool) -> Result<bool, EnvError> {
    let Some(raw) = get_env_var_opt(name)? else {
        return Ok(default);
    };
    parse_bool(&raw).ok_or_else(|| EnvError::InvalidBool {
        name: name.to_string(),
        value: raw,
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
