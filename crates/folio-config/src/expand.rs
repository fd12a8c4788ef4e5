//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Variable referenced by a string but missing from the environment.
struct UnsetVar(String);

/// Expand `${VAR}` and `${VAR:-default}` references in a configuration value.
///
/// Values without `${` are returned unchanged, so a literal `$` in a path
/// needs no escaping. An unset variable without a default is an error naming
/// the config `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| match std::env::var(name) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(UnsetVar(name.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}
