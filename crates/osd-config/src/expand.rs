//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Strings without `${` are returned unchanged. Bare `$VAR` is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar {
            name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.name),
    })
}

/// Lookup failure for an unset variable.
struct UnsetVar {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plain_string_unchanged() {
        let result = expand_env("https://onestep.code05.com/", "site.url").unwrap();
        assert_eq!(result, "https://onestep.code05.com/");
    }

    #[test]
    fn test_expand_bare_dollar_unchanged() {
        let result = expand_env("$HOME/docs", "site.url").unwrap();
        assert_eq!(result, "$HOME/docs");
    }

    #[test]
    fn test_expand_set_var() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("OSD_TEST_EXPAND_HOST", "docs.example.com");
        }
        let result = expand_env("https://${OSD_TEST_EXPAND_HOST}/", "site.url").unwrap();
        assert_eq!(result, "https://docs.example.com/");
        unsafe {
            std::env::remove_var("OSD_TEST_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expand_default_for_unset_var() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("OSD_TEST_EXPAND_UNSET_DEFAULT");
        }
        let result =
            expand_env("${OSD_TEST_EXPAND_UNSET_DEFAULT:-https://x/}", "site.url").unwrap();
        assert_eq!(result, "https://x/");
    }

    #[test]
    fn test_expand_unset_var_errors_with_field() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("OSD_TEST_EXPAND_MISSING");
        }
        let err = expand_env("${OSD_TEST_EXPAND_MISSING}", "edit_link.pattern").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("edit_link.pattern"), "got: {message}");
        assert!(message.contains("OSD_TEST_EXPAND_MISSING"), "got: {message}");
    }
}
