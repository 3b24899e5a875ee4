use thiserror::Error;

/// Core validation trait that all validators must implement.
///
/// # Examples
///
/// ```
/// use hyprtheme::validation::Validator;
///
/// struct NonEmpty;
/// impl Validator<str> for NonEmpty {
///     type Error = String;
///
///     fn validate(&self, input: &str) -> Result<(), Self::Error> {
///         if input.is_empty() {
///             Err("Input cannot be empty".to_string())
///         } else {
///             Ok(())
///         }
///     }
/// }
/// ```
pub trait Validator<T: ?Sized> {
    type Error;

    /// Validate the input and return Ok(()) if valid, or Err with validation error
    fn validate(&self, input: &T) -> Result<(), Self::Error>;
}

/// Longest theme id accepted on the command line.
pub const MAX_THEME_ID_LEN: usize = 64;

/// Reasons a theme id is rejected before it reaches the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThemeIdError {
    #[error("Theme id cannot be empty")]
    Empty,

    #[error("Theme id is too long ({len} characters, max {max})")]
    TooLong { len: usize, max: usize },

    #[error("Theme id '{0}' must not contain path separators")]
    PathSeparator(String),

    #[error("Theme id '{0}' is reserved")]
    Reserved(String),
}

/// Theme ids are directory names below the themes root; anything that could
/// walk out of it is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThemeIdValidator;

impl Validator<str> for ThemeIdValidator {
    type Error = ThemeIdError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        if input.trim().is_empty() {
            return Err(ThemeIdError::Empty);
        }

        let len = input.chars().count();
        if len > MAX_THEME_ID_LEN {
            return Err(ThemeIdError::TooLong {
                len,
                max: MAX_THEME_ID_LEN,
            });
        }

        if input.contains(['/', '\\']) {
            return Err(ThemeIdError::PathSeparator(input.to_string()));
        }

        if input == "." || input == ".." {
            return Err(ThemeIdError::Reserved(input.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err_eq, assert_ok};

    #[test]
    fn test_accepts_ordinary_ids() {
        let validator = ThemeIdValidator;
        assert_ok!(validator.validate("dracula"));
        assert_ok!(validator.validate("catppuccin-mocha"));
        assert_ok!(validator.validate("tokyo night"));
        assert_ok!(validator.validate(&"a".repeat(MAX_THEME_ID_LEN)));
    }

    #[test]
    fn test_rejects_escaping_ids() {
        let validator = ThemeIdValidator;
        assert_err_eq!(validator.validate(""), ThemeIdError::Empty);
        assert_err_eq!(validator.validate("   "), ThemeIdError::Empty);
        assert_err_eq!(
            validator.validate(".."),
            ThemeIdError::Reserved("..".to_string())
        );
        assert_err_eq!(
            validator.validate("."),
            ThemeIdError::Reserved(".".to_string())
        );
        assert_err_eq!(
            validator.validate("../etc"),
            ThemeIdError::PathSeparator("../etc".to_string())
        );
        assert_err_eq!(
            validator.validate("a\\b"),
            ThemeIdError::PathSeparator("a\\b".to_string())
        );
    }

    #[test]
    fn test_rejects_long_ids() {
        let id = "x".repeat(MAX_THEME_ID_LEN + 1);
        assert_err_eq!(
            ThemeIdValidator.validate(&id),
            ThemeIdError::TooLong { len: 65, max: 64 }
        );
    }
}
