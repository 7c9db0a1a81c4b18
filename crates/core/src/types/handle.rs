//! Product handle type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductHandle`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The input string is empty.
    #[error("product handle cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("product handle must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A product handle (the URL slug Shopify uses to identify a product).
///
/// The handle is user-supplied and is stored verbatim. It is never
/// interpolated into a URL directly; callers percent-encode it when
/// building the upstream query string.
///
/// ## Constraints
///
/// - Length: 1-255 characters (Shopify's handle limit)
///
/// ## Examples
///
/// ```
/// use admin_proxy_core::ProductHandle;
///
/// assert!(ProductHandle::parse("bra-123").is_ok());
/// assert!(ProductHandle::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ProductHandle(String);

impl ProductHandle {
    /// Maximum length of a product handle.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `ProductHandle` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or longer than 255 characters.
    pub fn parse(s: &str) -> Result<Self, HandleError> {
        if s.is_empty() {
            return Err(HandleError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(HandleError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ProductHandle` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductHandle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductHandle {
    type Error = HandleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductHandle> for String {
    fn from(handle: ProductHandle) -> Self {
        handle.0
    }
}

impl AsRef<str> for ProductHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
