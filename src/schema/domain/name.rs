//! Validated message type identifiers.

use super::{SchemaError, error::is_identifier};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Fully qualified name of an output message type, such as `fixture.User`.
///
/// # Examples
///
/// ```
/// use protomap::schema::domain::MessageTypeName;
///
/// let name = MessageTypeName::new(" fixture.User ").expect("valid name");
/// assert_eq!(name.as_str(), "fixture.User");
/// assert!(MessageTypeName::new("fixture..User").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTypeName(String);

impl MessageTypeName {
    /// Creates a validated message type name.
    ///
    /// The input is trimmed. Every dot-separated segment must be an
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyTypeName`] for blank input and
    /// [`SchemaError::InvalidTypeName`] for malformed segments.
    pub fn new(value: impl Into<String>) -> Result<Self, SchemaError> {
        let trimmed = value.into().trim().to_owned();

        if trimmed.is_empty() {
            return Err(SchemaError::EmptyTypeName);
        }

        if !trimmed.split('.').all(is_identifier) {
            return Err(SchemaError::InvalidTypeName(trimmed));
        }

        Ok(Self(trimmed))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last segment of the name, e.g. `User` for `fixture.User`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl AsRef<str> for MessageTypeName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for MessageTypeName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MessageTypeName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
