use std::fmt;

use crate::region::Region;

/// A personal access token for the Management API.
///
/// Wrapped so connection structs can derive `Debug` without the secret
/// ending up in logs or panic messages. The raw value only leaves
/// through [`Token::reveal`], which the HTTP layer calls when it builds
/// the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, exactly as sent in the `Authorization` header.
    /// Storyblok expects the bare value with no scheme prefix.
    #[must_use]
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Token {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Connection parameters for one Storyblok space.
///
/// The id is opaque: it is embedded in request paths and never
/// interpreted. Tokens authorize management access to a single space,
/// so a migration between two spaces carries two of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    /// Space id as it appears in Management API paths.
    pub id: String,
    /// Personal access token for this space.
    pub token: Token,
    /// Region hosting the space.
    pub region: Region,
}

impl Space {
    /// Bundle the parameters for one space.
    pub fn new(id: impl Into<String>, token: impl Into<Token>, region: Region) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            region,
        }
    }
}
