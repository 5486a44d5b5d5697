use std::fmt;
use std::path::Path;

use serde::Deserialize;
use storyblok_mapi::{Region, Space};

/// A migration job file, usually `storyblok.toml`.
///
/// Groups the connection parameters of the two spaces into tables of
/// the same shape:
///
/// ```toml
/// [source]
/// space = "123456"
/// region = "eu"
/// token_env = "STORYBLOK_SOURCE_TOKEN"
///
/// [target]
/// space = "654321"
/// token = "tgt-xxxx"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct MigrationConfig {
    /// Space definitions are read from.
    pub source: SpaceConfig,
    /// Space definitions are written into.
    pub target: SpaceConfig,
}

/// Connection parameters for one space as written in the job file.
///
/// The token is given inline (`token`) or indirected through the name
/// of an environment variable (`token_env`). When both are present the
/// inline value wins; job files checked into a repository should prefer
/// `token_env`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceConfig {
    /// Space id.
    pub space: String,
    /// Region hosting the space. Defaults to `us`.
    #[serde(default)]
    pub region: Region,
    /// Inline access token.
    pub token: Option<String>,
    /// Name of an environment variable holding the access token.
    pub token_env: Option<String>,
}

impl MigrationConfig {
    /// Load a job file from disk.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse a job file from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl SpaceConfig {
    /// Resolve this entry into a connectable [`Space`].
    ///
    /// Reads the environment variable named by `token_env` when no
    /// inline token is given. No token from either place is an error;
    /// tokens are never guessed or defaulted.
    pub fn resolve(&self) -> Result<Space, ConfigError> {
        let token = match (&self.token, &self.token_env) {
            (Some(token), _) => token.clone(),
            (None, Some(var)) => {
                std::env::var(var).map_err(|_| ConfigError::MissingToken {
                    space: self.space.clone(),
                    var: Some(var.clone()),
                })?
            }
            (None, None) => {
                return Err(ConfigError::MissingToken {
                    space: self.space.clone(),
                    var: None,
                })
            }
        };
        Ok(Space::new(self.space.clone(), token, self.region))
    }
}

/// Error loading a migration job file.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the file.
    Io(std::io::Error),
    /// Failed to parse the TOML.
    Parse(String),
    /// A space entry has no usable token.
    MissingToken {
        /// The space the entry is for.
        space: String,
        /// The environment variable that was consulted, if any.
        var: Option<String>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::MissingToken {
                space,
                var: Some(var),
            } => write!(
                f,
                "no token for space {space}: environment variable {var} is not set"
            ),
            Self::MissingToken { space, var: None } => write!(
                f,
                "no token for space {space}: set either 'token' or 'token_env'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TOML: &str = r#"
[source]
space = "123456"
region = "eu"
token = "src-secret"

[target]
space = "654321"
token = "tgt-secret"
"#;

    #[test]
    fn parse_minimal_job_file() {
        let config = MigrationConfig::from_toml(SAMPLE_TOML).unwrap();
        assert_eq!(config.source.space, "123456");
        assert_eq!(config.source.region, Region::Eu);
        assert_eq!(config.target.space, "654321");
        // Region falls back to the API default when omitted.
        assert_eq!(config.target.region, Region::Us);
    }

    #[test]
    fn inline_token_resolves_directly() {
        let config = MigrationConfig::from_toml(SAMPLE_TOML).unwrap();
        let space = config.source.resolve().unwrap();
        assert_eq!(space.id, "123456");
        assert_eq!(space.token.reveal(), "src-secret");
        assert_eq!(space.region, Region::Eu);
    }

    #[test]
    fn env_token_resolves_through_the_variable() {
        std::env::set_var("STORYBLOK_TEST_TOKEN_SET", "from-env");
        let entry = SpaceConfig {
            space: "9".to_string(),
            region: Region::Us,
            token: None,
            token_env: Some("STORYBLOK_TEST_TOKEN_SET".to_string()),
        };
        assert_eq!(entry.resolve().unwrap().token.reveal(), "from-env");
    }

    #[test]
    fn inline_token_wins_over_the_variable() {
        std::env::set_var("STORYBLOK_TEST_TOKEN_IGNORED", "from-env");
        let entry = SpaceConfig {
            space: "1".to_string(),
            region: Region::Us,
            token: Some("inline".to_string()),
            token_env: Some("STORYBLOK_TEST_TOKEN_IGNORED".to_string()),
        };
        assert_eq!(entry.resolve().unwrap().token.reveal(), "inline");
    }

    #[test]
    fn unset_variable_is_a_missing_token() {
        let entry = SpaceConfig {
            space: "77".to_string(),
            region: Region::Us,
            token: None,
            token_env: Some("STORYBLOK_TEST_TOKEN_NEVER_SET".to_string()),
        };
        let err = entry.resolve().unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("STORYBLOK_TEST_TOKEN_NEVER_SET"));
        assert!(rendered.contains("77"));
    }

    #[test]
    fn no_token_at_all_is_an_error() {
        let entry = SpaceConfig {
            space: "77".to_string(),
            region: Region::Us,
            token: None,
            token_env: None,
        };
        assert!(matches!(
            entry.resolve(),
            Err(ConfigError::MissingToken { var: None, .. })
        ));
    }

    #[test]
    fn unknown_region_fails_to_parse() {
        let toml = r#"
[source]
space = "1"
region = "mars"
token = "x"

[target]
space = "2"
token = "y"
"#;
        assert!(matches!(
            MigrationConfig::from_toml(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storyblok.toml");
        std::fs::write(&path, SAMPLE_TOML).unwrap();

        let config = MigrationConfig::from_path(&path).unwrap();
        assert_eq!(config.source.space, "123456");

        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            MigrationConfig::from_path(&missing),
            Err(ConfigError::Io(_))
        ));
    }
}
