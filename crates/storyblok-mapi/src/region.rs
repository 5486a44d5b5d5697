use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A regional Storyblok Management API host.
///
/// Every space lives in exactly one region and must be addressed through
/// that region's base URL. A request sent to the wrong host answers with
/// a 404 that looks like a missing space, so the region travels as a
/// closed enum and unknown names are rejected at the boundary.
///
/// # Example
///
/// ```
/// use storyblok_mapi::Region;
///
/// let region: Region = "eu".parse().unwrap();
/// assert_eq!(region.base_url(), "https://mapi.storyblok.com");
/// assert!("mars".parse::<Region>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// `mapi.storyblok.com`
    Eu,
    /// `api-us.storyblok.com`, the default.
    #[default]
    Us,
    /// `app.storyblokchina.cn`
    Cn,
}

impl Region {
    /// Base URL of the Management API in this region, without a trailing
    /// slash.
    #[must_use]
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Eu => "https://mapi.storyblok.com",
            Self::Us => "https://api-us.storyblok.com",
            Self::Cn => "https://app.storyblokchina.cn",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eu => "eu",
            Self::Us => "us",
            Self::Cn => "cn",
        };
        f.write_str(name)
    }
}

/// Error for region names outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegion(String);

impl fmt::Display for UnknownRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown region '{}', expected one of: eu, us, cn", self.0)
    }
}

impl std::error::Error for UnknownRegion {}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eu" => Ok(Self::Eu),
            "us" => Ok(Self::Us),
            "cn" => Ok(Self::Cn),
            _ => Err(UnknownRegion(s.to_string())),
        }
    }
}
