//! # storyblok-mapi
//!
//! Storyblok Management API client for component ("block") schemas.
//!
//! Models the pieces of the Management API that schema migration needs:
//! regional endpoints, space connections, component definitions with
//! their field schemas, and a [`SpaceStore`] access trait with an HTTP
//! backend and an in-memory backend.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use storyblok_mapi::{Component, MemorySpace, SpaceStore};
//!
//! let mut space = MemorySpace::new();
//! let teaser: Component = serde_json::from_value(json!({
//!     "name": "teaser",
//!     "schema": { "headline": { "type": "text" } },
//! })).unwrap();
//!
//! space.create_component(&teaser).unwrap();
//! assert_eq!(space.fetch_components().unwrap().len(), 1);
//! ```
//!
//! ## Backends
//!
//! | Backend | Feature flag | Use case |
//! |---------|-------------|----------|
//! | [`MemorySpace`] | *(always available)* | Testing, prototyping |
//! | `HttpSpace` | `http` *(default)* | The real Management API |

mod component;
mod dates;
mod error;
#[cfg(feature = "http")]
mod http;
mod memory;
mod region;
mod space;
mod traits;

pub use component::{Component, ComponentId, ComponentListing, BLOKS_FIELD_TYPE};
pub use dates::{parse_storyblok_date, DateError};
pub use error::ApiError;
#[cfg(feature = "http")]
pub use http::HttpSpace;
pub use memory::MemorySpace;
pub use region::{Region, UnknownRegion};
pub use space::{Space, Token};
pub use traits::SpaceStore;
