use std::time::Duration;

use serde_json::Value;

use crate::component::{Component, ComponentId, ComponentListing};
use crate::error::ApiError;
use crate::space::Space;
use crate::traits::SpaceStore;

/// HTTP backend for a real space, speaking to the Management API.
///
/// All calls are blocking and bounded by the agent's per-request
/// timeout; that timeout is the only deadline in the system. Requests
/// authenticate with the space's token in the `Authorization` header,
/// sent bare the way the Management API expects it.
///
/// # Example
///
/// ```no_run
/// use storyblok_mapi::{HttpSpace, Region, Space, SpaceStore};
///
/// let space = HttpSpace::new(Space::new("123456", "my-token", Region::Eu));
/// let listing = space.fetch_components()?;
/// println!("{} components", listing.len());
/// # Ok::<(), storyblok_mapi::ApiError>(())
/// ```
pub struct HttpSpace {
    space: Space,
    agent: ureq::Agent,
    base_url: String,
}

impl HttpSpace {
    /// Connect to `space` through its region's endpoint, with a 30 s
    /// request timeout.
    #[must_use]
    pub fn new(space: Space) -> Self {
        Self::with_timeout(space, Duration::from_secs(30))
    }

    /// Connect with a custom per-request timeout.
    #[must_use]
    pub fn with_timeout(space: Space, timeout: Duration) -> Self {
        let base_url = space.region.base_url().to_string();
        Self {
            space,
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            base_url,
        }
    }

    /// Point the client at a non-standard host, e.g. a proxy in front
    /// of the Management API.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn components_url(&self) -> String {
        format!("{}/v1/spaces/{}/components/", self.base_url, self.space.id)
    }

    fn component_url(&self, id: ComponentId) -> String {
        format!("{}/v1/spaces/{}/components/{id}", self.base_url, self.space.id)
    }
}

impl SpaceStore for HttpSpace {
    fn fetch_components(&self) -> Result<ComponentListing, ApiError> {
        let response = self
            .agent
            .get(&self.components_url())
            .set("Authorization", self.space.token.reveal())
            .call()
            .map_err(api_error)?;
        response
            .into_json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn create_component(&mut self, definition: &Component) -> Result<Value, ApiError> {
        let response = self
            .agent
            .post(&self.components_url())
            .set("Authorization", self.space.token.reveal())
            .send_json(definition)
            .map_err(api_error)?;
        response
            .into_json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn update_component(
        &mut self,
        id: ComponentId,
        definition: &Component,
    ) -> Result<Value, ApiError> {
        let response = self
            .agent
            .put(&self.component_url(id))
            .set("Authorization", self.space.token.reveal())
            .send_json(definition)
            .map_err(api_error)?;
        response
            .into_json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn api_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            ApiError::Status { status, body }
        }
        ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
    }
}
