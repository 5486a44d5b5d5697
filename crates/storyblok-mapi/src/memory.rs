use serde_json::{json, Value};

use crate::component::{Component, ComponentId, ComponentListing};
use crate::error::ApiError;
use crate::traits::SpaceStore;

/// In-memory space backend.
///
/// Holds definitions in insertion order and assigns ids from a counter.
/// Where a real space rejects a write, this one answers with the same
/// status codes: 422 for a duplicate name on create, 404 for an unknown
/// id on update. Ideal for testing and prototyping.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use storyblok_mapi::{Component, MemorySpace, SpaceStore};
///
/// let mut space = MemorySpace::new();
/// let hero: Component = serde_json::from_value(json!({
///     "name": "hero",
///     "schema": { "headline": { "type": "text" } },
/// })).unwrap();
///
/// space.create_component(&hero).unwrap();
/// let listing = space.fetch_components().unwrap();
/// assert_eq!(listing.find_by_name("hero").and_then(|c| c.id), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct MemorySpace {
    /// Stored definitions, in insertion order.
    components: Vec<Component>,
    /// Next id handed out on create.
    next_id: ComponentId,
}

impl MemorySpace {
    /// Create an empty space.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed a space with existing definitions.
    ///
    /// Definitions without an id get one assigned, and the id counter
    /// moves past the highest seen so later creates never collide.
    pub fn with_components(components: Vec<Component>) -> Self {
        let mut space = Self::new();
        for mut component in components {
            if component.id.is_none() {
                component.id = Some(space.next_id);
            }
            if let Some(id) = component.id {
                space.next_id = space.next_id.max(id + 1);
            }
            space.components.push(component);
        }
        space
    }

    /// Number of definitions currently stored.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Direct access to a stored definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }
}

impl Default for MemorySpace {
    fn default() -> Self {
        Self::new()
    }
}

impl SpaceStore for MemorySpace {
    fn fetch_components(&self) -> Result<ComponentListing, ApiError> {
        Ok(ComponentListing {
            components: self.components.clone(),
        })
    }

    fn create_component(&mut self, definition: &Component) -> Result<Value, ApiError> {
        if self.get(&definition.name).is_some() {
            return Err(ApiError::Status {
                status: 422,
                body: json!({ "name": ["has already been taken"] }).to_string(),
            });
        }

        let mut stored = definition.clone();
        stored.id = Some(self.next_id);
        self.next_id += 1;
        self.components.push(stored.clone());

        let body = serde_json::to_value(&stored).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(json!({ "component": body }))
    }

    fn update_component(
        &mut self,
        id: ComponentId,
        definition: &Component,
    ) -> Result<Value, ApiError> {
        let slot = self.components.iter_mut().find(|c| c.id == Some(id));
        let existing = match slot {
            Some(existing) => existing,
            None => {
                return Err(ApiError::Status {
                    status: 404,
                    body: json!({ "error": "not found" }).to_string(),
                })
            }
        };

        let mut stored = definition.clone();
        // The space's own id wins over whatever the definition carries.
        stored.id = Some(id);
        *existing = stored.clone();

        let body = serde_json::to_value(&stored).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(json!({ "component": body }))
    }
}
