use serde_json::Value;

use crate::component::{Component, ComponentId, ComponentListing};
use crate::error::ApiError;

/// Access to one space's component definitions.
///
/// Implemented by the HTTP-backed `HttpSpace` and the in-memory
/// [`MemorySpace`](crate::MemorySpace). Reads take
/// `&self`, writes take `&mut self`; a migration holds its source store
/// immutably and its target store mutably, so writing to the source is
/// ruled out at compile time.
pub trait SpaceStore {
    /// Fetch the space's complete component listing.
    ///
    /// Called once per space per run; the result is treated as an
    /// immutable snapshot afterwards. Schema changes made in the space
    /// after this call are not observed until a new run.
    fn fetch_components(&self) -> Result<ComponentListing, ApiError>;

    /// Create a new component from `definition`.
    ///
    /// The definition is sent as-is and the space assigns its own id;
    /// any id embedded in the definition is ignored by the server. The
    /// decoded response is returned verbatim, without validation.
    fn create_component(&mut self, definition: &Component) -> Result<Value, ApiError>;

    /// Overwrite the component with space-local id `id` with `definition`.
    ///
    /// `id` must address this space's copy, never an id carried over
    /// from another space. The decoded response is returned verbatim.
    fn update_component(&mut self, id: ComponentId, definition: &Component)
        -> Result<Value, ApiError>;
}
