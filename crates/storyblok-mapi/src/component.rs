use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Space-local numeric id of a component.
///
/// Ids are assigned by the server per space and mean nothing across
/// spaces. Cross-space identity is the component name.
pub type ComponentId = u64;

/// Field type whose editor embeds other components.
pub const BLOKS_FIELD_TYPE: &str = "bloks";

/// A component ("block") schema definition.
///
/// Only the keys the migration logic reads are modeled. Everything else
/// the server sends (`display_name`, `is_root`, preview fields, ...) is
/// captured in `extra` and written back verbatim, so a migrated
/// definition is a faithful copy of its source. Within `schema`, field
/// order is preserved: it is editor-visible state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique name within a space. The cross-space identity key.
    pub name: String,
    /// Space-local id. Absent on definitions that have not been stored
    /// anywhere yet. Servers ignore ids in request bodies; addressing
    /// happens through the URL path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ComponentId>,
    /// Server-assigned creation timestamp, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Field name to field definition, in editor order.
    #[serde(default)]
    pub schema: Map<String, Value>,
    /// Every key not modeled above, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Component {
    /// Names of the components this definition references through
    /// restricted `bloks` fields.
    ///
    /// A `bloks` field embeds other components. When the schema
    /// restricts it (`restrict_components` truthy), `component_whitelist`
    /// names the allowed ones and those names are schema dependencies.
    /// Unrestricted fields accept anything and contribute nothing, as do
    /// restricted fields without a whitelist. Non-string whitelist
    /// entries are skipped. The result is a set: several fields naming
    /// the same component yield one entry.
    #[must_use]
    pub fn referenced_components(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for field in self.schema.values() {
            if field.get("type").and_then(Value::as_str) != Some(BLOKS_FIELD_TYPE) {
                continue;
            }
            let restricted = field
                .get("restrict_components")
                .map(is_truthy)
                .unwrap_or(false);
            if !restricted {
                continue;
            }
            if let Some(whitelist) = field.get("component_whitelist").and_then(Value::as_array) {
                for entry in whitelist {
                    if let Some(name) = entry.as_str() {
                        names.insert(name.to_string());
                    }
                }
            }
        }
        names
    }

    /// Number of fields in the schema.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.schema.len()
    }
}

// JSON truthiness as the Management API's loosely-typed payloads use it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(entries) => !entries.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// One space's complete component set, fetched in a single listing call.
///
/// A listing is an immutable snapshot: it reflects the space at fetch
/// time and is never refreshed within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentListing {
    /// All component definitions in the space.
    pub components: Vec<Component>,
}

impl ComponentListing {
    /// Look up a component by name.
    ///
    /// First match wins. Spaces do not hold duplicate names, so the
    /// linear scan is unambiguous in practice.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Number of components in the listing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the listing holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_component(value: Value) -> Component {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn referenced_components_unions_restricted_whitelists() {
        let component = make_component(json!({
            "name": "page",
            "schema": {
                "body": {
                    "type": "bloks",
                    "restrict_components": true,
                    "component_whitelist": ["hero", "teaser"],
                },
                "footer": {
                    "type": "bloks",
                    "restrict_components": true,
                    "component_whitelist": ["teaser", "footer_nav"],
                },
            },
        }));

        let names: Vec<String> = component.referenced_components().into_iter().collect();
        assert_eq!(names, vec!["footer_nav", "hero", "teaser"]);
    }

    #[test]
    fn unrestricted_bloks_field_contributes_nothing() {
        let component = make_component(json!({
            "name": "page",
            "schema": {
                "body": {
                    "type": "bloks",
                    "component_whitelist": ["hero"],
                },
                "sidebar": {
                    "type": "bloks",
                    "restrict_components": false,
                    "component_whitelist": ["teaser"],
                },
            },
        }));
        assert!(component.referenced_components().is_empty());
    }

    #[test]
    fn non_bloks_fields_are_ignored() {
        let component = make_component(json!({
            "name": "hero",
            "schema": {
                "headline": { "type": "text" },
                "image": { "type": "asset" },
            },
        }));
        assert!(component.referenced_components().is_empty());
    }

    #[test]
    fn restricted_field_without_whitelist_contributes_nothing() {
        let component = make_component(json!({
            "name": "page",
            "schema": {
                "body": {
                    "type": "bloks",
                    "restrict_components": true,
                },
            },
        }));
        assert!(component.referenced_components().is_empty());
    }

    #[test]
    fn non_string_whitelist_entries_are_skipped() {
        let component = make_component(json!({
            "name": "page",
            "schema": {
                "body": {
                    "type": "bloks",
                    "restrict_components": true,
                    "component_whitelist": ["hero", 42, null, {"name": "nope"}],
                },
            },
        }));
        let names = component.referenced_components();
        assert_eq!(names.len(), 1);
        assert!(names.contains("hero"));
    }

    #[test]
    fn truthy_restriction_values_count_as_restricted() {
        // The API normally sends booleans, but loosely-typed payloads
        // exist in the wild.
        let component = make_component(json!({
            "name": "page",
            "schema": {
                "a": {
                    "type": "bloks",
                    "restrict_components": 1,
                    "component_whitelist": ["hero"],
                },
                "b": {
                    "type": "bloks",
                    "restrict_components": 0,
                    "component_whitelist": ["teaser"],
                },
                "c": {
                    "type": "bloks",
                    "restrict_components": "",
                    "component_whitelist": ["footer"],
                },
            },
        }));
        let names = component.referenced_components();
        assert_eq!(names.len(), 1);
        assert!(names.contains("hero"));
    }

    #[test]
    fn unmodeled_keys_round_trip() {
        let component = make_component(json!({
            "name": "hero",
            "id": 7,
            "display_name": "Hero banner",
            "is_root": false,
            "schema": { "headline": { "type": "text" } },
        }));

        assert_eq!(component.extra.get("display_name"), Some(&json!("Hero banner")));
        assert_eq!(component.extra.get("is_root"), Some(&json!(false)));

        let value = serde_json::to_value(&component).unwrap();
        assert_eq!(value["display_name"], json!("Hero banner"));
        assert_eq!(value["is_root"], json!(false));
        assert_eq!(value["id"], json!(7));
    }

    #[test]
    fn schema_field_order_is_preserved() {
        let component = make_component(json!({
            "name": "form",
            "schema": {
                "zip": { "type": "text" },
                "address": { "type": "text" },
                "mail": { "type": "text" },
            },
        }));

        let fields: Vec<&String> = component.schema.keys().collect();
        assert_eq!(fields, vec!["zip", "address", "mail"]);

        let rendered = serde_json::to_string(&component).unwrap();
        let zip = rendered.find("\"zip\"").unwrap();
        let address = rendered.find("\"address\"").unwrap();
        let mail = rendered.find("\"mail\"").unwrap();
        assert!(zip < address && address < mail);
    }

    #[test]
    fn absent_id_is_not_serialized() {
        let component = make_component(json!({
            "name": "fresh",
            "schema": {},
        }));
        let rendered = serde_json::to_string(&component).unwrap();
        assert!(!rendered.contains("\"id\""));
    }

    #[test]
    fn find_by_name_returns_first_match() {
        let listing: ComponentListing = serde_json::from_value(json!({
            "components": [
                { "name": "hero", "id": 1, "schema": {} },
                { "name": "page", "id": 2, "schema": {} },
                { "name": "hero", "id": 3, "schema": {} },
            ],
        }))
        .unwrap();

        assert_eq!(listing.find_by_name("hero").and_then(|c| c.id), Some(1));
        assert_eq!(listing.find_by_name("page").and_then(|c| c.id), Some(2));
        assert!(listing.find_by_name("missing").is_none());
        assert_eq!(listing.len(), 3);
    }
}
