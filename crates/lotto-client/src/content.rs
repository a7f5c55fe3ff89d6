//! Navigation helpers for the generic identity content multimap.
//!
//! An identity carries a mapping from content key to an ordered sequence of
//! revision entries. The extractor is schema-agnostic: the same three-level
//! descent serves ledger and ticket payloads, which live under different
//! content keys but the same nesting pattern. Iteration order of the
//! mapping must match wire order, which is why the crate builds
//! `serde_json` with `preserve_order`.

use serde_json::Value;

/// Extract the single most-recently-published message string from an
/// identity record.
///
/// Descent: `identity.contentmultimap` → first key in wire order → first
/// revision entry → first nested entry → `objectdata.message`. Any missing
/// link yields `None`; this function never fails loudly.
pub fn extract_multimap_message(identity: &Value) -> Option<&str> {
    let multimap = identity
        .get("identity")?
        .get("contentmultimap")?
        .as_object()?;

    // First key is the latest entry; the source emits newest first.
    let (_, revisions) = multimap.iter().next()?;
    let latest = revisions.as_array()?.first()?;

    let (_, entry) = latest.as_object()?.iter().next()?;
    entry.get("objectdata")?.get("message")?.as_str()
}

/// Current primary custody address of an identity, when one is present.
pub fn primary_address(identity: &Value) -> Option<&str> {
    identity
        .get("identity")?
        .get("primaryaddresses")?
        .as_array()?
        .first()?
        .as_str()
}

/// Parent i-address of an identity, when one is present.
pub fn parent_address(identity: &Value) -> Option<&str> {
    identity.get("identity")?.get("parent")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity_with_message(message: &str) -> Value {
        json!({
            "identity": {
                "contentmultimap": {
                    "iKeyNewest111": [
                        { "iNested111": { "objectdata": { "message": message } } },
                        { "iNested111": { "objectdata": { "message": "older" } } }
                    ],
                    "iKeyOlder222": [
                        { "iNested222": { "objectdata": { "message": "other key" } } }
                    ]
                }
            }
        })
    }

    #[test]
    fn extracts_latest_message_from_first_key() {
        let identity = identity_with_message("hello");
        assert_eq!(extract_multimap_message(&identity), Some("hello"));
    }

    #[test]
    fn missing_multimap_yields_none() {
        let identity = json!({ "identity": {} });
        assert_eq!(extract_multimap_message(&identity), None);
    }

    #[test]
    fn empty_revision_list_yields_none() {
        let identity = json!({
            "identity": { "contentmultimap": { "iKey": [] } }
        });
        assert_eq!(extract_multimap_message(&identity), None);
    }

    #[test]
    fn non_string_payload_yields_none() {
        let identity = json!({
            "identity": {
                "contentmultimap": {
                    "iKey": [ { "iNested": { "objectdata": { "message": 42 } } } ]
                }
            }
        });
        assert_eq!(extract_multimap_message(&identity), None);
    }

    #[test]
    fn missing_objectdata_yields_none() {
        let identity = json!({
            "identity": {
                "contentmultimap": {
                    "iKey": [ { "iNested": { "other": {} } } ]
                }
            }
        });
        assert_eq!(extract_multimap_message(&identity), None);
    }

    #[test]
    fn reads_primary_and_parent_addresses() {
        let identity = json!({
            "identity": {
                "primaryaddresses": ["RPrimary111", "RPrimary222"],
                "parent": "iParent111"
            }
        });
        assert_eq!(primary_address(&identity), Some("RPrimary111"));
        assert_eq!(parent_address(&identity), Some("iParent111"));
    }

    #[test]
    fn missing_addresses_yield_none() {
        let identity = json!({ "identity": { "primaryaddresses": [] } });
        assert_eq!(primary_address(&identity), None);
        assert_eq!(parent_address(&identity), None);
    }
}
