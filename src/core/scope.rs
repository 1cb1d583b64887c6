//! Multi-tenant visibility: every store query is conjoined with an ownership
//! predicate computed here.

use serde_json::Value;
use uuid::Uuid;

use crate::core::fields::OWNER_FIELD;
use crate::core::query::Condition;

/// Ownership predicate for a caller.
///
/// A record is visible when its owner field is absent, null, or equal to the
/// caller's id — in the raw string form or, when the id parses as a store
/// UUID, the canonical UUID rendering (some writers stored the normalized
/// form). A failed parse just drops that alternative. With no caller at all
/// only globally-visible records match, never everything.
pub fn owner_scope(owner: Option<&str>) -> Condition {
    let mut alternatives = vec![
        Condition::Missing { field: OWNER_FIELD },
        Condition::Eq { field: OWNER_FIELD, value: Value::Null },
    ];

    if let Some(id) = owner.map(str::trim).filter(|s| !s.is_empty()) {
        alternatives.push(Condition::Eq {
            field: OWNER_FIELD,
            value: Value::String(id.to_string()),
        });
        if let Ok(uuid) = Uuid::parse_str(id) {
            let canonical = uuid.to_string();
            if canonical != id {
                alternatives.push(Condition::Eq {
                    field: OWNER_FIELD,
                    value: Value::String(canonical),
                });
            }
        }
    }

    Condition::Or(alternatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::Document;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_global_records_visible_to_everyone() {
        let absent = doc(json!({"name": "Acme"}));
        let null_owner = doc(json!({"name": "Acme", "user_id": null}));

        for scope in [owner_scope(None), owner_scope(Some("u1"))] {
            assert!(scope.matches(&absent));
            assert!(scope.matches(&null_owner));
        }
    }

    #[test]
    fn test_owned_records_visible_only_to_owner() {
        let owned = doc(json!({"name": "Acme", "user_id": "u1"}));

        assert!(owner_scope(Some("u1")).matches(&owned));
        assert!(!owner_scope(Some("u2")).matches(&owned));
        assert!(!owner_scope(None).matches(&owned));
    }

    #[test]
    fn test_uuid_owner_matches_canonical_form() {
        // Stored in canonical lowercase, requested in uppercase.
        let owned = doc(json!({"user_id": "6f9619ff-8b86-d011-b42d-00c04fc964ff"}));
        assert!(owner_scope(Some("6F9619FF-8B86-D011-B42D-00C04FC964FF")).matches(&owned));
    }

    #[test]
    fn test_non_uuid_owner_is_not_an_error() {
        let owned = doc(json!({"user_id": "not-a-uuid"}));
        assert!(owner_scope(Some("not-a-uuid")).matches(&owned));
        assert!(!owner_scope(Some("other")).matches(&owned));
    }
}
