//! Request validation: TIPLOC existence checks and via/avoid shape checks.

use crate::error::RouteError;
use crate::link::LinkStore;
use crate::location::LocationStore;

/// Validate that `tiploc` is a known origin in `links`. On failure, returns
/// `RouteError::UnknownTiploc` carrying fuzzy suggestions drawn from
/// `locations`.
pub fn validate_tiploc(tiploc: &str, links: &LinkStore, locations: &LocationStore) -> Result<(), RouteError> {
    if links.has_tiploc(tiploc) {
        return Ok(());
    }

    Err(RouteError::UnknownTiploc {
        tiploc: tiploc.to_string(),
        suggestions: locations.fuzzy_match(tiploc),
    })
}

/// Validate every TIPLOC in `via`, in order.
pub fn validate_via(via: &[String], links: &LinkStore, locations: &LocationStore) -> Result<(), RouteError> {
    for tiploc in via {
        validate_tiploc(tiploc, links, locations)?;
    }
    Ok(())
}

/// Validate every TIPLOC in `avoid`.
pub fn validate_avoid(avoid: &[String], links: &LinkStore, locations: &LocationStore) -> Result<(), RouteError> {
    for tiploc in avoid {
        validate_tiploc(tiploc, links, locations)?;
    }
    Ok(())
}

/// Coerce a loosely-typed `via`/`avoid` value (as received from an untyped
/// request boundary — a JSON API body, a scripting embedding, etc.) into a
/// `Vec<String>`.
///
/// A JSON `null` or an absent field coerces to an empty list (matching the
/// "empty and absent are identical" boundary behaviour). Anything that
/// isn't a JSON array of strings fails with `RouteError::BadList`, naming
/// `argument` ("via" or "avoid") in the error.
///
/// This exists because Rust's own `Vec<String>` call sites already enforce
/// list shape at compile time; this coercion is for callers crossing a
/// dynamically-typed boundary where that guarantee doesn't hold.
pub fn coerce_via_or_avoid(value: &serde_json::Value, argument: &'static str) -> Result<Vec<String>, RouteError> {
    match value {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(s) => out.push(s.to_string()),
                    None => return Err(RouteError::BadList { argument }),
                }
            }
            Ok(out)
        }
        _ => Err(RouteError::BadList { argument }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::NetworkLink;

    fn store_with(tiploc: &str) -> LinkStore {
        let mut store = LinkStore::new();
        store.insert(NetworkLink {
            origin: tiploc.to_string(),
            destination: "ELSEWHERE".to_string(),
            line_code: "FL".to_string(),
            line_description: "Fast Line".to_string(),
            initial_direction: 'U',
            final_direction: 'U',
            distance: Some(100),
            reversible: 'N',
        });
        store
    }

    #[test]
    fn test_validate_known_tiploc_ok() {
        let links = store_with("CREWE");
        let locations = LocationStore::new();
        assert!(validate_tiploc("CREWE", &links, &locations).is_ok());
    }

    #[test]
    fn test_validate_unknown_tiploc_errs_with_suggestions() {
        let links = store_with("CREWE");
        let mut locations = LocationStore::new();
        locations.insert(crate::location::LocationRecord::new(
            "CREWE", "Crewe", None, None, None, None, None, None, None,
        ));
        let err = validate_tiploc("CREW", &links, &locations).unwrap_err();
        match err {
            RouteError::UnknownTiploc { tiploc, suggestions } => {
                assert_eq!(tiploc, "CREW");
                assert!(suggestions.iter().any(|s| s.starts_with("CREWE:")));
            }
            other => panic!("expected UnknownTiploc, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_via_empty_is_ok() {
        let links = store_with("CREWE");
        let locations = LocationStore::new();
        assert!(validate_via(&[], &links, &locations).is_ok());
    }

    #[test]
    fn test_validate_via_stops_at_first_failure() {
        let links = store_with("CREWE");
        let locations = LocationStore::new();
        let via = vec!["CREWE".to_string(), "BOGUS".to_string()];
        let err = validate_via(&via, &links, &locations).unwrap_err();
        assert!(matches!(err, RouteError::UnknownTiploc { .. }));
    }

    #[test]
    fn test_coerce_via_scalar_string_is_bad_list() {
        let value = serde_json::json!("STAFFRD");
        let err = coerce_via_or_avoid(&value, "via").unwrap_err();
        assert_eq!(err, RouteError::BadList { argument: "via" });
    }

    #[test]
    fn test_coerce_via_array_of_strings_ok() {
        let value = serde_json::json!(["STAFFRD", "TAMWTHLL"]);
        let result = coerce_via_or_avoid(&value, "via").unwrap();
        assert_eq!(result, vec!["STAFFRD".to_string(), "TAMWTHLL".to_string()]);
    }

    #[test]
    fn test_coerce_via_null_is_empty() {
        let result = coerce_via_or_avoid(&serde_json::Value::Null, "via").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_coerce_via_array_with_non_string_is_bad_list() {
        let value = serde_json::json!(["STAFFRD", 42]);
        let err = coerce_via_or_avoid(&value, "via").unwrap_err();
        assert_eq!(err, RouteError::BadList { argument: "via" });
    }
}
