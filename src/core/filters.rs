//! Filter normalization: loose ICP filter values become canonical match
//! predicates here, so the matching engine never branches on raw shapes.

use crate::core::query::{SizeBounds, TextMatch};
use crate::models::{CompanySizeFilter, FilterScalar, FilterValue};

impl FilterScalar {
    /// Stringified, trimmed form usable as a substring needle. Whitespace-only
    /// text yields nothing.
    fn needle(&self) -> Option<String> {
        match self {
            FilterScalar::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            FilterScalar::Bool(b) => Some(b.to_string()),
            FilterScalar::Int(n) => Some(n.to_string()),
            FilterScalar::Float(n) => Some(n.to_string()),
            FilterScalar::Other(_) => None,
        }
    }
}

/// Normalize a text filter into a case-insensitive substring matcher.
///
/// A scalar becomes one needle; a list becomes a logical OR across its
/// elements, each independently trimmed. Empty or all-invalid input is no
/// constraint at all — normalization never fails.
pub fn text_matcher(value: &FilterValue) -> Option<TextMatch> {
    match value {
        FilterValue::One(scalar) => TextMatch::new(scalar.needle()),
        FilterValue::Many(scalars) => TextMatch::new(scalars.iter().filter_map(|s| s.needle())),
    }
}

/// Normalize a company-size filter into inclusive numeric bounds.
///
/// Only the range-object shape is interpreted; `gte`/`lte` win over their
/// `min`/`max` synonyms when both are present. The opaque legacy string shape
/// is ignored, not an error.
pub fn size_bounds(filter: &CompanySizeFilter) -> Option<SizeBounds> {
    match filter {
        CompanySizeFilter::Range(range) => {
            let gte = range.gte.or(range.min);
            let lte = range.lte.or(range.max);
            if gte.is_none() && lte.is_none() {
                None
            } else {
                Some(SizeBounds { gte, lte })
            }
        }
        CompanySizeFilter::Opaque(_) | CompanySizeFilter::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SizeRange;

    #[test]
    fn test_scalar_and_singleton_list_are_equivalent() {
        let one = text_matcher(&FilterValue::One(FilterScalar::Text("IT Manager".into()))).unwrap();
        let many =
            text_matcher(&FilterValue::Many(vec![FilterScalar::Text("IT Manager".into())]))
                .unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn test_list_is_logical_or() {
        let m = text_matcher(&FilterValue::Many(vec![
            FilterScalar::Text("plastics".into()),
            FilterScalar::Text("steel".into()),
        ]))
        .unwrap();
        assert!(m.matches("Bharat Steel Works"));
        assert!(m.matches("Plastics Inc"));
        assert!(!m.matches("Textiles Ltd"));
    }

    #[test]
    fn test_empty_and_invalid_elements_dropped() {
        assert!(text_matcher(&FilterValue::One(FilterScalar::Text("   ".into()))).is_none());

        let m = text_matcher(&FilterValue::Many(vec![
            FilterScalar::Text("".into()),
            FilterScalar::Text(" retail ".into()),
        ]))
        .unwrap();
        assert!(m.matches("Retail Group"));
    }

    #[test]
    fn test_unrecognized_shapes_are_no_constraint() {
        // Null inside a list drops out; valid siblings survive.
        let filters: crate::models::IcpFilters =
            serde_json::from_str(r#"{"roles": ["IT Manager", null]}"#).unwrap();
        let m = text_matcher(filters.roles.as_ref().unwrap()).unwrap();
        assert!(m.matches("Senior IT Manager"));

        // An object where a scalar was expected matches nothing and errs nothing.
        let filters: crate::models::IcpFilters =
            serde_json::from_str(r#"{"roles": {"x": 1}}"#).unwrap();
        assert!(text_matcher(filters.roles.as_ref().unwrap()).is_none());

        // A bare numeric company_size is ignored, not interpreted as a bound.
        let filters: crate::models::IcpFilters =
            serde_json::from_str(r#"{"company_size": 100}"#).unwrap();
        assert!(size_bounds(filters.company_size.as_ref().unwrap()).is_none());
    }

    #[test]
    fn test_numeric_scalars_stringified() {
        let m = text_matcher(&FilterValue::One(FilterScalar::Int(500))).unwrap();
        assert!(m.matches("Area 500 Logistics"));
    }

    #[test]
    fn test_size_bounds_min_max_and_synonyms() {
        let bounds = size_bounds(&CompanySizeFilter::Range(SizeRange {
            min: Some(50.0),
            max: Some(200.0),
            gte: None,
            lte: None,
        }))
        .unwrap();
        assert_eq!(bounds.gte, Some(50.0));
        assert_eq!(bounds.lte, Some(200.0));

        // gte/lte take precedence over min/max.
        let bounds = size_bounds(&CompanySizeFilter::Range(SizeRange {
            min: Some(10.0),
            max: Some(500.0),
            gte: Some(100.0),
            lte: Some(300.0),
        }))
        .unwrap();
        assert_eq!(bounds.gte, Some(100.0));
        assert_eq!(bounds.lte, Some(300.0));
    }

    #[test]
    fn test_size_empty_range_and_opaque_string_ignored() {
        let empty = CompanySizeFilter::Range(SizeRange::default());
        assert!(size_bounds(&empty).is_none());

        let opaque = CompanySizeFilter::Opaque("51-200".into());
        assert!(size_bounds(&opaque).is_none());
    }
}
