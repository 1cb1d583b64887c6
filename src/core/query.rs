use serde_json::{Map, Value};

/// Schemaless store record. Legacy imports left the same semantic field under
/// several historical names, so records stay as raw JSON objects and every
/// read goes through alias resolution.
pub type Document = Map<String, Value>;

/// Case-insensitive substring matcher over one or more needles.
///
/// A single filter value becomes one needle; a list becomes an OR across its
/// elements. Needles are trimmed and lowercased at construction; empty
/// elements are dropped, and an all-empty input yields no matcher at all.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatch {
    needles: Vec<String>,
}

impl TextMatch {
    /// Build a matcher from raw needle candidates. Returns `None` when no
    /// usable needle survives trimming, which callers treat as "no constraint".
    pub fn new<I>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let needles: Vec<String> = candidates
            .into_iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        if needles.is_empty() {
            None
        } else {
            Some(Self { needles })
        }
    }

    /// True when `text` contains any needle, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.needles.iter().any(|n| haystack.contains(n))
    }

    /// True when any needle is exactly `value` (needles are already
    /// trimmed/lowercased, so `value` must be too).
    pub fn requests(&self, value: &str) -> bool {
        self.needles.iter().any(|n| n == value)
    }
}

/// Inclusive numeric bounds for a company-size query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBounds {
    pub gte: Option<f64>,
    pub lte: Option<f64>,
}

impl SizeBounds {
    pub fn contains(&self, value: f64) -> bool {
        self.gte.map_or(true, |lo| value >= lo) && self.lte.map_or(true, |hi| value <= hi)
    }
}

/// Query predicate evaluated against a [`Document`].
///
/// Dotted field paths descend into nested objects and fan out across arrays,
/// so `employment.title` matches when any employment entry's title matches.
#[derive(Debug, Clone)]
pub enum Condition {
    And(Vec<Condition>),
    Or(Vec<Condition>),
    /// Case-insensitive substring match against string values at `field`.
    Contains { field: &'static str, matcher: TextMatch },
    /// Exact string membership against values at `field`.
    InSet { field: &'static str, values: Vec<String> },
    /// Inclusive numeric range against numeric values at `field`.
    /// String-valued fields (size buckets like "51-200") never match.
    Range { field: &'static str, bounds: SizeBounds },
    /// Field is entirely absent from the document.
    Missing { field: &'static str },
    /// Value equality. `Value::Null` matches a null value or an absent field.
    Eq { field: &'static str, value: Value },
}

impl Condition {
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Condition::And(parts) => parts.iter().all(|c| c.matches(doc)),
            Condition::Or(parts) => parts.iter().any(|c| c.matches(doc)),
            Condition::Contains { field, matcher } => values_at(doc, field)
                .iter()
                .any(|v| v.as_str().is_some_and(|s| matcher.matches(s))),
            Condition::InSet { field, values } => values_at(doc, field)
                .iter()
                .any(|v| v.as_str().is_some_and(|s| values.iter().any(|c| c == s))),
            Condition::Range { field, bounds } => values_at(doc, field)
                .iter()
                .any(|v| v.as_f64().is_some_and(|n| bounds.contains(n))),
            Condition::Missing { field } => values_at(doc, field).is_empty(),
            Condition::Eq { field, value } => {
                let found = values_at(doc, field);
                if value.is_null() {
                    found.is_empty() || found.iter().any(|v| v.is_null())
                } else {
                    found.iter().any(|v| *v == value)
                }
            }
        }
    }
}

/// Collect every value reachable at a dotted path, traversing arrays at any
/// depth. An empty result means the field is absent.
pub fn values_at<'a>(doc: &'a Document, path: &str) -> Vec<&'a Value> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut out = Vec::new();
    if let Some(first) = doc.get(segments[0]) {
        walk(first, &segments[1..], &mut out);
    }
    out
}

fn walk<'a>(value: &'a Value, segments: &[&str], out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                walk(item, segments, out);
            }
        }
        Value::Object(map) => {
            if segments.is_empty() {
                out.push(value);
            } else if let Some(next) = map.get(segments[0]) {
                walk(next, &segments[1..], out);
            }
        }
        _ => {
            if segments.is_empty() {
                out.push(value);
            }
        }
    }
}
