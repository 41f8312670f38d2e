//! Filtered queries over JSON documents
//!
//! Field paths are dotted (`customer_info.phone`). A query is a conjunction
//! of filters plus an optional single sort key.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value
    Eq { path: String, value: Value },
    /// Field equals one of the values
    In { path: String, values: Vec<Value> },
}

impl Filter {
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Filter::Eq { path, value } => field(doc, path).is_some_and(|v| loose_eq(v, value)),
            Filter::In { path, values } => field(doc, path)
                .is_some_and(|v| values.iter().any(|candidate| loose_eq(v, candidate))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    order_by: Option<(String, Direction)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            path: path.into(),
            value: value.into(),
        });
        self
    }

    pub fn any_of<V: Into<Value>>(
        mut self,
        path: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.filters.push(Filter::In {
            path: path.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn order_by(mut self, path: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((path.into(), direction));
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }

    /// Filter then sort. The sort is stable, so ties keep store order.
    pub fn apply(&self, docs: Vec<Value>) -> Vec<Value> {
        let mut out: Vec<Value> = docs.into_iter().filter(|d| self.matches(d)).collect();
        if let Some((path, direction)) = &self.order_by {
            out.sort_by(|a, b| {
                let ord = compare_values(field(a, path), field(b, path));
                match direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }
        out
    }
}

/// Resolve a dotted path inside a document
pub fn field<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |current, key| current.get(key))
}

fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Total order over optional JSON values
///
/// Missing and null sort first. Strings that both parse as RFC 3339
/// timestamps compare as instants, so differing fractional precision does
/// not break chronological order.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => {
            match (x.parse::<DateTime<Utc>>(), y.parse::<DateTime<Utc>>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: &str, phone: &str, status: &str, created_at: &str) -> Value {
        json!({
            "id": id,
            "customer_info": {"phone": phone},
            "status": status,
            "created_at": created_at,
        })
    }

    #[test]
    fn test_dotted_eq_filter() {
        let q = Query::new().eq("customer_info.phone", "98400");
        assert!(q.matches(&order("a", "98400", "pending", "2026-01-01T00:00:00Z")));
        assert!(!q.matches(&order("b", "12345", "pending", "2026-01-01T00:00:00Z")));
        assert!(!q.matches(&json!({"id": "c"})));
    }

    #[test]
    fn test_in_filter_and_conjunction() {
        let q = Query::new()
            .any_of("status", ["approved", "taken", "cooking", "ready"])
            .eq("customer_info.phone", "1");
        assert!(q.matches(&order("a", "1", "cooking", "2026-01-01T00:00:00Z")));
        assert!(!q.matches(&order("b", "1", "pending", "2026-01-01T00:00:00Z")));
        assert!(!q.matches(&order("c", "2", "ready", "2026-01-01T00:00:00Z")));
    }

    #[test]
    fn test_numbers_compare_loosely() {
        let q = Query::new().eq("rating", 5);
        assert!(q.matches(&json!({"rating": 5.0})));
    }

    #[test]
    fn test_order_by_timestamp_with_mixed_precision() {
        let docs = vec![
            order("late", "1", "pending", "2026-01-01T10:00:00.5Z"),
            order("early", "1", "pending", "2026-01-01T10:00:00Z"),
            order("middle", "1", "pending", "2026-01-01T10:00:00.25Z"),
        ];
        let asc = Query::new().order_by("created_at", Direction::Asc).apply(docs.clone());
        let ids: Vec<_> = asc.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["early", "middle", "late"]);

        let desc = Query::new().order_by("created_at", Direction::Desc).apply(docs);
        assert_eq!(desc[0]["id"], "late");
    }

    #[test]
    fn test_missing_sort_field_goes_first_and_keeps_order() {
        let docs = vec![json!({"id": "x"}), json!({"id": "y", "n": 1}), json!({"id": "z"})];
        let sorted = Query::new().order_by("n", Direction::Asc).apply(docs);
        let ids: Vec<_> = sorted.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["x", "z", "y"]);
    }
}
