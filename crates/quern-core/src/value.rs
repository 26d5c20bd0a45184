//! Loosely-typed property values.
//!
//! Frontmatter properties, reserved document keys, and query filter values
//! all share one dynamically-shaped value type, [`PropertyValue`]. Documents
//! are maps of these; the query engine compares, sorts, and counts them
//! without knowing the schema that produced them.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::InnerLink;
use crate::error::Error;

// ============================================================================
// PropertyValue
// ============================================================================

/// A dynamically-typed document property value.
///
/// Scalar variants mirror the content-type property types (string, number,
/// float, bool, datetime); `Array` holds homogeneous element lists from
/// frontmatter arrays; `Links` carries the reserved `innerLinks` key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// UTC timestamp (serialized as RFC 3339).
    DateTime(DateTime<Utc>),
    /// UTF-8 string.
    String(String),
    /// Ordered element list.
    Array(Vec<PropertyValue>),
    /// Heading anchors extracted from the document body.
    Links(Vec<InnerLink>),
}

/// The runtime kind of a [`PropertyValue`], used for computed-function
/// dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`PropertyValue::String`]
    String,
    /// [`PropertyValue::Integer`]
    Number,
    /// [`PropertyValue::Float`]
    Float,
    /// [`PropertyValue::Bool`]
    Bool,
    /// [`PropertyValue::DateTime`]
    DateTime,
    /// [`PropertyValue::Array`]
    Array,
    /// [`PropertyValue::Links`]
    Links,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::DateTime => "datetime",
            Self::Array => "array",
            Self::Links => "links",
        };
        write!(f, "{name}")
    }
}

impl PropertyValue {
    /// The runtime kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Integer(_) => ValueKind::Number,
            Self::Float(_) => ValueKind::Float,
            Self::Bool(_) => ValueKind::Bool,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Array(_) => ValueKind::Array,
            Self::Links(_) => ValueKind::Links,
        }
    }

    /// Borrow the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the array elements, if this is an array.
    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Order two values, where an order exists.
    ///
    /// Same-kind scalars compare naturally; `Integer` and `Float` compare
    /// numerically with each other; a `DateTime` compares against a string
    /// that parses as a timestamp (so filter values arriving as plain text
    /// can still range-match `updatedAt`). Everything else is unordered and
    /// yields `None`.
    pub fn compare(&self, other: &PropertyValue) -> Option<Ordering> {
        use PropertyValue::*;
        match (self, other) {
            (String(a), String(b)) => Some(a.cmp(b)),
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            (DateTime(a), String(b)) => parse_datetime(b).map(|b| a.cmp(&b)),
            (String(a), DateTime(b)) => parse_datetime(a).map(|a| a.cmp(b)),
            _ => None,
        }
    }

    /// Loose equality: [`Self::compare`] where ordered, `PartialEq`
    /// otherwise.
    pub fn matches(&self, other: &PropertyValue) -> bool {
        match self.compare(other) {
            Some(ordering) => ordering == Ordering::Equal,
            None => self == other,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Links(links) => write!(f, "[{} links]", links.len()),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl TryFrom<serde_json::Value> for PropertyValue {
    type Error = Error;

    /// Convert a loosely-typed JSON scalar (or array of scalars) into a
    /// property value. Objects and nulls have no property representation.
    fn try_from(value: serde_json::Value) -> Result<Self, Error> {
        use serde_json::Value;
        match value {
            Value::String(s) => Ok(Self::String(s)),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(Error::InvalidValue(n.to_string()))
                }
            }
            Value::Array(items) => Ok(Self::Array(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            )),
            other => Err(Error::InvalidValue(other.to_string())),
        }
    }
}

// ============================================================================
// Datetime parsing
// ============================================================================

/// Parse a timestamp the way frontmatter authors write them.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, and bare `YYYY-MM-DD`
/// (midnight UTC).
///
/// # Examples
///
/// ```rust
/// use quern_core::parse_datetime;
///
/// assert!(parse_datetime("2020-01-02T03:04:05Z").is_some());
/// assert!(parse_datetime("2020-01-02 03:04:05").is_some());
/// assert!(parse_datetime("2020-01-02").is_some());
/// assert!(parse_datetime("yesterday").is_none());
/// ```
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    // ------------------------------------------------------------------------
    // compare / matches
    // ------------------------------------------------------------------------

    #[test]
    fn test_compare_same_kind_scalars() {
        assert_eq!(
            PropertyValue::from("a").compare(&PropertyValue::from("b")),
            Some(Ordering::Less)
        );
        assert_eq!(
            PropertyValue::from(2i64).compare(&PropertyValue::from(2i64)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_compare_numeric_cross_kind() {
        assert_eq!(
            PropertyValue::from(1i64).compare(&PropertyValue::from(1.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            PropertyValue::from(2.0).compare(&PropertyValue::from(2i64)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_compare_datetime_against_string() {
        let newer = PropertyValue::from(date(2020, 1, 2));
        assert_eq!(
            newer.compare(&PropertyValue::from("2020-01-01")),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_cross_kind_is_unordered() {
        assert_eq!(
            PropertyValue::from("1").compare(&PropertyValue::from(1i64)),
            None
        );
    }

    #[test]
    fn test_matches_falls_back_to_equality() {
        let tags = PropertyValue::Array(vec!["a".into(), "b".into()]);
        assert!(tags.matches(&PropertyValue::Array(vec!["a".into(), "b".into()])));
        assert!(!tags.matches(&PropertyValue::from("a")));
    }

    // ------------------------------------------------------------------------
    // serde
    // ------------------------------------------------------------------------

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(
            serde_json::to_string(&PropertyValue::from("hi")).unwrap(),
            "\"hi\""
        );
        assert_eq!(
            serde_json::to_string(&PropertyValue::from(3i64)).unwrap(),
            "3"
        );
    }

    #[test]
    fn test_deserialize_untagged_order() {
        let v: PropertyValue = serde_json::from_str("3").unwrap();
        assert_eq!(v, PropertyValue::Integer(3));
        let v: PropertyValue = serde_json::from_str("3.5").unwrap();
        assert_eq!(v, PropertyValue::Float(3.5));
        let v: PropertyValue = serde_json::from_str("\"plain\"").unwrap();
        assert_eq!(v, PropertyValue::String("plain".to_string()));
    }

    #[test]
    fn test_try_from_json_rejects_objects() {
        let value = serde_json::json!({"a": 1});
        assert!(PropertyValue::try_from(value).is_err());
    }

    // ------------------------------------------------------------------------
    // parse_datetime
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_datetime_formats() {
        assert_eq!(parse_datetime("2020-01-02"), Some(date(2020, 1, 2)));
        assert!(parse_datetime("2020-01-02 10:30:00").is_some());
        assert!(parse_datetime("2020-01-02T10:30:00+02:00").is_some());
        assert!(parse_datetime("not a date").is_none());
    }
}
