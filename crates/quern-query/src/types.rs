//! Request and response row types for the query surface.

use serde::{Deserialize, Serialize};

use quern_core::PropertyValue;

/// One filter predicate; predicates AND-combine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterRow {
    /// Property expression naming the value to test (may be a computed
    /// function expression).
    pub property: String,
    /// Comparison value.
    pub value: PropertyValue,
    /// Comparison operator.
    pub operator: FilterOperator,
}

/// Filter comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Value equality (any element for array-valued properties).
    Equals,
    /// Strictly greater than the filter value.
    More,
    /// Strictly less than the filter value.
    Less,
    /// Greater than or equal to the filter value.
    MoreOrEqual,
    /// Less than or equal to the filter value.
    LessOrEqual,
    /// Membership in the filter value's element list.
    In,
}

/// One sort key; the first row is primary, later rows break ties in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortRow {
    /// Property name to sort by.
    pub property: String,
    /// Sort direction.
    pub order: SortOrder,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest value first.
    #[default]
    Ascending,
    /// Largest value first.
    Descending,
}

/// A zero-indexed result slice plus the total match count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items of the requested page.
    pub data: Vec<T>,
    /// Total number of matches across all pages.
    pub total: usize,
}

/// One `(key, count)` aggregation row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCount {
    /// Stringified property value.
    pub key: String,
    /// Number of occurrences.
    pub count: usize,
}
