//! Filter, sort, project, count, paginate.
//!
//! The engine borrows a [`FunctionRegistry`] so filter and projection
//! expressions can route values through computed functions. Pipeline order
//! is fixed by the caller: filter → sort → project → paginate.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use quern_core::{ProcessedDocument, PropertyValue};

use crate::error::Result;
use crate::expr::PropertyExpr;
use crate::functions::FunctionRegistry;
use crate::types::{FilterOperator, FilterRow, Page, PropertyCount, SortOrder, SortRow};

/// The query engine over flat document collections.
pub struct QueryEngine<'a> {
    functions: &'a FunctionRegistry,
}

impl<'a> QueryEngine<'a> {
    /// Create an engine dispatching computed functions through `functions`.
    pub fn new(functions: &'a FunctionRegistry) -> Self {
        Self { functions }
    }

    // ------------------------------------------------------------------------
    // Filter
    // ------------------------------------------------------------------------

    /// Keep documents matching *all* predicates. A document missing a named
    /// property is excluded.
    pub fn filter<'d>(
        &self,
        docs: Vec<&'d ProcessedDocument>,
        filters: &[FilterRow],
    ) -> Result<Vec<&'d ProcessedDocument>> {
        if filters.is_empty() {
            return Ok(docs);
        }
        let mut out = Vec::with_capacity(docs.len());
        for doc in docs {
            if self.matches_all(doc, filters)? {
                out.push(doc);
            }
        }
        Ok(out)
    }

    fn matches_all(&self, doc: &ProcessedDocument, filters: &[FilterRow]) -> Result<bool> {
        for filter in filters {
            if !self.matches_filter(doc, filter)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn matches_filter(&self, doc: &ProcessedDocument, filter: &FilterRow) -> Result<bool> {
        let Some(value) = self.resolve(doc, &filter.property)? else {
            return Ok(false);
        };
        Ok(match filter.operator {
            FilterOperator::Equals => value_matches(&value, &filter.value),
            FilterOperator::More => compare_is(&value, &filter.value, Ordering::is_gt),
            FilterOperator::Less => compare_is(&value, &filter.value, Ordering::is_lt),
            FilterOperator::MoreOrEqual => compare_is(&value, &filter.value, Ordering::is_ge),
            FilterOperator::LessOrEqual => compare_is(&value, &filter.value, Ordering::is_le),
            FilterOperator::In => match filter.value.as_array() {
                Some(candidates) => candidates
                    .iter()
                    .any(|candidate| value_matches(&value, candidate)),
                None => value_matches(&value, &filter.value),
            },
        })
    }

    // ------------------------------------------------------------------------
    // Sort
    // ------------------------------------------------------------------------

    /// Stable multi-key sort: the first row is primary, later rows break
    /// ties in listed order. Missing and incomparable values keep input
    /// order.
    pub fn sort(&self, docs: &mut [&ProcessedDocument], sorting: &[SortRow]) {
        if sorting.is_empty() {
            return;
        }
        docs.sort_by(|a, b| {
            for row in sorting {
                let ordering = match (a.get(&row.property), b.get(&row.property)) {
                    (Some(left), Some(right)) => {
                        left.compare(right).unwrap_or(Ordering::Equal)
                    }
                    _ => Ordering::Equal,
                };
                let ordering = match row.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }

    // ------------------------------------------------------------------------
    // Project
    // ------------------------------------------------------------------------

    /// Project a document onto the requested properties.
    ///
    /// An empty request returns the full map. Each requested item resolves
    /// an optional alias and/or computed function; the key is included only
    /// when the source property is present on the document.
    pub fn project(
        &self,
        doc: &ProcessedDocument,
        properties: &[String],
    ) -> Result<ProcessedDocument> {
        if properties.is_empty() {
            return Ok(doc.clone());
        }
        let mut out = ProcessedDocument::new();
        for property in properties {
            let expr = PropertyExpr::parse(property)?;
            if let Some(value) = self.resolve_expr(doc, &expr)? {
                out.insert(expr.output_key(), value);
            }
        }
        Ok(out)
    }

    // ------------------------------------------------------------------------
    // Count
    // ------------------------------------------------------------------------

    /// Count occurrences of each value of `property` across the documents.
    ///
    /// Array-valued properties contribute one count per element; scalar
    /// values contribute one; documents missing the property are skipped.
    /// Rows come back in key order.
    pub fn count_by(&self, docs: &[&ProcessedDocument], property: &str) -> Vec<PropertyCount> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for doc in docs {
            let Some(value) = doc.get(property) else {
                continue;
            };
            match value {
                PropertyValue::Array(items) => {
                    for item in items {
                        if let Some(key) = count_key(item) {
                            *counts.entry(key).or_default() += 1;
                        }
                    }
                }
                other => {
                    if let Some(key) = count_key(other) {
                        *counts.entry(key).or_default() += 1;
                    }
                }
            }
        }
        counts
            .into_iter()
            .map(|(key, count)| PropertyCount { key, count })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Expression resolution
    // ------------------------------------------------------------------------

    /// Resolve a property expression against a document. `None` means the
    /// source property is absent.
    pub fn resolve(
        &self,
        doc: &ProcessedDocument,
        expression: &str,
    ) -> Result<Option<PropertyValue>> {
        let expr = PropertyExpr::parse(expression)?;
        self.resolve_expr(doc, &expr)
    }

    fn resolve_expr(
        &self,
        doc: &ProcessedDocument,
        expr: &PropertyExpr,
    ) -> Result<Option<PropertyValue>> {
        match expr {
            PropertyExpr::Property { name, .. } => Ok(doc.get(name).cloned()),
            PropertyExpr::Function {
                name, callee, args, ..
            } => match doc.get(callee) {
                None => Ok(None),
                Some(value) => Ok(Some(self.functions.try_execute(name, value, args)?)),
            },
        }
    }
}

/// Slice `items` into the zero-indexed page, keeping the total match count.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let total = items.len();
    let data = items
        .into_iter()
        .skip(page.saturating_mul(per_page))
        .take(per_page)
        .collect();
    Page { data, total }
}

/// Equality against a possibly array-valued document property: arrays match
/// when any element matches.
fn value_matches(doc_value: &PropertyValue, filter_value: &PropertyValue) -> bool {
    match doc_value.as_array() {
        Some(items) => items.iter().any(|item| item.matches(filter_value)),
        None => doc_value.matches(filter_value),
    }
}

fn compare_is(
    doc_value: &PropertyValue,
    filter_value: &PropertyValue,
    accept: impl Fn(Ordering) -> bool,
) -> bool {
    doc_value.compare(filter_value).is_some_and(accept)
}

fn count_key(value: &PropertyValue) -> Option<String> {
    match value {
        PropertyValue::String(s) => Some(s.clone()),
        PropertyValue::Integer(_)
        | PropertyValue::Float(_)
        | PropertyValue::Bool(_)
        | PropertyValue::DateTime(_) => Some(value.to_string()),
        PropertyValue::Array(_) | PropertyValue::Links(_) => None,
    }
}
