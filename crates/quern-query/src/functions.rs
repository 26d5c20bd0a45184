//! Computed-function registry.
//!
//! Functions dispatch on `(name, callee value kind)` with an arity check,
//! so the same name can exist for several value kinds. Resolution happens
//! at query time because the callee's runtime type may vary per document.
//!
//! Built-ins mirror the property types they serve:
//!
//! | name        | callee   | args         | result  |
//! |-------------|----------|--------------|---------|
//! | `format`    | datetime | format str   | string  |
//! | `substring` | string   | start, len   | string  |
//! | `length`    | string   | —            | number  |

use std::collections::HashMap;
use std::fmt::Write as _;

use quern_core::{PropertyValue, ValueKind};

use crate::error::{Error, Result};

type Callback =
    Box<dyn Fn(&PropertyValue, &[PropertyValue]) -> std::result::Result<PropertyValue, String> + Send + Sync>;

struct FunctionEntry {
    arity: usize,
    callback: Callback,
}

/// Registry of computed functions keyed by name and callee kind.
///
/// # Example
///
/// ```rust
/// use quern_core::PropertyValue;
/// use quern_query::FunctionRegistry;
///
/// let registry = FunctionRegistry::with_builtins();
/// let out = registry
///     .try_execute("length", &PropertyValue::from("four"), &[])
///     .unwrap();
/// assert_eq!(out, PropertyValue::Integer(4));
/// ```
#[derive(Default)]
pub struct FunctionRegistry {
    methods: HashMap<(String, ValueKind), Vec<FunctionEntry>>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in functions registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register("format", ValueKind::DateTime, 1, |value, args| {
            let PropertyValue::DateTime(dt) = value else {
                return Err("callee is not a datetime".to_string());
            };
            let PropertyValue::String(pattern) = &args[0] else {
                return Err("format pattern must be a string".to_string());
            };
            let mut out = String::new();
            write!(out, "{}", dt.format(pattern))
                .map_err(|_| format!("invalid format pattern '{pattern}'"))?;
            Ok(PropertyValue::String(out))
        });

        registry.register("substring", ValueKind::String, 2, |value, args| {
            let PropertyValue::String(s) = value else {
                return Err("callee is not a string".to_string());
            };
            let (PropertyValue::Integer(start), PropertyValue::Integer(len)) =
                (&args[0], &args[1])
            else {
                return Err("substring arguments must be integers".to_string());
            };
            if *start < 0 || *len < 0 {
                return Err("substring arguments must not be negative".to_string());
            }
            let out: String = s
                .chars()
                .skip(*start as usize)
                .take(*len as usize)
                .collect();
            Ok(PropertyValue::String(out))
        });

        registry.register("length", ValueKind::String, 0, |value, _| {
            let PropertyValue::String(s) = value else {
                return Err("callee is not a string".to_string());
            };
            Ok(PropertyValue::Integer(s.chars().count() as i64))
        });

        registry
    }

    /// Register a function for a callee kind and exact argument count.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        kind: ValueKind,
        arity: usize,
        callback: impl Fn(&PropertyValue, &[PropertyValue]) -> std::result::Result<PropertyValue, String>
        + Send
        + Sync
        + 'static,
    ) {
        self.methods
            .entry((name.into(), kind))
            .or_default()
            .push(FunctionEntry {
                arity,
                callback: Box::new(callback),
            });
    }

    /// Execute `name` against a callee value.
    ///
    /// Fails with [`Error::UnknownFunction`] when no function matches the
    /// name, the callee's runtime kind, and the argument count.
    pub fn try_execute(
        &self,
        name: &str,
        callee: &PropertyValue,
        args: &[PropertyValue],
    ) -> Result<PropertyValue> {
        let kind = callee.kind();
        let unknown = || Error::UnknownFunction {
            name: name.to_string(),
            kind,
            arity: args.len(),
        };
        let entry = self
            .methods
            .get(&(name.to_string(), kind))
            .and_then(|entries| entries.iter().find(|e| e.arity == args.len()))
            .ok_or_else(unknown)?;
        (entry.callback)(callee, args).map_err(|message| Error::FunctionFailed {
            name: name.to_string(),
            message,
        })
    }
}
