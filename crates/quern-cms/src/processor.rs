//! Schema validation over parsed documents.
//!
//! Applies the registered content-type schemas to every parsed document,
//! producing [`ProcessedDocument`] maps and accumulating per-document
//! validation errors across the whole batch; the caller fails atomically
//! only after all documents were attempted.

use quern_core::{keys, ParsedDocument, ProcessedDocument, PropertyValue, RawValue};

use crate::error::DocumentErrors;
use crate::schema::{coerce, ContentType, ContentTypeRegistry, UNDEFINED_CONTENT_TYPE};

/// Validate `documents` against `registry`.
///
/// Returns the successfully processed documents (keyed by logical path via
/// the reserved `path` property) and the error groups of the offenders.
/// Documents with the [`UNDEFINED_CONTENT_TYPE`] sentinel bypass schema
/// validation: their properties stay strings and string arrays.
pub fn apply_schemas(
    documents: Vec<ParsedDocument>,
    registry: &ContentTypeRegistry,
) -> (Vec<ProcessedDocument>, Vec<DocumentErrors>) {
    let mut processed = Vec::with_capacity(documents.len());
    let mut failures = Vec::new();

    for document in documents {
        match apply_schema(&document, registry) {
            Ok(doc) => processed.push(doc),
            Err(errors) => failures.push(errors),
        }
    }

    (processed, failures)
}

fn apply_schema(
    document: &ParsedDocument,
    registry: &ContentTypeRegistry,
) -> Result<ProcessedDocument, DocumentErrors> {
    let mut errors = DocumentErrors::new(document.logical_path.clone(), &document.content_type);

    let mut out = ProcessedDocument::new();

    if document.content_type == UNDEFINED_CONTENT_TYPE {
        for property in &document.properties {
            out.insert(&property.name, raw_to_value(&property.value));
        }
    } else {
        let Some(content_type) = registry.resolve(&document.content_type) else {
            errors.push(
                0,
                format!("Content type '{}' is not defined", document.content_type),
            );
            return Err(errors);
        };
        validate_properties(document, content_type, &mut out, &mut errors);
    }

    if !errors.messages.is_empty() {
        return Err(errors);
    }

    insert_reserved(document, &mut out);
    Ok(out)
}

fn validate_properties(
    document: &ParsedDocument,
    content_type: &ContentType,
    out: &mut ProcessedDocument,
    errors: &mut DocumentErrors,
) {
    // Keys present in the frontmatter but not declared by the schema.
    for property in &document.properties {
        if !content_type
            .properties
            .iter()
            .any(|schema| schema.name == property.name)
        {
            errors.push(property.line, format!("Unknown key '{}'", property.name));
        }
    }

    for schema in &content_type.properties {
        let Some(property) = document
            .properties
            .iter()
            .find(|property| property.name == schema.name)
        else {
            if schema.is_required {
                errors.push(
                    0,
                    format!("Required property '{}' is not defined", schema.name),
                );
            }
            continue;
        };

        match (&property.value, schema.is_array) {
            (RawValue::Scalar(raw), false) => match coerce(raw, schema.property_type) {
                Some(value) => out.insert(&schema.name, value),
                None => errors.push(property.line, cast_failure(schema, raw)),
            },
            (RawValue::List(items), true) => {
                let mut values = Vec::with_capacity(items.len());
                let mut ok = true;
                for raw in items {
                    match coerce(raw, schema.property_type) {
                        Some(value) => values.push(value),
                        None => {
                            errors.push(property.line, cast_failure(schema, raw));
                            ok = false;
                        }
                    }
                }
                if ok {
                    out.insert(&schema.name, PropertyValue::Array(values));
                }
            }
            (RawValue::Scalar(_), true) => errors.push(
                property.line,
                format!("Property '{}' expects an array value", schema.name),
            ),
            (RawValue::List(_), false) => errors.push(
                property.line,
                format!("Property '{}' expects a scalar value", schema.name),
            ),
        }
    }
}

fn insert_reserved(document: &ParsedDocument, out: &mut ProcessedDocument) {
    out.insert(
        keys::CONTENT_TYPE,
        PropertyValue::String(document.content_type.clone()),
    );
    out.insert(keys::CONTENT, PropertyValue::String(document.html.clone()));
    out.insert(
        keys::PATH,
        PropertyValue::Array(
            document
                .logical_path
                .iter()
                .map(PropertyValue::from)
                .collect(),
        ),
    );
    if let Some(file_name) = &document.file_name {
        out.insert(keys::FILE_NAME, PropertyValue::String(file_name.clone()));
    }
    out.insert(keys::CREATED_AT, PropertyValue::DateTime(document.created_at));
    out.insert(keys::UPDATED_AT, PropertyValue::DateTime(document.updated_at));
    out.insert(
        keys::INNER_LINKS,
        PropertyValue::Links(document.inner_links.clone()),
    );
}

fn raw_to_value(value: &RawValue) -> PropertyValue {
    match value {
        RawValue::Scalar(s) => PropertyValue::String(s.clone()),
        RawValue::List(items) => {
            PropertyValue::Array(items.iter().map(|s| PropertyValue::from(s.as_str())).collect())
        }
    }
}

fn cast_failure(schema: &crate::schema::PropertySchema, raw: &str) -> String {
    format!(
        "Invalid cast of property '{}' with value '{}' to type {:?}",
        schema.name, raw, schema.property_type
    )
}
