//! Subcommand handlers.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use quern_cms::{
    sitemap_items, CmsBackend, CmsBuilder, CountPropertyValuesRequest, GetEntitiesRequest,
    GetEntityRequest, GetSectionsRequest,
};
use quern_core::{ContentPath, PropertyValue};
use quern_query::{FilterOperator, FilterRow, SortOrder, SortRow};

use crate::cli::{Args, Command};
use crate::config::QuernConfig;
use crate::error::{Error, Result};

/// Dispatch the parsed arguments.
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Render { file } => render_file(&file),
        Command::Build => {
            let backend = load_backend(args.config.as_deref())?;
            println!("build ok: {} documents", backend.len());
            Ok(())
        }
        Command::Get { path, select } => {
            let backend = load_backend(args.config.as_deref())?;
            let entity = backend.get_entity(&GetEntityRequest {
                path: parse_path(&path)?,
                properties: none_if_empty(select),
            })?;
            print_json(&entity)
        }
        Command::List {
            from,
            filter,
            sort,
            select,
            page,
            per_page,
        } => {
            let backend = load_backend(args.config.as_deref())?;
            let page = backend.get_entities(&GetEntitiesRequest {
                from_path: parse_optional_path(from)?,
                properties: none_if_empty(select),
                filters: none_if_empty(
                    filter
                        .iter()
                        .map(|raw| parse_filter(raw))
                        .collect::<Result<Vec<_>>>()?,
                ),
                sorting: none_if_empty(
                    sort.iter().map(|raw| parse_sort(raw)).collect::<Vec<_>>(),
                ),
                page,
                per_page,
            })?;
            print_json(&page)
        }
        Command::Count { property, from } => {
            let backend = load_backend(args.config.as_deref())?;
            let counts = backend.count_property_values(&CountPropertyValuesRequest {
                property,
                from_path: parse_optional_path(from)?,
                filters: None,
            })?;
            print_json(&counts)
        }
        Command::Sections { from, depth } => {
            let backend = load_backend(args.config.as_deref())?;
            let sections = backend.get_sections(&GetSectionsRequest {
                from_path: parse_optional_path(from)?,
                depth,
            });
            print_json(&sections)
        }
        Command::Sitemap => {
            let backend = load_backend(args.config.as_deref())?;
            print_json(&sitemap_items(&backend))
        }
    }
}

fn render_file(file: &Path) -> Result<()> {
    let markdown = fs::read_to_string(file)?;
    let compiled = quern_markdown::compile(&markdown)?;
    println!("{}", compiled.html);
    Ok(())
}

fn load_backend(config: Option<&Path>) -> Result<CmsBackend> {
    let config = QuernConfig::load(config)?;
    log::debug!(
        "building backend from '{}' with {} content types",
        config.content.folder.display(),
        config.content_types.len()
    );
    let mut builder = CmsBuilder::new();
    for content_type in config.content_types() {
        builder = builder.add_content_type(content_type)?;
    }
    builder = builder.add_content_folder(&config.content.folder)?;
    Ok(builder.build()?)
}

/// Parse a `property=value` equality filter. The value side is read as a
/// loosely-typed JSON scalar, falling back to a plain string.
pub(crate) fn parse_filter(raw: &str) -> Result<FilterRow> {
    let Some((property, value)) = raw.split_once('=') else {
        return Err(Error::Config(format!(
            "invalid filter '{raw}', expected 'property=value'"
        )));
    };
    let value = match serde_json::from_str::<serde_json::Value>(value)
        .ok()
        .and_then(|json| PropertyValue::try_from(json).ok())
    {
        Some(value) => value,
        None => PropertyValue::from(value),
    };
    Ok(FilterRow {
        property: property.to_string(),
        value,
        operator: FilterOperator::Equals,
    })
}

/// Parse a `property` or `property:desc` sort key.
pub(crate) fn parse_sort(raw: &str) -> SortRow {
    match raw.split_once(':') {
        Some((property, "desc")) => SortRow {
            property: property.to_string(),
            order: SortOrder::Descending,
        },
        Some((property, _)) => SortRow {
            property: property.to_string(),
            order: SortOrder::Ascending,
        },
        None => SortRow {
            property: raw.to_string(),
            order: SortOrder::Ascending,
        },
    }
}

fn parse_path(raw: &str) -> Result<ContentPath> {
    ContentPath::from_str(raw).map_err(|error| Error::Config(error.to_string()))
}

fn parse_optional_path(raw: Option<String>) -> Result<Option<ContentPath>> {
    raw.map(|raw| parse_path(&raw)).transpose()
}

fn none_if_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_string_value() {
        let row = parse_filter("project=project1").unwrap();
        assert_eq!(row.property, "project");
        assert_eq!(row.value, PropertyValue::from("project1"));
        assert_eq!(row.operator, FilterOperator::Equals);
    }

    #[test]
    fn test_parse_filter_typed_values() {
        assert_eq!(
            parse_filter("rating=5").unwrap().value,
            PropertyValue::Integer(5)
        );
        assert_eq!(
            parse_filter("published=true").unwrap().value,
            PropertyValue::Bool(true)
        );
    }

    #[test]
    fn test_parse_filter_without_equals_is_error() {
        assert!(parse_filter("broken").is_err());
    }

    #[test]
    fn test_parse_sort_directions() {
        assert_eq!(parse_sort("updatedAt").order, SortOrder::Ascending);
        assert_eq!(parse_sort("updatedAt:desc").order, SortOrder::Descending);
        assert_eq!(parse_sort("updatedAt:desc").property, "updatedAt");
    }

    #[test]
    fn test_end_to_end_render_and_query() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        std::fs::create_dir_all(content.join("docs")).unwrap();
        std::fs::write(
            content.join("docs").join("intro.md"),
            "---\ntitle: Intro\ntype: article\n---\n# Intro\n\nhello",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("quern.toml"),
            format!(
                "[content]\nfolder = \"{}\"\n\n[[content_type]]\nid = \"article\"\n\n\
                 [[content_type.property]]\nname = \"title\"\ntype = \"string\"\n",
                content.display()
            ),
        )
        .unwrap();

        let backend = load_backend(Some(&dir.path().join("quern.toml"))).unwrap();
        assert_eq!(backend.len(), 1);
        let entity = backend
            .get_entity(&GetEntityRequest {
                path: parse_path("docs/intro").unwrap(),
                properties: None,
            })
            .unwrap();
        assert_eq!(entity.title(), Some("Intro"));
    }
}
