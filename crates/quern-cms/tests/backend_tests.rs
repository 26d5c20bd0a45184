//! Integration tests for the CMS build and query surface.
//!
//! Builds small backends from inline markdown and exercises the full
//! pipeline: compile → validate → register → query.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use chrono::{NaiveDate, TimeZone, Utc};
use quern_cms::{
    sitemap_items, CmsBuilder, ContentSource, ContentType, CountPropertyValuesRequest, Error,
    GetEntitiesRequest, GetEntityRequest, GetSectionsRequest, PropertySchema, PropertyType,
};
use quern_core::{keys, ContentPath, PropertyValue};
use quern_query::{FilterOperator, FilterRow, SortOrder, SortRow};

fn date(day: u32) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(
        &NaiveDate::from_ymd_opt(2020, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    )
}

fn article_source(id: &str, day: u32, project: &str, tags: &str) -> ContentSource {
    ContentSource {
        markdown: format!(
            "---\ntags: [{tags}]\nproject: {project}\ntype: article\n---\nhi"
        ),
        directory: ContentPath::from(["docs", "articles"]),
        id: id.to_string(),
        created_at: date(day),
        updated_at: date(day),
    }
}

fn article_type() -> ContentType {
    ContentType::new("article")
        .with_property(PropertySchema::new("tags", PropertyType::String).array())
        .with_property(PropertySchema::new("project", PropertyType::String))
        .with_property(PropertySchema::new("title", PropertyType::String))
}

fn backend() -> quern_cms::CmsBackend {
    CmsBuilder::new()
        .add_content_type(article_type())
        .unwrap()
        .add_content(article_source("article1", 1, "project1", "tag1, tag2"))
        .add_content(article_source("article2", 2, "project2", "tag2, tag3"))
        .build()
        .unwrap()
}

#[test]
fn get_entity_fails_with_not_found_for_absent_path() {
    let result = backend().get_entity(&GetEntityRequest {
        path: ContentPath::from(["1", "1"]),
        properties: None,
    });
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn get_entity_projects_requested_properties_only() {
    let entity = backend()
        .get_entity(&GetEntityRequest {
            path: ContentPath::from(["docs", "articles", "article1"]),
            properties: Some(vec!["project".to_string()]),
        })
        .unwrap();
    assert_eq!(entity.len(), 1);
    assert_eq!(entity.get("project"), Some(&PropertyValue::from("project1")));
}

#[test]
fn get_entity_full_map_carries_reserved_keys() {
    let entity = backend()
        .get_entity(&GetEntityRequest {
            path: ContentPath::from(["docs", "articles", "article1"]),
            properties: None,
        })
        .unwrap();
    assert_eq!(entity.content_type(), Some("article"));
    assert_eq!(entity.file_name(), Some("article1"));
    assert_eq!(
        entity.path_segments(),
        vec!["docs", "articles", "article1"]
    );
    assert_eq!(entity.get(keys::CONTENT), Some(&PropertyValue::from("<p>hi</p>")));
}

#[test]
fn get_entities_filters_by_equals() {
    let page = backend()
        .get_entities(&GetEntitiesRequest {
            from_path: None,
            properties: None,
            filters: Some(vec![FilterRow {
                property: keys::FILE_NAME.to_string(),
                value: "article2".into(),
                operator: FilterOperator::Equals,
            }]),
            sorting: None,
            page: 0,
            per_page: 10,
        })
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.total, 1);
}

#[test]
fn get_entities_complex_filter_ands_predicates() {
    let page = backend()
        .get_entities(&GetEntitiesRequest {
            from_path: None,
            properties: None,
            filters: Some(vec![
                FilterRow {
                    property: keys::FILE_NAME.to_string(),
                    value: "article2".into(),
                    operator: FilterOperator::Equals,
                },
                FilterRow {
                    property: "project".to_string(),
                    value: "project2".into(),
                    operator: FilterOperator::Equals,
                },
            ]),
            sorting: None,
            page: 0,
            per_page: 10,
        })
        .unwrap();
    assert_eq!(page.data.len(), 1);
}

#[test]
fn get_entities_filters_by_content_type() {
    let page = backend()
        .get_entities(&GetEntitiesRequest {
            from_path: None,
            properties: None,
            filters: Some(vec![FilterRow {
                property: keys::CONTENT_TYPE.to_string(),
                value: "article".into(),
                operator: FilterOperator::Equals,
            }]),
            sorting: None,
            page: 0,
            per_page: 10,
        })
        .unwrap();
    assert_eq!(page.data.len(), 2);
}

#[test]
fn get_entities_sorted_descending_page_one_yields_earlier_entity() {
    // page 1 with one item per page: the second entity in sort order
    for (order, expected_day) in [
        (SortOrder::Ascending, 2u32),
        (SortOrder::Descending, 1u32),
    ] {
        let page = backend()
            .get_entities(&GetEntitiesRequest {
                from_path: None,
                properties: None,
                filters: None,
                sorting: Some(vec![SortRow {
                    property: keys::UPDATED_AT.to_string(),
                    order,
                }]),
                page: 1,
                per_page: 1,
            })
            .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(
            page.data[0].updated_at().unwrap(),
            date(expected_day),
        );
    }
}

#[test]
fn get_entities_sort_then_first_page_returns_maximum() {
    let page = backend()
        .get_entities(&GetEntitiesRequest {
            from_path: None,
            properties: None,
            filters: None,
            sorting: Some(vec![SortRow {
                property: keys::UPDATED_AT.to_string(),
                order: SortOrder::Descending,
            }]),
            page: 0,
            per_page: 1,
        })
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.data[0].file_name(), Some("article2"));
}

#[test]
fn get_entities_scopes_to_from_path() {
    let page = backend()
        .get_entities(&GetEntitiesRequest {
            from_path: Some(ContentPath::from(["docs", "articles", "article1"])),
            properties: None,
            filters: None,
            sorting: None,
            page: 0,
            per_page: 10,
        })
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].file_name(), Some("article1"));
}

#[test]
fn get_entities_projects_computed_function() {
    let page = backend()
        .get_entities(&GetEntitiesRequest {
            from_path: None,
            properties: Some(vec!["format(updatedAt, \"%Y-%m-%d\") as day".to_string()]),
            filters: None,
            sorting: Some(vec![SortRow {
                property: keys::UPDATED_AT.to_string(),
                order: SortOrder::Ascending,
            }]),
            page: 0,
            per_page: 10,
        })
        .unwrap();
    assert_eq!(page.data[0].get("day"), Some(&PropertyValue::from("2020-01-01")));
    assert_eq!(page.data[1].get("day"), Some(&PropertyValue::from("2020-01-02")));
}

#[test]
fn count_property_values_flattens_arrays() {
    let counts = backend()
        .count_property_values(&CountPropertyValuesRequest {
            property: "tags".to_string(),
            from_path: None,
            filters: None,
        })
        .unwrap();
    assert_eq!(counts.len(), 3);
    let by_key: std::collections::HashMap<_, _> =
        counts.iter().map(|c| (c.key.as_str(), c.count)).collect();
    assert_eq!(by_key["tag1"], 1);
    assert_eq!(by_key["tag2"], 2);
    assert_eq!(by_key["tag3"], 1);
}

#[test]
fn index_document_attaches_to_directory_and_named_file_does_not() {
    let backend = CmsBuilder::new()
        .add_content(ContentSource {
            markdown: "---\ntitle: Index page\n---\nhome".to_string(),
            directory: ContentPath::from(["articles"]),
            id: "index".to_string(),
            created_at: date(1),
            updated_at: date(1),
        })
        .add_content(ContentSource {
            markdown: "---\ntitle: Intro\n---\nintro".to_string(),
            directory: ContentPath::from(["articles"]),
            id: "intro".to_string(),
            created_at: date(1),
            updated_at: date(1),
        })
        .build()
        .unwrap();

    let section = backend
        .get_entity(&GetEntityRequest {
            path: ContentPath::from(["articles"]),
            properties: None,
        })
        .unwrap();
    assert_eq!(section.title(), Some("Index page"));
    assert_eq!(section.file_name(), None);
    assert_eq!(section.path_segments(), vec!["articles"]);

    let intro = backend
        .get_entity(&GetEntityRequest {
            path: ContentPath::from(["articles", "intro"]),
            properties: None,
        })
        .unwrap();
    assert_eq!(intro.file_name(), Some("intro"));

    // the named file is not reachable at the directory level
    assert!(backend
        .get_entity(&GetEntityRequest {
            path: ContentPath::from(["intro"]),
            properties: None,
        })
        .is_err());
}

#[test]
fn get_sections_lists_tree_with_titles() {
    let backend = CmsBuilder::new()
        .add_content(ContentSource {
            markdown: "---\ntitle: Articles\n---\nhome".to_string(),
            directory: ContentPath::from(["articles"]),
            id: "index".to_string(),
            created_at: date(1),
            updated_at: date(1),
        })
        .add_content(ContentSource {
            markdown: "---\ntitle: Intro\n---\nintro".to_string(),
            directory: ContentPath::from(["articles"]),
            id: "intro".to_string(),
            created_at: date(1),
            updated_at: date(1),
        })
        .build()
        .unwrap();

    let sections = backend.get_sections(&GetSectionsRequest {
        from_path: None,
        depth: 1,
    });
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].file_name, "articles");
    assert!(sections[0].has_content);
    assert_eq!(sections[0].title.as_deref(), Some("Articles"));
    assert_eq!(sections[0].children.len(), 1);
    assert_eq!(sections[0].children[0].file_name, "intro");
}

#[test]
fn sitemap_items_carry_location_and_last_mod() {
    let backend = CmsBuilder::new()
        .add_content(ContentSource {
            markdown: "hi".to_string(),
            directory: ContentPath::from(["docs", "articles"]),
            id: "article1".to_string(),
            created_at: date(1),
            updated_at: date(1),
        })
        .build()
        .unwrap();

    let items = sitemap_items(&backend);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].loc, "docs/articles/article1");
    assert_eq!(items[0].last_mod, Some(date(1)));
}

#[test]
fn build_from_folder_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("articles")).unwrap();
    std::fs::write(
        dir.path().join("articles").join("index.md"),
        "---\ntitle: Index page\ntype: article\n---\nhome",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("articles").join("introduction.md"),
        "---\ntitle: Intro\ntags: [a, b]\ntype: article\n---\nintro",
    )
    .unwrap();

    let backend = CmsBuilder::new()
        .add_content_type(article_type())
        .unwrap()
        .add_content_folder(dir.path())
        .unwrap()
        .build()
        .unwrap();

    let article = backend
        .get_entity(&GetEntityRequest {
            path: ContentPath::from(["articles", "introduction"]),
            properties: None,
        })
        .unwrap();
    assert_eq!(article.file_name(), Some("introduction"));
    assert_eq!(
        article.get("tags"),
        Some(&PropertyValue::Array(vec!["a".into(), "b".into()]))
    );

    let section = backend
        .get_entity(&GetEntityRequest {
            path: ContentPath::from(["articles"]),
            properties: None,
        })
        .unwrap();
    assert_eq!(section.title(), Some("Index page"));
    assert_eq!(section.file_name(), None);
}

#[test]
fn build_reports_all_offending_documents_at_once() {
    let result = CmsBuilder::new()
        .add_content_type(
            ContentType::new("article")
                .with_property(PropertySchema::new("title", PropertyType::String).required()),
        )
        .unwrap()
        .add_content(ContentSource {
            markdown: "---\ntype: article\n---\nmissing title".to_string(),
            directory: ContentPath::from(["docs"]),
            id: "a".to_string(),
            created_at: date(1),
            updated_at: date(1),
        })
        .add_content(ContentSource {
            markdown: "```\nunterminated".to_string(),
            directory: ContentPath::from(["docs"]),
            id: "b".to_string(),
            created_at: date(1),
            updated_at: date(1),
        })
        .build();

    let Err(Error::Build(build_error)) = result else {
        panic!("expected build error");
    };
    assert_eq!(build_error.errors.len(), 2);
    let text = build_error.to_string();
    assert!(text.contains("Required property 'title' is not defined"));
    assert!(text.contains("unterminated code fence"));
}
