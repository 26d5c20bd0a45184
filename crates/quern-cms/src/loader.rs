//! Filesystem content loading.
//!
//! Scans a folder for `*.md` files (recursively, via `glob`) and turns each
//! into a [`ContentSource`]: text, directory segments relative to the root,
//! file name without extension, and the file timestamps. Reading is the
//! only I/O in the system; everything downstream works on the in-memory
//! sources.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use quern_core::ContentPath;

use crate::error::{Error, Result};
use crate::source::ContentSource;

/// Load every markdown file under `root`, recursively.
///
/// Files come back in glob order (alphabetical), so builds are
/// deterministic. Filesystem failures abort the load; markdown problems are
/// not detected here, since parsing happens later so the build can attempt
/// every file.
pub fn load_folder(root: &Path) -> Result<Vec<ContentSource>> {
    let pattern = root.join("**").join("*.md");
    let pattern = pattern.to_string_lossy();
    log::debug!("scanning content folder '{pattern}'");

    let mut sources = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|error| Error::Io(error.into_error()))?;
        sources.push(read_source(root, &path)?);
    }
    log::info!("loaded {} markdown files from '{}'", sources.len(), root.display());
    Ok(sources)
}

fn read_source(root: &Path, path: &Path) -> Result<ContentSource> {
    let markdown = fs::read_to_string(path)?;
    let metadata = fs::metadata(path)?;
    let updated_at = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());
    let created_at = metadata
        .created()
        .map(DateTime::<Utc>::from)
        .unwrap_or(updated_at);

    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let directory = path
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(|relative| {
            ContentPath::from_segments(
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned()),
            )
        })
        .unwrap_or_default();

    Ok(ContentSource {
        markdown,
        directory,
        id,
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_loads_markdown_recursively() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.md", "root");
        write(dir.path(), "articles/intro.md", "intro");
        write(dir.path(), "articles/notes.txt", "ignored");

        let sources = load_folder(dir.path()).unwrap();
        assert_eq!(sources.len(), 2);

        let intro = sources.iter().find(|s| s.id == "intro").unwrap();
        assert_eq!(intro.directory, ContentPath::from(["articles"]));
        assert_eq!(intro.markdown, "intro");

        let index = sources.iter().find(|s| s.id == "index").unwrap();
        assert!(index.directory.is_empty());
    }

    #[test]
    fn test_timestamps_come_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "x");
        let sources = load_folder(dir.path()).unwrap();
        // both timestamps populated and ordered sanely
        assert!(sources[0].created_at <= Utc::now());
        assert!(sources[0].updated_at <= Utc::now());
    }

    #[test]
    fn test_empty_folder_yields_no_sources() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_folder(dir.path()).unwrap().is_empty());
    }
}
