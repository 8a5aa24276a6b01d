//! Loads paragraph dumps produced by an upstream HTML extractor.
//!
//! A dump is either a `.json` file holding an array of strings (or an object
//! with a `paragraphs` array), or a plain text file with one paragraph per line.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::parser::Page;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid paragraph JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no page files found in {}", path.display())]
    Empty { path: PathBuf },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDump {
    List(Vec<String>),
    Object { paragraphs: Vec<String> },
}

pub fn load_page(path: &Path) -> Result<Page, SourceError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let paragraphs = if is_json {
        let dump: JsonDump = serde_json::from_str(&raw).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        match dump {
            JsonDump::List(p) | JsonDump::Object { paragraphs: p } => p,
        }
    } else {
        raw.lines().map(str::to_string).collect()
    };

    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!("Loaded {} paragraphs from {}", paragraphs.len(), path.display());
    Ok(Page { id, paragraphs })
}

/// Expand directories (one level, sorted by file name) into their files.
pub fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>, SourceError> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let io_err = |source: std::io::Error| SourceError::Io {
            path: path.clone(),
            source,
        };
        let mut dir_files = std::fs::read_dir(path)
            .map_err(io_err)?
            .map(|e| e.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_err)?;
        dir_files.retain(|p| p.is_file());
        dir_files.sort();

        if dir_files.is_empty() {
            return Err(SourceError::Empty { path: path.clone() });
        }
        files.extend(dir_files);
    }
    Ok(files)
}

pub fn load_pages(paths: &[PathBuf]) -> Result<Vec<Page>, SourceError> {
    let files = expand_paths(paths)?;
    let pages = files
        .iter()
        .map(|f| load_page(f))
        .collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} pages", pages.len());
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn text_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("6797.txt");
        fs::write(&path, "Intro\n1 First\n\nmore\n2 Second\n").unwrap();

        let page = load_page(&path).unwrap();
        assert_eq!(page.id, "6797");
        assert_eq!(page.paragraphs, vec!["Intro", "1 First", "", "more", "2 Second"]);
    }

    #[test]
    fn json_list_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        fs::write(&path, r#"["1 One", "", "2 Two"]"#).unwrap();

        let page = load_page(&path).unwrap();
        assert_eq!(page.paragraphs, vec!["1 One", "", "2 Two"]);
    }

    #[test]
    fn json_object_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.JSON");
        fs::write(&path, r#"{"paragraphs": ["1 Uno"]}"#).unwrap();

        let page = load_page(&path).unwrap();
        assert_eq!(page.id, "b");
        assert_eq!(page.paragraphs, vec!["1 Uno"]);
    }

    #[test]
    fn bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_page(&path), Err(SourceError::Json { .. })));
    }

    #[test]
    fn missing_file() {
        let err = load_page(Path::new("/nonexistent/page.txt")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/page.txt"));
    }

    #[test]
    fn directory_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "1 B").unwrap();
        fs::write(dir.path().join("a.txt"), "1 A").unwrap();

        let pages = load_pages(&[dir.path().to_path_buf()]).unwrap();
        let ids: Vec<_> = pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_pages(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, SourceError::Empty { .. }));
    }
}
