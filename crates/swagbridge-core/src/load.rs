use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use url::Url;

use crate::error::{LoadError, ParseError};
use crate::parse::{self, ref_resolve::RefResolver, spec::SchemaDocument};

/// Where a schema document lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    File(PathBuf),
    Remote(Url),
}

impl Location {
    /// Interpret a user supplied path or URL.
    pub fn parse(input: &str) -> Result<Self, LoadError> {
        if input.is_empty() {
            return Err(LoadError::InvalidLocation(input.to_string()));
        }
        if is_remote(input) {
            let url =
                Url::parse(input).map_err(|e| LoadError::InvalidLocation(format!("{input}: {e}")))?;
            return Ok(Location::Remote(url));
        }
        if input.starts_with("file://") {
            let path = Url::parse(input)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .ok_or_else(|| LoadError::InvalidLocation(input.to_string()))?;
            return Ok(Location::File(path));
        }
        Ok(Location::File(PathBuf::from(input)))
    }

    /// Resolve a reference relative to this location.
    pub fn join(&self, reference: &str) -> Result<Self, LoadError> {
        if is_remote(reference) || reference.starts_with("file://") {
            return Location::parse(reference);
        }
        match self {
            Location::File(path) => {
                let dir = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(Location::File(dir.join(reference)))
            }
            Location::Remote(url) => url
                .join(reference)
                .map(Location::Remote)
                .map_err(|e| LoadError::InvalidLocation(format!("{reference}: {e}"))),
        }
    }

    fn is_json(&self) -> bool {
        match self {
            Location::File(path) => path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json")),
            Location::Remote(url) => url.path().to_ascii_lowercase().ends_with(".json"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Remote(url) => write!(f, "{url}"),
        }
    }
}

fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read and parse the raw content of a location, without resolving `$ref`s.
pub fn read_value(location: &Location) -> Result<Value, LoadError> {
    let text = match location {
        Location::File(path) => fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?,
        Location::Remote(url) => fetch(url)?,
    };
    parse_text(&text, location).map_err(|source| LoadError::Parse {
        location: location.to_string(),
        source,
    })
}

fn fetch(url: &Url) -> Result<String, LoadError> {
    reqwest::blocking::get(url.clone())
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|source| LoadError::Http {
            url: url.to_string(),
            source,
        })
}

fn parse_text(text: &str, location: &Location) -> Result<Value, ParseError> {
    if location.is_json() {
        Ok(serde_json::from_str(text)?)
    } else {
        // YAML is a superset of JSON, so unknown extensions go through YAML.
        Ok(serde_yaml_ng::from_str(text)?)
    }
}

/// Load a document from a path or URL and dereference every `$ref` in it.
pub fn load_document(path_or_url: &str) -> Result<SchemaDocument, LoadError> {
    let location = Location::parse(path_or_url)?;
    let root = read_value(&location)?;
    let resolved = RefResolver::new().resolve_document(root, &location)?;
    let document = parse::from_value(resolved).map_err(|source| LoadError::Parse {
        location: location.to_string(),
        source,
    })?;
    log::debug!(
        "loaded {location}: {} paths, {} operations",
        document.paths().count(),
        document.operation_count()
    );
    Ok(document)
}
