use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema document must be a mapping, got {0}")]
    NotAMapping(&'static str),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),

    #[error("failed to load referenced document {location}: {source}")]
    External {
        location: String,
        #[source]
        source: Box<LoadError>,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid schema location: {0}")]
    InvalidLocation(String),

    #[error("parse error in {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: ParseError,
    },

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

/// Errors surfaced by the schema accessor.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema was not loaded")]
    NotLoaded,

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Errors raised when an endpoint is invoked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error(
        "could not get the base url for endpoints: the schema declares no servers and no base url was provided"
    )]
    MissingBaseUrl,
}
