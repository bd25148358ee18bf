pub mod config;
pub mod derive;
pub mod endpoint;
pub mod error;
pub mod load;
pub mod parse;
pub mod request;
pub mod store;

pub use derive::{get_all_endpoints, resolve_server_url};
pub use endpoint::{EndpointDescriptor, EndpointMap, EndpointParameter, EndpointRequest};
pub use error::{EndpointError, LoadError, SchemaError};
pub use parse::spec::SchemaDocument;
pub use request::{DefaultRequestBuilder, RequestArgs, RequestBuilder, RequestDescriptor};
pub use store::SchemaStore;
