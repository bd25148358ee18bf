pub mod endpoints;
pub mod name_normalizer;
pub mod server_url;

pub use endpoints::{apply_aliases, get_all_endpoints};
pub use server_url::resolve_server_url;
