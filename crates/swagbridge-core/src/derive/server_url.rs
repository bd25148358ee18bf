use crate::parse::server::ServerEntry;
use crate::parse::spec::SchemaDocument;

/// Resolve the base URL of a document from its first server entry.
///
/// Each declared variable replaces the first `{name}` placeholder in the
/// template. A variable with neither a default nor an enum value leaves its
/// placeholder in place.
pub fn resolve_server_url(schema: &SchemaDocument) -> Option<String> {
    let server = match schema.servers.as_ref()?.primary()? {
        ServerEntry::Url(url) => return Some(url.clone()),
        ServerEntry::Object(server) => server,
        ServerEntry::Other(value) => {
            log::debug!("server entry `{value}` has no URL");
            return None;
        }
    };

    let mut url = server.url.clone()?;
    for (name, variable) in &server.variables {
        let placeholder = format!("{{{name}}}");
        match variable.value() {
            Some(value) => url = url.replacen(&placeholder, &value, 1),
            None => log::warn!(
                "server variable `{name}` has no default or enum value; leaving {placeholder} in {url}"
            ),
        }
    }
    Some(url)
}
