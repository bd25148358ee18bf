use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

/// Project configuration loaded from `.swagbridge.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Schema path or URL.
    pub input: String,
    pub naming: NamingConfig,
    pub client: ClientConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            naming: NamingConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

/// Endpoint naming overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Map from derived endpoint name (operationId or route-derived) to alias.
    pub aliases: IndexMap<String, String>,
}

/// Request building options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Overrides the base URL resolved from the schema's servers.
    pub base_url: Option<String>,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swagbridge.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<BridgeConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: BridgeConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swagbridge configuration
input: openapi.yaml   # path or http(s) URL, YAML or JSON

naming:
  aliases: {}
    # get_users_id: user        # derived name -> custom name

client: {}
  # base_url: https://api.example.com   # overrides the schema's servers
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.input, "openapi.yaml");
        assert!(config.naming.aliases.is_empty());
        assert_eq!(config.client.base_url, None);
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: https://petstore.swagger.io/v2/swagger.json
naming:
  aliases:
    getPetById: pet
    get_store_inventory: inventory
client:
  base_url: http://localhost:8080
"#;
        let config: BridgeConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "https://petstore.swagger.io/v2/swagger.json");
        assert_eq!(config.naming.aliases.len(), 2);
        assert_eq!(config.naming.aliases["getPetById"], "pet");
        assert_eq!(
            config.client.base_url,
            Some("http://localhost:8080".to_string())
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: BridgeConfig = serde_yaml_ng::from_str("input: api.yaml\n").unwrap();
        assert_eq!(config.input, "api.yaml");
        assert!(config.naming.aliases.is_empty());
    }

    #[test]
    fn test_default_content_parses() {
        let config: BridgeConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.input, "openapi.yaml");
        assert_eq!(config.client.base_url, None);
    }

    #[test]
    fn test_missing_file() {
        let loaded = load_config(Path::new("no/such/.swagbridge.yaml")).unwrap();
        assert!(loaded.is_none());
    }
}
