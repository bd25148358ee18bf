//! Field deserializers that read values of the wrong shape as absent
//! instead of failing the whole document.

use indexmap::IndexMap;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;

/// Optional field; a value of the wrong type reads as `None`.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Field with a default; a value of the wrong type reads as `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Map field, see [`entries`].
pub fn map<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(entries(Value::deserialize(deserializer)?))
}

/// Map field whose presence matters: any value under the key, even `null`
/// or a scalar, reads as `Some`.
pub fn present_map<'de, D, T>(deserializer: D) -> Result<Option<IndexMap<String, T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(Some(entries(Value::deserialize(deserializer)?)))
}

/// Field whose presence matters: `null` reads as `Some` of whatever `T`
/// makes of it.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Entries of a mapping. A non-mapping has no entries; an entry that does
/// not fit `T` keeps its key with `T::default()`.
pub fn entries<T>(value: Value) -> IndexMap<String, T>
where
    T: DeserializeOwned + Default,
{
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => return IndexMap::new(),
        other => {
            log::debug!("expected a mapping, ignoring `{other}`");
            return IndexMap::new();
        }
    };

    fields
        .into_iter()
        .map(|(key, value)| {
            let entry = serde_json::from_value(value).unwrap_or_else(|e| {
                log::debug!("malformed entry `{key}` read as empty: {e}");
                T::default()
            });
            (key, entry)
        })
        .collect()
}
