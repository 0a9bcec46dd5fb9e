//! Metadata document shared by the PATCH payload and resource responses.
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Nullable values: `None` serializes as `null`, which the API treats as delete.
pub type Entries = BTreeMap<String, Option<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: MetadataFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Entries,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: Entries,
}

impl MetadataDocument {
    pub fn set_annotation(&mut self, key: impl Into<String>, value: impl Into<String>) { self.metadata.annotations.insert(key.into(), Some(value.into())); }
    pub fn unset_annotation(&mut self, key: impl Into<String>) { self.metadata.annotations.insert(key.into(), None); }
    pub fn annotations(&self) -> &Entries { &self.metadata.annotations }
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where D: Deserializer<'de>, T: Deserialize<'de> + Default {
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
