//! Custom serialization for Row and RowDraft.
//!
//! ## Read Format (Deserialization)
//!
//! Rows arrive as flat JSON objects: `{"id": 1, "demand": 5, ...}`. Field
//! order follows the document, with `id` moved to the front. An object
//! without a usable `id` (integer or string) is rejected.
//!
//! ## Write Format (Serialization)
//!
//! A [`Row`] serializes every field including `id`. A [`RowDraft`] (create
//! and update bodies) serializes its fields and never carries `id`.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::ID_FIELD;
use super::Row;
use super::RowDraft;
use super::RowId;
use super::Value;
use crate::error::FieldError;

// =============================================================================
// Serialization (for writes)
// =============================================================================

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for RowDraft {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Deserialization (from reads)
// =============================================================================

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RowVisitor)
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a resource row")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Row, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut id: Option<RowId> = None;
        let mut fields: Vec<(String, Value)> = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            let value: Value = map.next_value()?;

            if key == ID_FIELD {
                let parsed = RowId::from_value(&value).ok_or_else(|| {
                    de::Error::custom(FieldError::wrong_type(
                        ID_FIELD,
                        "identifier",
                        value.type_name(),
                    ))
                })?;
                id = Some(parsed);
                continue;
            }

            // Duplicate keys: last one wins, first position is kept
            match fields.iter_mut().find(|(name, _)| *name == key) {
                Some((_, slot)) => *slot = value,
                None => fields.push((key, value)),
            }
        }

        let id = id.ok_or_else(|| de::Error::custom(FieldError::missing(ID_FIELD)))?;
        let mut row = Row::new(id);
        row.fields.extend(fields);
        Ok(row)
    }
}
