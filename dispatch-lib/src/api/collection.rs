//! Wire payloads

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::FieldMeta;
use crate::model::FieldType;
use crate::model::Row;
use crate::model::RowId;
use crate::table::FilterValue;

/// Response of `GET /<resource>`.
///
/// The table engine only consumes `data`; `model` describes the fields for
/// rendering and for interpreting filter input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub data: Vec<Row>,
    #[serde(default)]
    pub model: HashMap<String, FieldMeta>,
}

impl Collection {
    /// Returns the metadata of one field.
    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.model.get(name)
    }

    /// Returns the type of one field, [`FieldType::Other`] when unknown.
    pub fn field_type(&self, name: &str) -> FieldType {
        self.field(name)
            .map(FieldMeta::field_type)
            .unwrap_or(FieldType::Other)
    }

    /// Interprets filter-form input for one field using its model type.
    pub fn parse_filter_input(&self, field: &str, input: &str) -> Option<FilterValue> {
        FilterValue::parse(input, self.field_type(field))
    }
}

/// Body of `DELETE /<resource>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub ids: Vec<RowId>,
}

impl DeleteRequest {
    pub fn new(ids: impl IntoIterator<Item = RowId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

/// System settings returned by `GET /settings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub id: i64,
    /// Depot position as a JSON-encoded `[lat, lng]` pair or `{lat, lng}` object.
    #[serde(default)]
    pub depot_location: String,
    /// Key for the external routing service.
    #[serde(default)]
    pub routing_key: String,
    /// Iteration count for the route planning algorithm.
    #[serde(default)]
    pub routing_algo_iterations: Option<i64>,
}

impl Settings {
    /// Decodes the depot position into `(latitude, longitude)`.
    pub fn depot_coordinates(&self) -> Option<(f64, f64)> {
        let value: serde_json::Value = serde_json::from_str(&self.depot_location).ok()?;
        match value {
            serde_json::Value::Array(pair) if pair.len() == 2 => {
                Some((pair[0].as_f64()?, pair[1].as_f64()?))
            }
            serde_json::Value::Object(map) => {
                Some((map.get("lat")?.as_f64()?, map.get("lng")?.as_f64()?))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_collection() {
        let json = r#"{
            "data": [
                {"id": 1, "latitude": 55.75, "longitude": 37.61, "demand": 5},
                {"id": 2, "latitude": 55.70, "longitude": 37.50, "demand": 3}
            ],
            "model": {
                "demand": {"name": "demand", "kind": "scalar", "type": "Int"}
            }
        }"#;
        let collection: Collection = serde_json::from_str(json).unwrap();

        assert_eq!(collection.data.len(), 2);
        assert_eq!(collection.data[1].get_int("demand").unwrap(), Some(3));
        assert_eq!(collection.field_type("demand"), FieldType::Int);
        assert_eq!(collection.field_type("latitude"), FieldType::Other);
        assert_eq!(
            collection.parse_filter_input("demand", "3,5"),
            Some(FilterValue::any_of([3, 5]))
        );
    }

    #[test]
    fn test_model_is_optional() {
        let collection: Collection = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(collection.data.is_empty());
        assert!(collection.model.is_empty());
    }

    #[test]
    fn test_delete_request_body() {
        let body = DeleteRequest::new([RowId::Int(1), RowId::Int(3)]);
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"ids":[1,3]}"#);
    }

    #[test]
    fn test_settings() {
        let json = r#"{
            "id": 1,
            "depotLocation": "[55.75, 37.61]",
            "routingKey": "secret",
            "routingAlgoIterations": 200
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.routing_algo_iterations, Some(200));
        assert_eq!(settings.depot_coordinates(), Some((55.75, 37.61)));

        let object = Settings {
            depot_location: r#"{"lat": 1.5, "lng": 2.5}"#.to_string(),
            ..Settings::default()
        };
        assert_eq!(object.depot_coordinates(), Some((1.5, 2.5)));
        assert_eq!(Settings::default().depot_coordinates(), None);
    }
}
