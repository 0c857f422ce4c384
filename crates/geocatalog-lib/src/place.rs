//! Place documents stored in the document store.
//!
//! Places are loosely structured: the dashboard writes `nome_local`,
//! `cidade`, `coordenadas` and `descricao`, but any other keys a document
//! carries are kept in [`Place::extra`] and written back untouched. The
//! coordinate is parsed leniently so that a malformed `coordenadas` value
//! never makes the whole document unreadable; it simply yields `None`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{require_name, Result};
use crate::geo::Coordinates;

/// Identifier assigned by the document store.
pub type PlaceId = String;

/// A place record (the candidate type for proximity queries).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Place {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<PlaceId>,

    #[serde(rename = "nome_local", alias = "name", default)]
    pub name: String,

    /// Name of the city this place belongs to (matches `cities.name`).
    #[serde(rename = "cidade", alias = "city", default)]
    pub city: String,

    #[serde(
        rename = "coordenadas",
        alias = "coordinates",
        default,
        deserialize_with = "lenient_coordinates",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<Coordinates>,

    #[serde(
        rename = "descricao",
        alias = "description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Any additional document fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Place {
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            coordinates,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The coordinate to rank this place by, if it has a usable one.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

/// Extract `{"latitude": <number>, "longitude": <number>}` from a JSON value.
///
/// Returns `None` when the value is not an object, a key is missing, or a
/// component is not a JSON number.
pub fn coordinates_from_value(value: &Value) -> Option<Coordinates> {
    let object = value.as_object()?;
    let latitude = object.get("latitude")?.as_f64()?;
    let longitude = object.get("longitude")?.as_f64()?;
    Some(Coordinates::new(latitude, longitude))
}

fn lenient_coordinates<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Coordinates>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coordinates_from_value(&value))
}

/// Input for inserting a new place.
///
/// Unlike [`Place`], a new place must carry a name, a city and an in-range
/// coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlace {
    #[serde(rename = "nome_local", alias = "name")]
    pub name: String,

    #[serde(rename = "cidade", alias = "city")]
    pub city: String,

    #[serde(rename = "coordenadas", alias = "coordinates")]
    pub coordinates: Coordinates,

    #[serde(
        rename = "descricao",
        alias = "description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl NewPlace {
    /// Validate the input and convert it into a storable [`Place`].
    pub fn into_place(self) -> Result<Place> {
        let name = require_name(&self.name, "nome_local")?.to_string();
        let city = require_name(&self.city, "cidade")?.to_string();
        let coordinates = self.coordinates.validate()?;

        Ok(Place {
            id: None,
            name,
            city,
            coordinates: Some(coordinates),
            description: self.description,
            extra: Map::new(),
        })
    }
}
