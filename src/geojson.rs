//! GeoJSON model.
//!
//! Input model for the geometry projector and output model for converting
//! decoded tile features back into geographic space.
//!
//! See <https://datatracker.ietf.org/doc/html/rfc7946>.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::Error;
use crate::tile::{GeomType, Value};

/// GeoJSON root object.
///
/// Feature and collection structs carry their own `"type"` tag, so the root
/// can dispatch untagged.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum GeoJson {
    FeatureCollection(FeatureCollection),
    Feature(Feature),
    Geometry(Geometry),
}

impl GeoJson {
    /// Parse a GeoJSON document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// GeoJSON feature collection.
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// GeoJSON feature.
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
#[serde(tag = "type")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Json>>,
}

/// GeoJSON feature ID.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum FeatureId {
    String(String),
    Integer(i64),
    Float(f64),
}

impl FeatureId {
    pub fn as_string(&self) -> String {
        match self {
            Self::String(id) => id.clone(),
            Self::Integer(id) => id.to_string(),
            Self::Float(id) => id.to_string(),
        }
    }
}

/// GeoJSON geometry.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type")]
pub enum Geometry {
    GeometryCollection(GeometryCollection),
    Point(Coordinate1),
    MultiPoint(Coordinate2),
    LineString(Coordinate2),
    MultiLineString(Coordinate3),
    Polygon(Coordinate3),
    MultiPolygon(Coordinate4),
}

impl Geometry {
    /// Tile geometry type of this geometry.
    ///
    /// Geometry collections cannot be represented by a single tile feature.
    pub fn geom_type(&self) -> Result<GeomType, Error> {
        match self {
            Self::Point(_) | Self::MultiPoint(_) => Ok(GeomType::Point),
            Self::LineString(_) | Self::MultiLineString(_) => Ok(GeomType::LineString),
            Self::Polygon(_) | Self::MultiPolygon(_) => Ok(GeomType::Polygon),
            Self::GeometryCollection(_) => Err(Error::UnsupportedGeoJson("GeometryCollection")),
        }
    }

    /// Flatten this geometry into rings of `(longitude, latitude)` pairs.
    ///
    /// Each point, line, and polygon ring becomes one ring; multi-polygon
    /// part boundaries are not preserved.
    pub fn rings(&self) -> Result<Vec<Vec<(f64, f64)>>, Error> {
        let rings = match self {
            Self::Point(point) => vec![vec![position(&point.coordinates)?]],
            Self::MultiPoint(points) => points
                .coordinates
                .iter()
                .map(|point| Ok(vec![position(point)?]))
                .collect::<Result<_, Error>>()?,
            Self::LineString(line) => vec![ring(&line.coordinates)?],
            Self::MultiLineString(lines) | Self::Polygon(lines) => {
                lines.coordinates.iter().map(|line| ring(line)).collect::<Result<_, Error>>()?
            },
            Self::MultiPolygon(polygons) => polygons
                .coordinates
                .iter()
                .flat_map(|polygon| polygon.iter())
                .map(|line| ring(line))
                .collect::<Result<_, Error>>()?,
            Self::GeometryCollection(_) => {
                return Err(Error::UnsupportedGeoJson("GeometryCollection"));
            },
        };

        Ok(rings)
    }
}

/// GeoJSON geometry collection.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GeometryCollection {
    pub geometries: Vec<Geometry>,
}

/// GeoJSON coordinate point.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Coordinate1 {
    pub coordinates: Vec<f64>,
}

/// GeoJSON list of coordinate points.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Coordinate2 {
    pub coordinates: Vec<Vec<f64>>,
}

/// GeoJSON list of lists of coordinate points.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Coordinate3 {
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

/// GeoJSON list of lists of lists of coordinate points.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Coordinate4 {
    pub coordinates: Vec<Vec<Vec<Vec<f64>>>>,
}

fn position(position: &[f64]) -> Result<(f64, f64), Error> {
    match position {
        [longitude, latitude, ..] => Ok((*longitude, *latitude)),
        _ => Err(Error::UnsupportedGeoJson("position with fewer than two numbers")),
    }
}

fn ring(positions: &[Vec<f64>]) -> Result<Vec<(f64, f64)>, Error> {
    positions.iter().map(|point| position(point)).collect()
}

/// Convert a GeoJSON property into an attribute value.
///
/// Nulls, arrays, and nested objects have no attribute representation and
/// are dropped.
pub fn value_from_json(json: &Json) -> Option<Value> {
    match json {
        Json::Bool(value) => Some(Value::Bool(*value)),
        Json::String(value) => Some(Value::String(value.clone())),
        Json::Number(value) => {
            if let Some(int) = value.as_i64() {
                Some(Value::Int(int))
            } else if let Some(uint) = value.as_u64() {
                Some(Value::Uint(uint))
            } else {
                Some(Value::Double(value.as_f64()?))
            }
        },
        _ => {
            debug!("dropping property without attribute representation: {json:?}");
            None
        },
    }
}

/// Convert an attribute value back into a GeoJSON property.
pub fn json_from_value(value: &Value) -> Json {
    match value {
        Value::Bool(value) => Json::Bool(*value),
        Value::Int(value) => Json::from(*value),
        Value::Uint(value) => Json::from(*value),
        Value::Float(value) => Json::from(*value as f64),
        Value::Double(value) => Json::from(*value),
        Value::String(value) => Json::String(value.clone()),
    }
}
