//! Vector tile model and codec.
//!
//! [`decode`] parses a decompressed tile byte buffer into layers of features
//! with absolute tile-local coordinates and resolved attributes; [`encode`]
//! is its inverse, rebuilding the per-layer dictionaries and command streams.

use prost::Message;

use crate::Error;
use crate::tile::commands::{decode_geometry, encode_geometry};

pub mod commands;
pub mod merge;
pub mod protobuf;

/// Default width and height of a tile's coordinate system.
pub const DEFAULT_EXTENT: u32 = 4096;

/// Vector tile specification version written by the encoder.
pub const VERSION: u32 = 2;

/// Tile-local integer coordinate.
///
/// Valid geometry lies in `0..extent`, extended by the clip buffer.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Coordinate {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Geometry type of a feature.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum GeomType {
    #[default]
    Unknown,
    Point,
    LineString,
    Polygon,
}

/// Attribute value with exactly one active variant.
///
/// Deduplication at encode time compares variant and payload; an int and an
/// equal-magnitude float are distinct dictionary entries.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f32),
    Double(f64),
    String(String),
}

impl Value {
    /// Collapse the wire message's optional fields into the active variant.
    fn from_wire(value: &protobuf::Value) -> Result<Self, Error> {
        if let Some(bool_value) = value.bool_value {
            Ok(Self::Bool(bool_value))
        } else if let Some(double_value) = value.double_value {
            Ok(Self::Double(double_value))
        } else if let Some(float_value) = value.float_value {
            Ok(Self::Float(float_value))
        } else if let Some(int_value) = value.int_value {
            Ok(Self::Int(int_value))
        } else if let Some(string_value) = &value.string_value {
            Ok(Self::String(string_value.clone()))
        } else if let Some(sint_value) = value.sint_value {
            // Sint collapses into the plain int variant; re-encoding writes
            // the non-zigzag field.
            Ok(Self::Int(sint_value))
        } else if let Some(uint_value) = value.uint_value {
            Ok(Self::Uint(uint_value))
        } else {
            Err(Error::EmptyValue)
        }
    }

    fn to_wire(&self) -> protobuf::Value {
        let mut value = protobuf::Value::default();
        match self {
            Self::Bool(bool_value) => value.bool_value = Some(*bool_value),
            Self::Int(int_value) => value.int_value = Some(*int_value),
            Self::Uint(uint_value) => value.uint_value = Some(*uint_value),
            Self::Float(float_value) => value.float_value = Some(*float_value),
            Self::Double(double_value) => value.double_value = Some(*double_value),
            Self::String(string_value) => value.string_value = Some(string_value.clone()),
        }
        value
    }
}

/// A single decoded feature.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Feature {
    /// Feature identifier; numeric in practice, but stored as text.
    pub id: String,
    pub geom_type: GeomType,
    /// Rings of absolute tile-local coordinates.
    ///
    /// Decoded polygon rings are always closed; for points every ring is a
    /// single point.
    pub geometry: Vec<Vec<Coordinate>>,
    /// Attribute pairs in insertion order; keys may repeat across features.
    pub attributes: Vec<(String, Value)>,
    /// Extent of the owning layer, copied for downstream geometry math.
    pub extent: u32,
}

impl Feature {
    /// Check whether this feature carries no geometry at all.
    ///
    /// Empty features are structurally legal but are never emitted as wire
    /// output.
    pub fn is_empty(&self) -> bool {
        self.geometry.iter().all(|ring| ring.is_empty())
    }
}

/// A named group of features sharing attribute dictionaries.
#[derive(Clone, PartialEq, Debug)]
pub struct Layer {
    pub name: String,
    pub version: u32,
    pub extent: u32,
    pub features: Vec<Feature>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: VERSION,
            extent: DEFAULT_EXTENT,
            features: Default::default(),
        }
    }
}

/// Decode a tile byte buffer into its layers.
///
/// The buffer must already be decompressed. Zero layers or features is a
/// valid outcome; malformed bytes, out-of-range dictionary indices, and
/// geometry types outside the schema are errors.
pub fn decode(bytes: &[u8]) -> Result<Vec<Layer>, Error> {
    let tile = protobuf::Tile::decode(bytes)?;

    tile.layers
        .iter()
        .map(|layer| {
            let features = layer
                .features
                .iter()
                .map(|feature| decode_feature(layer, feature))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Layer {
                name: layer.name.clone(),
                version: layer.version,
                extent: layer.extent,
                features,
            })
        })
        .collect()
}

fn decode_feature(layer: &protobuf::Layer, feature: &protobuf::Feature) -> Result<Feature, Error> {
    let raw_type = feature.r#type.unwrap_or_default();
    let geom_type = match protobuf::GeomType::try_from(raw_type) {
        Ok(protobuf::GeomType::Point) => GeomType::Point,
        Ok(protobuf::GeomType::LineString) => GeomType::LineString,
        Ok(protobuf::GeomType::Polygon) => GeomType::Polygon,
        _ => return Err(Error::UnsupportedGeometry(raw_type)),
    };

    // Tags alternate between key and value indices into the layer tables.
    let mut attributes = Vec::with_capacity(feature.tags.len() / 2);
    for tag in feature.tags.chunks_exact(2) {
        let key = layer.keys.get(tag[0] as usize).ok_or(Error::TagIndex(tag[0]))?;
        let value = layer.values.get(tag[1] as usize).ok_or(Error::TagIndex(tag[1]))?;

        attributes.push((key.clone(), Value::from_wire(value)?));
    }

    Ok(Feature {
        id: feature.id.unwrap_or_default().to_string(),
        geom_type,
        geometry: decode_geometry(&feature.geometry, geom_type)?,
        attributes,
        extent: layer.extent,
    })
}

/// Encode layers into a tile byte buffer.
///
/// Dictionaries are built in feature-then-attribute iteration order, so tag
/// indices depend on encounter order. Ids that parse as unsigned integers
/// are kept; other ids are replaced by a per-call reference counter starting
/// at 1, which can collide with a later numeric id.
pub fn encode(layers: &[Layer]) -> Result<Vec<u8>, Error> {
    let mut tile = protobuf::Tile::default();
    let mut reference = 0;

    for source in layers {
        let mut dictionaries = Dictionaries::default();
        let mut target = protobuf::Layer {
            version: source.version,
            name: source.name.clone(),
            extent: source.extent,
            ..Default::default()
        };

        for feature in &source.features {
            // Legal in memory, but never emitted on the wire.
            if feature.is_empty() {
                continue;
            }

            let geom_type = match feature.geom_type {
                GeomType::Point => protobuf::GeomType::Point,
                GeomType::LineString => protobuf::GeomType::LineString,
                GeomType::Polygon => protobuf::GeomType::Polygon,
                GeomType::Unknown => return Err(Error::UnsupportedGeometry(0)),
            };

            let id = feature.id.parse().unwrap_or_else(|_| {
                reference += 1;
                reference
            });

            let mut tags = Vec::with_capacity(feature.attributes.len() * 2);
            for (key, value) in &feature.attributes {
                tags.push(dictionaries.key_index(key));
                tags.push(dictionaries.value_index(value));
            }

            target.features.push(protobuf::Feature {
                id: Some(id),
                tags,
                r#type: Some(geom_type as i32),
                geometry: encode_geometry(feature.geom_type, &feature.geometry),
            });
        }

        (target.keys, target.values) = dictionaries.into_tables();
        tile.layers.push(target);
    }

    Ok(tile.encode_to_vec())
}

/// Per-layer attribute tables grown while visiting features.
#[derive(Default)]
struct Dictionaries {
    keys: Vec<String>,
    values: Vec<Value>,
}

impl Dictionaries {
    /// Get the dictionary index of a key, interning it on first use.
    fn key_index(&mut self, key: &str) -> u32 {
        match self.keys.iter().position(|known| known == key) {
            Some(index) => index as u32,
            None => {
                self.keys.push(key.into());
                (self.keys.len() - 1) as u32
            },
        }
    }

    /// Get the dictionary index of a value, interning it on first use.
    fn value_index(&mut self, value: &Value) -> u32 {
        match self.values.iter().position(|known| known == value) {
            Some(index) => index as u32,
            None => {
                self.values.push(value.clone());
                (self.values.len() - 1) as u32
            },
        }
    }

    fn into_tables(self) -> (Vec<String>, Vec<protobuf::Value>) {
        (self.keys, self.values.iter().map(Value::to_wire).collect())
    }
}
