//! Mapbox vector tile codec and tiling geometry pipeline.
//!
//! This crate implements the MVT binary format and the geometry processing
//! required to produce it: decoding tile byte buffers into layers and
//! features, encoding layers back into bytes, converting GeoJSON geometry
//! into tile-local integer coordinates, and WebMercator tile math.
//!
//! The crate has no knowledge of HTTP, storage, or compression. Callers hand
//! it decompressed byte buffers and get an in-memory layer model back.
//!
//! See <https://github.com/mapbox/vector-tile-spec/tree/master/2.1>.

pub mod geojson;
pub mod mercator;
pub mod project;
pub mod tile;

pub use mercator::TileIndex;
pub use tile::{Coordinate, Feature, GeomType, Layer, Value, decode, encode};

/// Codec and projection errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Protobuf(#[from] prost::DecodeError),
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported geometry type {0}")]
    UnsupportedGeometry(i32),
    #[error("unsupported GeoJSON geometry: {0}")]
    UnsupportedGeoJson(&'static str),
    #[error("invalid geometry command id {0}")]
    InvalidCommand(u32),
    #[error("truncated geometry command stream")]
    TruncatedGeometry,
    #[error("attribute tag index {0} outside the layer dictionary")]
    TagIndex(u32),
    #[error("attribute value without a populated variant")]
    EmptyValue,
}
