//! Geometry projection between geographic and tile space.
//!
//! The write path converts GeoJSON feature geometry into tile-local integer
//! coordinates: spherical Mercator projection onto the unit square,
//! Douglas-Peucker simplification, antimeridian wrapping, axis clipping
//! against the buffered tile bounds, and integer rescaling. The read path
//! converts decoded tile features back into GeoJSON, regrouping polygon
//! rings by signed area.

use std::f64::consts::PI;
use std::mem;

use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::Error;
use crate::geojson::{self, Coordinate1, Coordinate2, Coordinate3, Coordinate4, Geometry};
use crate::mercator::TileIndex;
use crate::tile::{Coordinate, DEFAULT_EXTENT, Feature, GeomType, Layer};

/// Projection parameters for one target tile.
#[derive(Clone, Debug)]
pub struct Options {
    /// Tile subdivision resolution.
    pub extent: u32,
    /// Clip buffer around the tile in extent units.
    pub buffer: f64,
    /// Simplification tolerance in extent units.
    pub tolerance: f64,
    /// Property promoted to the feature id, overriding the GeoJSON id.
    pub promote_id: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self { extent: DEFAULT_EXTENT, buffer: 64., tolerance: 3., promote_id: None }
    }
}

/// Unit-square world coordinate.
#[derive(Copy, Clone, PartialEq, Debug)]
struct Point {
    x: f64,
    y: f64,
}

impl Point {
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Clipping axis.
#[derive(Copy, Clone, PartialEq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn get(self, point: Point) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }
}

/// Project a GeoJSON feature into tile-local coordinates.
///
/// Geometry left empty after clipping is a valid result, not an error; the
/// returned feature is then "empty" and will not be emitted by the encoder.
/// The feature id comes from the promoted property if configured, then the
/// GeoJSON id, then `fallback_id`.
pub fn project_feature(
    feature: &geojson::Feature,
    index: TileIndex,
    options: &Options,
    fallback_id: u64,
) -> Result<Feature, Error> {
    let geometry = match &feature.geometry {
        Some(geometry) => geometry,
        None => {
            debug!("projecting feature without geometry");
            return Ok(Feature { extent: options.extent, ..Default::default() });
        },
    };

    let geom_type = geometry.geom_type()?;

    let z2 = (1u64 << index.z) as f64;
    let extent = options.extent as f64;
    let buffer = options.buffer / extent;
    let tolerance = options.tolerance / (z2 * extent);

    // Project onto the unit square and simplify each ring.
    let mut rings: Vec<Vec<Point>> =
        geometry.rings()?.iter().map(|ring| project_ring(ring, tolerance)).collect();

    // Duplicate geometry crossing the antimeridian into the adjacent world
    // copies, then clip against the buffered tile bounds on each axis.
    let x = index.x as f64;
    let y = index.y as f64;
    rings = wrap(rings, geom_type, buffer);
    rings = clip(rings, geom_type, (x - buffer) / z2, (x + 1. + buffer) / z2, Axis::X);
    rings = clip(rings, geom_type, (y - buffer) / z2, (y + 1. + buffer) / z2, Axis::Y);

    // Rescale unit-square coordinates into tile-local integers.
    let geometry = rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|point| {
                    Coordinate::new(
                        ((point.x * z2 - x) * extent).round() as i64,
                        ((point.y * z2 - y) * extent).round() as i64,
                    )
                })
                .collect()
        })
        .collect();

    let mut attributes = Vec::new();
    if let Some(properties) = &feature.properties {
        for (key, json) in properties {
            if options.promote_id.as_deref() == Some(key.as_str()) {
                continue;
            }

            if let Some(value) = geojson::value_from_json(json) {
                attributes.push((key.clone(), value));
            }
        }
    }

    let promoted = options
        .promote_id
        .as_deref()
        .and_then(|key| feature.properties.as_ref()?.get(key))
        .map(|json| match json {
            Json::String(id) => id.clone(),
            other => other.to_string(),
        });
    let id = promoted
        .or_else(|| feature.id.as_ref().map(geojson::FeatureId::as_string))
        .unwrap_or_else(|| fallback_id.to_string());

    Ok(Feature { id, geom_type, geometry, attributes, extent: options.extent })
}

/// Project a GeoJSON feature collection into a tile layer.
///
/// Features whose geometry is empty after clipping are dropped; fallback
/// ids are the 1-based collection positions.
pub fn project_collection(
    collection: &geojson::FeatureCollection,
    name: impl Into<String>,
    index: TileIndex,
    options: &Options,
) -> Result<Layer, Error> {
    let mut layer = Layer::new(name);
    layer.extent = options.extent;

    for (i, feature) in collection.features.iter().enumerate() {
        let feature = project_feature(feature, index, options, i as u64 + 1)?;

        if !feature.is_empty() {
            layer.features.push(feature);
        }
    }

    Ok(layer)
}

/// Project a geographic ring onto the unit square and simplify it.
fn project_ring(ring: &[(f64, f64)], tolerance: f64) -> Vec<Point> {
    let points: Vec<_> = ring.iter().map(|&(lon, lat)| project(lon, lat)).collect();

    if points.len() < 3 {
        return points;
    }

    douglas_peucker(&points, tolerance)
}

/// Spherical Mercator projection onto the unit square.
fn project(longitude: f64, latitude: f64) -> Point {
    let sin = (latitude * PI / 180.).sin();
    let y = 0.5 - 0.25 * ((1. + sin) / (1. - sin)).ln() / PI;

    Point::new(longitude / 360. + 0.5, y.clamp(0., 1.))
}

/// Ramer-Douglas-Peucker line simplification.
///
/// The first and last point are always retained; everything between them
/// collapses unless it deviates from the chord by more than the tolerance.
fn douglas_peucker(points: &[Point], tolerance: f64) -> Vec<Point> {
    let end = points.len() - 1;

    // Find the point deviating furthest from the chord.
    let mut dmax = 0.;
    let mut index = 0;
    for (i, point) in points.iter().enumerate().take(end).skip(1) {
        let d = perpendicular_distance(*point, points[0], points[end]);

        if d > dmax {
            index = i;
            dmax = d;
        }
    }

    if dmax > tolerance {
        let mut simplified = douglas_peucker(&points[..=index], tolerance);
        let tail = douglas_peucker(&points[index..], tolerance);

        // Drop the junction point shared by both halves.
        simplified.pop();
        simplified.extend(tail);
        simplified
    } else {
        vec![points[0], points[end]]
    }
}

/// Distance of a point from the line through `start` and `end`.
fn perpendicular_distance(point: Point, start: Point, end: Point) -> f64 {
    let mut dx = end.x - start.x;
    let mut dy = end.y - start.y;

    let mag = (dx * dx + dy * dy).sqrt();
    if mag > 0. {
        dx /= mag;
        dy /= mag;
    }

    let pvx = point.x - start.x;
    let pvy = point.y - start.y;

    // Subtract the projection onto the chord direction.
    let pvdot = dx * pvx + dy * pvy;
    let ax = pvx - pvdot * dx;
    let ay = pvy - pvdot * dy;

    (ax * ax + ay * ay).sqrt()
}

/// Duplicate geometry near the antimeridian into the adjacent world copies.
///
/// Geometry intersecting the tile column shifted by a full world width is
/// spliced back in so features spanning the date line render in the edge
/// tiles on both sides.
fn wrap(rings: Vec<Vec<Point>>, geom_type: GeomType, buffer: f64) -> Vec<Vec<Point>> {
    let left = clip(rings.clone(), geom_type, -1. - buffer, buffer, Axis::X);
    let right = clip(rings.clone(), geom_type, 1. - buffer, 2. + buffer, Axis::X);

    if left.is_empty() && right.is_empty() {
        return rings;
    }

    let mut merged = shift(left, 1.);
    merged.extend(clip(rings, geom_type, -buffer, 1. + buffer, Axis::X));
    merged.extend(shift(right, -1.));
    merged
}

fn shift(rings: Vec<Vec<Point>>, offset: f64) -> Vec<Vec<Point>> {
    rings
        .into_iter()
        .map(|ring| ring.into_iter().map(|point| Point::new(point.x + offset, point.y)).collect())
        .collect()
}

/// Clip rings against the band `[k1, k2]` along one axis.
///
/// Rings fully inside the band are returned unchanged, including their point
/// sequence.
fn clip(
    rings: Vec<Vec<Point>>,
    geom_type: GeomType,
    k1: f64,
    k2: f64,
    axis: Axis,
) -> Vec<Vec<Point>> {
    if rings.is_empty() {
        return rings;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in rings.iter().flatten() {
        min = min.min(axis.get(*point));
        max = max.max(axis.get(*point));
    }

    // Trivial accept and reject.
    if min >= k1 && max < k2 {
        return rings;
    }
    if max < k1 || min >= k2 {
        return Vec::new();
    }

    match geom_type {
        GeomType::Point => rings
            .into_iter()
            .map(|ring| clip_points(ring, k1, k2, axis))
            .filter(|ring| !ring.is_empty())
            .collect(),
        _ => rings
            .iter()
            .flat_map(|ring| clip_line(ring, k1, k2, axis, geom_type == GeomType::Polygon))
            .collect(),
    }
}

fn clip_points(points: Vec<Point>, k1: f64, k2: f64, axis: Axis) -> Vec<Point> {
    points
        .into_iter()
        .filter(|point| {
            let v = axis.get(*point);
            v >= k1 && v <= k2
        })
        .collect()
}

/// Clip one ring's edge walk against the band.
///
/// LineStrings split into independent open slices at each band crossing;
/// polygon slices stay in one piece and are re-closed if the walk did not
/// return to the first point.
fn clip_line(points: &[Point], k1: f64, k2: f64, axis: Axis, polygon: bool) -> Vec<Vec<Point>> {
    let mut slices = Vec::new();
    let mut slice = Vec::new();

    if points.len() < 2 {
        return slices;
    }

    for window in points.windows(2) {
        let (a, b) = (window[0], window[1]);
        let ak = axis.get(a);
        let bk = axis.get(b);
        let mut exited = false;

        if ak < k1 {
            // Edge enters the band from below.
            if bk > k1 {
                slice.push(intersect(a, b, k1, axis));
            }
        } else if ak > k2 {
            // Edge enters the band from above.
            if bk < k2 {
                slice.push(intersect(a, b, k2, axis));
            }
        } else {
            slice.push(a);
        }

        // Edge exits the band; record the exact boundary crossing.
        if bk < k1 && ak >= k1 {
            slice.push(intersect(a, b, k1, axis));
            exited = true;
        }
        if bk > k2 && ak <= k2 {
            slice.push(intersect(a, b, k2, axis));
            exited = true;
        }

        if !polygon && exited && !slice.is_empty() {
            slices.push(mem::take(&mut slice));
        }
    }

    // The last point is never visited as an edge start.
    let last = points[points.len() - 1];
    let lk = axis.get(last);
    if lk >= k1 && lk <= k2 {
        slice.push(last);
    }

    if let (Some(&first), Some(&end)) = (slice.first(), slice.last())
        && polygon
        && first != end
    {
        slice.push(first);
    }

    if !slice.is_empty() {
        slices.push(slice);
    }

    slices
}

/// Exact band-boundary crossing of the edge `a -> b`.
fn intersect(a: Point, b: Point, k: f64, axis: Axis) -> Point {
    match axis {
        Axis::X => Point::new(k, a.y + (b.y - a.y) * (k - a.x) / (b.x - a.x)),
        Axis::Y => Point::new(a.x + (b.x - a.x) * (k - a.y) / (b.y - a.y), k),
    }
}

/// Shoelace signed area of a tile-space ring.
///
/// Positive for clockwise traversal in tile coordinates (y grows south),
/// which marks outer polygon rings in the encoding convention.
pub fn signed_area(ring: &[Coordinate]) -> f64 {
    let mut sum = 0.;
    for (i, point) in ring.iter().enumerate() {
        let next = ring[(i + 1) % ring.len()];

        sum += (point.x * next.y) as f64;
        sum -= (point.y * next.x) as f64;
    }

    0.5 * sum
}

/// Group polygon rings into polygons by winding.
///
/// A positive-area ring starts a new polygon; negative-area rings attach to
/// the most recent polygon as holes. Holes preceding any outer ring have
/// nothing to attach to and are dropped.
pub fn classify_rings(rings: Vec<Vec<Coordinate>>) -> Vec<Vec<Vec<Coordinate>>> {
    let mut polygons: Vec<Vec<Vec<Coordinate>>> = Vec::new();

    for ring in rings {
        if signed_area(&ring) > 0. {
            polygons.push(vec![ring]);
        } else if let Some(polygon) = polygons.last_mut() {
            polygon.push(ring);
        } else {
            debug!("dropping hole ring without preceding outer ring");
        }
    }

    polygons
}

/// Convert a decoded tile feature back into a GeoJSON feature.
///
/// Polygon rings are regrouped via [`classify_rings`]; single-part geometry
/// serializes as Point/LineString/Polygon and multi-part as the Multi*
/// variant.
pub fn feature_to_geojson(feature: &Feature, index: TileIndex) -> Result<geojson::Feature, Error> {
    let rings: Vec<Vec<Vec<f64>>> = feature
        .geometry
        .iter()
        .filter(|ring| !ring.is_empty())
        .map(|ring| {
            ring.iter()
                .map(|&coordinate| {
                    let (lon, lat) = coordinate_to_position(coordinate, index, feature.extent);
                    vec![lon, lat]
                })
                .collect()
        })
        .collect();

    let geometry = match feature.geom_type {
        GeomType::Point => {
            let mut points: Vec<_> = rings.into_iter().flatten().collect();
            match points.len() {
                1 => Geometry::Point(Coordinate1 { coordinates: points.remove(0) }),
                _ => Geometry::MultiPoint(Coordinate2 { coordinates: points }),
            }
        },
        GeomType::LineString => {
            let mut lines = rings;
            match lines.len() {
                1 => Geometry::LineString(Coordinate2 { coordinates: lines.remove(0) }),
                _ => Geometry::MultiLineString(Coordinate3 { coordinates: lines }),
            }
        },
        GeomType::Polygon => {
            // Regroup into polygons before leaving integer space, then remap.
            let classified = classify_rings(
                feature.geometry.iter().filter(|ring| !ring.is_empty()).cloned().collect(),
            );

            let mut polygons: Vec<Vec<Vec<Vec<f64>>>> = classified
                .into_iter()
                .map(|polygon| {
                    polygon
                        .into_iter()
                        .map(|ring| {
                            ring.into_iter()
                                .map(|coordinate| {
                                    let (lon, lat) =
                                        coordinate_to_position(coordinate, index, feature.extent);
                                    vec![lon, lat]
                                })
                                .collect()
                        })
                        .collect()
                })
                .collect();

            match polygons.len() {
                1 => Geometry::Polygon(Coordinate3 { coordinates: polygons.remove(0) }),
                _ => Geometry::MultiPolygon(Coordinate4 { coordinates: polygons }),
            }
        },
        GeomType::Unknown => return Err(Error::UnsupportedGeometry(0)),
    };

    let mut properties = Map::new();
    for (key, value) in &feature.attributes {
        properties.insert(key.clone(), geojson::json_from_value(value));
    }

    Ok(geojson::Feature {
        id: Some(geojson::FeatureId::String(feature.id.clone())),
        geometry: Some(geometry),
        properties: Some(properties),
    })
}

/// Convert a decoded layer into a GeoJSON feature collection.
pub fn layer_to_geojson(
    layer: &Layer,
    index: TileIndex,
) -> Result<geojson::FeatureCollection, Error> {
    let features = layer
        .features
        .iter()
        .filter(|feature| !feature.is_empty())
        .map(|feature| feature_to_geojson(feature, index))
        .collect::<Result<_, _>>()?;

    Ok(geojson::FeatureCollection { features })
}

/// Convert a tile-local coordinate back into a geodetic position.
fn coordinate_to_position(coordinate: Coordinate, index: TileIndex, extent: u32) -> (f64, f64) {
    let extent = extent as f64;
    let size = extent * (1u64 << index.z) as f64;
    let x0 = extent * index.x as f64;
    let y0 = extent * index.y as f64;

    let y2 = 180. - (coordinate.y as f64 + y0) * 360. / size;

    let lon = (coordinate.x as f64 + x0) * 360. / size - 180.;
    let lat = 360. / PI * (y2 * PI / 180.).exp().atan() - 90.;

    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::GeoJson;

    fn unit_ring(points: &[(f64, f64)]) -> Vec<Point> {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn simplify_retains_endpoints() {
        let ring = unit_ring(&[(0., 0.), (0.1, 0.001), (0.2, 0.), (0.3, 0.002), (0.4, 0.)]);

        let simplified = douglas_peucker(&ring, 0.01);
        assert_eq!(simplified.len(), 2);
        assert_eq!(simplified[0], ring[0]);
        assert_eq!(simplified[1], ring[4]);

        // Below the tolerance the deviating points survive.
        let detailed = douglas_peucker(&ring, 0.0001);
        assert_eq!(detailed.first(), Some(&ring[0]));
        assert_eq!(detailed.last(), Some(&ring[4]));
        assert!(detailed.len() > 2);
    }

    #[test]
    fn simplify_collapses_with_large_tolerance() {
        let ring = unit_ring(&[(0., 0.), (0.5, 0.5), (1., 0.), (0.5, -0.5), (0., 0.)]);

        // Tolerance beyond the bounding diagonal keeps only the endpoints.
        assert_eq!(douglas_peucker(&ring, 2.), vec![ring[0], ring[4]]);
    }

    #[test]
    fn clip_inside_band_is_identity() {
        let rings = vec![unit_ring(&[(0.2, 0.2), (0.4, 0.3), (0.6, 0.2)])];

        let clipped = clip(rings.clone(), GeomType::LineString, 0., 1., Axis::X);
        assert_eq!(clipped, rings);
    }

    #[test]
    fn clip_splits_open_lines() {
        // Line leaving the band and coming back: two independent slices.
        let rings =
            vec![unit_ring(&[(0.1, 0.), (0.6, 0.), (0.6, 0.1), (0.1, 0.1)])];

        let clipped = clip(rings, GeomType::LineString, 0., 0.4, Axis::X);

        assert_eq!(clipped.len(), 2);
        assert_eq!(clipped[0], unit_ring(&[(0.1, 0.), (0.4, 0.)]));
        assert_eq!(clipped[1], unit_ring(&[(0.4, 0.1), (0.1, 0.1)]));
    }

    #[test]
    fn clip_recloses_polygons() {
        let rings = vec![unit_ring(&[
            (0.2, 0.2),
            (0.6, 0.2),
            (0.6, 0.6),
            (0.2, 0.6),
            (0.2, 0.2),
        ])];

        let clipped = clip(rings, GeomType::Polygon, 0., 0.4, Axis::X);

        assert_eq!(clipped.len(), 1);
        let slice = &clipped[0];
        assert!(slice.len() >= 4);
        assert_eq!(slice.first(), slice.last());
        assert!(slice.iter().all(|point| point.x <= 0.4));
    }

    #[test]
    fn clip_drops_outside_points() {
        let rings = vec![unit_ring(&[(0.1, 0.1)]), unit_ring(&[(0.8, 0.1)])];

        let clipped = clip(rings, GeomType::Point, 0., 0.4, Axis::X);

        assert_eq!(clipped, vec![unit_ring(&[(0.1, 0.1)])]);
    }

    #[test]
    fn wrap_duplicates_antimeridian_geometry() {
        // Segment running from just west of the date line to just east of it
        // in unit-square space.
        let rings = vec![unit_ring(&[(0.9972, 0.5), (0.0028, 0.5)])];
        let buffer = 64. / 4096.;

        let wrapped = wrap(rings.clone(), GeomType::LineString, buffer);

        // Shifted copy on each side plus the original span.
        assert_eq!(wrapped.len(), 3);
        assert!(wrapped[0].iter().all(|point| point.x > 1. - buffer));
        assert_eq!(wrapped[1], rings[0]);
        assert!(wrapped[2].iter().all(|point| point.x < buffer));
    }

    #[test]
    fn wrap_keeps_central_geometry_untouched() {
        let rings = vec![unit_ring(&[(0.4, 0.5), (0.6, 0.5)])];

        assert_eq!(wrap(rings.clone(), GeomType::LineString, 64. / 4096.), rings);
    }

    #[test]
    fn signed_area_orientation() {
        // Clockwise in tile space (y grows south).
        let ring: Vec<Coordinate> =
            vec![(0, 0).into(), (10, 0).into(), (10, 10).into(), (0, 10).into()];
        assert!(signed_area(&ring) > 0.);

        let reversed: Vec<Coordinate> = ring.iter().rev().copied().collect();
        assert!(signed_area(&reversed) < 0.);
    }

    #[test]
    fn classify_groups_holes_with_outers() {
        let outer_a: Vec<Coordinate> =
            vec![(0, 0).into(), (10, 0).into(), (10, 10).into(), (0, 10).into(), (0, 0).into()];
        let hole_a: Vec<Coordinate> =
            vec![(2, 2).into(), (2, 4).into(), (4, 4).into(), (4, 2).into(), (2, 2).into()];
        let outer_b: Vec<Coordinate> = vec![
            (20, 0).into(),
            (30, 0).into(),
            (30, 10).into(),
            (20, 10).into(),
            (20, 0).into(),
        ];

        let polygons =
            classify_rings(vec![outer_a.clone(), hole_a.clone(), outer_b.clone()]);

        assert_eq!(polygons, vec![vec![outer_a, hole_a], vec![outer_b]]);
    }

    #[test]
    fn project_point_to_tile_center() {
        let feature = geojson::Feature {
            id: None,
            geometry: Some(Geometry::Point(Coordinate1 { coordinates: vec![0., 0.] })),
            properties: None,
        };

        let projected =
            project_feature(&feature, TileIndex::new(0, 0, 0), &Options::default(), 1).unwrap();

        assert_eq!(projected.id, "1");
        assert_eq!(projected.geom_type, GeomType::Point);
        assert_eq!(projected.geometry, vec![vec![Coordinate::new(2048, 2048)]]);
    }

    #[test]
    fn project_collection_drops_clipped_out_features() {
        let raw = br#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
                    "properties": {"kind": "center"}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [120.0, 40.0]},
                    "properties": {"kind": "far"}
                }
            ]
        }"#;
        let collection = match GeoJson::from_slice(raw).unwrap() {
            GeoJson::FeatureCollection(collection) => collection,
            _ => panic!("expected a feature collection"),
        };

        // Zoom 2 tile covering the area around (0, 0) only.
        let layer = project_collection(
            &collection,
            "poi",
            TileIndex::new(2, 1, 2),
            &Options::default(),
        )
        .unwrap();

        assert_eq!(layer.features.len(), 1);
        assert_eq!(layer.features[0].id, "1");
        assert_eq!(layer.features[0].geometry, vec![vec![Coordinate::new(0, 0)]]);
    }

    #[test]
    fn promoted_property_becomes_id() {
        let raw = br#"{
            "type": "Feature",
            "id": 9,
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
            "properties": {"osm_id": 4711, "kind": "station"}
        }"#;
        let feature = match GeoJson::from_slice(raw).unwrap() {
            GeoJson::Feature(feature) => feature,
            _ => panic!("expected a feature"),
        };

        let options = Options { promote_id: Some("osm_id".into()), ..Default::default() };
        let projected =
            project_feature(&feature, TileIndex::new(0, 0, 0), &options, 1).unwrap();

        assert_eq!(projected.id, "4711");

        // The promoted property does not show up as an attribute.
        assert_eq!(projected.attributes.len(), 1);
        assert_eq!(projected.attributes[0].0, "kind");
    }

    #[test]
    fn polygon_roundtrip_through_geojson() {
        let feature = Feature {
            id: "1".into(),
            geom_type: GeomType::Polygon,
            geometry: vec![
                vec![
                    (0, 0).into(),
                    (4096, 0).into(),
                    (4096, 4096).into(),
                    (0, 4096).into(),
                    (0, 0).into(),
                ],
                vec![
                    (1024, 1024).into(),
                    (1024, 3072).into(),
                    (3072, 3072).into(),
                    (3072, 1024).into(),
                    (1024, 1024).into(),
                ],
            ],
            attributes: vec![("kind".into(), crate::tile::Value::String("water".into()))],
            extent: DEFAULT_EXTENT,
        };

        let geojson = feature_to_geojson(&feature, TileIndex::new(0, 0, 0)).unwrap();

        match geojson.geometry.unwrap() {
            Geometry::Polygon(rings) => {
                assert_eq!(rings.coordinates.len(), 2);

                // Top-left corner of the world tile.
                let corner = &rings.coordinates[0][0];
                assert_eq!(corner[0], -180.);
                assert!((corner[1] - 85.05112878).abs() < 1e-6);
            },
            geometry => panic!("expected a polygon, got {geometry:?}"),
        }
    }
}
