//! WebMercator tile math.
//!
//! Stateless conversions between geodetic positions, global pixel
//! coordinates, tile indices, and quadkeys for the EPSG:3857 tile pyramid.

use std::f64::consts::PI;

/// Width and height of a single tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Maximum tile zoom level.
pub const MAX_ZOOM: u8 = 24;

/// Latitude limit of the square WebMercator projection.
const MAX_LATITUDE: f64 = 85.05112878;

/// Longitude limit of the WebMercator projection.
const MAX_LONGITUDE: f64 = 180.;

/// Index uniquely identifying a map tile.
#[derive(Default, Hash, PartialEq, Eq, Copy, Clone, Debug)]
pub struct TileIndex {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileIndex {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Check whether this index addresses a tile inside the pyramid.
    pub fn is_valid(&self) -> bool {
        self.z <= MAX_ZOOM && self.x < tile_count(self.z) && self.y < tile_count(self.z)
    }

    /// Flip the row between the XYZ and TMS numbering schemes.
    ///
    /// XYZ counts rows from the north, TMS from the south; the conversion is
    /// its own inverse.
    pub fn flip_y(&self) -> Self {
        Self { y: tile_count(self.z) - self.y - 1, ..*self }
    }

    /// Encode this index as a base-4 quadkey.
    ///
    /// One digit per zoom level, most significant level first; bit 0 of each
    /// digit carries the column bit and bit 1 the row bit.
    pub fn quadkey(&self) -> String {
        let mut quadkey = String::with_capacity(self.z as usize);

        for i in (1..=self.z).rev() {
            let mask = 1 << (i - 1);
            let mut digit = 0;

            if self.x & mask != 0 {
                digit += 1;
            }
            if self.y & mask != 0 {
                digit += 2;
            }

            quadkey.push((b'0' + digit) as char);
        }

        quadkey
    }

    /// Decode a quadkey back into a tile index.
    ///
    /// Quadkeys originate from untrusted request input, so a digit outside
    /// `'0'..='3'` or an excessive zoom level is reported as `None` rather
    /// than an error.
    pub fn from_quadkey(quadkey: &str) -> Option<Self> {
        let z = quadkey.len();
        if z > MAX_ZOOM as usize {
            return None;
        }

        let mut x = 0;
        let mut y = 0;

        for (i, digit) in quadkey.bytes().enumerate() {
            let mask = 1 << (z - i - 1);

            match digit {
                b'0' => (),
                b'1' => x |= mask,
                b'2' => y |= mask,
                b'3' => {
                    x |= mask;
                    y |= mask;
                },
                _ => return None,
            }
        }

        Some(Self::new(x, y, z as u8))
    }
}

/// Number of tile rows/columns at a zoom level.
pub fn tile_count(zoom: u8) -> u32 {
    1 << zoom
}

/// Width and height of the world map in pixels at a zoom level.
pub fn map_size(zoom: u8) -> f64 {
    ((TILE_SIZE as u64) << zoom) as f64
}

/// Horizontal global pixel coordinate of a longitude.
pub fn longitude_to_pixel_x(longitude: f64, zoom: u8) -> f64 {
    (longitude + 180.) / 360. * map_size(zoom)
}

/// Vertical global pixel coordinate of a latitude.
pub fn latitude_to_pixel_y(latitude: f64, zoom: u8) -> f64 {
    let sin = (latitude.to_radians()).sin();
    (0.5 - ((1. + sin) / (1. - sin)).ln() / (4. * PI)) * map_size(zoom)
}

/// Longitude at a horizontal global pixel coordinate.
pub fn pixel_x_to_longitude(pixel_x: f64, zoom: u8) -> f64 {
    let map_size = map_size(zoom);
    360. * (pixel_x.clamp(0., map_size) / map_size - 0.5)
}

/// Latitude at a vertical global pixel coordinate.
pub fn pixel_y_to_latitude(pixel_y: f64, zoom: u8) -> f64 {
    let map_size = map_size(zoom);
    let y = 0.5 - pixel_y.clamp(0., map_size) / map_size;
    90. - 360. * (-y * 2. * PI).exp().atan() / PI
}

/// Convert a geodetic position into global pixel coordinates.
///
/// Global pixel coordinates are relative to the top-left corner of the map.
/// Out-of-range positions are clamped to the projection limits.
pub fn position_to_global_pixel(longitude: f64, latitude: f64, zoom: u8) -> (f64, f64) {
    let longitude = longitude.clamp(-MAX_LONGITUDE, MAX_LONGITUDE);
    let latitude = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);

    let x = (longitude + 180.) / 360.;
    let sin = latitude.to_radians().sin();
    let y = 0.5 - ((1. + sin) / (1. - sin)).ln() / (4. * PI);

    let map_size = map_size(zoom);
    ((x * map_size + 0.5).clamp(0., map_size - 1.), (y * map_size + 0.5).clamp(0., map_size - 1.))
}

/// Convert global pixel coordinates back into a geodetic position.
pub fn global_pixel_to_position(pixel_x: f64, pixel_y: f64, zoom: u8) -> (f64, f64) {
    let map_size = map_size(zoom);

    let x = pixel_x.clamp(0., map_size - 1.) / map_size - 0.5;
    let y = 0.5 - pixel_y.clamp(0., map_size - 1.) / map_size;

    (360. * x, 90. - 360. * (-y * 2. * PI).exp().atan() / PI)
}

/// Geodetic bounding box of a tile as `[west, south, east, north]`.
pub fn tile_bounding_box(index: TileIndex) -> [f64; 4] {
    let x1 = (index.x * TILE_SIZE) as f64;
    let y1 = (index.y * TILE_SIZE) as f64;
    let x2 = x1 + TILE_SIZE as f64;
    let y2 = y1 + TILE_SIZE as f64;

    let (west, north) = global_pixel_to_position(x1, y1, index.z);
    let (east, south) = global_pixel_to_position(x2, y2, index.z);

    [west, south, east, north]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadkey_digits() {
        assert_eq!(TileIndex::new(0, 0, 1).quadkey(), "0");
        assert_eq!(TileIndex::new(1, 0, 1).quadkey(), "1");
        assert_eq!(TileIndex::new(0, 1, 1).quadkey(), "2");
        assert_eq!(TileIndex::new(1, 1, 1).quadkey(), "3");
        assert_eq!(TileIndex::new(3, 5, 3).quadkey(), "213");
    }

    #[test]
    fn quadkey_roundtrip() {
        for z in 1..=MAX_ZOOM {
            // Pick a coordinate away from the pyramid edges where possible.
            let x = (tile_count(z) - 1) / 3;
            let y = (tile_count(z) - 1) / 2;
            let index = TileIndex::new(x, y, z);

            assert_eq!(TileIndex::from_quadkey(&index.quadkey()), Some(index));
        }
    }

    #[test]
    fn quadkey_rejects_invalid_digits() {
        assert_eq!(TileIndex::from_quadkey("0124"), None);
        assert_eq!(TileIndex::from_quadkey("a"), None);
        assert_eq!(TileIndex::from_quadkey("01 2"), None);
    }

    #[test]
    fn flip_y_is_involution() {
        let index = TileIndex::new(8504, 5473, 14);

        assert_eq!(index.flip_y().flip_y(), index);
        assert_eq!(index.flip_y(), TileIndex::new(8504, (1 << 14) - 5473 - 1, 14));
    }

    #[test]
    fn tile_validity() {
        assert!(TileIndex::new(0, 0, 0).is_valid());
        assert!(TileIndex::new(16383, 16383, 14).is_valid());
        assert!(!TileIndex::new(16384, 0, 14).is_valid());
        assert!(!TileIndex::new(0, 16384, 14).is_valid());
        assert!(!TileIndex::new(0, 0, 25).is_valid());
    }

    #[test]
    fn pixel_position_roundtrip() {
        let (x, y) = position_to_global_pixel(13.377, 52.516, 14);
        let (lon, lat) = global_pixel_to_position(x, y, 14);

        assert!((lon - 13.377).abs() < 1e-4);
        assert!((lat - 52.516).abs() < 1e-4);
    }

    #[test]
    fn bounding_box_ordering() {
        let bb = tile_bounding_box(TileIndex::new(8504, 5473, 14));

        assert!(bb[0] < bb[2]);
        assert!(bb[1] < bb[3]);
    }
}
