//! Geometry command stream codec.
//!
//! Feature geometry is stored as a flat list of unsigned command integers,
//! each packing a 3-bit command id and a repeat count, followed by
//! zigzag-encoded coordinate deltas from the previous absolute position.
//!
//! See <https://github.com/mapbox/vector-tile-spec/tree/master/2.1#43-geometry-encoding>.

use std::mem;

use crate::Error;
use crate::tile::{Coordinate, GeomType};

const MOVE_TO: u32 = 1;
const LINE_TO: u32 = 2;
const CLOSE_PATH: u32 = 7;

/// Map a signed integer onto an unsigned one with the sign in the low bit.
pub fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Invert [`zigzag`].
pub fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Geometry drawing command with relative coordinates.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Command {
    MoveTo(i64, i64),
    LineTo(i64, i64),
    ClosePath,
}

/// Iterator over the commands in a feature's geometry.
pub struct Commands<'a> {
    geometry: &'a [u32],
    command: Option<(Command, u32)>,
    index: usize,
    failed: bool,
}

impl<'a> Commands<'a> {
    pub fn new(geometry: &'a [u32]) -> Self {
        Self { geometry, command: Default::default(), index: Default::default(), failed: false }
    }
}

impl Iterator for Commands<'_> {
    type Item = Result<Command, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        // A malformed stream yields exactly one error, then stops.
        if self.failed {
            return None;
        }

        let len = self.geometry.len();
        loop {
            match &mut self.command {
                // Parse the next command integer.
                None => {
                    if self.index >= len {
                        return None;
                    }

                    let command_int = self.geometry[self.index];
                    let count = command_int >> 3;
                    self.index += 1;

                    match command_int & 0x7 {
                        MOVE_TO => self.command = Some((Command::MoveTo(0, 0), count * 2)),
                        LINE_TO => self.command = Some((Command::LineTo(0, 0), count * 2)),
                        // ClosePath has no parameters.
                        CLOSE_PATH if count == 0 => (),
                        CLOSE_PATH if count == 1 => return Some(Ok(Command::ClosePath)),
                        CLOSE_PATH => {
                            self.command = Some((Command::ClosePath, count - 1));
                            return Some(Ok(Command::ClosePath));
                        },
                        command_id => {
                            self.failed = true;
                            return Some(Err(Error::InvalidCommand(command_id)));
                        },
                    }
                },

                // Reset command after all repetitions are dispatched.
                Some((_, 0)) => self.command = None,

                // Return all remaining `ClosePath` commands.
                Some((Command::ClosePath, count)) => {
                    *count -= 1;

                    return Some(Ok(Command::ClosePath));
                },

                // Consume parameters of `MoveTo`/`LineTo` commands.
                Some((command, count)) => {
                    if self.index >= len {
                        self.failed = true;
                        return Some(Err(Error::TruncatedGeometry));
                    }

                    *count -= 1;

                    let value = unzigzag(self.geometry[self.index] as u64);
                    self.index += 1;

                    let (x, y) = match command {
                        Command::MoveTo(x, y) | Command::LineTo(x, y) => (x, y),
                        Command::ClosePath => unreachable!(),
                    };

                    if *count % 2 == 0 {
                        *y = value;

                        return Some(Ok(*command));
                    } else {
                        *x = value;
                    }
                },
            }
        }
    }
}

/// Decode a command stream into a list of rings.
///
/// The running position starts at `(0, 0)` and persists across rings within
/// one feature. A `MoveTo` with a non-empty current ring starts a new ring;
/// `ClosePath` re-appends the ring's first point for non-Point geometry.
pub fn decode_geometry(geometry: &[u32], geom_type: GeomType) -> Result<Vec<Vec<Coordinate>>, Error> {
    let mut rings = Vec::new();
    let mut ring = Vec::new();

    let mut x = 0;
    let mut y = 0;

    for command in Commands::new(geometry) {
        match command? {
            Command::MoveTo(dx, dy) => {
                x += dx;
                y += dy;

                if !ring.is_empty() {
                    rings.push(mem::take(&mut ring));
                }
                ring.push(Coordinate::new(x, y));
            },
            Command::LineTo(dx, dy) => {
                x += dx;
                y += dy;

                ring.push(Coordinate::new(x, y));
            },
            Command::ClosePath => {
                if geom_type != GeomType::Point
                    && let Some(&first) = ring.first()
                {
                    ring.push(first);
                }
            },
        }
    }

    if !ring.is_empty() {
        rings.push(ring);
    }

    Ok(rings)
}

/// Encode a ring list into a command stream.
///
/// Point features become a single multipoint `MoveTo`; polygons drop their
/// stored closing point and end each ring with `ClosePath`. Empty rings
/// contribute no commands.
pub fn encode_geometry(geom_type: GeomType, rings: &[Vec<Coordinate>]) -> Vec<u32> {
    let mut geometry = Vec::new();

    let mut x = 0;
    let mut y = 0;

    if geom_type == GeomType::Point {
        let total: usize = rings.iter().map(|ring| ring.len()).sum();
        if total == 0 {
            return geometry;
        }

        geometry.push(command_integer(MOVE_TO, total as u32));
        for point in rings.iter().flatten() {
            push_delta(&mut geometry, *point, &mut x, &mut y);
        }

        return geometry;
    }

    for ring in rings {
        // Polygons store their closing point, which is not transmitted.
        let line_count = match geom_type {
            GeomType::Polygon => ring.len().saturating_sub(1),
            _ => ring.len(),
        };

        if line_count == 0 {
            continue;
        }

        geometry.push(command_integer(MOVE_TO, 1));
        push_delta(&mut geometry, ring[0], &mut x, &mut y);

        if line_count > 1 {
            geometry.push(command_integer(LINE_TO, (line_count - 1) as u32));
            for point in &ring[1..line_count] {
                push_delta(&mut geometry, *point, &mut x, &mut y);
            }
        }

        if geom_type == GeomType::Polygon {
            geometry.push(command_integer(CLOSE_PATH, 1));
        }
    }

    geometry
}

fn command_integer(command_id: u32, count: u32) -> u32 {
    (count << 3) | command_id
}

fn push_delta(geometry: &mut Vec<u32>, point: Coordinate, x: &mut i64, y: &mut i64) {
    geometry.push(zigzag(point.x - *x) as u32);
    geometry.push(zigzag(point.y - *y) as u32);

    *x = point.x;
    *y = point.y;
}
