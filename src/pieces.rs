//! Piece and facet definitions for the center-cuts puzzle.
//!
//! The solid is a truncated cube with a cut through its center: six
//! square-capped pieces (one square facet plus the four trapezoids around
//! it), four corner tips (one triangle each), and optionally the two
//! hexagonal cross-section faces exposed by the center cut. Every facet of a
//! hexagonal corner face shares that corner's color; squares carry their own
//! face colors.

use thiserror::Error;

use crate::geometry::{
    hexagon, rotate_dir_x, rotate_dir_y, rotate_dir_z, rotate_x, rotate_y, rotate_z, square,
    trapezoid, triangle, Dir, Extents, Point,
};

/// Named palette entry; the RGBA value is looked up per facet at flatten time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorTag {
    Silver,
    White,
    Orange,
    Blue,
    Magenta,
    Yellow,
    Green,
    Coral,
    Cyan,
    Violet,
    LightRed,
    BlueViolet,
    Teal,
    SkyBlue,
    LightGreen,
}

impl ColorTag {
    /// RGBA components in 0.0..=1.0.
    pub fn rgba(self) -> [f32; 4] {
        fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
            [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
        }
        match self {
            ColorTag::Silver => rgb(143, 143, 143),
            ColorTag::White => rgb(212, 241, 252),
            ColorTag::Orange => rgb(235, 135, 21),
            ColorTag::Blue => rgb(41, 67, 163),
            ColorTag::Magenta => rgb(210, 75, 208),
            ColorTag::Yellow => rgb(178, 201, 43),
            ColorTag::Green => rgb(35, 118, 49),
            ColorTag::Coral => rgb(244, 79, 130),
            ColorTag::Cyan => rgb(12, 249, 239),
            ColorTag::Violet => rgb(94, 79, 160),
            ColorTag::LightRed => rgb(232, 173, 191),
            ColorTag::BlueViolet => rgb(119, 153, 252),
            ColorTag::Teal => rgb(33, 209, 163),
            ColorTag::SkyBlue => rgb(135, 206, 235),
            ColorTag::LightGreen => rgb(221, 250, 220),
        }
    }
}

/// A single planar convex polygon belonging to a piece.
///
/// Winding is consistent for an outward-facing normal; the point count
/// decides the fan-triangulation size.
#[derive(Clone, Debug)]
pub struct Facet {
    pub color: ColorTag,
    pub tag: String,
    pub points: Vec<Point>,
}

impl Facet {
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Indices emitted by fan triangulation: `(len - 2) * 3`.
    pub fn index_count(&self) -> usize {
        3 * (self.points.len() - 2)
    }
}

/// A rigid sub-solid of the puzzle.
///
/// `tag` is a stable identity that survives rotations; `normal` always
/// points along the piece's outward face direction and is rotated together
/// with every facet point when a turn commits. `locked` pieces never join a
/// moving half.
#[derive(Clone, Debug)]
pub struct Piece {
    pub tag: String,
    pub normal: Dir,
    pub locked: bool,
    pub facets: Vec<Facet>,
}

/// How the two hexagonal cross-section faces participate in the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CrossSections {
    /// Leave them out entirely (the reduced ten-piece set).
    #[default]
    Omit,
    /// Include them as regular pieces that rotate with their half.
    Rotating,
    /// Include them as a stationary core that no action moves.
    Locked,
}

/// Startup configuration for the piece set.
#[derive(Clone, Copy, Debug)]
pub struct PuzzleConfig {
    /// Outer extent of the solid (distance from center to a square cap).
    pub edge: f32,
    pub cross_sections: CrossSections,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            edge: 1.5,
            cross_sections: CrossSections::Omit,
        }
    }
}

/// Malformed base geometry, fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("piece `{tag}` has no facets")]
    EmptyPiece { tag: String },
    #[error("facet `{tag}` has {count} points; a facet needs at least 3")]
    DegenerateFacet { tag: String, count: usize },
    #[error("expected {expected} pieces for this variant, built {actual}")]
    PieceCount { expected: usize, actual: usize },
}

/// Formats a direction as one sign character per component, e.g. `+++` or `00-`.
pub fn dir_tag(d: Dir) -> String {
    [d.0, d.1, d.2]
        .iter()
        .map(|&c| match c {
            1 => '+',
            -1 => '-',
            _ => '0',
        })
        .collect()
}

/// Color of the hexagonal corner face at a diagonal direction.
fn corner_color(d: Dir) -> ColorTag {
    match d {
        (1, 1, 1) => ColorTag::Silver,
        (1, -1, 1) => ColorTag::White,
        (1, -1, -1) => ColorTag::Orange,
        (1, 1, -1) => ColorTag::Blue,
        (-1, -1, -1) => ColorTag::Magenta,
        (-1, 1, -1) => ColorTag::Yellow,
        (-1, -1, 1) => ColorTag::Green,
        (-1, 1, 1) => ColorTag::Coral,
        _ => unreachable!("not a corner direction: {d:?}"),
    }
}

/// Color of the square cap at an axis direction.
fn face_color(d: Dir) -> ColorTag {
    match d {
        (0, 0, 1) => ColorTag::Cyan,
        (0, -1, 0) => ColorTag::Violet,
        (0, 0, -1) => ColorTag::LightRed,
        (0, 1, 0) => ColorTag::BlueViolet,
        (1, 0, 0) => ColorTag::Teal,
        (-1, 0, 0) => ColorTag::SkyBlue,
        _ => unreachable!("not a face direction: {d:?}"),
    }
}

/// Builds the square-capped piece for one face, as the +Z cap rotated by
/// `rx` quarter turns around X and then `ry` around Y.
fn make_cap(e: &Extents, rx: usize, ry: usize) -> Piece {
    let orient = |points: &[Point]| rotate_y(&rotate_x(points, rx), ry);
    let orient_dir = |mut d: Dir| {
        for _ in 0..rx {
            d = rotate_dir_x(d);
        }
        for _ in 0..ry {
            d = rotate_dir_y(d);
        }
        d
    };

    let face = orient_dir((0, 0, 1));
    let mut facets = vec![Facet {
        color: face_color(face),
        tag: format!("sq{}", dir_tag(face)),
        points: orient(&square(e)),
    }];

    // ring of four trapezoids around the square, one per adjacent corner
    let mut trap = trapezoid(e);
    let mut corner = (1, 1, 1);
    for _ in 0..4 {
        let d = orient_dir(corner);
        facets.push(Facet {
            color: corner_color(d),
            tag: format!("tr{}:{}", dir_tag(face), dir_tag(d)),
            points: orient(&trap),
        });
        trap = rotate_z(&trap, 1);
        corner = rotate_dir_z(corner);
    }

    Piece {
        tag: format!("cap{}", dir_tag(face)),
        normal: face,
        locked: false,
        facets,
    }
}

fn make_tip(corner: Dir, points: Vec<Point>) -> Piece {
    Piece {
        tag: format!("tip{}", dir_tag(corner)),
        normal: corner,
        locked: false,
        facets: vec![Facet {
            color: corner_color(corner),
            tag: format!("tri{}", dir_tag(corner)),
            points,
        }],
    }
}

fn make_core(corner: Dir, locked: bool, points: Vec<Point>) -> Piece {
    Piece {
        tag: format!("core{}", dir_tag(corner)),
        normal: corner,
        locked,
        facets: vec![Facet {
            color: ColorTag::LightGreen,
            tag: format!("hex{}", dir_tag(corner)),
            points,
        }],
    }
}

/// Number of pieces a variant is expected to produce.
pub fn expected_piece_count(config: &PuzzleConfig) -> usize {
    match config.cross_sections {
        CrossSections::Omit => 10,
        CrossSections::Rotating | CrossSections::Locked => 12,
    }
}

/// Assembles the full piece list for the puzzle.
///
/// The four tips are two antipodal vertex pairs, so on this layout any
/// diagonal axis selects exactly one tip of each pair, three of the six
/// caps, and (when present) one of the two cross-sections: an exact
/// bisection. Turns about two different diagonals can regroup the tips,
/// after which a partition may split unevenly; the engine tracks the real
/// split index for that case.
pub fn build_pieces(config: &PuzzleConfig) -> Result<Vec<Piece>, ConfigError> {
    let e = Extents::new(config.edge);
    let mut pieces = Vec::with_capacity(12);

    // square caps: +Z, then the +Z cap carried onto the other five faces
    pieces.push(make_cap(&e, 0, 0)); // +z
    pieces.push(make_cap(&e, 1, 0)); // -y
    pieces.push(make_cap(&e, 2, 0)); // -z
    pieces.push(make_cap(&e, 3, 0)); // +y
    pieces.push(make_cap(&e, 0, 1)); // +x
    pieces.push(make_cap(&e, 0, 3)); // -x

    let tri = triangle(&e);
    pieces.push(make_tip((1, 1, 1), tri.clone()));
    pieces.push(make_tip((-1, 1, 1), rotate_z(&tri, 1)));
    pieces.push(make_tip((1, -1, -1), rotate_x(&tri, 2)));
    pieces.push(make_tip((-1, -1, -1), rotate_x(&rotate_z(&tri, 2), 1)));

    match config.cross_sections {
        CrossSections::Omit => {}
        CrossSections::Rotating | CrossSections::Locked => {
            let locked = config.cross_sections == CrossSections::Locked;
            let hex = hexagon(&e);
            let mut reversed = hex.clone();
            reversed.reverse();
            pieces.push(make_core((1, 1, 1), locked, reversed));
            pieces.push(make_core((-1, -1, -1), locked, hex));
        }
    }

    validate_pieces(&pieces, expected_piece_count(config))?;
    Ok(pieces)
}

/// Fail-fast structural checks on an assembled piece list.
pub fn validate_pieces(pieces: &[Piece], expected: usize) -> Result<(), ConfigError> {
    if pieces.len() != expected {
        return Err(ConfigError::PieceCount {
            expected,
            actual: pieces.len(),
        });
    }
    for piece in pieces {
        if piece.facets.is_empty() {
            return Err(ConfigError::EmptyPiece {
                tag: piece.tag.clone(),
            });
        }
        for facet in &piece.facets {
            if facet.points.len() < 3 {
                return Err(ConfigError::DegenerateFacet {
                    tag: facet.tag.clone(),
                    count: facet.points.len(),
                });
            }
        }
    }
    Ok(())
}

/// Formats the piece list as one line per piece: tag, normal signs, and the
/// facet colors with their point counts. Discrete on purpose, so the output
/// is stable across platforms and float formatting.
pub fn format_layout(pieces: &[Piece]) -> String {
    let lines: Vec<String> = pieces
        .iter()
        .map(|piece| {
            let facets: Vec<String> = piece
                .facets
                .iter()
                .map(|f| format!("{:?}/{}", f.color, f.points.len()))
                .collect();
            format!(
                "{:<8} {}  {}",
                piece.tag,
                dir_tag(piece.normal),
                facets.join(" ")
            )
        })
        .collect();
    lines.join("\n")
}
