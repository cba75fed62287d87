//! Center-cuts puzzle: a truncated cube sliced through its center along
//! every cube diagonal, with 120 degree turns of the resulting halves.
//!
//! The crate separates the exact discrete geometry ([`geometry`]), the
//! piece set ([`pieces`]), the action/animation state machine ([`engine`]),
//! and the buffer flattening behind a renderer boundary ([`render`]). The
//! binary adds a CLI and an interactive kiss3d viewer on top.

pub mod engine;
pub mod geometry;
pub mod pieces;
pub mod render;

pub use engine::{Action, DrawPlan, PuzzleEngine, Tick, TwistPass};
pub use pieces::{
    build_pieces, format_layout, ColorTag, ConfigError, CrossSections, Facet, Piece, PuzzleConfig,
};
pub use render::Renderer;
