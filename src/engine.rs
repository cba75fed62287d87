//! Partition and rotation engine.
//!
//! The engine owns the piece list and drives the two-state action cycle:
//! idle, then partitioned while a turn animates, then idle again once the
//! turn commits. Accepting an action stably partitions the pieces so the
//! moving half occupies the front of the list; committing applies the exact
//! discrete 120 degree rotation to that half and clears the action. At most
//! one action is in flight; key presses during an animation are dropped.

use std::str::FromStr;

use thiserror::Error;

use crate::geometry::{dot, rotate_dir_about, rotate_point_about, Dir, Point};
use crate::pieces::Piece;

/// Wall-clock length of one turn animation.
pub const ANIMATION_DURATION_MS: f32 = 400.0;

/// Total angle of one turn: 120 degrees about a diagonal.
pub const TWIST_ANGLE: f32 = 2.0 * std::f32::consts::PI / 3.0;

/// A turn about one of the eight cube diagonals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action {
    axis: Dir,
}

impl Action {
    /// All eight diagonal turns.
    pub const ALL: [Action; 8] = [
        Action { axis: (1, 1, 1) },
        Action { axis: (1, 1, -1) },
        Action { axis: (1, -1, 1) },
        Action { axis: (1, -1, -1) },
        Action { axis: (-1, 1, 1) },
        Action { axis: (-1, 1, -1) },
        Action { axis: (-1, -1, 1) },
        Action { axis: (-1, -1, -1) },
    ];

    /// Builds the action whose axis has positive components where the
    /// corresponding flag is true.
    pub const fn from_signs(x: bool, y: bool, z: bool) -> Self {
        const fn sign(positive: bool) -> i32 {
            if positive {
                1
            } else {
                -1
            }
        }
        Action {
            axis: (sign(x), sign(y), sign(z)),
        }
    }

    pub fn axis(&self) -> Dir {
        self.axis
    }

    pub fn rotate_point(&self, p: Point) -> Point {
        rotate_point_about(self.axis, p)
    }

    pub fn rotate_dir(&self, d: Dir) -> Dir {
        rotate_dir_about(self.axis, d)
    }
}

/// Rejected action string; valid inputs are three characters of `+` or `-`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a sign triple such as `+-+`")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut signs = [false; 3];
        let mut chars = s.chars();
        for slot in &mut signs {
            *slot = match chars.next() {
                Some('+') => true,
                Some('-') => false,
                _ => return Err(ParseActionError(s.to_string())),
            };
        }
        if chars.next().is_some() {
            return Err(ParseActionError(s.to_string()));
        }
        Ok(Action::from_signs(signs[0], signs[1], signs[2]))
    }
}

/// Camera rotation axis held by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Positive,
    Negative,
}

/// Outcome of advancing the engine by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No action in flight.
    Idle,
    /// An action is animating; the draw plan carries a twist pass.
    Animating,
    /// The active action just committed on this tick.
    Committed,
}

/// The extra transform pass needed while a turn animates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwistPass {
    pub axis: Dir,
    pub angle: f32,
}

/// What to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawPlan {
    pub index_count: usize,
    /// Indices belonging to the moving run `[0, moving_index_count)`. Half
    /// the buffer for a bisecting partition; turns about different
    /// diagonals regroup the tips, and locked pieces sit out, so the run
    /// can be smaller or larger than half.
    pub moving_index_count: usize,
    /// Present while animating; the moving run is drawn under this extra
    /// rotation.
    pub twist: Option<TwistPass>,
}

/// Stably splits `pieces` into a moving front run and a stationary back run.
///
/// A piece moves when it is not locked and its normal has positive dot
/// product with `axis`; the zero-dot tie stays stationary. Relative order is
/// preserved within each run. Returns the split index.
pub fn stable_partition(pieces: &mut Vec<Piece>, axis: Dir) -> usize {
    let mut moving = Vec::with_capacity(pieces.len());
    let mut stationary = Vec::with_capacity(pieces.len());
    for piece in pieces.drain(..) {
        if !piece.locked && dot(axis, piece.normal) > 0 {
            moving.push(piece);
        } else {
            stationary.push(piece);
        }
    }
    let split = moving.len();
    moving.append(&mut stationary);
    *pieces = moving;
    split
}

/// All mutable puzzle state: pieces, the in-flight action, the animation
/// clock, and the held camera axis.
pub struct PuzzleEngine {
    pieces: Vec<Piece>,
    split: usize,
    active: Option<Action>,
    frame_ms: f32,
    camera_axis: [f32; 3],
}

impl PuzzleEngine {
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self {
            pieces,
            split: 0,
            active: None,
            frame_ms: 0.0,
            camera_axis: [0.0; 3],
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// First stationary index from the most recent partition. The initial
    /// layout bisects under every action, but sequences mixing different
    /// diagonals can regroup the tips and split unevenly, so consumers use
    /// this index rather than assuming half.
    pub fn split_index(&self) -> usize {
        self.split
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_action(&self) -> Option<Action> {
        self.active
    }

    /// Starts a turn. Returns false (and changes nothing) while another
    /// turn is still in flight.
    pub fn on_action_key(&mut self, action: Action) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.split = stable_partition(&mut self.pieces, action.axis());
        self.active = Some(action);
        self.frame_ms = 0.0;
        true
    }

    /// Advances the animation clock by `delta_ms` and commits the active
    /// turn once the clock passes the animation duration. A large delta
    /// jumps straight to the commit.
    pub fn tick(&mut self, delta_ms: f32) -> Tick {
        let Some(action) = self.active else {
            return Tick::Idle;
        };
        self.frame_ms += delta_ms;
        if self.frame_ms > ANIMATION_DURATION_MS {
            self.commit(action);
            self.active = None;
            self.frame_ms = 0.0;
            Tick::Committed
        } else {
            Tick::Animating
        }
    }

    /// Applies the discrete rotation to the moving run.
    fn commit(&mut self, action: Action) {
        for piece in &mut self.pieces[..self.split] {
            piece.normal = action.rotate_dir(piece.normal);
            for facet in &mut piece.facets {
                for point in &mut facet.points {
                    *point = action.rotate_point(*point);
                }
            }
        }
    }

    /// The draw passes for the current frame.
    pub fn current_draw_plan(&self) -> DrawPlan {
        let per_piece = |pieces: &[Piece]| -> usize {
            pieces
                .iter()
                .flat_map(|p| &p.facets)
                .map(|f| f.index_count())
                .sum()
        };
        DrawPlan {
            index_count: per_piece(&self.pieces),
            moving_index_count: per_piece(&self.pieces[..self.split]),
            twist: self.active.map(|action| TwistPass {
                axis: action.axis(),
                angle: TWIST_ANGLE * self.frame_ms / ANIMATION_DURATION_MS,
            }),
        }
    }

    pub fn on_camera_key_down(&mut self, axis: Axis, orientation: Orientation) {
        let sign = match orientation {
            Orientation::Positive => 1.0,
            Orientation::Negative => -1.0,
        };
        self.camera_axis[axis as usize] = sign;
    }

    pub fn on_camera_key_up(&mut self, axis: Axis) {
        self.camera_axis[axis as usize] = 0.0;
    }

    /// The axis the scene root spins about while camera keys are held;
    /// all zeros when no key is down.
    pub fn camera_axis(&self) -> [f32; 3] {
        self.camera_axis
    }
}
