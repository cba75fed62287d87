//! Interactive kiss3d viewer for the puzzle.
//!
//! The window loop owns the clock and forwards key events to the engine.
//! Held camera keys spin the whole scene; action keys start a turn. Piece
//! facets become individual mesh nodes under two groups, moving and
//! stationary, so the animated half can be rotated as one node; the groups
//! are rebuilt whenever a partition or a commit reorders the pieces.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use kiss3d::event::{Action as KeyAction, Key, WindowEvent};
use kiss3d::light::Light;
use kiss3d::nalgebra::{Point3, Unit, UnitQuaternion, Vector3};
use kiss3d::resource::Mesh;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use rustc_hash::FxHashMap;

use centercuts::engine::{Axis, Orientation, Tick};
use centercuts::render::fan_triangles;
use centercuts::{Action, Facet, Piece, PuzzleEngine};

/// Scene spin while a camera key is held: a full turn's angle per 1.6 s.
const CAMERA_SPEED: f32 = 2.0 * std::f32::consts::PI / (3.0 * 1600.0);

#[derive(Clone, Copy)]
enum Command {
    Camera(Axis, Orientation),
    Twist(Action),
}

fn keymap() -> FxHashMap<Key, Command> {
    FxHashMap::from_iter([
        (Key::W, Command::Camera(Axis::X, Orientation::Negative)),
        (Key::S, Command::Camera(Axis::X, Orientation::Positive)),
        (Key::A, Command::Camera(Axis::Y, Orientation::Negative)),
        (Key::D, Command::Camera(Axis::Y, Orientation::Positive)),
        (Key::Q, Command::Camera(Axis::Z, Orientation::Positive)),
        (Key::E, Command::Camera(Axis::Z, Orientation::Negative)),
        (Key::H, Command::Twist(Action::from_signs(true, true, true))),
        (Key::J, Command::Twist(Action::from_signs(true, false, true))),
        (Key::K, Command::Twist(Action::from_signs(false, false, true))),
        (Key::L, Command::Twist(Action::from_signs(false, true, true))),
        (Key::Y, Command::Twist(Action::from_signs(true, true, false))),
        (Key::U, Command::Twist(Action::from_signs(true, false, false))),
        (Key::I, Command::Twist(Action::from_signs(false, false, false))),
        (Key::O, Command::Twist(Action::from_signs(false, true, false))),
    ])
}

struct Halves {
    moving: SceneNode,
    stationary: SceneNode,
}

fn add_facet(group: &mut SceneNode, facet: &Facet) {
    let coords: Vec<Point3<f32>> = facet
        .points
        .iter()
        .map(|&(x, y, z)| Point3::new(x, y, z))
        .collect();
    let faces: Vec<Point3<u16>> = fan_triangles(coords.len())
        .into_iter()
        .map(|(a, b, c)| Point3::new(a, b, c))
        .collect();
    let mesh = Rc::new(RefCell::new(Mesh::new(coords, faces, None, None, false)));
    let mut node = group.add_mesh(mesh, Vector3::new(1.0, 1.0, 1.0));
    let [r, g, b, _] = facet.color.rgba();
    node.set_color(r, g, b);
    node.enable_backface_culling(false);
}

fn build_halves(root: &mut SceneNode, pieces: &[Piece], split: usize) -> Halves {
    let mut moving = root.add_group();
    let mut stationary = root.add_group();
    for (i, piece) in pieces.iter().enumerate() {
        let group = if i < split {
            &mut moving
        } else {
            &mut stationary
        };
        for facet in &piece.facets {
            add_facet(group, facet);
        }
    }
    Halves { moving, stationary }
}

fn unit_axis(x: f32, y: f32, z: f32) -> Unit<Vector3<f32>> {
    Unit::new_normalize(Vector3::new(x, y, z))
}

/// Opens the window and runs the frame loop until it closes.
pub fn display(mut engine: PuzzleEngine) {
    let keymap = keymap();
    let mut window = Window::new("center cuts");
    window.set_light(Light::StickToCamera);

    let mut root = window.add_group();
    let mut halves = build_halves(&mut root, engine.pieces(), engine.split_index());
    let mut last_frame = Instant::now();

    while window.render() {
        let now = Instant::now();
        let delta_ms = now.duration_since(last_frame).as_secs_f32() * 1000.0;
        last_frame = now;

        let mut rebuild = false;
        for event in window.events().iter() {
            if let WindowEvent::Key(key, key_action, _) = event.value {
                match (keymap.get(&key), key_action) {
                    (Some(&Command::Camera(axis, orientation)), KeyAction::Press) => {
                        engine.on_camera_key_down(axis, orientation);
                    }
                    (Some(&Command::Camera(axis, _)), KeyAction::Release) => {
                        engine.on_camera_key_up(axis);
                    }
                    (Some(&Command::Twist(twist)), KeyAction::Press) => {
                        if engine.on_action_key(twist) {
                            rebuild = true;
                        }
                    }
                    _ => {}
                }
            }
        }

        if engine.tick(delta_ms) == Tick::Committed {
            rebuild = true;
        }

        if rebuild {
            halves.moving.unlink();
            halves.stationary.unlink();
            halves = build_halves(&mut root, engine.pieces(), engine.split_index());
        }

        if let Some(pass) = engine.current_draw_plan().twist {
            let axis = unit_axis(pass.axis.0 as f32, pass.axis.1 as f32, pass.axis.2 as f32);
            halves
                .moving
                .set_local_rotation(UnitQuaternion::from_axis_angle(&axis, pass.angle));
        }

        let cam = engine.camera_axis();
        if cam != [0.0; 3] {
            let spin =
                UnitQuaternion::from_axis_angle(&unit_axis(cam[0], cam[1], cam[2]), delta_ms * CAMERA_SPEED);
            root.prepend_to_local_rotation(&spin);
        }
    }
}
