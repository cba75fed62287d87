//! Render adapter: flattens pieces into vertex buffers and drives a
//! two-pass draw through a minimal [`Renderer`] boundary.
//!
//! The adapter never talks to a graphics API. Shader setup, context
//! creation, and projection live behind whatever implements [`Renderer`];
//! this module only decides what goes in the buffers and which index ranges
//! get drawn under which transform.

use gl_matrix::common::{Mat4, Vec3};
use gl_matrix::mat4;

use crate::engine::DrawPlan;
use crate::pieces::Piece;

/// The host-provided drawing surface.
pub trait Renderer {
    fn upload_positions(&mut self, positions: &[f32]);
    fn upload_colors(&mut self, colors: &[f32]);
    fn upload_indices(&mut self, indices: &[u16]);
    fn set_transform(&mut self, transform: &Mat4);
    /// Draws `index_count` indices starting at `first_index` in the
    /// uploaded index buffer.
    fn draw_triangle_range(&mut self, first_index: usize, index_count: usize);
}

/// Total vertices across every facet, in piece order.
pub fn vertex_count(pieces: &[Piece]) -> usize {
    pieces
        .iter()
        .flat_map(|p| &p.facets)
        .map(|f| f.vertex_count())
        .sum()
}

/// Total fan-triangulation indices across every facet, in piece order.
pub fn index_count(pieces: &[Piece]) -> usize {
    pieces
        .iter()
        .flat_map(|p| &p.facets)
        .map(|f| f.index_count())
        .sum()
}

/// Facet points flattened to xyz triples, in piece order.
pub fn flatten_positions(pieces: &[Piece]) -> Vec<f32> {
    let mut positions = Vec::with_capacity(3 * vertex_count(pieces));
    for piece in pieces {
        for facet in &piece.facets {
            for &(x, y, z) in &facet.points {
                positions.extend([x, y, z]);
            }
        }
    }
    positions
}

/// One RGBA per vertex, the facet color repeated for each of its points.
pub fn flatten_colors(pieces: &[Piece]) -> Vec<f32> {
    let mut colors = Vec::with_capacity(4 * vertex_count(pieces));
    for piece in pieces {
        for facet in &piece.facets {
            let rgba = facet.color.rgba();
            for _ in &facet.points {
                colors.extend(rgba);
            }
        }
    }
    colors
}

/// Fan triangulation of a convex polygon with `vertex_count` points:
/// `(0, 1, 2), (0, 2, 3), ...`.
pub fn fan_triangles(vertex_count: usize) -> Vec<(u16, u16, u16)> {
    (1..vertex_count.saturating_sub(1) as u16)
        .map(|i| (0, i, i + 1))
        .collect()
}

/// Index buffer covering every facet, with a running vertex offset so each
/// facet's fan points into its own slice of the position buffer.
pub fn build_indices(pieces: &[Piece]) -> Vec<u16> {
    let mut indices = Vec::with_capacity(index_count(pieces));
    let mut offset: u16 = 0;
    for piece in pieces {
        for facet in &piece.facets {
            for (a, b, c) in fan_triangles(facet.points.len()) {
                indices.extend([offset + a, offset + b, offset + c]);
            }
            offset += facet.points.len() as u16;
        }
    }
    indices
}

/// Uploads all three buffers. Call after a partition reorders the pieces.
pub fn upload<R: Renderer>(renderer: &mut R, pieces: &[Piece]) {
    renderer.upload_positions(&flatten_positions(pieces));
    renderer.upload_colors(&flatten_colors(pieces));
    renderer.upload_indices(&build_indices(pieces));
}

/// Re-uploads positions only; colors and indices are unchanged by a commit.
pub fn upload_positions<R: Renderer>(renderer: &mut R, pieces: &[Piece]) {
    renderer.upload_positions(&flatten_positions(pieces));
}

/// Issues the draw passes for one frame.
///
/// Idle frames draw the whole buffer under `base`. While a turn animates,
/// the stationary run is drawn under `base` and the moving run under
/// `base` times the interpolated twist rotation.
pub fn draw_frame<R: Renderer>(renderer: &mut R, plan: &DrawPlan, base: &Mat4) {
    match plan.twist {
        None => {
            renderer.set_transform(base);
            renderer.draw_triangle_range(0, plan.index_count);
        }
        Some(pass) => {
            let moving = plan.moving_index_count;
            renderer.set_transform(base);
            renderer.draw_triangle_range(moving, plan.index_count - moving);

            let axis: Vec3 = [pass.axis.0 as f32, pass.axis.1 as f32, pass.axis.2 as f32];
            let mut twist = mat4::create();
            mat4::from_rotation(&mut twist, pass.angle, &axis);
            let mut combined = mat4::create();
            mat4::multiply(&mut combined, base, &twist);
            renderer.set_transform(&combined);
            renderer.draw_triangle_range(0, moving);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        stable_partition, PuzzleEngine, TwistPass, ANIMATION_DURATION_MS, TWIST_ANGLE,
    };
    use crate::pieces::{build_pieces, PuzzleConfig};

    #[derive(Default)]
    struct RecordingRenderer {
        positions: Vec<f32>,
        colors: Vec<f32>,
        indices: Vec<u16>,
        transforms: Vec<Mat4>,
        draws: Vec<(usize, usize)>,
    }

    impl Renderer for RecordingRenderer {
        fn upload_positions(&mut self, positions: &[f32]) {
            self.positions = positions.to_vec();
        }

        fn upload_colors(&mut self, colors: &[f32]) {
            self.colors = colors.to_vec();
        }

        fn upload_indices(&mut self, indices: &[u16]) {
            self.indices = indices.to_vec();
        }

        fn set_transform(&mut self, transform: &Mat4) {
            self.transforms.push(*transform);
        }

        fn draw_triangle_range(&mut self, first_index: usize, index_count: usize) {
            self.draws.push((first_index, index_count));
        }
    }

    #[test]
    fn test_reduced_set_buffer_sizes() {
        let pieces = build_pieces(&PuzzleConfig::default()).unwrap();
        assert_eq!(vertex_count(&pieces), 132);
        assert_eq!(index_count(&pieces), 192);
        assert_eq!(flatten_positions(&pieces).len(), 3 * 132);
        assert_eq!(flatten_colors(&pieces).len(), 4 * 132);
        assert_eq!(build_indices(&pieces).len(), 192);
    }

    #[test]
    fn test_fan_triangles() {
        assert_eq!(fan_triangles(3), vec![(0, 1, 2)]);
        assert_eq!(fan_triangles(4), vec![(0, 1, 2), (0, 2, 3)]);
        assert_eq!(fan_triangles(6).len(), 4);
    }

    #[test]
    fn test_indices_stay_in_bounds() {
        let pieces = build_pieces(&PuzzleConfig::default()).unwrap();
        let verts = vertex_count(&pieces) as u16;
        for index in build_indices(&pieces) {
            assert!(index < verts);
        }
    }

    #[test]
    fn test_moving_run_covers_half_the_index_buffer() {
        let mut pieces = build_pieces(&PuzzleConfig::default()).unwrap();
        let split = stable_partition(&mut pieces, (1, 1, 1));
        let moving = index_count(&pieces[..split]);
        assert_eq!(moving, index_count(&pieces) / 2);
        assert_eq!(moving, 96);
    }

    #[test]
    fn test_idle_frame_draws_once() {
        let mut renderer = RecordingRenderer::default();
        let plan = DrawPlan {
            index_count: 192,
            moving_index_count: 96,
            twist: None,
        };
        draw_frame(&mut renderer, &plan, &mat4::create());
        assert_eq!(renderer.draws, vec![(0, 192)]);
        assert_eq!(renderer.transforms.len(), 1);
    }

    #[test]
    fn test_animating_frame_draws_both_halves() {
        let mut renderer = RecordingRenderer::default();
        let plan = DrawPlan {
            index_count: 192,
            moving_index_count: 96,
            twist: Some(TwistPass {
                axis: (1, 1, 1),
                angle: TWIST_ANGLE / 2.0,
            }),
        };
        let base = mat4::create();
        draw_frame(&mut renderer, &plan, &base);

        assert_eq!(renderer.draws, vec![(96, 96), (0, 96)]);
        assert_eq!(renderer.transforms.len(), 2);
        assert_eq!(renderer.transforms[0], base);
        // the moving pass carries a real rotation
        assert_ne!(renderer.transforms[1], base);
    }

    #[test]
    fn test_commit_refreshes_positions_only() {
        let pieces = build_pieces(&PuzzleConfig::default()).unwrap();
        let mut engine = PuzzleEngine::new(pieces);
        let mut renderer = RecordingRenderer::default();

        assert!(engine.on_action_key("+++".parse().unwrap()));
        upload(&mut renderer, engine.pieces());
        let positions_before = renderer.positions.clone();
        let colors_before = renderer.colors.clone();
        let indices_before = renderer.indices.clone();

        engine.tick(ANIMATION_DURATION_MS + 1.0);
        upload_positions(&mut renderer, engine.pieces());

        // the moving half's points rotated, same buffer shape
        assert_ne!(renderer.positions, positions_before);
        assert_eq!(renderer.positions.len(), positions_before.len());
        // commit does not reorder pieces, so colors and indices still match
        assert_eq!(renderer.colors, colors_before);
        assert_eq!(renderer.indices, indices_before);
    }

    #[test]
    fn test_upload_fills_all_buffers() {
        let pieces = build_pieces(&PuzzleConfig::default()).unwrap();
        let mut renderer = RecordingRenderer::default();
        upload(&mut renderer, &pieces);
        assert_eq!(renderer.positions.len(), 3 * 132);
        assert_eq!(renderer.colors.len(), 4 * 132);
        assert_eq!(renderer.indices.len(), 192);
    }
}
