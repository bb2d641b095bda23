use crate::core::geometry::plane::{Plane, fit_plane};
use crate::core::geometry::polygon::{Polygon2D, ear_clip_triangulate, project_polygon};
use crate::core::geometry::triangle::Triangle;
use crate::core::models::coords::ResidueCoord;
use crate::core::models::loops::{Loop, LoopKind};
use crate::core::models::surface::Surface;
use crate::engine::config::{SurfaceBuildOptions, SurfaceMode};
use crate::engine::coords::CoordMap;
use crate::engine::loops::build_skip_residues;
use nalgebra::{Point3, Vector2};
use tracing::debug;

const EAR_CLIP_EPS: f64 = 1e-12;

/// Selects the boundary residue indices for a loop, kind-specific and
/// deterministic. Duplicates are dropped while preserving insertion order.
fn boundary_indices(lp: &Loop, n_res: usize) -> Vec<usize> {
    let mut indices = Vec::with_capacity(lp.boundary_residues.len() + lp.closing_pairs.len() * 2);
    let mut seen = vec![false; n_res + 1];
    let mut add = |indices: &mut Vec<usize>, res_index: usize| {
        if res_index == 0 || res_index > n_res || seen[res_index] {
            return;
        }
        seen[res_index] = true;
        indices.push(res_index);
    };
    let add_range = |indices: &mut Vec<usize>, add: &mut dyn FnMut(&mut Vec<usize>, usize), start: usize, end: usize| {
        if start > end {
            return;
        }
        for idx in start..=end {
            add(indices, idx);
        }
    };

    match lp.kind {
        LoopKind::Multi => {
            // Single-branch boundary: the span from the outer pair's first
            // residue up to the first branch, plus that branch's endpoints.
            // Deliberately not a full multi-loop boundary; later branches are
            // ignored.
            let mut sorted: Vec<(usize, usize)> =
                lp.closing_pairs.iter().map(|bp| bp.sorted()).collect();
            sorted.sort_unstable();
            let Some(&(l, l_partner)) = sorted.first() else {
                return indices;
            };
            match sorted.iter().skip(1).find(|&&(first, _)| first > l) {
                Some(&(i_branch, j_branch)) => {
                    add_range(&mut indices, &mut add, l, i_branch - 1);
                    add(&mut indices, i_branch);
                    add(&mut indices, j_branch);
                }
                None => {
                    add(&mut indices, l);
                    add(&mut indices, l_partner);
                }
            }
            indices
        }
        LoopKind::Hairpin => match lp.outer_pair() {
            Some(outer) => {
                let (i, j) = outer.sorted();
                add_range(&mut indices, &mut add, i, j);
                indices
            }
            None => {
                for &res_index in &lp.boundary_residues {
                    add(&mut indices, res_index);
                }
                indices
            }
        },
        LoopKind::Internal => match lp.outer_pair() {
            Some(outer) => {
                let (i, j) = outer.sorted();
                if lp.closing_pairs.len() >= 2 {
                    let (h, l) = lp.closing_pairs[1].sorted();
                    add_range(&mut indices, &mut add, i, h - 1);
                    add(&mut indices, h);
                    add(&mut indices, l);
                    add_range(&mut indices, &mut add, l + 1, j - 1);
                    add(&mut indices, i);
                    add(&mut indices, j);
                } else {
                    add_range(&mut indices, &mut add, i, j);
                }
                indices
            }
            None => {
                for &res_index in &lp.boundary_residues {
                    add(&mut indices, res_index);
                }
                indices
            }
        },
        LoopKind::Unknown => {
            for &res_index in &lp.boundary_residues {
                add(&mut indices, res_index);
            }
            for pair in &lp.closing_pairs {
                add(&mut indices, pair.i);
                add(&mut indices, pair.j);
            }
            indices
        }
    }
}

/// Orders boundary points by angle around their projected centroid, returning
/// the in-plane coordinates and the points lifted back onto the plane.
fn order_points_by_angle(
    points: &[Point3<f64>],
    plane: &Plane,
) -> (Vec<Vector2<f64>>, Vec<Point3<f64>>) {
    let projected: Vec<Vector2<f64>> = points.iter().map(|p| plane.project(p)).collect();
    let center = projected.iter().sum::<Vector2<f64>>() / projected.len() as f64;

    let mut order: Vec<usize> = (0..projected.len()).collect();
    order.sort_by(|&a, &b| {
        let angle_a = (projected[a].y - center.y).atan2(projected[a].x - center.x);
        let angle_b = (projected[b].y - center.y).atan2(projected[b].x - center.x);
        angle_a.total_cmp(&angle_b)
    });

    let poly2d: Vec<Vector2<f64>> = order.iter().map(|&k| projected[k]).collect();
    let poly3d: Vec<Point3<f64>> = poly2d.iter().map(|q| plane.lift(q)).collect();
    (poly2d, poly3d)
}

/// Builds one surface per loop.
///
/// Never fails: loops with missing atoms, too few boundary points, or
/// degenerate geometry yield surfaces that are simply not testable, excluding
/// them from evaluation.
pub fn build_surfaces(
    coords: &[ResidueCoord],
    loops: &[Loop],
    options: &SurfaceBuildOptions,
) -> Vec<Surface> {
    let map = CoordMap::build(coords, options.atom_index);
    let mut surfaces = Vec::with_capacity(loops.len());

    for lp in loops {
        let boundary_points: Vec<Point3<f64>> = boundary_indices(lp, map.n_res())
            .into_iter()
            .filter_map(|res_index| map.get(res_index))
            .collect();

        let plane = fit_plane(&boundary_points, options.eps_collinear);
        let mut polygon = Polygon2D::default();
        let mut triangles = Vec::new();

        match options.surface_mode {
            SurfaceMode::BestFitPlane => {
                polygon = project_polygon(&boundary_points, &plane);
            }
            SurfaceMode::TrianglePlanes => {
                if plane.valid && boundary_points.len() >= 3 {
                    let (poly2d, poly3d) = order_points_by_angle(&boundary_points, &plane);
                    polygon = Polygon2D {
                        valid: poly2d.len() >= 3,
                        vertices: poly2d.clone(),
                    };
                    for tri in ear_clip_triangulate(&poly2d, EAR_CLIP_EPS) {
                        let t = Triangle {
                            a: poly3d[tri[0]],
                            b: poly3d[tri[1]],
                            c: poly3d[tri[2]],
                        };
                        if t.double_area() <= options.eps_collinear {
                            continue;
                        }
                        triangles.push(t);
                    }
                }
            }
        }

        let surface = Surface {
            loop_id: lp.id,
            kind: lp.kind,
            closing_pairs: lp.closing_pairs.clone(),
            plane,
            polygon,
            triangles,
            skip_residues: build_skip_residues(lp),
        };
        debug!(
            loop_id = surface.loop_id,
            testable = surface.is_testable(),
            triangles = surface.triangles.len(),
            "Surface built."
        );
        surfaces.push(surface);
    }
    surfaces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::pair::BasePair;

    fn pairs(list: &[(usize, usize)]) -> Vec<BasePair> {
        list.iter().map(|&(i, j)| BasePair::new(i, j)).collect()
    }

    /// Residues `first..=last` on a ring of the given radius in the xy-plane,
    /// with alternating z so the covariance never degenerates.
    fn ring_coords(first: usize, last: usize, radius: f64) -> Vec<ResidueCoord> {
        let n = last - first + 1;
        (0..n)
            .map(|k| {
                let theta = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
                let z = if k % 2 == 0 { 0.1 } else { -0.1 };
                ResidueCoord::single(
                    first + k,
                    Point3::new(radius * theta.cos(), radius * theta.sin(), z),
                )
            })
            .collect()
    }

    fn hairpin(i: usize, j: usize) -> Loop {
        Loop {
            id: 1,
            kind: LoopKind::Hairpin,
            closing_pairs: pairs(&[(i, j)]),
            boundary_residues: ((i + 1)..j).collect(),
        }
    }

    #[test]
    fn hairpin_boundary_is_the_closing_span() {
        let indices = boundary_indices(&hairpin(3, 9), 12);
        assert_eq!(indices, (3..=9).collect::<Vec<_>>());
    }

    #[test]
    fn internal_boundary_walks_both_strands() {
        let lp = Loop {
            id: 1,
            kind: LoopKind::Internal,
            closing_pairs: pairs(&[(1, 10), (4, 7)]),
            boundary_residues: vec![2, 3, 8, 9],
        };
        assert_eq!(boundary_indices(&lp, 12), vec![1, 2, 3, 4, 7, 8, 9, 10]);
    }

    #[test]
    fn multi_boundary_uses_the_first_branch_only() {
        let lp = Loop {
            id: 1,
            kind: LoopKind::Multi,
            closing_pairs: pairs(&[(63, 121), (70, 96), (98, 105)]),
            boundary_residues: Vec::new(),
        };
        let mut expected: Vec<usize> = (63..=69).collect();
        expected.extend([70, 96]);
        assert_eq!(boundary_indices(&lp, 130), expected);
    }

    #[test]
    fn multi_boundary_without_branch_uses_outer_pair() {
        let lp = Loop {
            id: 1,
            kind: LoopKind::Multi,
            closing_pairs: pairs(&[(5, 20)]),
            boundary_residues: Vec::new(),
        };
        assert_eq!(boundary_indices(&lp, 30), vec![5, 20]);
    }

    #[test]
    fn best_fit_plane_mode_builds_hull_polygon() {
        let options = SurfaceBuildOptions {
            surface_mode: SurfaceMode::BestFitPlane,
            ..SurfaceBuildOptions::default()
        };
        let surfaces = build_surfaces(&ring_coords(1, 8, 3.0), &[hairpin(1, 8)], &options);
        assert_eq!(surfaces.len(), 1);
        assert!(surfaces[0].plane.valid);
        assert!(surfaces[0].polygon.valid);
        assert!(surfaces[0].triangles.is_empty());
        assert!(surfaces[0].is_testable());
    }

    #[test]
    fn triangle_mode_builds_a_mesh() {
        let surfaces = build_surfaces(
            &ring_coords(1, 8, 3.0),
            &[hairpin(1, 8)],
            &SurfaceBuildOptions::default(),
        );
        assert_eq!(surfaces.len(), 1);
        // An 8-vertex polygon ear-clips into 6 triangles.
        assert_eq!(surfaces[0].triangles.len(), 6);
        assert!(surfaces[0].is_testable());
    }

    #[test]
    fn missing_atoms_degrade_to_untestable_surface() {
        // Only two residues of the loop have coordinates.
        let coords = vec![
            ResidueCoord::single(1, Point3::new(0.0, 0.0, 0.0)),
            ResidueCoord::single(8, Point3::new(1.0, 0.0, 0.0)),
        ];
        let surfaces = build_surfaces(&coords, &[hairpin(1, 8)], &SurfaceBuildOptions::default());
        assert_eq!(surfaces.len(), 1);
        assert!(!surfaces[0].is_testable());
    }

    #[test]
    fn collinear_boundary_is_untestable() {
        let coords: Vec<ResidueCoord> = (1..=8)
            .map(|i| ResidueCoord::single(i, Point3::new(i as f64, 0.0, 0.0)))
            .collect();
        let surfaces = build_surfaces(&coords, &[hairpin(1, 8)], &SurfaceBuildOptions::default());
        assert!(!surfaces[0].is_testable());
    }

    #[test]
    fn skip_residues_follow_the_loop_kind() {
        let surfaces = build_surfaces(
            &ring_coords(1, 8, 3.0),
            &[hairpin(1, 8)],
            &SurfaceBuildOptions::default(),
        );
        assert_eq!(surfaces[0].skip_residues, (1..=8).collect::<Vec<_>>());
    }
}
