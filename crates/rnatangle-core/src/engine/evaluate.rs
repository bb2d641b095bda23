use crate::core::geometry::plane::segment_plane_intersection;
use crate::core::geometry::polygon::point_in_polygon;
use crate::core::geometry::triangle::segment_triangle_intersection;
use crate::core::models::coords::ResidueCoord;
use crate::core::models::report::{EntanglementResult, HitInfo, Segment};
use crate::core::models::surface::Surface;
use crate::engine::config::{EvaluateOptions, PolylineMode};
use crate::engine::coords::{CoordMap, build_polyline_points, build_segments,
    build_segments_from_polyline};
use nalgebra::Point3;
use std::collections::HashSet;
use tracing::debug;

fn build_skip_mask(surface: &Surface, n_res: usize) -> Vec<bool> {
    let mut mask = vec![false; n_res + 1];
    for &idx in &surface.skip_residues {
        if idx > 0 && idx <= n_res {
            mask[idx] = true;
        }
    }
    mask
}

fn masked(mask: &[bool], res_index: usize, n_res: usize) -> bool {
    res_index > 0 && res_index <= n_res && mask[res_index]
}

/// Tests one segment against one surface; triangle lists take precedence over
/// the plane+polygon representation, and a single confirmed triangle hit
/// suffices.
fn test_segment(surface: &Surface, segment: &Segment, options: &EvaluateOptions) -> Option<Point3<f64>> {
    if !surface.triangles.is_empty() {
        return surface.triangles.iter().find_map(|tri| {
            segment_triangle_intersection(&segment.a, &segment.b, tri, options.eps_triangle)
        });
    }
    let point =
        segment_plane_intersection(&segment.a, &segment.b, &surface.plane, options.eps_plane)?;
    let q = surface.plane.project(&point);
    if point_in_polygon(&q, &surface.polygon, options.eps_polygon) {
        Some(point)
    } else {
        None
    }
}

/// Tests every backbone segment against every surface and reports the
/// punctures.
///
/// Never fails: absent coordinates simply produce fewer segments, and
/// non-testable surfaces contribute nothing. A hit is identified by
/// `(loop_id, segment_id)` and counted once, no matter how many triangles of
/// the surface the segment touches. With `early_exit`, evaluation stops at
/// the first confirmed hit and the returned hit list is partial.
pub fn evaluate_entanglement(
    coords: &[ResidueCoord],
    surfaces: &[Surface],
    options: &EvaluateOptions,
) -> EntanglementResult {
    let mut result = EntanglementResult::default();
    let map = CoordMap::build(coords, options.atom_index);
    let segments = match options.polyline_mode {
        PolylineMode::SingleAtom => build_segments(&map),
        PolylineMode::PhosphateC4Alternating => {
            let points = build_polyline_points(coords, options.atom_index_p, options.atom_index_c4);
            build_segments_from_polyline(&points)
        }
    };
    if segments.is_empty() {
        return result;
    }

    let n_res = map.n_res();
    let mut hit_keys: HashSet<(usize, usize)> = HashSet::new();

    'surfaces: for surface in surfaces {
        if !surface.is_testable() {
            continue;
        }
        let skip_mask = build_skip_mask(surface, n_res);

        for segment in &segments {
            if masked(&skip_mask, segment.res_a, n_res) || masked(&skip_mask, segment.res_b, n_res)
            {
                continue;
            }
            let Some(point) = test_segment(surface, segment, options) else {
                continue;
            };
            if hit_keys.insert((surface.loop_id, segment.id)) {
                result.hits.push(HitInfo {
                    loop_id: surface.loop_id,
                    segment_id: segment.id,
                    res_a: segment.res_a,
                    res_b: segment.res_b,
                    role_a: segment.role_a,
                    role_b: segment.role_b,
                    point,
                });
                if options.early_exit {
                    break 'surfaces;
                }
            }
        }
    }

    result.k = result.hits.len();
    debug!(
        k = result.k,
        segments = segments.len(),
        surfaces = surfaces.len(),
        "Entanglement evaluated."
    );
    result
}
