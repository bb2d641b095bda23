use crate::core::models::coords::ResidueCoord;
use crate::core::models::report::{AtomRole, Segment};
use nalgebra::Point3;

/// Dense residue-to-position lookup for one atom slot.
///
/// Built per call from the sparse input; residues without the requested atom,
/// or with non-finite coordinates, are simply absent.
#[derive(Debug, Clone)]
pub(crate) struct CoordMap {
    n_res: usize,
    coords: Vec<Point3<f64>>,
    present: Vec<bool>,
}

fn is_finite(p: &Point3<f64>) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}

impl CoordMap {
    pub fn build(coords: &[ResidueCoord], atom_index: usize) -> Self {
        let n_res = coords.iter().map(|rc| rc.res_index).max().unwrap_or(0);
        let mut map = Self {
            n_res,
            coords: vec![Point3::origin(); n_res + 1],
            present: vec![false; n_res + 1],
        };
        for rc in coords {
            if rc.res_index == 0 || rc.res_index > n_res {
                continue;
            }
            let Some(p) = rc.atoms.get(atom_index) else {
                continue;
            };
            if !is_finite(p) {
                continue;
            }
            map.coords[rc.res_index] = *p;
            map.present[rc.res_index] = true;
        }
        map
    }

    pub fn n_res(&self) -> usize {
        self.n_res
    }

    pub fn get(&self, res_index: usize) -> Option<Point3<f64>> {
        if res_index <= self.n_res && self.present[res_index] {
            Some(self.coords[res_index])
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PolylinePoint {
    pub res_index: usize,
    pub role: AtomRole,
    pub point: Point3<f64>,
}

/// One segment per consecutive residue pair with a representative atom on
/// both ends. Segment id is the first residue index, so ids are stable under
/// missing residues elsewhere in the chain.
pub(crate) fn build_segments(map: &CoordMap) -> Vec<Segment> {
    if map.n_res() <= 1 {
        return Vec::new();
    }
    let mut segments = Vec::with_capacity(map.n_res());
    for i in 1..map.n_res() {
        let (Some(a), Some(b)) = (map.get(i), map.get(i + 1)) else {
            continue;
        };
        segments.push(Segment {
            id: i,
            res_a: i,
            res_b: i + 1,
            role_a: AtomRole::Single,
            role_b: AtomRole::Single,
            a,
            b,
        });
    }
    segments
}

/// Interleaved phosphate/C4' points in chain order.
pub(crate) fn build_polyline_points(
    coords: &[ResidueCoord],
    atom_index_p: usize,
    atom_index_c4: usize,
) -> Vec<PolylinePoint> {
    let map_p = CoordMap::build(coords, atom_index_p);
    let map_c4 = CoordMap::build(coords, atom_index_c4);
    let n_res = map_p.n_res().max(map_c4.n_res());
    let mut points = Vec::with_capacity(n_res * 2);
    for i in 1..=n_res {
        if let Some(p) = map_p.get(i) {
            points.push(PolylinePoint {
                res_index: i,
                role: AtomRole::Phosphate,
                point: p,
            });
        }
        if let Some(p) = map_c4.get(i) {
            points.push(PolylinePoint {
                res_index: i,
                role: AtomRole::C4Prime,
                point: p,
            });
        }
    }
    points
}

/// Segments between consecutive polyline points; ids are 1-based ordinals.
pub(crate) fn build_segments_from_polyline(points: &[PolylinePoint]) -> Vec<Segment> {
    if points.len() < 2 {
        return Vec::new();
    }
    points
        .windows(2)
        .enumerate()
        .map(|(idx, w)| Segment {
            id: idx + 1,
            res_a: w[0].res_index,
            res_b: w[1].res_index,
            role_a: w[0].role,
            role_b: w[1].role,
            a: w[0].point,
            b: w[1].point,
        })
        .collect()
}
