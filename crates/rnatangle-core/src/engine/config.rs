use serde::{Deserialize, Serialize};

/// How a loop surface is represented for hit testing.
///
/// This is a configuration choice made once per run, not a per-call branch;
/// the evaluator dispatches on which geometric fields a surface carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SurfaceMode {
    /// Best-fit plane with the convex hull of the projected boundary.
    BestFitPlane,
    /// Triangle mesh from an angularly ordered, ear-clipped boundary polygon.
    #[default]
    TrianglePlanes,
}

/// How backbone segments are built from residue coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolylineMode {
    /// One segment per consecutive residue pair, single representative atom.
    #[default]
    SingleAtom,
    /// Alternating phosphate/C4' polyline, two atoms per residue.
    PhosphateC4Alternating,
}

/// Options for loop decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopBuildOptions {
    /// Emit multi-loops (two or more child pairs). When false they are
    /// omitted from the output entirely.
    pub include_multi: bool,
    /// Run main-layer extraction first; required when the input pairing may
    /// contain pseudoknots.
    pub main_layer_only: bool,
}

impl Default for LoopBuildOptions {
    fn default() -> Self {
        Self {
            include_multi: true,
            main_layer_only: false,
        }
    }
}

/// Options for surface construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBuildOptions {
    /// Which atom slot of each residue supplies the boundary point.
    pub atom_index: usize,
    /// Smallest-to-largest covariance eigenvalue ratio below which a boundary
    /// point set is considered degenerate.
    pub eps_collinear: f64,
    /// Surface representation.
    pub surface_mode: SurfaceMode,
}

impl Default for SurfaceBuildOptions {
    fn default() -> Self {
        Self {
            atom_index: 0,
            eps_collinear: 1e-6,
            surface_mode: SurfaceMode::TrianglePlanes,
        }
    }
}

/// Options for entanglement evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluateOptions {
    /// Atom slot for single-atom segments (and for the skip-mask extent).
    pub atom_index: usize,
    /// Atom slot of the phosphate in alternating mode.
    pub atom_index_p: usize,
    /// Atom slot of the C4' in alternating mode.
    pub atom_index_c4: usize,
    /// Backbone segment construction mode.
    pub polyline_mode: PolylineMode,
    /// Ambiguity band around a plane; endpoints closer than this produce no
    /// crossing (false-negative biased).
    pub eps_plane: f64,
    /// Boundary tolerance of the point-in-polygon test.
    pub eps_polygon: f64,
    /// Determinant/barycentric tolerance of the triangle test.
    pub eps_triangle: f64,
    /// Stop the whole evaluation at the first confirmed hit. The boolean
    /// verdict is unchanged, but the returned hit list is then partial, a
    /// distinct contract from full evaluation.
    pub early_exit: bool,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            atom_index: 0,
            atom_index_p: 0,
            atom_index_c4: 1,
            polyline_mode: PolylineMode::SingleAtom,
            eps_plane: 1e-2,
            eps_polygon: 1e-2,
            eps_triangle: 1e-8,
            early_exit: false,
        }
    }
}

/// Aggregated configuration for the end-to-end detection pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub loops: LoopBuildOptions,
    pub surfaces: SurfaceBuildOptions,
    pub evaluate: EvaluateOptions,
}

/// Fluent builder over [`DetectionConfig`]; every field has a working default.
#[derive(Debug, Clone, Default)]
pub struct DetectionConfigBuilder {
    config: DetectionConfig,
}

impl DetectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_multi(mut self, include: bool) -> Self {
        self.config.loops.include_multi = include;
        self
    }
    pub fn main_layer_only(mut self, enabled: bool) -> Self {
        self.config.loops.main_layer_only = enabled;
        self
    }
    pub fn atom_index(mut self, index: usize) -> Self {
        self.config.surfaces.atom_index = index;
        self.config.evaluate.atom_index = index;
        self
    }
    pub fn surface_mode(mut self, mode: SurfaceMode) -> Self {
        self.config.surfaces.surface_mode = mode;
        self
    }
    pub fn polyline_mode(mut self, mode: PolylineMode) -> Self {
        self.config.evaluate.polyline_mode = mode;
        self
    }
    pub fn eps_collinear(mut self, eps: f64) -> Self {
        self.config.surfaces.eps_collinear = eps;
        self
    }
    pub fn eps_plane(mut self, eps: f64) -> Self {
        self.config.evaluate.eps_plane = eps;
        self
    }
    pub fn eps_polygon(mut self, eps: f64) -> Self {
        self.config.evaluate.eps_polygon = eps;
        self
    }
    pub fn eps_triangle(mut self, eps: f64) -> Self {
        self.config.evaluate.eps_triangle = eps;
        self
    }
    pub fn early_exit(mut self, enabled: bool) -> Self {
        self.config.evaluate.early_exit = enabled;
        self
    }

    pub fn build(self) -> DetectionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = DetectionConfig::default();
        assert!(config.loops.include_multi);
        assert!(!config.loops.main_layer_only);
        assert_eq!(config.surfaces.atom_index, 0);
        assert_eq!(config.surfaces.eps_collinear, 1e-6);
        assert_eq!(config.surfaces.surface_mode, SurfaceMode::TrianglePlanes);
        assert_eq!(config.evaluate.atom_index_p, 0);
        assert_eq!(config.evaluate.atom_index_c4, 1);
        assert_eq!(config.evaluate.polyline_mode, PolylineMode::SingleAtom);
        assert_eq!(config.evaluate.eps_plane, 1e-2);
        assert_eq!(config.evaluate.eps_polygon, 1e-2);
        assert_eq!(config.evaluate.eps_triangle, 1e-8);
        assert!(!config.evaluate.early_exit);
    }

    #[test]
    fn builder_overrides_selected_fields() {
        let config = DetectionConfigBuilder::new()
            .surface_mode(SurfaceMode::BestFitPlane)
            .atom_index(1)
            .early_exit(true)
            .build();
        assert_eq!(config.surfaces.surface_mode, SurfaceMode::BestFitPlane);
        assert_eq!(config.surfaces.atom_index, 1);
        assert_eq!(config.evaluate.atom_index, 1);
        assert!(config.evaluate.early_exit);
        assert_eq!(config.evaluate.eps_plane, 1e-2);
    }
}
