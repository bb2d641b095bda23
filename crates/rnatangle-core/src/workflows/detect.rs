//! End-to-end entanglement detection.

use crate::core::models::coords::ResidueCoord;
use crate::core::models::loops::Loop;
use crate::core::models::pair::BasePair;
use crate::core::models::report::EntanglementResult;
use crate::core::models::surface::Surface;
use crate::engine::config::{DetectionConfig, LoopBuildOptions};
use crate::engine::error::InvalidInput;
use crate::engine::evaluate::evaluate_entanglement;
use crate::engine::loops::build_loops;
use crate::engine::main_layer::extract_main_layer;
use crate::engine::surfaces::build_surfaces;
use crate::engine::trace::{TraceEvent, TraceReporter};
use tracing::{info, instrument};

/// Everything the pipeline produced, intermediates included.
///
/// The intermediates let callers inspect why a verdict came out the way it
/// did: which pairing was actually used, which loops were found, and which
/// surfaces were testable.
#[derive(Debug, Clone)]
pub struct DetectionOutput {
    /// The pairing the loops were built from. Equal to the input unless
    /// main-layer extraction filtered pseudoknotted pairs out.
    pub base_pairs: Vec<BasePair>,
    pub loops: Vec<Loop>,
    pub surfaces: Vec<Surface>,
    pub result: EntanglementResult,
}

impl DetectionOutput {
    pub fn entangled(&self) -> bool {
        self.result.entangled()
    }
}

/// Runs the full detection pipeline on one structure.
///
/// # Arguments
///
/// * `base_pairs` - The base pairing, possibly pseudoknotted.
/// * `n_res` - Number of residues in the chain (1-based indexing).
/// * `coords` - Backbone coordinates, sparse; missing residues are tolerated.
/// * `config` - Pipeline configuration; see [`DetectionConfig`](crate::engine::config::DetectionConfig).
/// * `reporter` - Diagnostics sink; pass [`TraceReporter::new`] for silence.
///
/// # Errors
///
/// Returns [`InvalidInput`] if the pairing is inconsistent (out-of-range
/// indices, self-pairs, a residue paired twice) or `n_res` is zero.
#[instrument(skip_all, name = "detect_entanglement")]
pub fn run(
    base_pairs: &[BasePair],
    n_res: usize,
    coords: &[ResidueCoord],
    config: &DetectionConfig,
    reporter: &TraceReporter<'_>,
) -> Result<DetectionOutput, InvalidInput> {
    info!(
        pairs = base_pairs.len(),
        n_res,
        residues_with_coords = coords.len(),
        "Starting entanglement detection."
    );

    // Phase 1: Pseudoknot Pre-Filter (Optional)
    let used_pairs: Vec<BasePair> = if config.loops.main_layer_only {
        reporter.report(TraceEvent::PhaseStart { name: "main_layer" });
        let layer = extract_main_layer(base_pairs)?;
        reporter.report(TraceEvent::MainLayerExtracted {
            kept: layer.len(),
            dropped: base_pairs.len() - layer.len(),
        });
        reporter.report(TraceEvent::PhaseFinish);
        layer
    } else {
        base_pairs.to_vec()
    };

    // Phase 2: Loop Decomposition
    reporter.report(TraceEvent::PhaseStart { name: "loops" });
    let loop_options = LoopBuildOptions {
        include_multi: config.loops.include_multi,
        main_layer_only: false,
    };
    let loops = build_loops(&used_pairs, n_res, &loop_options)?;
    reporter.report(TraceEvent::LoopsBuilt { count: loops.len() });
    reporter.report(TraceEvent::PhaseFinish);

    // Phase 3: Surface Construction
    reporter.report(TraceEvent::PhaseStart { name: "surfaces" });
    let surfaces = build_surfaces(coords, &loops, &config.surfaces);
    for surface in &surfaces {
        reporter.report(TraceEvent::SurfaceBuilt {
            loop_id: surface.loop_id,
            kind: surface.kind,
            testable: surface.is_testable(),
            triangles: surface.triangles.len(),
        });
    }
    reporter.report(TraceEvent::PhaseFinish);

    // Phase 4: Puncture Evaluation
    reporter.report(TraceEvent::PhaseStart { name: "evaluate" });
    let result = evaluate_entanglement(coords, &surfaces, &config.evaluate);
    for hit in &result.hits {
        reporter.report(TraceEvent::Hit {
            loop_id: hit.loop_id,
            segment_id: hit.segment_id,
        });
    }
    reporter.report(TraceEvent::PhaseFinish);

    info!(
        k = result.k,
        loops = loops.len(),
        "Entanglement detection finished."
    );

    Ok(DetectionOutput {
        base_pairs: used_pairs,
        loops,
        surfaces,
        result,
    })
}
