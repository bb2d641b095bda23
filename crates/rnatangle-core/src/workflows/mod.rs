//! High-level detection workflows.
//!
//! ## Overview
//!
//! This layer is the public face of the crate. It composes the engine
//! operations into ready-to-use pipelines and re-exports the individual
//! building blocks for callers that want to run a single stage: extract a
//! pseudoknot-free pairing, decompose it into loops, build surfaces, or test
//! a backbone against prebuilt surfaces.
//!
//! ## Architecture
//!
//! Workflows own orchestration only: phase ordering, diagnostics, and the
//! aggregation of intermediate results. All semantics live in the engine
//! layer, all data types in the core layer.

pub mod detect;

pub use crate::engine::config::{
    DetectionConfig, DetectionConfigBuilder, EvaluateOptions, LoopBuildOptions, PolylineMode,
    SurfaceBuildOptions, SurfaceMode,
};
pub use crate::engine::error::InvalidInput;
pub use crate::engine::evaluate::evaluate_entanglement;
pub use crate::engine::loops::{build_loops, collect_multi_loop_pairs};
pub use crate::engine::main_layer::extract_main_layer;
pub use crate::engine::surfaces::build_surfaces;
pub use crate::engine::trace::{TraceEvent, TraceReporter};
pub use detect::{DetectionOutput, run};
