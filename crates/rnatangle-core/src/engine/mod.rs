//! # Engine Module
//!
//! The pipeline stages that turn a base-pairing pattern and 3-D coordinates
//! into an entanglement verdict, plus their configuration, error types, and
//! trace reporting.
//!
//! ## Overview
//!
//! Every stage is a pure function over its inputs: no shared mutable state, no
//! global caches, no I/O. Calls are independent of each other, so the pipeline
//! is safe to invoke concurrently on different candidates from parallel
//! workers without locking.
//!
//! ## Architecture
//!
//! - **Main-Layer Extraction** ([`main_layer`]) - maximum non-crossing subset
//!   of a possibly pseudoknotted base-pair set
//! - **Loop Building** ([`loops`]) - pair-map validation and decomposition
//!   into classified closed elements
//! - **Coordinate Mapping** (`coords`) - sparse residue coordinates into
//!   dense lookup tables and backbone segments
//! - **Surface Building** ([`surfaces`]) - per-loop boundary selection and
//!   plane/polygon or triangle-mesh construction
//! - **Evaluation** ([`evaluate`]) - segment-versus-surface puncture testing
//!   with skip masks and hit deduplication
//! - **Configuration** ([`config`]) - option structs with the filter's
//!   numerical defaults
//! - **Error Handling** ([`error`]) - the `InvalidInput` taxonomy
//! - **Tracing** ([`trace`]) - callback-based diagnostics reporting

pub mod config;
pub(crate) mod coords;
pub mod error;
pub mod evaluate;
pub mod loops;
pub mod main_layer;
pub mod surfaces;
pub mod trace;
