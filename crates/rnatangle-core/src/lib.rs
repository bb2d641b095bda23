//! # RNAtangle Core Library
//!
//! A fast, deterministic geometric filter that decides whether an RNA 3-D
//! backbone threads through a surface spanned by one of the secondary-structure
//! loops that close it. It is designed to run as a cheap per-candidate filter
//! inside a structure-search loop: side-effect-free, re-evaluable many times,
//! and never failing on partially resolved structures.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`BasePair`,
//!   `Loop`, `Surface`, `EntanglementResult`) and the pure numeric kernels:
//!   3×3 symmetric eigen-analysis, plane fitting, 2-D polygon routines, and
//!   segment/plane/triangle intersection.
//!
//! - **[`engine`]: The Logic Core.** This layer implements the pipeline stages:
//!   pseudoknot main-layer extraction, loop decomposition, surface construction,
//!   and the entanglement evaluation itself, together with configuration,
//!   error types, and the trace reporter.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It composes the engine stages into the complete detection pipeline
//!   and re-exports the individual operations for callers that drive the
//!   stages themselves.

pub mod core;
pub mod engine;
pub mod workflows;
