//! # Core Module
//!
//! This module provides the fundamental building blocks for entanglement
//! detection: the value types that flow through the pipeline and the numeric
//! kernels that operate on them.
//!
//! ## Overview
//!
//! Everything in this module is stateless and deterministic. The geometry
//! kernels have defined behavior for every degenerate input (fewer than three
//! points, zero-length vectors, collinear or coplanar point sets) and signal
//! degeneracy through validity flags rather than errors, so that a partially
//! resolved structure can never crash the filter.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Base pairs, loops, residue
//!   coordinates, surfaces, segments, and the evaluation result types
//! - **Numeric Kernels** ([`geometry`]) - 3×3 symmetric eigen-decomposition,
//!   best-fit planes, convex hulls, ear-clipping triangulation, and
//!   segment/plane/triangle intersection tests

pub mod geometry;
pub mod models;
