//! # Models Module
//!
//! Value types of the entanglement pipeline. Every entity here is created per
//! invocation from the supplied base pairs and coordinates; there is no
//! persistent store and no mutation after construction except by the builder
//! that owns the in-progress object.
//!
//! - **Pairing** ([`pair`]) - Base pairs with inert classification tags
//! - **Loops** ([`loops`]) - Closed secondary-structure elements
//! - **Coordinates** ([`coords`]) - Sparse residue → atom position tables
//! - **Surfaces** ([`surface`]) - Geometric loop approximations
//! - **Results** ([`report`]) - Backbone segments, hits, and the verdict

pub mod coords;
pub mod loops;
pub mod pair;
pub mod report;
pub mod surface;
