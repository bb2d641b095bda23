//! # Geometry Module
//!
//! Pure numeric kernels shared by the surface builder and the evaluator.
//! All routines are deterministic and total: degenerate inputs (fewer than
//! three points, zero-length normals, collinear point sets) produce invalid
//! planes, empty triangulations, or `None`, never panics.
//!
//! - **Eigen-analysis** ([`eigen`]) - cyclic Jacobi decomposition of symmetric
//!   3×3 matrices
//! - **Planes** ([`plane`]) - best-fit plane and segment-plane intersection
//! - **Triangles** ([`triangle`]) - segment-triangle intersection
//! - **Polygons** ([`polygon`]) - convex hull, point-in-polygon, ear clipping

pub mod eigen;
pub mod plane;
pub mod polygon;
pub mod triangle;
