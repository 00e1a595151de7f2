//! Graph construction and representation
//!
//! The co-occurrence graph is built incrementally with [`builder::GraphBuilder`]
//! and frozen into [`csr::CsrGraph`] before rank propagation.

pub mod builder;
pub mod csr;
