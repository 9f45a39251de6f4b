//! Typed model of the visualization-grammar specification document.
//!
//! Everything in this crate is plain data that serializes to the grammar's JSON.
//! No chart semantics live here; see the `chartspec` crate for the builder.

pub mod data;
pub mod expr;
pub mod marks;
pub mod scale;
pub mod signal;
pub mod spec;

pub use expr::Expr;
pub use spec::Spec;
