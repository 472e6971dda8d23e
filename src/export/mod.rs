//! Diagnostic export of the transition graph.
//!
//! One-way only: contexts render to Graphviz DOT, nothing parses it back.

mod dot;

pub use dot::EdgeColor;
