//! # Game Graph
//!
//! The authored side of Tesserae - nodes, edges and property records exactly as
//! the graph editor produces them. This crate holds no runtime state; it is the
//! input that `sim_core` compiles into a live simulation.

pub mod edges;
pub mod error;
pub mod graph;
mod lenient;
pub mod nodes;

pub use edges::*;
pub use error::*;
pub use graph::*;
pub use nodes::*;
