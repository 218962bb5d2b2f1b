//! micronode: one-step reverse-mode autodiff over dense tensors.
//!
//! A node wraps a tensor value, an optional gradient and a recipe that, when invoked,
//! writes the local partial derivatives of the operation that produced it into its two
//! operands.
//!
//! # Features
//!
//! - N-dimensional `f64` tensors with runtime shapes, literals and parsing.
//! - `add`, `sub`, `mul` and `div` nodes with per-operation backward recipes.
//! - Automatic wrapping of raw values into constant nodes, and `+ - * /` operators.
//! - Serial or rayon-parallel elementwise kernels, selected at runtime.
//!
//! # Scope
//!
//! - Backward runs exactly one operation upstream; it does not walk the graph.
//! - Gradients are overwritten, never accumulated.
//! - Values broadcast numpy-style; gradients are never reduced back to a broadcast operand.
//!
//! # Modules
//!
//! - [`tensors`] — Core tensor data structures.
//! - [`node`] — Nodes, the graph arena and backward recipes.
//! - [`ops`] — Elementwise kernels and backend dispatch.
//! - [`backend`] — Runtime kernel backend selection.
//! - [`error`] — Error taxonomy.
//! - [`approx`] — Approximate float comparison.
//!
//! # Example
//!
//! ```rust
//! use micronode::{tensor, Graph};
//!
//! let g = Graph::new();
//! let x = g.var_leaf(tensor!([2.0]), true);
//! let y = g.var_leaf(tensor!([3.0]), true);
//! let z = x * y;
//! z.backward().unwrap();
//!
//! assert_eq!(z.value().data, vec![6.0]);
//! assert_eq!(x.grad().unwrap().data, vec![3.0]);
//! assert_eq!(y.grad().unwrap().data, vec![2.0]);
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]
#![deny(unsafe_code)]

pub mod approx;
pub mod backend;
pub mod error;
pub mod node;
pub mod ops;
pub mod tensors;

pub use error::{Error, Result};
pub use node::{Backward, BinaryOp, Graph, Node, NodeId, Operand, Var};
pub use tensors::{Ten64, Tensor};
