//! Error types for micronode.

use crate::node::{BinaryOp, NodeId};
use thiserror::Error;

/// Errors returned by tensor construction, graph operations and backward steps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Operand shapes cannot be combined elementwise.
    #[error("shape mismatch in {op}: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        op: BinaryOp,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },

    /// Element count does not match the product of the shape.
    #[error("shape {shape:?} is incompatible with {len} data elements")]
    DataLength { shape: Vec<usize>, len: usize },

    /// A local derivative cannot be stored at the operand's own shape.
    #[error("gradient for {node} would have shape {actual:?}, expected {expected:?}")]
    GradientShape {
        node: NodeId,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// The handle does not belong to this graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// A tensor literal could not be parsed.
    #[error("invalid tensor literal at byte {pos}: {reason}")]
    Parse { pos: usize, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
