//! Differentiable nodes and the arena that owns them.
//!
//! # One-Step Reverse Mode
//!
//! A [`Node`] pairs a tensor value with an optional gradient and a backward recipe.
//! Nodes live in a [`Graph`] arena and are addressed by copyable [`NodeId`] handles.
//!
//! **Key Features:**
//! - **Four operations:** add, sub, mul and div build a result node and record
//!   [`Backward::Binary`] with the operation and both operand handles.
//! - **Literal coercion:** raw values (`f64`, `Vec<f64>`, tensors) are accepted wherever an
//!   operand is expected and become non-tracking constant nodes.
//! - **Operator overloads:** [`Var`] borrows a graph and implements `+ - * /`, including
//!   `f64 / Var` for reversed division.
//!
//! ## Backward Pattern
//!
//! 1. **Forward** computes the result value elementwise and stores the recipe.
//! 2. **Backward** evaluates the local partial derivatives at the operands' current values.
//! 3. Each operand with `requires_grad` has its gradient **overwritten** with its partial.
//!
//! Backward is one step only: it never recurses into the operands' own recipes and never
//! accumulates. Running it twice, or on two consumers of the same node, leaves the last
//! written partial in place.
//!
//! ## Example
//! ```rust
//! use micronode::{tensor, Graph};
//!
//! let g = Graph::new();
//! let x = g.variable(tensor!([4.0]));
//! let y = g.variable(tensor!([2.0]));
//! let z = g.div(x, y).unwrap();
//! g.backward(z).unwrap();
//!
//! assert_eq!(g.value(z).unwrap().data, vec![2.0]);
//! assert_eq!(g.grad(x).unwrap().unwrap().data, vec![0.5]);
//! assert_eq!(g.grad(y).unwrap().unwrap().data, vec![-1.0]);
//! ```

use crate::error::{Error, Result};
use crate::ops::dispatch;
use crate::tensors::Ten64;
use core::cell::RefCell;
use core::fmt;
use core::ops::{Add, Div, Mul, Sub};
use core::ptr;

/// Handle to a node inside a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its graph's arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// The elementwise binary operations a node can be produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        })
    }
}

impl BinaryOp {
    /// Scalar forward formula.
    #[must_use]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }

    /// Elementwise forward value.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if the shapes do not broadcast together.
    pub fn forward(self, a: &Ten64, b: &Ten64) -> Result<Ten64> {
        dispatch::binary(self, a, b)
    }

    /// Partial derivative of the output w.r.t. the left operand, at the broadcast shape.
    ///
    /// | op  | d/da  |
    /// |-----|-------|
    /// | add | 1     |
    /// | sub | 1     |
    /// | mul | b     |
    /// | div | 1/b   |
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if `a` and `b` do not broadcast together.
    pub fn d_lhs(self, a: &Ten64, b: &Ten64) -> Result<Ten64> {
        match self {
            Self::Add | Self::Sub => Ok(a.ones_like()),
            Self::Mul => dispatch::zip_with(self, a, b, |_, y| y),
            Self::Div => dispatch::zip_with(self, a, b, |_, y| 1.0 / y),
        }
    }

    /// Partial derivative of the output w.r.t. the right operand, at the broadcast shape.
    ///
    /// | op  | d/db   |
    /// |-----|--------|
    /// | add | 1      |
    /// | sub | -1     |
    /// | mul | a      |
    /// | div | -a/b²  |
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if `a` and `b` do not broadcast together.
    pub fn d_rhs(self, a: &Ten64, b: &Ten64) -> Result<Ten64> {
        match self {
            Self::Add => Ok(b.ones_like()),
            Self::Sub => Ok(b.full_like(-1.0)),
            Self::Mul => dispatch::zip_with(self, a, b, |x, _| x),
            Self::Div => dispatch::zip_with(self, a, b, |x, y| -x / (y * y)),
        }
    }
}

/// The recipe a node runs when its backward step is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backward {
    /// Leaf or constant: nothing upstream.
    #[default]
    None,
    /// Produced by `op` from `lhs` and `rhs`.
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
}

/// A tensor value with an optional gradient and a one-step backward recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    value: Ten64,
    grad: Option<Ten64>,
    requires_grad: bool,
    backward: Backward,
}

impl Node {
    /// Creates a leaf node. The gradient starts absent and backward is a no-op.
    pub fn new(value: impl Into<Ten64>, requires_grad: bool) -> Self {
        Self {
            value: value.into(),
            grad: None,
            requires_grad,
            backward: Backward::None,
        }
    }

    #[must_use]
    pub fn value(&self) -> &Ten64 {
        &self.value
    }

    #[must_use]
    pub fn grad(&self) -> Option<&Ten64> {
        self.grad.as_ref()
    }

    #[must_use]
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    #[must_use]
    pub fn backward(&self) -> Backward {
        self.backward
    }
}

/// Either an existing node or a raw value to be wrapped as a constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Node(NodeId),
    Value(Ten64),
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Var<'_>> for Operand {
    fn from(v: Var<'_>) -> Self {
        Self::Node(v.id)
    }
}

impl From<Ten64> for Operand {
    fn from(t: Ten64) -> Self {
        Self::Value(t)
    }
}

impl From<&Ten64> for Operand {
    fn from(t: &Ten64) -> Self {
        Self::Value(t.clone())
    }
}

impl From<f64> for Operand {
    fn from(x: f64) -> Self {
        Self::Value(Ten64::scalar(x))
    }
}

impl From<Vec<f64>> for Operand {
    fn from(data: Vec<f64>) -> Self {
        Self::Value(data.into())
    }
}

impl<const N: usize> From<[f64; N]> for Operand {
    fn from(data: [f64; N]) -> Self {
        Self::Value(data.into())
    }
}

/// Arena owning every node created through it.
///
/// Operations take `&self`; gradients are written through interior mutability so
/// that several [`Var`] handles can share one graph.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: RefCell<Vec<Node>>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: RefCell::new(Vec::with_capacity(capacity)),
        }
    }

    /// Number of nodes, including auto-wrapped constants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    fn push(&self, node: Node) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        log::trace!(
            "{id}: shape {:?}, requires_grad={}, backward={:?}",
            node.value.shape,
            node.requires_grad,
            node.backward
        );
        nodes.push(node);
        id
    }

    fn get(nodes: &[Node], id: NodeId) -> Result<&Node> {
        nodes.get(id.0).ok_or(Error::UnknownNode(id))
    }

    /// Inserts a leaf node.
    #[must_use]
    pub fn leaf(&self, value: impl Into<Ten64>, requires_grad: bool) -> NodeId {
        self.push(Node::new(value, requires_grad))
    }

    /// Inserts a leaf whose gradient is tracked.
    #[must_use]
    pub fn variable(&self, value: impl Into<Ten64>) -> NodeId {
        self.leaf(value, true)
    }

    /// Inserts a leaf whose gradient is never written.
    #[must_use]
    pub fn constant(&self, value: impl Into<Ten64>) -> NodeId {
        self.leaf(value, false)
    }

    /// Runs `f` against a borrowed node. `f` must not touch the graph.
    fn with_node<R>(&self, id: NodeId, f: impl FnOnce(&Node) -> R) -> Result<R> {
        let nodes = self.nodes.borrow();
        Self::get(&nodes, id).map(f)
    }

    /// Snapshot of a node.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] if `id` is not in this graph.
    pub fn node(&self, id: NodeId) -> Result<Node> {
        self.with_node(id, Node::clone)
    }

    /// # Errors
    /// Returns [`Error::UnknownNode`] if `id` is not in this graph.
    pub fn value(&self, id: NodeId) -> Result<Ten64> {
        self.with_node(id, |n| n.value.clone())
    }

    /// # Errors
    /// Returns [`Error::UnknownNode`] if `id` is not in this graph.
    pub fn grad(&self, id: NodeId) -> Result<Option<Ten64>> {
        self.with_node(id, |n| n.grad.clone())
    }

    /// # Errors
    /// Returns [`Error::UnknownNode`] if `id` is not in this graph.
    pub fn requires_grad(&self, id: NodeId) -> Result<bool> {
        self.with_node(id, |n| n.requires_grad)
    }

    /// # Errors
    /// Returns [`Error::UnknownNode`] if `id` is not in this graph.
    pub fn backward_kind(&self, id: NodeId) -> Result<Backward> {
        self.with_node(id, |n| n.backward)
    }

    /// Overwrites the gradient of `id` with zeros shaped like its value.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] if `id` is not in this graph.
    pub fn zero_grad(&self, id: NodeId) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let node = nodes.get_mut(id.0).ok_or(Error::UnknownNode(id))?;
        node.grad = Some(node.value.zeros_like());
        Ok(())
    }

    /// `lhs + rhs`.
    ///
    /// # Errors
    /// [`Error::UnknownNode`] for foreign handles, [`Error::ShapeMismatch`] for incompatible shapes.
    pub fn add(&self, lhs: NodeId, rhs: impl Into<Operand>) -> Result<NodeId> {
        self.binary(BinaryOp::Add, lhs.into(), rhs.into())
    }

    /// `lhs - rhs`.
    ///
    /// # Errors
    /// [`Error::UnknownNode`] for foreign handles, [`Error::ShapeMismatch`] for incompatible shapes.
    pub fn sub(&self, lhs: NodeId, rhs: impl Into<Operand>) -> Result<NodeId> {
        self.binary(BinaryOp::Sub, lhs.into(), rhs.into())
    }

    /// `lhs * rhs`.
    ///
    /// # Errors
    /// [`Error::UnknownNode`] for foreign handles, [`Error::ShapeMismatch`] for incompatible shapes.
    pub fn mul(&self, lhs: NodeId, rhs: impl Into<Operand>) -> Result<NodeId> {
        self.binary(BinaryOp::Mul, lhs.into(), rhs.into())
    }

    /// `lhs / rhs`. Division by zero follows IEEE-754 (`inf`/`NaN`).
    ///
    /// # Errors
    /// [`Error::UnknownNode`] for foreign handles, [`Error::ShapeMismatch`] for incompatible shapes.
    pub fn div(&self, lhs: NodeId, rhs: impl Into<Operand>) -> Result<NodeId> {
        self.binary(BinaryOp::Div, lhs.into(), rhs.into())
    }

    /// Reversed division `lhs / rhs`, where the dividend may be a raw value.
    ///
    /// # Errors
    /// [`Error::UnknownNode`] for foreign handles, [`Error::ShapeMismatch`] for incompatible shapes.
    pub fn rdiv(&self, lhs: impl Into<Operand>, rhs: NodeId) -> Result<NodeId> {
        self.binary(BinaryOp::Div, lhs.into(), rhs.into())
    }

    /// Builds the result node of `op`, wrapping raw operands as constants.
    ///
    /// Nothing is inserted if the operands are rejected.
    ///
    /// # Errors
    /// [`Error::UnknownNode`] for foreign handles, [`Error::ShapeMismatch`] for incompatible shapes.
    pub fn binary(&self, op: BinaryOp, lhs: Operand, rhs: Operand) -> Result<NodeId> {
        let value = {
            let nodes = self.nodes.borrow();
            let a = match &lhs {
                Operand::Node(id) => &Self::get(&nodes, *id)?.value,
                Operand::Value(t) => t,
            };
            let b = match &rhs {
                Operand::Node(id) => &Self::get(&nodes, *id)?.value,
                Operand::Value(t) => t,
            };
            op.forward(a, b)?
        };

        let lhs = self.intern(lhs);
        let rhs = self.intern(rhs);
        Ok(self.push(Node {
            value,
            grad: None,
            requires_grad: false,
            backward: Backward::Binary { op, lhs, rhs },
        }))
    }

    fn intern(&self, operand: Operand) -> NodeId {
        match operand {
            Operand::Node(id) => id,
            Operand::Value(t) => self.constant(t),
        }
    }

    /// Runs the backward recipe of `id`, one step upstream.
    ///
    /// Each tracked operand has its gradient overwritten by its local partial derivative;
    /// untracked operands are left alone. When both operands are the same node the right-hand
    /// partial is written last. Leaves and constants do nothing.
    ///
    /// # Errors
    /// - [`Error::UnknownNode`] if `id` is not in this graph.
    /// - [`Error::GradientShape`] if a tracked operand was broadcast to a larger shape, so
    ///   its partial does not have the operand's shape. No gradient is written in that case.
    pub fn backward(&self, id: NodeId) -> Result<()> {
        let Backward::Binary { op, lhs, rhs } = self.backward_kind(id)? else {
            log::trace!("{id}: backward is a no-op");
            return Ok(());
        };

        let updates = {
            let nodes = self.nodes.borrow();
            let a = Self::get(&nodes, lhs)?;
            let b = Self::get(&nodes, rhs)?;

            let mut updates = Vec::with_capacity(2);
            if a.requires_grad {
                updates.push((lhs, a, op.d_lhs(&a.value, &b.value)?));
            }
            if b.requires_grad {
                updates.push((rhs, b, op.d_rhs(&a.value, &b.value)?));
            }

            updates
                .into_iter()
                .map(|(target, node, partial)| {
                    if partial.shape == node.value.shape {
                        Ok((target, partial))
                    } else {
                        Err(Error::GradientShape {
                            node: target,
                            expected: node.value.shape.clone(),
                            actual: partial.shape,
                        })
                    }
                })
                .collect::<Result<Vec<_>>>()?
        };

        log::debug!(
            "{id}: {op} backward writes {:?}",
            updates.iter().map(|(t, _)| *t).collect::<Vec<_>>()
        );

        let mut nodes = self.nodes.borrow_mut();
        for (target, partial) in updates {
            nodes[target.0].grad = Some(partial);
        }
        Ok(())
    }

    /// Operator-overloading handle for an existing node.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] if `id` is not in this graph.
    pub fn var(&self, id: NodeId) -> Result<Var<'_>> {
        self.with_node(id, |_| Var { graph: self, id })
    }

    /// Inserts a leaf and returns its operator-overloading handle.
    pub fn var_leaf(&self, value: impl Into<Ten64>, requires_grad: bool) -> Var<'_> {
        Var {
            graph: self,
            id: self.leaf(value, requires_grad),
        }
    }
}

/// A node handle bound to its graph, with arithmetic operators.
///
/// # Panics
/// The operators panic where [`Graph::binary`] would return an error (incompatible shapes),
/// and when combining handles from two different graphs.
#[derive(Debug, Clone, Copy)]
pub struct Var<'g> {
    graph: &'g Graph,
    id: NodeId,
}

impl<'g> Var<'g> {
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn graph(self) -> &'g Graph {
        self.graph
    }

    fn read<R>(self, f: impl FnOnce(&Node) -> R) -> R {
        f(&self.graph.nodes.borrow()[self.id.0])
    }

    #[must_use]
    pub fn value(self) -> Ten64 {
        self.read(|n| n.value.clone())
    }

    #[must_use]
    pub fn grad(self) -> Option<Ten64> {
        self.read(|n| n.grad.clone())
    }

    #[must_use]
    pub fn requires_grad(self) -> bool {
        self.read(|n| n.requires_grad)
    }

    pub fn zero_grad(self) {
        let mut nodes = self.graph.nodes.borrow_mut();
        let node = &mut nodes[self.id.0];
        node.grad = Some(node.value.zeros_like());
    }

    /// See [`Graph::backward`].
    ///
    /// # Errors
    /// Returns [`Error::GradientShape`] if a partial cannot be stored at its operand's shape.
    pub fn backward(self) -> Result<()> {
        self.graph.backward(self.id)
    }

    fn combine(self, op: BinaryOp, lhs: Operand, rhs: Operand) -> Self {
        match self.graph.binary(op, lhs, rhs) {
            Ok(id) => Self {
                graph: self.graph,
                id,
            },
            Err(e) => panic!("{e}"),
        }
    }
}

macro_rules! impl_var_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<'g> $trait for Var<'g> {
            type Output = Var<'g>;

            fn $method(self, rhs: Var<'g>) -> Var<'g> {
                assert!(
                    ptr::eq(self.graph, rhs.graph),
                    "cannot combine nodes from different graphs"
                );
                self.combine($op, self.id.into(), rhs.id.into())
            }
        }

        impl<'g> $trait<f64> for Var<'g> {
            type Output = Var<'g>;

            fn $method(self, rhs: f64) -> Var<'g> {
                self.combine($op, self.id.into(), rhs.into())
            }
        }

        impl<'g> $trait<Var<'g>> for f64 {
            type Output = Var<'g>;

            fn $method(self, rhs: Var<'g>) -> Var<'g> {
                rhs.combine($op, self.into(), rhs.id.into())
            }
        }
    };
}

impl_var_op!(Add, add, BinaryOp::Add);
impl_var_op!(Sub, sub, BinaryOp::Sub);
impl_var_op!(Mul, mul, BinaryOp::Mul);
impl_var_op!(Div, div, BinaryOp::Div);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor;

    #[test]
    fn leaves_start_without_gradient() {
        let g = Graph::new();
        let x = g.leaf(tensor!([1.0, 2.0]), true);
        let node = g.node(x).unwrap();
        assert_eq!(node.grad(), None);
        assert!(node.requires_grad());
        assert_eq!(node.backward(), Backward::None);
        assert_eq!(g.backward(x), Ok(()));
        assert_eq!(g.grad(x).unwrap(), None);
    }

    #[test]
    fn results_do_not_track_gradients() {
        let g = Graph::new();
        let x = g.variable(tensor!([1.0]));
        let y = g.variable(tensor!([2.0]));
        for z in [g.add(x, y), g.sub(x, y), g.mul(x, y), g.div(x, y)] {
            let z = z.unwrap();
            assert!(!g.requires_grad(z).unwrap());
            assert!(matches!(g.backward_kind(z).unwrap(), Backward::Binary { lhs, rhs, .. } if lhs == x && rhs == y));
        }
    }

    #[test]
    fn literal_operand_becomes_constant_node() {
        let g = Graph::new();
        let x = g.variable(tensor!([1.0, 2.0]));
        let z = g.add(x, vec![10.0, 20.0]).unwrap();
        assert_eq!(g.len(), 3);

        let Backward::Binary { rhs, .. } = g.backward_kind(z).unwrap() else {
            panic!("expected a binary recipe");
        };
        let wrapped = g.node(rhs).unwrap();
        assert_eq!(wrapped, Node::new(vec![10.0, 20.0], false));
    }

    #[test]
    fn rejected_operation_inserts_nothing() {
        let g = Graph::new();
        let x = g.variable(tensor!([1.0, 2.0]));
        let err = g.mul(x, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeMismatch {
                op: BinaryOp::Mul,
                lhs: vec![2],
                rhs: vec![3],
            }
        );
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn foreign_handles_are_reported() {
        let big = Graph::new();
        let _ = big.constant(1.0);
        let stray = big.constant(2.0);

        let g = Graph::new();
        let x = g.variable(1.0);
        assert_eq!(g.add(x, stray), Err(Error::UnknownNode(stray)));
        assert_eq!(g.zero_grad(stray), Err(Error::UnknownNode(stray)));
        assert!(g.var(stray).is_err());
        assert_eq!(stray.to_string(), "node#1");
    }

    #[test]
    fn same_node_on_both_sides_keeps_rhs_partial() {
        let g = Graph::new();
        let x = g.variable(tensor!([3.0]));
        let z = g.sub(x, x).unwrap();
        g.backward(z).unwrap();
        assert_eq!(g.grad(x).unwrap().unwrap().data, vec![-1.0]);
    }

    #[test]
    fn tracked_scalar_against_vector_is_refused() {
        let g = Graph::new();
        let s = g.variable(2.0);
        let v = g.variable(tensor!([1.0, 2.0, 3.0]));
        let z = g.mul(s, v).unwrap();
        assert_eq!(g.value(z).unwrap().data, vec![2.0, 4.0, 6.0]);
        assert_eq!(
            g.backward(z),
            Err(Error::GradientShape {
                node: s,
                expected: vec![],
                actual: vec![3],
            })
        );
        assert_eq!(g.grad(v).unwrap(), None);
    }

    #[test]
    fn scalar_literal_broadcasts_into_partials() {
        let g = Graph::new();
        let v = g.variable(tensor!([1.0, 2.0, 4.0]));
        let z = g.rdiv(8.0, v).unwrap();
        g.backward(z).unwrap();
        assert_eq!(g.value(z).unwrap().data, vec![8.0, 4.0, 2.0]);
        assert_eq!(g.grad(v).unwrap().unwrap().data, vec![-8.0, -2.0, -0.5]);
    }

    #[test]
    fn size_one_operands_broadcast_forward() {
        let g = Graph::new();
        let z = g.add(g.constant([2.0]), g.constant([1.0, 2.0, 3.0])).unwrap();
        assert_eq!(g.value(z).unwrap(), tensor!([3.0, 4.0, 5.0]));

        let col = g.constant(tensor!([[1.0], [2.0]]));
        let row = g.constant(tensor!([[1.0, 2.0, 3.0]]));
        let outer = g.mul(col, row).unwrap();
        assert_eq!(g.value(outer).unwrap().shape, vec![2, 3]);
        assert_eq!(g.value(outer).unwrap().data, vec![1.0, 2.0, 3.0, 2.0, 4.0, 6.0]);
        g.backward(outer).unwrap();
    }

    #[test]
    fn tracked_broadcast_operand_is_refused() {
        let g = Graph::new();
        let one = g.variable([2.0]);
        let v = g.variable(tensor!([1.0, 2.0, 3.0]));
        let z = g.mul(one, v).unwrap();
        assert_eq!(
            g.backward(z),
            Err(Error::GradientShape {
                node: one,
                expected: vec![1],
                actual: vec![3],
            })
        );
        assert_eq!(g.grad(v).unwrap(), None);

        let col = g.variable(tensor!([[1.0], [2.0]]));
        let row = g.constant(tensor!([[1.0, 2.0, 3.0]]));
        let w = g.div(col, row).unwrap();
        assert!(matches!(g.backward(w), Err(Error::GradientShape { node, .. }) if node == col));
        assert_eq!(g.grad(col).unwrap(), None);
    }
}
