//! Operation Dispatch Layer
//!
//! This module checks operand shapes and then selects the kernel variant for
//! the global [`Backend`](crate::backend::Backend):
//! 1. `Cpu` — rayon-parallel kernels
//! 2. `Serial` — single-threaded kernels
//!
//! # Example
//! ```rust
//! use micronode::node::BinaryOp;
//! use micronode::ops::dispatch;
//! use micronode::tensor;
//!
//! let a = tensor!([1.0, 2.0]);
//! let b = tensor!([3.0, 4.0]);
//! let out = dispatch::binary(BinaryOp::Mul, &a, &b).unwrap();
//! assert_eq!(out.data, vec![3.0, 8.0]);
//! ```

use crate::backend::{get_backend, Backend};
use crate::error::{Error, Result};
use crate::node::BinaryOp;
use crate::tensors::Ten64;

/// Output shape of an elementwise `op` over `a` and `b`.
///
/// Shapes are aligned on their trailing dimensions. Each aligned pair must be
/// equal or contain a 1, and missing leading dimensions count as 1.
///
/// # Errors
/// Returns [`Error::ShapeMismatch`] if some aligned pair differs and neither is 1.
pub fn broadcast_shape(op: BinaryOp, a: &Ten64, b: &Ten64) -> Result<Vec<usize>> {
    if a.shape == b.shape {
        return Ok(a.shape.clone());
    }

    let rank = a.rank().max(b.rank());
    let dim = |shape: &[usize], i: usize| {
        let pad = rank - shape.len();
        if i < pad { 1 } else { shape[i - pad] }
    };

    (0..rank)
        .map(|i| match (dim(&a.shape, i), dim(&b.shape, i)) {
            (x, y) if x == y || y == 1 => Ok(x),
            (1, y) => Ok(y),
            _ => Err(Error::ShapeMismatch {
                op,
                lhs: a.shape.clone(),
                rhs: b.shape.clone(),
            }),
        })
        .collect()
}

/// Runs `f` elementwise over `a` and `b` on the active backend.
///
/// # Errors
/// Returns [`Error::ShapeMismatch`] if the operands do not broadcast together.
pub fn zip_with<F>(op: BinaryOp, a: &Ten64, b: &Ten64, f: F) -> Result<Ten64>
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    let out = broadcast_shape(op, a, b)?;
    Ok(match get_backend() {
        Backend::Serial => super::cpu::zip_with_serial(a, b, &out, f),
        Backend::Cpu => super::cpu::zip_with(a, b, &out, f),
    })
}

/// Computes the forward value of `op` on the active backend.
///
/// # Errors
/// Returns [`Error::ShapeMismatch`] if the operands cannot be combined.
pub fn binary(op: BinaryOp, a: &Ten64, b: &Ten64) -> Result<Ten64> {
    log::trace!(
        "dispatch {op} {:?} x {:?} on {:?}",
        a.shape,
        b.shape,
        get_backend()
    );
    zip_with(op, a, b, |x, y| op.apply(x, y))
}
