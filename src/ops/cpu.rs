//! CPU elementwise kernels.
//!
//! # CPU Backend
//!
//! Every node operation reduces to one elementwise kernel: combine two tensors
//! into an output of a given broadcast shape. Operands are aligned on their
//! trailing dimensions and any size-1 (or missing) dimension is repeated.
//!
//! Two variants are provided:
//! - [`zip_with`] — parallel execution using [`rayon`](https://docs.rs/rayon)
//! - [`zip_with_serial`] — plain iterators on the calling thread
//!
//! Both produce bit-identical results since each element is computed independently.
//!
//! Shape checks live in [`super::dispatch`]; these kernels assume `out` is the
//! broadcast shape of both inputs.

use crate::tensors::{Ten64, Tensor};
use rayon::prelude::*;

/// Row-major strides of `shape` laid out against `out`, with 0 for broadcast dims.
fn broadcast_strides(shape: &[usize], out: &[usize]) -> Vec<usize> {
    let lead = out.len() - shape.len();
    let mut strides = vec![0; out.len()];
    let mut acc = 1;
    for (d, &n) in shape.iter().enumerate().rev() {
        if n != 1 {
            strides[lead + d] = acc;
        }
        acc *= n;
    }
    strides
}

/// Maps a flat output index to a flat input offset.
fn offset(mut i: usize, out: &[usize], strides: &[usize]) -> usize {
    let mut off = 0;
    for (&n, &s) in out.iter().zip(strides).rev() {
        off += (i % n) * s;
        i /= n;
    }
    off
}

/// Combines `a` and `b` elementwise into a tensor of shape `out` on the rayon pool.
pub fn zip_with<F>(a: &Ten64, b: &Ten64, out: &[usize], f: F) -> Ten64
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    if a.shape == b.shape {
        let data = a
            .data
            .par_iter()
            .zip(&b.data)
            .map(|(&x, &y)| f(x, y))
            .collect();
        return Tensor::new(out.to_vec(), data);
    }

    let (sa, sb) = (broadcast_strides(&a.shape, out), broadcast_strides(&b.shape, out));
    let len = out.iter().product::<usize>();
    let data = (0..len)
        .into_par_iter()
        .map(|i| f(a.data[offset(i, out, &sa)], b.data[offset(i, out, &sb)]))
        .collect();
    Tensor::new(out.to_vec(), data)
}

/// Single-threaded counterpart of [`zip_with`].
pub fn zip_with_serial<F>(a: &Ten64, b: &Ten64, out: &[usize], f: F) -> Ten64
where
    F: Fn(f64, f64) -> f64,
{
    if a.shape == b.shape {
        return Tensor::new(
            out.to_vec(),
            a.data.iter().zip(&b.data).map(|(&x, &y)| f(x, y)).collect(),
        );
    }

    let (sa, sb) = (broadcast_strides(&a.shape, out), broadcast_strides(&b.shape, out));
    let len = out.iter().product::<usize>();
    let data = (0..len)
        .map(|i| f(a.data[offset(i, out, &sa)], b.data[offset(i, out, &sb)]))
        .collect();
    Tensor::new(out.to_vec(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor;

    #[test]
    fn parallel_and_serial_agree() {
        let f = |x: f64, y: f64| x / y - x * y;

        let a = tensor!([[1.0, -2.0, 3.0], [4.0, 5.0, -6.0]]);
        let b = tensor!([[0.5, 0.25, -2.0], [8.0, 1.0, 3.0]]);
        assert_eq!(zip_with(&a, &b, &[2, 3], f), zip_with_serial(&a, &b, &[2, 3], f));

        let col = tensor!([[1.5], [-2.0]]);
        let row = tensor!([0.5, 4.0, -1.0]);
        assert_eq!(
            zip_with(&col, &row, &[2, 3], f),
            zip_with_serial(&col, &row, &[2, 3], f)
        );
    }

    #[test]
    fn scalar_side_broadcasts() {
        let v = tensor!([1.0, 2.0, 4.0]);
        let s = Ten64::scalar(8.0);
        assert_eq!(zip_with(&s, &v, &[3], |x, y| x / y).data, vec![8.0, 4.0, 2.0]);
        assert_eq!(zip_with_serial(&v, &s, &[3], |x, y| x - y).data, vec![-7.0, -6.0, -4.0]);
        assert_eq!(zip_with(&s, &s, &[], |x, y| x * y), Ten64::scalar(64.0));
    }

    #[test]
    fn size_one_dims_repeat() {
        let col = tensor!([[1.0], [2.0]]);
        let row = tensor!([[10.0, 20.0, 30.0]]);
        let out = zip_with(&col, &row, &[2, 3], |x, y| x + y);
        assert_eq!(out.shape, vec![2, 3]);
        assert_eq!(out.data, vec![11.0, 21.0, 31.0, 12.0, 22.0, 32.0]);

        let one = tensor!([2.0]);
        let v = tensor!([1.0, 2.0, 3.0]);
        assert_eq!(zip_with_serial(&one, &v, &[3], |x, y| x * y).data, vec![2.0, 4.0, 6.0]);
    }
}
