//! Core tensor data structures.
//!
//! # Dense Tensors
//!
//! This module defines the numeric array every node wraps: an N-dimensional, row-major
//! [`Tensor`] with a runtime shape.
//!
//! It supports:
//! - Construction from shapes and flat data, with checked and panicking variants
//! - Conversion of "array-like" input (`f64`, `Vec<f64>`, `[f64; N]`, slices) into tensors
//! - Shape-preserving constructors (`zeros_like`, `ones_like`, `full_like`)
//! - Parsing nested bracket literals such as `[[1, 2], [3, 4]]`
//! - The `tensor!` macro for compile-time literals
//!
//! ## Design Highlights
//! - A rank-0 tensor (`shape == []`) holds exactly one element and acts as a scalar
//! - Shape is stored as a `Vec<usize>` and enforced at runtime
//! - [`Ten64`] is the element type used by the autodiff graph
//!
//! ## Limitations
//! - Row-major only
//! - No slicing or reshaping
//!
//! ## Example
//!
//! ```rust
//! use micronode::tensors::Tensor;
//! let t = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! assert_eq!(t.shape, vec![2, 3]);
//! ```

use crate::error::Error;
use briny::prelude::{TrustedData, Validate, ValidationError};
use core::fmt;
use core::str::FromStr;

/// Represents an N-dimensional tensor with a shape and flat row-major data.
///
/// - `shape` defines the structure, e.g., `[2, 3]` for a 2×3 matrix.
/// - `data` holds the flattened content in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

/// Tensor of `f64` values, the value type carried by graph nodes.
pub type Ten64 = Tensor<f64>;

impl<T> Validate for Tensor<T> {
    fn validate(&self) -> core::result::Result<(), ValidationError> {
        if self.shape.iter().product::<usize>() != self.data.len() {
            return Err(ValidationError);
        }
        Ok(())
    }
}

impl<T> Tensor<T> {
    /// Creates a new tensor with the given shape and flat data.
    ///
    /// # Panics
    /// Panics if the number of elements in `data` does not match the shape product.
    pub fn new(shape: impl Into<Vec<usize>>, data: Vec<T>) -> Self {
        let shape = shape.into();
        assert_eq!(
            shape.iter().product::<usize>(),
            data.len(),
            "shape {:?} is incompatible with {} data elements",
            shape,
            data.len()
        );
        Self { shape, data }
    }

    /// Creates a new tensor, reporting a shape/data mismatch as an error.
    ///
    /// # Errors
    /// Returns [`Error::DataLength`] if `data.len()` differs from the shape product.
    pub fn try_new(shape: impl Into<Vec<usize>>, data: Vec<T>) -> crate::error::Result<Self> {
        let shape = shape.into();
        let (expected, len) = (shape.clone(), data.len());
        let trusted = TrustedData::new(Self { shape, data }).map_err(|_| Error::DataLength {
            shape: expected,
            len,
        })?;
        Ok(trusted.into_inner())
    }

    /// Number of dimensions (`0` for a scalar).
    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether this is a rank-0 tensor.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }
}

impl<T: Clone> Tensor<T> {
    /// Creates a tensor of `shape` with every element set to `value`.
    #[must_use]
    pub fn full(shape: impl Into<Vec<usize>>, value: T) -> Self {
        let shape = shape.into();
        let len = shape.iter().product();
        Self {
            shape,
            data: vec![value; len],
        }
    }

    /// Same shape as `self`, every element set to `value`.
    #[must_use]
    pub fn full_like(&self, value: T) -> Self {
        Self::full(self.shape.clone(), value)
    }
}

impl Ten64 {
    /// A rank-0 tensor holding `x`.
    #[must_use]
    pub fn scalar(x: f64) -> Self {
        Self {
            shape: Vec::new(),
            data: vec![x],
        }
    }

    #[must_use]
    pub fn zeros(shape: impl Into<Vec<usize>>) -> Self {
        Self::full(shape, 0.0)
    }

    #[must_use]
    pub fn ones(shape: impl Into<Vec<usize>>) -> Self {
        Self::full(shape, 1.0)
    }

    /// All-zero tensor with the shape of `self`.
    #[must_use]
    pub fn zeros_like(&self) -> Self {
        self.full_like(0.0)
    }

    /// All-one tensor with the shape of `self`.
    #[must_use]
    pub fn ones_like(&self) -> Self {
        self.full_like(1.0)
    }
}

impl From<f64> for Ten64 {
    fn from(x: f64) -> Self {
        Self::scalar(x)
    }
}

impl From<Vec<f64>> for Ten64 {
    fn from(data: Vec<f64>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }
}

impl From<&[f64]> for Ten64 {
    fn from(data: &[f64]) -> Self {
        Self::from(data.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Ten64 {
    fn from(data: [f64; N]) -> Self {
        Self::from(data.to_vec())
    }
}

impl From<&Ten64> for Ten64 {
    fn from(t: &Ten64) -> Self {
        t.clone()
    }
}

impl<T: fmt::Display> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_dim<T: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            shape: &[usize],
            data: &[T],
        ) -> fmt::Result {
            let Some((&n, rest)) = shape.split_first() else {
                return write!(f, "{}", data[0]);
            };
            let stride = rest.iter().product::<usize>();
            f.write_str("[")?;
            for i in 0..n {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_dim(f, rest, &data[i * stride..(i + 1) * stride])?;
            }
            f.write_str("]")
        }

        write_dim(f, &self.shape, &self.data)
    }
}

/// Defines a tensor from nested literal arrays.
///
/// Supports arbitrary dimensionality as long as sublists are uniform in shape.
///
/// # Example
/// ```
/// use micronode::tensor;
/// let t = tensor!([[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(t.shape, vec![2, 2]);
/// ```
#[macro_export]
macro_rules! tensor {
    ($lit:literal) => {
        $crate::tensors::Tensor::new(Vec::<usize>::new(), vec![$lit])
    };

    ([ $( [ $($row:tt)* ] ),+ $(,)? ]) => {{
        let children = vec![ $( $crate::tensor!([ $($row)* ]) ),+ ];
        let first_shape = &children[0].shape;
        assert!(children.iter().all(|c| c.shape == *first_shape),
            "ragged tensor literal (rows have mismatched shapes)");
        let mut shape = vec![children.len()];
        shape.extend_from_slice(first_shape);
        let mut data = Vec::with_capacity(children.len() * children[0].data.len());
        for c in children { data.extend(c.data); }
        $crate::tensors::Tensor::new(shape, data)
    }};

    ([ $( $x:expr ),+ $(,)? ]) => {{
        let data = vec![ $( $x ),+ ];
        $crate::tensors::Tensor::new(vec![data.len()], data)
    }};
}

/// Deepest bracket nesting the parser accepts.
pub const MAX_PARSE_DEPTH: usize = 64;

/// Recursive-descent reader for nested bracket literals.
///
/// Recursion is bounded by [`MAX_PARSE_DEPTH`].
struct Parser<'s> {
    src: &'s [u8],
    pos: usize,
    depth: usize,
    data: Vec<f64>,
}

impl<'s> Parser<'s> {
    fn err(&self, reason: &'static str) -> Error {
        Error::Parse {
            pos: self.pos,
            reason,
        }
    }

    fn skip_ws(&mut self) {
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.src.get(self.pos).copied()
    }

    /// Parses one element (number or list) and returns its shape.
    fn value(&mut self) -> Result<Vec<usize>, Error> {
        match self.peek() {
            Some(b'[') => self.list(),
            Some(b'-' | b'+' | b'.' | b'0'..=b'9' | b'i' | b'n' | b'I' | b'N') => {
                self.number()?;
                Ok(Vec::new())
            }
            Some(_) => Err(self.err("invalid char")),
            None => Err(self.err("unexpected EOF")),
        }
    }

    fn number(&mut self) -> Result<(), Error> {
        let start = self.pos;
        while self.pos < self.src.len()
            && (self.src[self.pos].is_ascii_alphanumeric()
                || matches!(self.src[self.pos], b'.' | b'+' | b'-'))
        {
            self.pos += 1;
        }
        let text = core::str::from_utf8(&self.src[start..self.pos])
            .map_err(|_| self.err("bad number"))?;
        let n = text.parse::<f64>().map_err(|_| Error::Parse {
            pos: start,
            reason: "bad number",
        })?;
        self.data.push(n);
        Ok(())
    }

    fn list(&mut self) -> Result<Vec<usize>, Error> {
        if self.depth == MAX_PARSE_DEPTH {
            return Err(self.err("nesting too deep"));
        }
        self.depth += 1;
        self.pos += 1;
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(vec![0]);
        }

        let mut count = 0usize;
        let mut inner: Option<Vec<usize>> = None;
        loop {
            let child = self.value()?;
            match &inner {
                Some(first) if *first != child => return Err(self.err("ragged tensor")),
                Some(_) => {}
                None => inner = Some(child),
            }
            count += 1;

            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    if self.peek() == Some(b']') {
                        return Err(self.err("trailing comma"));
                    }
                }
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => return Err(self.err("two values without comma")),
                None => return Err(self.err("unexpected EOF")),
            }
        }

        self.depth -= 1;
        let mut shape = vec![count];
        shape.extend(inner.unwrap_or_default());
        Ok(shape)
    }
}

/// Parses a bare number (rank-0) or a nested bracket list into a [`Ten64`].
///
/// # Format
/// Accepts JSON-style arrays (e.g. `[1, 2]` or `[[1.0, 2.0], [3.0, 4.0]]`) and the
/// non-finite spellings `inf`, `-inf` and `NaN`.
///
/// # Limitations
/// - Ragged arrays (non-uniform shapes) are rejected.
/// - Trailing commas are rejected.
impl FromStr for Ten64 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut p = Parser {
            src: s.as_bytes(),
            pos: 0,
            depth: 0,
            data: Vec::new(),
        };
        let shape = p.value()?;
        if p.peek().is_some() {
            return Err(p.err("trailing characters"));
        }
        Tensor::try_new(shape, p.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_reports_length_mismatch() {
        let err = Tensor::try_new(vec![2, 2], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            Error::DataLength {
                shape: vec![2, 2],
                len: 3
            }
        );
    }

    #[test]
    fn like_constructors_keep_shape() {
        let t = tensor!([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(t.zeros_like(), Tensor::new(vec![2, 3], vec![0.0; 6]));
        assert_eq!(t.ones_like(), Tensor::new(vec![2, 3], vec![1.0; 6]));
        assert_eq!(Ten64::scalar(7.0).zeros_like().shape, Vec::<usize>::new());
    }

    #[test]
    fn parse_nested_and_scalar() {
        let t: Ten64 = "[[1, 2], [3, 4.5]]".parse().unwrap();
        assert_eq!(t, tensor!([[1.0, 2.0], [3.0, 4.5]]));

        let s: Ten64 = " -2.5 ".parse().unwrap();
        assert_eq!(s, Ten64::scalar(-2.5));

        let e: Ten64 = "[]".parse().unwrap();
        assert_eq!(e.shape, vec![0]);
        assert!(e.is_empty());
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            "[[1, 2], [3]]".parse::<Ten64>(),
            Err(Error::Parse { reason: "ragged tensor", .. })
        ));
        assert!(matches!(
            "[1, 2,]".parse::<Ten64>(),
            Err(Error::Parse { reason: "trailing comma", .. })
        ));
        assert!(matches!(
            "[1 2]".parse::<Ten64>(),
            Err(Error::Parse { reason: "two values without comma", .. })
        ));
        assert!(matches!(
            "[1, x]".parse::<Ten64>(),
            Err(Error::Parse { pos: 4, .. })
        ));
        assert!("[1, 2".parse::<Ten64>().is_err());
        assert!("[1] 2".parse::<Ten64>().is_err());
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let deep = "[".repeat(100_000);
        assert!(matches!(
            deep.parse::<Ten64>(),
            Err(Error::Parse { reason: "nesting too deep", pos: MAX_PARSE_DEPTH })
        ));

        let ok = format!("{}1{}", "[".repeat(MAX_PARSE_DEPTH), "]".repeat(MAX_PARSE_DEPTH));
        assert_eq!(ok.parse::<Ten64>().unwrap().shape, vec![1; MAX_PARSE_DEPTH]);
    }

    #[test]
    fn macro_accepts_negative_elements() {
        let t = tensor!([[-1.0, 2.0], [3.0, -4.5]]);
        assert_eq!(t.shape, vec![2, 2]);
        assert_eq!(t.data, vec![-1.0, 2.0, 3.0, -4.5]);
        assert_eq!(tensor!(-2.0), Ten64::scalar(-2.0));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let t = tensor!([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(t.to_string(), "[[1, 2], [3, 4]]");
        assert_eq!(t.to_string().parse::<Ten64>().unwrap(), t);
        assert_eq!(Ten64::scalar(0.5).to_string(), "0.5");
    }
}
