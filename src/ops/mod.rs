//! # Elementwise Kernels
//!
//! This module holds the numeric kernels behind node operations and the layer
//! that picks one for the configured backend.
//!
//! ## Submodules
//!
//! - [`cpu`] — Serial and rayon-parallel elementwise kernels
//! - [`dispatch`] — Shape checks and backend switching
//!
//! ## Extending
//!
//! To add a new operation:
//!
//! 1. Add its scalar formula to [`BinaryOp`](crate::node::BinaryOp)
//! 2. Route it through [`dispatch::binary`] for the forward value
//! 3. Keep shape checks in `dispatch`, never in the kernels

pub mod cpu;
pub mod dispatch;
