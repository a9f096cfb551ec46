//! # hs-data
//!
//! Dataset collaborators for HyperSweep: locating the external svm toolchain,
//! rescaling datasets through `svm-scale`, and splitting a single dataset into
//! train/test halves with a seedable random source.

pub mod discover;
pub mod scale;
pub mod split;

pub use discover::ToolChain;
pub use scale::Scaler;
pub use split::{split_dataset, DEFAULT_SPLIT_SEED};
