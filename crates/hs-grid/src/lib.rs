//! # hs-grid
//!
//! Parameter-grid generation and result aggregation for HyperSweep.
//!
//! Provides the cross-product grid over two log2 exponent ranges, the ordered
//! result table that cross-validation scores accumulate into, and the
//! deterministic best-candidate selection with its tie-break rule.

mod search;
mod table;

pub use search::ParamGrid;
pub use table::{BestSelection, ResultTable, TrialRecord};
