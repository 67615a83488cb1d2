//! Evaluator for ranking piece placements on a stacking-game board.
//!
//! This crate implements a two-level evaluation architecture on top of the
//! `stackfall-engine` placement simulator:
//!
//! 1. **Placement Evaluation** ([`placement_evaluator`]) - Scores a single
//!    simulated placement as a weighted sum of board-quality features.
//!
//! 2. **Move Evaluation** ([`move_evaluator`]) - Scores every candidate in
//!    a supplied move list and picks the index with the highest score.
//!
//! ```text
//! Move Evaluation (select best candidate index)
//!     ↓ uses
//! Placement Evaluation (score single placement)
//!     ↓ uses
//! Feature Extraction (measure the simulated board)
//! ```
//!
//! # Supporting Modules
//!
//! - [`board_feature`] - The six feature extractors (landing height, holes,
//!   eroded piece cells, row/column transitions, well sums) as pure
//!   functions over the simulated board.
//! - [`placement_analysis`] - Per-candidate simulation result with lazily
//!   cached feature values, so an evaluator only pays for the features it
//!   reads.
//!
//! # Design Principles
//!
//! Evaluation is deterministic and greedy: each candidate is simulated
//! exactly one ply deep, features are combined linearly under fixed
//! weights, and ties keep the earliest candidate. Every candidate works on
//! private copies of the board, so evaluations are independent and the live
//! board stays read-only for the whole decision.

pub mod board_feature;
pub mod move_evaluator;
pub mod placement_analysis;
pub mod placement_evaluator;
