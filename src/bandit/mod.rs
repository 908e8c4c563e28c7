//! Thompson-sampling decision core.
//!
//! - `Scale`: the ordinal outcome scale (`K` values) and rating coercion
//! - `OutcomeCounts`: one arm's Dirichlet concentration vector
//! - `BanditModel`: selects arms by posterior sampling and records outcomes
//! - `SharedBandit`: the same model behind a lock for concurrent callers
//!
//! Nothing in this module logs or performs I/O; callers own both.

pub mod counts;
pub mod model;
pub mod sampling;
pub mod scale;
pub mod shared;

pub use counts::{OutcomeCounts, PRIOR_PSEUDO_COUNT};
pub use model::{BanditModel, expected_outcome};
pub use scale::Scale;
pub use shared::SharedBandit;
