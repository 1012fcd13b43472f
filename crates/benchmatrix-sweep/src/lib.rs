//! Sweep expansion for benchmark catalogs.
//!
//! Two strategies run over the same validated catalog and runner registry:
//! - [`generate_full_sweep`] expands model × sequence length × search space
//!   into one entry per benchmark run, applying [`SweepFilters`]
//! - [`generate_runner_model_sweep`] picks one representative configuration
//!   per catalog entry and projects it onto every physical node of a runner
//!   type
//!
//! Both are pure functions of their inputs. Every emitted entry is checked
//! against the output schema before it is returned, and any failure aborts
//! the whole expansion.

mod emit;
pub mod error;
pub mod filters;
pub mod full_sweep;
pub mod seq_len;
pub mod smoke;
pub mod stepping;

pub use error::{Result, SweepError};
pub use filters::{NodeMode, SweepFilters};
pub use full_sweep::generate_full_sweep;
pub use seq_len::{MAX_MODEL_LEN_HEADROOM, SEQ_LEN_MNEMONICS, SeqLen};
pub use smoke::{
    SMOKE_TEST_EXP_SUFFIX, SMOKE_TEST_MAX_MODEL_LEN, SMOKE_TEST_SEQ_LEN, SmokeTestRequest,
    generate_runner_model_sweep,
};
pub use stepping::{StepSize, concurrency_steps};
