// SPDX-License-Identifier: MIT OR Apache-2.0
//! Closed schemas for benchmark sweep generation.
//!
//! This crate owns three shapes:
//! - the configuration catalog (`validate_master_config`), a mapping from a
//!   configuration name to a single-node or multi-node master entry
//! - the runner registry (`validate_runner_config`), a mapping from runner
//!   type to its physical nodes
//! - the generated matrix entries (`validate_matrix_entry`)
//!
//! Every record is decoded strictly: undeclared fields are rejected, and the
//! concurrency range/list invariant is enforced while decoding, so a value of
//! any public type here has already passed validation.
//!
//! # Quick start
//!
//! ```rust
//! use benchmatrix_schema::{MasterConfigEntry, validate_master_config};
//!
//! let doc: serde_yaml::Value = serde_yaml::from_str(r#"
//! gptoss-fp4-b200-vllm:
//!   image: vllm/vllm-openai:v0.11.0
//!   model: openai/gpt-oss-120b
//!   model-prefix: gptoss
//!   precision: fp4
//!   framework: vllm
//!   runner: b200
//!   multinode: false
//!   seq-len-configs:
//!     - isl: 1024
//!       osl: 1024
//!       search-space:
//!         - { tp: 1, conc-start: 4, conc-end: 128 }
//! "#).unwrap();
//!
//! let catalog = validate_master_config(&doc).unwrap();
//! let entry = catalog.get("gptoss-fp4-b200-vllm").unwrap();
//! assert!(matches!(entry, MasterConfigEntry::SingleNode(_)));
//! ```

pub mod catalog;
pub mod concurrency;
pub mod error;
mod fields;
pub mod matrix;
pub mod runners;

pub use catalog::{
    Catalog, CatalogEntry, MasterConfigEntry, MasterEntry, MultiNodeMasterEntry,
    MultiNodeSearchSpace, SeqLenConfig, SingleNodeMasterEntry, SingleNodeSearchSpace,
    SpecDecoding, WorkerConfig, validate_master_config,
};
pub use concurrency::{ConcurrencyError, ConcurrencySpec};
pub use error::{Result, RunnerIssue, SchemaError};
pub use matrix::{MatrixEntry, MultiNodeMatrixEntry, SingleNodeMatrixEntry, validate_matrix_entry};
pub use runners::{RunnerRegistry, validate_runner_config};
