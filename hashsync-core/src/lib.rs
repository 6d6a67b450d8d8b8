//! Form state <-> URL fragment sync
//!
//! Pure logic with no browser dependency: the fragment codec, toggle
//! transition table and the [`HashParamSync`] operations, all running against
//! an injected [`Environment`].

pub mod config;
pub mod environment;
pub mod error;
pub mod fragment;
pub mod param_set;
pub mod sync;
pub mod toggle;

pub use config::{SyncConfig, ToggleStrategy};
pub use environment::Environment;
pub use error::SyncError;
pub use param_set::ParamSet;
pub use sync::{HashParamSync, RestoreReport};
pub use toggle::{ToggleAction, ToggleState};

#[cfg(feature = "test-utils")]
pub use environment::{EnvEvent, MemoryEnvironment};
