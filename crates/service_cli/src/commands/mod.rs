//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod estimate;
pub mod simulate;

use tracing::error;

use crate::Result;

/// Process exit status for a finished command
///
/// A failure is logged once through `tracing` and maps to status 1.
pub fn exit_status<T>(result: &Result<T>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}
