//! Exit codes for the `calcapp` binary. Scripts depend on these.

pub const SUCCESS: i32 = 0;
pub const FAILED: i32 = 1; // Evaluation failed or history entry not found
pub const CONFIG_ERROR: i32 = 2; // Bad environment, flags or unusable history dir
