pub mod diff;
pub mod diff_output;

pub use diff::cmd_diff;
