//! Terminal output.
//!
//! - [`summary`] - what was looked up and peered

mod summary;

pub use summary::{print_summary, summary_lines};
