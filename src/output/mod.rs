//! Output of lookup results.
//!
//! - [`terminal`] - One address per line on stdout

mod terminal;

pub use terminal::write_address;
