//! Network interface record processing.
//!
//! This module contains the filtering logic applied to listed records:
//! - [`matcher`] - VM, name and subnet matching of records
//! - [`policy`] - Handling of malformed addresses while consuming matches

mod matcher;
mod policy;

// Re-export public functions
pub use matcher::{match_addresses, matches_name, matches_vm};
pub use policy::{for_each_match, InvalidAddressPolicy, MatchSummary};
