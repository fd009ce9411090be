//! Azure CLI and Resource Manager interaction.
//!
//! This module handles all Azure-related operations:
//! - [`arm`] - Paged REST listing of network interfaces
//! - [`cli`] - Command execution for Azure CLI
//! - [`cache`] - Saved listings on disk
//! - [`source`] - One page-by-page interface over the above

mod arm;
mod cache;
mod cli;
mod source;

// Re-export public types and functions
pub use arm::{list_url, parse_page, ArmAuth, ArmPager, NicListPage};
pub use cache::{cache_file_path, read_nic_file, write_nic_file};
pub use cli::{list_nics, run};
pub use source::NicSource;
