//! Domain models for the NIC address lookup.
//!
//! This module contains the core data structures used throughout the application:
//! - [`SubnetPrefix`] - CIDR prefix with containment test
//! - [`NetworkInterface`] and [`IpConfiguration`] - ARM network interface records
//! - [`MatchCriteria`] - What a record must satisfy to be reported

mod criteria;
mod nic;
mod prefix;

// Re-export public types
pub use criteria::{vm_resource_id, MatchCriteria};
pub use nic::{
    IpConfiguration, IpConfigurationProperties, NetworkInterface, NetworkInterfaceProperties,
    SubResource,
};
pub use prefix::SubnetPrefix;
