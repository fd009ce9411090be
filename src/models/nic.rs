//! Azure network interface data model.
//!
//! Mirrors the ARM `Microsoft.Network/networkInterfaces` JSON shape, keeping
//! only the fields needed to match an interface to a VM and read its
//! private addresses.

use serde::{Deserialize, Serialize};

/// Reference to another ARM resource by id.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SubResource {
    /// Fully-qualified resource id.
    pub id: Option<String>,
}

/// Properties of a single IP configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IpConfigurationProperties {
    /// Private address, absent while a dynamic allocation is pending.
    #[serde(rename = "privateIPAddress", default)]
    pub private_ip_address: Option<String>,
    #[serde(rename = "privateIPAllocationMethod", default)]
    pub private_ip_allocation_method: Option<String>,
    #[serde(default)]
    pub primary: Option<bool>,
}

/// One IP configuration on an interface.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct IpConfiguration {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: IpConfigurationProperties,
}

impl IpConfiguration {
    /// Build a configuration carrying just a private address.
    pub fn with_address(address: Option<&str>) -> Self {
        IpConfiguration {
            name: None,
            properties: IpConfigurationProperties {
                private_ip_address: address.map(str::to_string),
                ..Default::default()
            },
        }
    }

    pub fn private_address(&self) -> Option<&str> {
        self.properties.private_ip_address.as_deref()
    }
}

/// Properties block of a network interface.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceProperties {
    /// The VM this interface is attached to, if any.
    #[serde(default)]
    pub virtual_machine: Option<SubResource>,
    #[serde(default)]
    pub ip_configurations: Vec<IpConfiguration>,
}

/// A network interface record as listed by the ARM API.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NetworkInterface {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub properties: NetworkInterfaceProperties,
}

impl NetworkInterface {
    /// Build an interface from its name, attached VM id and private addresses.
    pub fn new(name: &str, attached_vm_id: Option<&str>, addresses: &[Option<&str>]) -> Self {
        NetworkInterface {
            name: name.to_string(),
            id: None,
            location: None,
            properties: NetworkInterfaceProperties {
                virtual_machine: attached_vm_id.map(|id| SubResource {
                    id: Some(id.to_string()),
                }),
                ip_configurations: addresses
                    .iter()
                    .map(|a| IpConfiguration::with_address(*a))
                    .collect(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the attached VM, `None` when the interface is unattached.
    pub fn attached_vm_id(&self) -> Option<&str> {
        self.properties
            .virtual_machine
            .as_ref()
            .and_then(|vm| vm.id.as_deref())
    }

    pub fn ip_configurations(&self) -> &[IpConfiguration] {
        &self.properties.ip_configurations
    }
}
