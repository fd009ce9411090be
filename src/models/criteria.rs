//! Match criteria for selecting a VM's network interface addresses.

use super::SubnetPrefix;

/// Build the fully-qualified resource id of a virtual machine.
///
/// # Examples
/// ```
/// use azure_nic_ip::models::vm_resource_id;
/// assert_eq!(
///     vm_resource_id("sub", "rg", "vm1"),
///     "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/vm1"
/// );
/// ```
pub fn vm_resource_id(subscription_id: &str, resource_group: &str, vm_name: &str) -> String {
    format!(
        "/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Compute/virtualMachines/{vm_name}"
    )
}

/// What a network interface and its addresses must satisfy to be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    target_vm_id: String,
    nic_name_filter: String,
    subnet_prefix: SubnetPrefix,
}

impl MatchCriteria {
    /// An empty `nic_name_filter` matches every interface name.
    pub fn new(target_vm_id: String, nic_name_filter: String, subnet_prefix: SubnetPrefix) -> Self {
        MatchCriteria {
            target_vm_id,
            nic_name_filter,
            subnet_prefix,
        }
    }

    /// Criteria for the VM `vm_name` in `resource_group` of `subscription_id`.
    pub fn for_vm(
        subscription_id: &str,
        resource_group: &str,
        vm_name: &str,
        nic_name_filter: &str,
        subnet_prefix: SubnetPrefix,
    ) -> Self {
        MatchCriteria::new(
            vm_resource_id(subscription_id, resource_group, vm_name),
            nic_name_filter.to_string(),
            subnet_prefix,
        )
    }

    pub fn target_vm_id(&self) -> &str {
        &self.target_vm_id
    }

    pub fn nic_name_filter(&self) -> &str {
        &self.nic_name_filter
    }

    pub fn subnet_prefix(&self) -> &SubnetPrefix {
        &self.subnet_prefix
    }
}
