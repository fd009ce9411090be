//! Command line arguments and constants.

use crate::processing::InvalidAddressPolicy;
use clap::{Parser, ValueEnum};

/// Default Azure Resource Manager endpoint.
pub const ARM_ENDPOINT: &str = "https://management.azure.com";
/// API version used to list network interfaces.
pub const NETWORK_API_VERSION: &str = "2023-09-01";
/// Largest `az` output accepted, in bytes.
pub const MAX_CLI_OUTPUT: usize = 5_000_000;
/// Log pattern used when no log4rs.yml is present.
pub const LOG_PATTERN: &str = "{d(%H:%M:%S)} {h({l:5})} {t} - {m}{n}";
/// log4rs config file looked up in the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Which service lists the network interfaces.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Azure Resource Manager REST API, page by page.
    #[default]
    Arm,
    /// The `az` command line tool.
    Az,
}

/// Print the private IP of a VM's network interface that falls in a subnet.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Args {
    /// Name of the resource group holding the VM and its NICs.
    #[arg(short = 'g', default_value = "")]
    pub resource_group: String,

    /// Name of the VM.
    #[arg(short = 'n', default_value = "")]
    pub vm_name: String,

    /// Azure resource name of the NIC (not the full id); empty matches any NIC.
    #[arg(short = 'i', default_value = "")]
    pub nic_name: String,

    /// Subnet prefix the address must fall in.
    #[arg(short = 's', default_value = "0.0.0.0/0")]
    pub subnet_prefix: String,

    /// Subscription id used to build the VM resource id.
    #[arg(long, env = "AZURE_SUBSCRIPTION_ID", default_value = "")]
    pub subscription: String,

    /// Service used to list the NICs.
    #[arg(long, value_enum, default_value_t = Backend::Arm)]
    pub backend: Backend,

    /// Read NIC records from this JSON file instead of calling Azure.
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<String>,

    /// Reuse today's NIC cache file, or write one after listing.
    #[arg(long)]
    pub cache: bool,

    /// Directory holding the NIC cache files.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub cache_dir: String,

    /// Azure CLI executable used by the az backend.
    #[arg(long = "az", value_name = "PROGRAM", default_value = "az")]
    pub az_program: String,

    /// Warn about and skip malformed private addresses instead of failing.
    #[arg(long)]
    pub skip_invalid: bool,

    /// Bearer token for ARM instead of the default credential chain.
    #[arg(long, env = "AZURE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Azure Resource Manager endpoint.
    #[arg(long, default_value = ARM_ENDPOINT)]
    pub endpoint: String,

    /// Increase log verbosity (used when no log4rs.yml is present).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn invalid_address_policy(&self) -> InvalidAddressPolicy {
        if self.skip_invalid {
            InvalidAddressPolicy::Skip
        } else {
            InvalidAddressPolicy::Fail
        }
    }

    /// What produced a listing, used to key cache files: `az` or the ARM host.
    pub fn listing_origin(&self) -> String {
        match self.backend {
            Backend::Az => "az".to_string(),
            Backend::Arm => reqwest::Url::parse(&self.endpoint)
                .ok()
                .and_then(|url| url.host_str().map(str::to_string))
                .unwrap_or_else(|| self.endpoint.clone()),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
