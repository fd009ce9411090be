//! Azure CLI command execution.
//!
//! Provides utilities for running Azure CLI commands and parsing their output.

use crate::config;
use crate::models::{
    IpConfiguration, IpConfigurationProperties, NetworkInterface, NetworkInterfaceProperties,
    SubResource,
};
use colored::Colorize;
use regex::Regex;
use serde::Deserialize;
use std::error::Error;
use std::process::Command;
use std::sync::OnceLock;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Run a shell command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings preserved.
///
/// # Returns
/// * `Ok(String)` - The stdout output on success
/// * `Err` - If the command fails or produces too much output
pub fn run(cmd: &str) -> Result<String, Box<dyn Error>> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd)
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    log::trace!("split cmds={:?}", cmds);

    let (program, args) = cmds.split_first().ok_or("Empty command")?;
    let mut command = Command::new(program);
    command.args(args);

    let output = command.output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        format!("Failed to execute command: {}", e)
    })?;

    if output.status.success() {
        log::debug!("Success cmd: {cmd}");
        log::debug!("Success output.stdout.len(): {}", output.stdout.len());

        if output.stdout.len() > config::MAX_CLI_OUTPUT {
            return Err(format!(
                "Response too large: {} bytes for command: {:?}",
                output.stdout.len(),
                cmds
            )
            .into());
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(format!("ERROR running: {stderr}").into());
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    Ok(stdout)
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}

/// IP configuration as printed by `az`, with `properties` flattened.
#[derive(Deserialize, Debug)]
struct AzIpConfiguration {
    name: Option<String>,
    #[serde(rename = "privateIPAddress", default)]
    private_ip_address: Option<String>,
    #[serde(rename = "privateIPAllocationMethod", default)]
    private_ip_allocation_method: Option<String>,
    #[serde(default)]
    primary: Option<bool>,
}

/// Network interface as printed by `az network nic list`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AzNic {
    #[serde(default)]
    name: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    virtual_machine: Option<SubResource>,
    #[serde(default)]
    ip_configurations: Vec<AzIpConfiguration>,
}

impl From<AzNic> for NetworkInterface {
    fn from(nic: AzNic) -> Self {
        NetworkInterface {
            name: nic.name,
            id: nic.id,
            location: nic.location,
            properties: NetworkInterfaceProperties {
                virtual_machine: nic.virtual_machine,
                ip_configurations: nic
                    .ip_configurations
                    .into_iter()
                    .map(|c| IpConfiguration {
                        name: c.name,
                        properties: IpConfigurationProperties {
                            private_ip_address: c.private_ip_address,
                            private_ip_allocation_method: c.private_ip_allocation_method,
                            primary: c.primary,
                        },
                    })
                    .collect(),
            },
        }
    }
}

/// Parse the JSON array printed by `az network nic list`.
fn parse_nic_list(output: &str) -> Result<Vec<NetworkInterface>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    let nics: Vec<AzNic> = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
        format!("Error parsing az output: path={} error={}", e.path(), e)
    })?;
    Ok(nics.into_iter().map(NetworkInterface::from).collect())
}

/// List the network interfaces of `resource_group` with the Azure CLI at `az_program`.
///
/// `az` follows the ARM pages itself, so this returns every record at once.
pub fn list_nics(
    az_program: &str,
    resource_group: &str,
    subscription_id: &str,
) -> Result<Vec<NetworkInterface>, Box<dyn Error>> {
    let mut cmd = format!("'{az_program}' network nic list --resource-group '{resource_group}'");
    if !subscription_id.is_empty() {
        cmd.push_str(&format!(" --subscription '{subscription_id}'"));
    }
    cmd.push_str(" --output json");

    let output = run(&cmd)?;
    let nics = parse_nic_list(&output)?;
    log::info!("az listed {} nics in {resource_group}", nics.len());
    Ok(nics)
}
