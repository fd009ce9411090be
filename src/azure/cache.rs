//! Reading and writing network interface records as JSON files.
//!
//! Lets a run work from a saved listing instead of calling Azure.

use super::arm::NicListPage;
use crate::models::NetworkInterface;
use serde::Deserialize;
use std::error::Error;
use std::path::Path;

/// A saved listing: either one ARM page or a plain array of records.
#[derive(Deserialize)]
#[serde(untagged)]
enum NicFile {
    Page(NicListPage),
    List(Vec<NetworkInterface>),
}

/// Keep a file name part to `[A-Za-z0-9._-]`.
fn file_name_part(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Cache file for one listing, one per day.
///
/// The name carries everything that selects the listing, so a cache written
/// for one subscription or cloud is never read back for another.
pub fn cache_file_path(
    cache_dir: &str,
    subscription_id: &str,
    resource_group: &str,
    origin: &str,
) -> String {
    let now = chrono::Utc::now();
    let name = format!(
        "nic_cache_{}_{}_{}_{}.json",
        file_name_part(subscription_id),
        file_name_part(resource_group),
        file_name_part(origin),
        now.format("%Y-%m-%d")
    );
    Path::new(cache_dir).join(name).to_string_lossy().into_owned()
}

/// Read network interface records from `file`.
///
/// # Returns
/// * `Ok(Vec<NetworkInterface>)` - The records in file order
/// * `Err` - If the file does not exist or is not a listing
pub fn read_nic_file(file: &str) -> Result<Vec<NetworkInterface>, Box<dyn Error>> {
    if !Path::new(file).exists() {
        return Err(format!("NIC file does not exist: {file}").into());
    }
    log::info!("Reading NIC records from file: {file}");
    let json = std::fs::read_to_string(file)
        .map_err(|e| format!("Error reading NIC file {file}: {e}"))?;
    let parsed: NicFile =
        serde_json::from_str(&json).map_err(|e| format!("Error parsing NIC file {file}: {e}"))?;
    let nics = match parsed {
        NicFile::Page(page) => {
            if page.next_link.is_some() {
                log::warn!("{file} holds one page of a longer listing, nextLink is ignored");
            }
            page.value
        }
        NicFile::List(nics) => nics,
    };
    log::debug!("{} records in {file}", nics.len());
    Ok(nics)
}

/// Write `nics` to `file` as a JSON array.
pub fn write_nic_file(file: &str, nics: &[NetworkInterface]) -> Result<(), Box<dyn Error>> {
    let json =
        serde_json::to_string_pretty(nics).map_err(|e| format!("Error serializing JSON: {e}"))?;
    log::warn!("Writing {} NIC records to cache file: {file}", nics.len());
    std::fs::write(file, json).map_err(|e| format!("Error writing cache file {file}: {e}"))?;
    Ok(())
}
