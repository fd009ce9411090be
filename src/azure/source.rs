//! Page-by-page access to network interface records, whatever lists them.

use super::arm::ArmPager;
use super::{cache, cli};
use crate::models::NetworkInterface;
use std::error::Error;

/// Where records come from.
pub enum NicSource {
    /// ARM REST API, possibly many pages.
    Arm(ArmPager),
    /// `az network nic list`, one page.
    AzCli {
        az_program: String,
        resource_group: String,
        subscription_id: String,
        done: bool,
    },
    /// A saved JSON listing, one page.
    File { path: String, done: bool },
}

impl NicSource {
    pub fn az_cli(az_program: &str, resource_group: &str, subscription_id: &str) -> Self {
        NicSource::AzCli {
            az_program: az_program.to_string(),
            resource_group: resource_group.to_string(),
            subscription_id: subscription_id.to_string(),
            done: false,
        }
    }

    pub fn file(path: &str) -> Self {
        NicSource::File {
            path: path.to_string(),
            done: false,
        }
    }

    /// Fetch the next page of records, `None` when there are no more.
    pub async fn next_page(&mut self) -> Result<Option<Vec<NetworkInterface>>, Box<dyn Error>> {
        match self {
            NicSource::Arm(pager) => pager.next_page().await,
            NicSource::AzCli {
                az_program,
                resource_group,
                subscription_id,
                done,
            } => {
                if *done {
                    return Ok(None);
                }
                *done = true;
                cli::list_nics(az_program, resource_group, subscription_id).map(Some)
            }
            NicSource::File { path, done } => {
                if *done {
                    return Ok(None);
                }
                *done = true;
                cache::read_nic_file(path).map(Some)
            }
        }
    }

    /// Drain every remaining page into one list.
    pub async fn collect_all(&mut self) -> Result<Vec<NetworkInterface>, Box<dyn Error>> {
        let mut nics = Vec::new();
        while let Some(page) = self.next_page().await? {
            nics.extend(page);
        }
        Ok(nics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_yields_one_page() {
        let mut source = NicSource::file("src/tests/test_data/nic_test_cache_01.json");
        let page = source.next_page().await.unwrap().expect("first page");
        assert_eq!(page.len(), 5);
        assert!(source.next_page().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_collect_all() {
        let mut source = NicSource::file("src/tests/test_data/nic_test_cache_01.json");
        assert_eq!(source.collect_all().await.unwrap().len(), 5);
        assert!(source.collect_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let mut source = NicSource::file("src/tests/test_data/missing.json");
        assert!(source.next_page().await.is_err());
    }
}
