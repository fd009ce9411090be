//! Azure Resource Manager listing of network interfaces.
//!
//! Lists `Microsoft.Network/networkInterfaces` in a resource group one page
//! at a time, following `nextLink` until the service stops returning one.

use crate::config;
use crate::models::NetworkInterface;
use azure_core::auth::TokenCredential;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

/// One page of a network interface listing.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct NicListPage {
    /// Records on this page.
    #[serde(default)]
    pub value: Vec<NetworkInterface>,
    /// URL of the next page, absent on the last one.
    #[serde(rename = "nextLink", default)]
    pub next_link: Option<String>,
}

/// URL of the first page of NICs in `resource_group`.
pub fn list_url(endpoint: &str, subscription_id: &str, resource_group: &str) -> String {
    format!(
        "{endpoint}/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Network/networkInterfaces?api-version={version}",
        endpoint = endpoint.trim_end_matches('/'),
        version = config::NETWORK_API_VERSION,
    )
}

/// Token scope for `endpoint`.
pub fn scope(endpoint: &str) -> String {
    format!("{}/.default", endpoint.trim_end_matches('/'))
}

/// Decode one page, naming the JSON path on failure.
pub fn parse_page(body: &str, page_no: usize) -> Result<NicListPage, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    let page = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", body);
        format!(
            "Error parsing JSON page {}: path={} error={}",
            page_no,
            e.path(),
            e
        )
    })?;
    Ok(page)
}

/// Reject a `nextLink` that points back at the page just fetched.
fn check_next_link(current: &str, next: Option<String>) -> Result<Option<String>, Box<dyn Error>> {
    match next {
        Some(next) if next == current => {
            Err("nextLink not unique - possible infinite loop".into())
        }
        next => Ok(next),
    }
}

/// How requests to ARM are authorised.
pub enum ArmAuth {
    /// Tokens from an Azure credential (default credential chain).
    Credential(Arc<dyn TokenCredential>),
    /// A token fetched beforehand, e.g. `az account get-access-token`.
    Bearer(String),
}

impl ArmAuth {
    async fn token(&self, scope: &str) -> Result<String, Box<dyn Error>> {
        match self {
            ArmAuth::Credential(credential) => {
                let token = credential
                    .get_token(&[scope])
                    .await
                    .map_err(|e| format!("failed to obtain an Azure token: {e}"))?;
                Ok(token.token.secret().to_string())
            }
            ArmAuth::Bearer(token) => Ok(token.clone()),
        }
    }
}

/// Pager over the NICs of one resource group.
pub struct ArmPager {
    client: reqwest::Client,
    auth: ArmAuth,
    scope: String,
    next_url: Option<String>,
    pages_fetched: usize,
    records_fetched: usize,
}

impl ArmPager {
    pub fn new(auth: ArmAuth, endpoint: &str, subscription_id: &str, resource_group: &str) -> Self {
        ArmPager {
            client: reqwest::Client::new(),
            auth,
            scope: scope(endpoint),
            next_url: Some(list_url(endpoint, subscription_id, resource_group)),
            pages_fetched: 0,
            records_fetched: 0,
        }
    }

    /// Use `client` for requests instead of a default one.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// True while another page may be fetched.
    pub fn more(&self) -> bool {
        self.next_url.is_some()
    }

    /// Fetch the next page, `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<NetworkInterface>>, Box<dyn Error>> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };
        log::debug!("GET {url}");

        let token = self.auth.token(&self.scope).await?;
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| format!("failed to get page {} of network interfaces: {e}", self.pages_fetched))?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log::warn!("{status} from {url}");
            return Err(format!(
                "failed to get page {} of network interfaces: {status} {body}",
                self.pages_fetched
            )
            .into());
        }

        let page = parse_page(&body, self.pages_fetched)?;
        self.next_url = check_next_link(&url, page.next_link)?;
        self.pages_fetched += 1;
        self.records_fetched += page.value.len();

        log::info!(
            "got page#{:2} record_count=+{:3} => {:3} more={}",
            self.pages_fetched,
            page.value.len(),
            self.records_fetched,
            self.more(),
        );
        Ok(Some(page.value))
    }
}
