//! Find the private IP of a VM's network interface within a subnet.
//!
//! Lists the network interfaces of a resource group page by page, keeps
//! those attached to the VM (and optionally with a given name), and writes
//! every private address inside the subnet prefix as soon as it is found.

pub mod azure;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use azure::NicSource;
use config::{Args, Backend};
use error::LookupError;
use models::{MatchCriteria, NetworkInterface, SubnetPrefix};
use processing::{for_each_match, match_addresses, InvalidAddressPolicy, MatchSummary};
use std::io::Write;
use std::path::Path;

/// Build the match criteria from the arguments, parsing the subnet prefix.
pub fn criteria_from_args(args: &Args) -> Result<MatchCriteria, LookupError> {
    let prefix = SubnetPrefix::new(&args.subnet_prefix)?;
    if args.subscription.is_empty() {
        log::warn!("AZURE_SUBSCRIPTION_ID is not set, the VM resource id has no subscription");
    }
    Ok(MatchCriteria::for_vm(
        &args.subscription,
        &args.resource_group,
        &args.vm_name,
        &args.nic_name,
        prefix,
    ))
}

/// Open the record source selected by the arguments.
pub fn open_source(args: &Args) -> Result<NicSource, LookupError> {
    if let Some(path) = &args.from_file {
        return Ok(NicSource::file(path));
    }
    match args.backend {
        Backend::Az => Ok(NicSource::az_cli(
            &args.az_program,
            &args.resource_group,
            &args.subscription,
        )),
        Backend::Arm => {
            let auth = match &args.access_token {
                Some(token) => azure::ArmAuth::Bearer(token.clone()),
                None => azure::ArmAuth::Credential(azure_identity::create_credential().map_err(
                    |e| LookupError::Upstream(format!("failed to obtain an Azure credential: {e}")),
                )?),
            };
            Ok(NicSource::Arm(azure::ArmPager::new(
                auth,
                &args.endpoint,
                &args.subscription,
                &args.resource_group,
            )))
        }
    }
}

/// Match one page of records and write the results to `out`.
pub fn emit_page<W: Write>(
    page: &[NetworkInterface],
    criteria: &MatchCriteria,
    policy: InvalidAddressPolicy,
    summary: &mut MatchSummary,
    out: &mut W,
) -> Result<(), LookupError> {
    for_each_match(match_addresses(page, criteria), policy, summary, |ip| {
        output::write_address(out, &ip)?;
        Ok(())
    })
}

/// Drain `source`, writing matches page by page.
pub async fn lookup<W: Write>(
    source: &mut NicSource,
    criteria: &MatchCriteria,
    policy: InvalidAddressPolicy,
    out: &mut W,
) -> Result<MatchSummary, LookupError> {
    let mut summary = MatchSummary::default();
    while let Some(page) = source.next_page().await.map_err(LookupError::upstream)? {
        emit_page(&page, criteria, policy, &mut summary, out)?;
    }
    Ok(summary)
}

/// Run a lookup as described by `args`, writing addresses to `out`.
pub async fn run<W: Write>(args: &Args, out: &mut W) -> Result<MatchSummary, LookupError> {
    // Prefix errors must surface before any listing starts.
    let criteria = criteria_from_args(args)?;
    let policy = args.invalid_address_policy();
    log::info!(
        "looking for {} nic={:?} in {} ({} - {})",
        criteria.target_vm_id(),
        criteria.nic_name_filter(),
        criteria.subnet_prefix(),
        criteria.subnet_prefix().lo(),
        criteria.subnet_prefix().hi(),
    );

    let summary = if args.cache && args.from_file.is_none() {
        let cache_file = azure::cache_file_path(
            &args.cache_dir,
            &args.subscription,
            &args.resource_group,
            &args.listing_origin(),
        );
        if Path::new(&cache_file).exists() {
            log::info!("Using cache file: {cache_file}");
            lookup(&mut NicSource::file(&cache_file), &criteria, policy, out).await?
        } else {
            log::warn!("Cache file not found: {cache_file}");
            let nics = open_source(args)?
                .collect_all()
                .await
                .map_err(LookupError::upstream)?;
            azure::write_nic_file(&cache_file, &nics).map_err(LookupError::upstream)?;
            let mut summary = MatchSummary::default();
            emit_page(&nics, &criteria, policy, &mut summary, out)?;
            summary
        }
    } else {
        lookup(&mut open_source(args)?, &criteria, policy, out).await?
    };

    log::info!(
        "{} matching addresses, {} skipped",
        summary.matched,
        summary.skipped.len()
    );
    Ok(summary)
}
