//! Matching network interface records against [`MatchCriteria`].

use crate::error::LookupError;
use crate::models::{MatchCriteria, NetworkInterface};
use std::net::{IpAddr, Ipv6Addr};

/// A private address as it parses from a record.
enum PrivateAddress {
    Plain(IpAddr),
    /// IPv6 with a zone (`fe80::1%eth0`); valid, but never inside a prefix.
    Zoned,
}

fn parse_private_address(address: &str) -> Option<PrivateAddress> {
    match address.split_once('%') {
        Some((base, zone)) => (!zone.is_empty() && base.parse::<Ipv6Addr>().is_ok())
            .then_some(PrivateAddress::Zoned),
        None => address.parse().ok().map(PrivateAddress::Plain),
    }
}

/// True when the record is attached to exactly the target VM.
pub fn matches_vm(nic: &NetworkInterface, criteria: &MatchCriteria) -> bool {
    nic.attached_vm_id() == Some(criteria.target_vm_id())
}

/// True when the name filter is empty or equals the record's name.
pub fn matches_name(nic: &NetworkInterface, criteria: &MatchCriteria) -> bool {
    criteria.nic_name_filter().is_empty() || criteria.nic_name_filter() == nic.name()
}

/// Lazily yield the private addresses of `records` that satisfy `criteria`.
///
/// Records are visited in order, and each record's IP configurations in
/// order. Configurations without an address are skipped. An address that
/// does not parse yields [`LookupError::AddressParse`]; what to do with it
/// is left to the consumer (see [`super::for_each_match`]).
pub fn match_addresses<'a, I>(
    records: I,
    criteria: &'a MatchCriteria,
) -> impl Iterator<Item = Result<IpAddr, LookupError>> + 'a
where
    I: IntoIterator<Item = &'a NetworkInterface>,
    I::IntoIter: 'a,
{
    records
        .into_iter()
        .filter(move |nic| matches_vm(nic, criteria) && matches_name(nic, criteria))
        .flat_map(move |nic| {
            log::debug!("nic {} is attached to the target vm", nic.name());
            nic.ip_configurations().iter().filter_map(move |cfg| {
                let address = cfg.private_address()?;
                match parse_private_address(address) {
                    None => Some(Err(LookupError::AddressParse {
                        nic: nic.name().to_string(),
                        address: address.to_string(),
                    })),
                    Some(PrivateAddress::Plain(ip)) if criteria.subnet_prefix().contains(&ip) => {
                        Some(Ok(ip))
                    }
                    Some(_) => {
                        log::trace!("{address} on {} is outside {}", nic.name(), criteria.subnet_prefix());
                        None
                    }
                }
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubnetPrefix;

    const TARGET: &str =
        "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/vm1";
    const OTHER: &str =
        "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/vm2";

    fn criteria(name: &str, prefix: &str) -> MatchCriteria {
        MatchCriteria::new(
            TARGET.to_string(),
            name.to_string(),
            SubnetPrefix::new(prefix).unwrap(),
        )
    }

    fn ok_addrs(records: &[NetworkInterface], c: &MatchCriteria) -> Vec<String> {
        match_addresses(records, c)
            .map(|r| r.unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_single_record_in_prefix() {
        let records = vec![NetworkInterface::new(
            "nic1",
            Some(TARGET),
            &[Some("10.0.0.5"), Some("192.168.1.1")],
        )];
        assert_eq!(ok_addrs(&records, &criteria("", "10.0.0.0/24")), vec!["10.0.0.5"]);
    }

    #[test]
    fn test_name_filter_selects_one_nic() {
        let records = vec![
            NetworkInterface::new("nic1", Some(TARGET), &[Some("10.0.0.8")]),
            NetworkInterface::new("nic2", Some(TARGET), &[Some("10.0.0.9")]),
        ];
        assert_eq!(
            ok_addrs(&records, &criteria("nic2", "10.0.0.0/24")),
            vec!["10.0.0.9"]
        );
    }

    #[test]
    fn test_other_vm_and_unattached_never_match() {
        let records = vec![
            NetworkInterface::new("nic1", Some(OTHER), &[Some("10.0.0.8")]),
            NetworkInterface::new("nic1", None, &[Some("10.0.0.9")]),
            // Identity is exact: case and trailing slash differences do not match.
            NetworkInterface::new("nic1", Some(&TARGET.to_uppercase()), &[Some("10.0.0.10")]),
            NetworkInterface::new("nic1", Some(&format!("{TARGET}/")), &[Some("10.0.0.11")]),
        ];
        assert!(ok_addrs(&records, &criteria("", "0.0.0.0/0")).is_empty());
    }

    #[test]
    fn test_all_addresses_with_default_prefix() {
        let records = vec![
            NetworkInterface::new("a", Some(TARGET), &[Some("10.0.0.5"), None, Some("172.16.0.1")]),
            NetworkInterface::new("b", Some(TARGET), &[]),
            NetworkInterface::new("c", Some(TARGET), &[Some("192.168.1.1")]),
        ];
        assert_eq!(
            ok_addrs(&records, &criteria("", "0.0.0.0/0")),
            vec!["10.0.0.5", "172.16.0.1", "192.168.1.1"]
        );
    }

    #[test]
    fn test_host_prefix_without_match_is_empty() {
        let records = vec![NetworkInterface::new(
            "nic1",
            Some(TARGET),
            &[Some("10.0.0.5"), Some("10.0.0.6")],
        )];
        assert!(ok_addrs(&records, &criteria("nic1", "10.0.0.7/32")).is_empty());
    }

    #[test]
    fn test_empty_name_is_matched_by_empty_filter() {
        let records = vec![NetworkInterface::new("", Some(TARGET), &[Some("10.0.0.5")])];
        assert_eq!(ok_addrs(&records, &criteria("", "10.0.0.0/8")), vec!["10.0.0.5"]);
        assert!(ok_addrs(&records, &criteria("nic1", "10.0.0.0/8")).is_empty());
    }

    #[test]
    fn test_invalid_address_yields_error() {
        let records = vec![NetworkInterface::new(
            "nic1",
            Some(TARGET),
            &[Some("not-an-ip"), Some("10.0.0.5")],
        )];
        let c = criteria("", "10.0.0.0/24");
        let mut results = match_addresses(&records, &c);
        match results.next() {
            Some(Err(LookupError::AddressParse { nic, address })) => {
                assert_eq!(nic, "nic1");
                assert_eq!(address, "not-an-ip");
            }
            other => panic!("expected AddressParse, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_address_on_other_vm_is_ignored() {
        let records = vec![NetworkInterface::new("nic1", Some(OTHER), &[Some("not-an-ip")])];
        assert!(ok_addrs(&records, &criteria("", "0.0.0.0/0")).is_empty());
    }

    #[test]
    fn test_zoned_ipv6_is_never_contained() {
        let records = vec![NetworkInterface::new(
            "nic1",
            Some(TARGET),
            &[Some("fe80::1%eth0"), Some("fe80::2")],
        )];
        assert_eq!(ok_addrs(&records, &criteria("", "::/0")), vec!["fe80::2"]);
        assert_eq!(ok_addrs(&records, &criteria("", "fe80::/10")), vec!["fe80::2"]);
    }

    #[test]
    fn test_bad_zoned_addresses_yield_errors() {
        for bad in ["fe80::1%", "10.0.0.5%eth0", "nope%eth0"] {
            let records = vec![NetworkInterface::new("nic1", Some(TARGET), &[Some(bad)])];
            let c = criteria("", "::/0");
            let got: Vec<_> = match_addresses(&records, &c).collect();
            assert!(
                matches!(got.as_slice(), [Err(LookupError::AddressParse { .. })]),
                "{bad}: {got:?}"
            );
        }
    }

    #[test]
    fn test_ipv6_addresses() {
        let records = vec![NetworkInterface::new(
            "nic1",
            Some(TARGET),
            &[Some("10.0.0.5"), Some("fd00:1::5")],
        )];
        assert_eq!(ok_addrs(&records, &criteria("", "fd00::/16")), vec!["fd00:1::5"]);
    }

    #[test]
    fn test_rerun_gives_same_output() {
        let records = vec![
            NetworkInterface::new("nic1", Some(TARGET), &[Some("10.0.0.5"), Some("10.0.0.6")]),
            NetworkInterface::new("nic2", Some(TARGET), &[Some("10.0.0.7")]),
        ];
        let c = criteria("", "10.0.0.0/24");
        assert_eq!(ok_addrs(&records, &c), ok_addrs(&records, &c));
    }

    #[test]
    fn test_no_duplicates_per_configuration() {
        let records = vec![NetworkInterface::new(
            "nic1",
            Some(TARGET),
            &[Some("10.0.0.5"), Some("10.0.0.6"), Some("10.0.0.7")],
        )];
        let got = ok_addrs(&records, &criteria("", "10.0.0.0/24"));
        assert_eq!(got.len(), 3);
        assert_eq!(got, vec!["10.0.0.5", "10.0.0.6", "10.0.0.7"]);
    }
}
