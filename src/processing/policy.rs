//! What to do with addresses that fail to parse.

use crate::error::LookupError;
use colored::Colorize;
use std::net::IpAddr;

/// Handling of [`LookupError::AddressParse`] while consuming matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidAddressPolicy {
    /// Stop at the first malformed address.
    #[default]
    Fail,
    /// Log a warning, remember the error and keep going.
    Skip,
}

/// Counters and skipped errors from one or more [`for_each_match`] calls.
#[derive(Debug, Default)]
pub struct MatchSummary {
    pub matched: usize,
    pub skipped: Vec<LookupError>,
}

/// Feed every matching address to `sink`, applying `policy` to parse errors.
///
/// Matches produced before an error have already reached `sink` when the
/// error is returned.
pub fn for_each_match<I, F>(
    results: I,
    policy: InvalidAddressPolicy,
    summary: &mut MatchSummary,
    mut sink: F,
) -> Result<(), LookupError>
where
    I: IntoIterator<Item = Result<IpAddr, LookupError>>,
    F: FnMut(IpAddr) -> Result<(), LookupError>,
{
    for result in results {
        match result {
            Ok(ip) => {
                summary.matched += 1;
                sink(ip)?;
            }
            Err(e @ LookupError::AddressParse { .. }) if policy == InvalidAddressPolicy::Skip => {
                log::warn!("{} {e}", "skipping".on_yellow());
                summary.skipped.push(e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<Result<IpAddr, LookupError>> {
        vec![
            Ok("10.0.0.1".parse().unwrap()),
            Err(LookupError::AddressParse {
                nic: "nic1".to_string(),
                address: "not-an-ip".to_string(),
            }),
            Ok("10.0.0.2".parse().unwrap()),
        ]
    }

    #[test]
    fn test_fail_stops_after_earlier_matches() {
        let mut seen = vec![];
        let mut summary = MatchSummary::default();
        let err = for_each_match(results(), InvalidAddressPolicy::Fail, &mut summary, |ip| {
            seen.push(ip.to_string());
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, LookupError::AddressParse { .. }));
        assert_eq!(seen, vec!["10.0.0.1"]);
        assert_eq!(summary.matched, 1);
    }

    #[test]
    fn test_skip_continues() {
        let mut seen = vec![];
        let mut summary = MatchSummary::default();
        for_each_match(results(), InvalidAddressPolicy::Skip, &mut summary, |ip| {
            seen.push(ip.to_string());
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.skipped.len(), 1);
    }

    #[test]
    fn test_skip_does_not_swallow_upstream_errors() {
        let mut summary = MatchSummary::default();
        let err = for_each_match(
            vec![Err(LookupError::upstream("boom"))],
            InvalidAddressPolicy::Skip,
            &mut summary,
            |_| Ok(()),
        )
        .unwrap_err();
        assert!(matches!(err, LookupError::Upstream(_)));
    }

    #[test]
    fn test_sink_error_propagates() {
        let mut summary = MatchSummary::default();
        let err = for_each_match(results(), InvalidAddressPolicy::Skip, &mut summary, |_| {
            Err(LookupError::upstream("stdout closed"))
        })
        .unwrap_err();
        assert!(matches!(err, LookupError::Upstream(_)));
    }
}
