//! Errors that end a lookup run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    /// The subnet prefix given by the caller does not parse.
    #[error("could not parse provided subnet prefix {input:?}: {reason}")]
    PrefixParse { input: String, reason: String },

    /// An IP configuration carries an address that does not parse.
    #[error("could not parse private ip address {address:?} on nic {nic:?}")]
    AddressParse { nic: String, address: String },

    /// Failure from Azure, the az cli, or reading records from a file.
    #[error("upstream: {0}")]
    Upstream(String),

    /// Results could not be written out.
    #[error("writing results: {0}")]
    Output(#[from] std::io::Error),
}

impl LookupError {
    pub fn upstream(e: impl std::fmt::Display) -> Self {
        LookupError::Upstream(e.to_string())
    }
}
