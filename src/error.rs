use thiserror::Error;

use crate::Rfc6238Error;

/// Everything that can go wrong while building a [Totp](struct.Totp.html) or computing a code
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum TotpError {
    /// The code length is outside of `1..=8`
    #[error("code length must be between 1 and 8 inclusive, got {0}")]
    InvalidCodeLength(usize),
    /// The time step is zero
    #[error("time step must be at least 1 second, got {0}")]
    InvalidTimeStep(u64),
    /// The timestamp is the Unix epoch, before it, or unset
    #[error("unsupported timestamp {0}, must be at least 1 second after the Unix epoch")]
    InvalidTimestamp(i128),
    /// The name does not match any supported [Algorithm](enum.Algorithm.html)
    #[error("algorithm can only be SHA1, SHA256 or SHA512, not \"{0}\"")]
    UnknownAlgorithm(String),
    /// The HMAC primitive refused the key
    #[error("HMAC primitive rejected the key")]
    Hmac,
}

impl From<Rfc6238Error> for TotpError {
    fn from(e: Rfc6238Error) -> Self {
        match e {
            Rfc6238Error::InvalidDigits(digits) => TotpError::InvalidCodeLength(digits),
        }
    }
}

impl From<hmac::digest::InvalidLength> for TotpError {
    fn from(_: hmac::digest::InvalidLength) -> Self {
        TotpError::Hmac
    }
}
