//! This library derives time-based one-time passwords as described in [rfc-6238](https://tools.ietf.org/html/rfc6238):
//! a shared secret and a point in time go in, a short decimal code that changes every time step comes out.
//! HMAC-SHA-1, HMAC-SHA-256 and HMAC-SHA-512 are supported, with codes from 1 to 8 digits.
//!
//! Be aware that some authenticator apps will accept the `SHA256`
//! and `SHA512` algorithms but silently fallback to `SHA1`, producing
//! codes that will never match the ones computed here.
//!
//! # Examples
//!
//! ```rust
//! use totp_gen::{Algorithm, Totp};
//!
//! let totp = Totp::new(Algorithm::SHA1, 8, 30).unwrap();
//! let code = totp.compute(b"12345678901234567890", 59_u64).unwrap();
//! assert_eq!(code, "94287082");
//! ```
//!
//! ```rust
//! use std::time::SystemTime;
//! use totp_gen::Totp;
//!
//! let totp = Totp::new_sha256(6, 30).unwrap();
//! let code = totp.compute(b"12345678901234567890123456789012", SystemTime::now()).unwrap();
//! println!("{}", code);
//! ```

mod error;
mod rfc;
mod time;

pub use error::TotpError;
pub use rfc::{Rfc6238, Rfc6238Error};
pub use time::UnixTime;

use constant_time_eq::constant_time_eq;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use core::fmt;
use core::str::FromStr;

use hmac::Mac;
use std::time::SystemTime;

type HmacSha1 = hmac::Hmac<sha1::Sha1>;
type HmacSha256 = hmac::Hmac<sha2::Sha256>;
type HmacSha512 = hmac::Hmac<sha2::Sha512>;

/// Longest code that still fits the 31 bits left after dynamic truncation
const MAX_DIGITS: usize = 8;

/// Algorithm enum holds the three standards algorithms for TOTP as per the [reference implementation](https://tools.ietf.org/html/rfc6238#appendix-A)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Algorithm {
    #[default]
    SHA1,
    SHA256,
    SHA512,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::SHA1 => f.write_str("SHA1"),
            Algorithm::SHA256 => f.write_str("SHA256"),
            Algorithm::SHA512 => f.write_str("SHA512"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = TotpError;

    /// Accepts `SHA1`, `SHA256`, `SHA512` in any case, with or without the dash
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(Algorithm::SHA1),
            "SHA256" => Ok(Algorithm::SHA256),
            "SHA512" => Ok(Algorithm::SHA512),
            _ => Err(TotpError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl Algorithm {
    /// Size in bytes of the digest produced by this algorithm
    pub fn output_len(&self) -> usize {
        match self {
            Algorithm::SHA1 => 20,
            Algorithm::SHA256 => 32,
            Algorithm::SHA512 => 64,
        }
    }

    fn hash<D>(mut digest: D, data: &[u8]) -> Vec<u8>
    where
        D: Mac,
    {
        digest.update(data);
        digest.finalize().into_bytes().to_vec()
    }

    /// HMAC of `data` keyed with `key`
    pub fn sign(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, TotpError> {
        Ok(match self {
            Algorithm::SHA1 => Algorithm::hash(HmacSha1::new_from_slice(key)?, data),
            Algorithm::SHA256 => Algorithm::hash(HmacSha256::new_from_slice(key)?, data),
            Algorithm::SHA512 => Algorithm::hash(HmacSha512::new_from_slice(key)?, data),
        })
    }
}

/// Totp holds the parameters needed to turn a key and a timestamp into a code.
///
/// It never holds the key itself: the same generator can serve any number of secrets,
/// from any number of threads.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(try_from = "TotpConfig"))]
pub struct Totp {
    /// SHA-1 is the most widespread algorithm used, and for totp pursposes, SHA-1 hash collisions are [not a problem](https://tools.ietf.org/html/rfc4226#appendix-B.2) as HMAC-SHA-1 is not impacted. Not all clients support other algorithms then SHA-1
    algorithm: Algorithm,
    /// The number of digits composing the code, 1 to 8
    digits: usize,
    /// Duration in seconds of a step. The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 30 seconds
    step: u64,
}

/// Unchecked mirror of [Totp](struct.Totp.html), deserialized first and validated through [Totp::new](struct.Totp.html#method.new)
#[cfg(feature = "serde_support")]
#[derive(Deserialize)]
struct TotpConfig {
    algorithm: Algorithm,
    digits: usize,
    step: u64,
}

#[cfg(feature = "serde_support")]
impl TryFrom<TotpConfig> for Totp {
    type Error = TotpError;

    fn try_from(config: TotpConfig) -> Result<Self, Self::Error> {
        Totp::new(config.algorithm, config.digits, config.step)
    }
}

impl fmt::Display for Totp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "digits: {}; step: {}; alg: {}",
            self.digits, self.step, self.algorithm,
        )
    }
}

impl Totp {
    /// Will create a new instance of Totp with given parameters
    ///
    /// * `digits`: length of the generated codes, between 1 & 8. 6 is what most apps expect
    /// * `step`: lifetime of a code in seconds, at least 1. 30 is what most apps expect
    ///
    /// ```rust
    /// use totp_gen::{Algorithm, Totp};
    /// let totp = Totp::new(Algorithm::SHA1, 6, 30).unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Will return [TotpError::InvalidCodeLength](enum.TotpError.html) when `digits` is out of range,
    /// then [TotpError::InvalidTimeStep](enum.TotpError.html) when `step` is 0
    pub fn new(algorithm: Algorithm, digits: usize, step: u64) -> Result<Totp, TotpError> {
        if !(1..=MAX_DIGITS).contains(&digits) {
            return Err(TotpError::InvalidCodeLength(digits));
        }
        if step < 1 {
            return Err(TotpError::InvalidTimeStep(step));
        }
        Ok(Totp {
            algorithm,
            digits,
            step,
        })
    }

    /// Shortcut for [Totp::new](struct.Totp.html#method.new) with [Algorithm::SHA1](enum.Algorithm.html)
    pub fn new_sha1(digits: usize, step: u64) -> Result<Totp, TotpError> {
        Totp::new(Algorithm::SHA1, digits, step)
    }

    /// Shortcut for [Totp::new](struct.Totp.html#method.new) with [Algorithm::SHA256](enum.Algorithm.html)
    pub fn new_sha256(digits: usize, step: u64) -> Result<Totp, TotpError> {
        Totp::new(Algorithm::SHA256, digits, step)
    }

    /// Shortcut for [Totp::new](struct.Totp.html#method.new) with [Algorithm::SHA512](enum.Algorithm.html)
    pub fn new_sha512(digits: usize, step: u64) -> Result<Totp, TotpError> {
        Totp::new(Algorithm::SHA512, digits, step)
    }

    /// Will create a new instance of Totp from the given [Rfc6238](struct.Rfc6238.html) struct
    pub fn from_rfc6238(rfc: Rfc6238) -> Result<Totp, TotpError> {
        Totp::try_from(rfc)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    fn unix_seconds<T: UnixTime>(at: &T) -> Result<u64, TotpError> {
        let secs = at.unix_seconds();
        if secs < 1 {
            return Err(TotpError::InvalidTimestamp(secs));
        }
        u64::try_from(secs).map_err(|_| TotpError::InvalidTimestamp(secs))
    }

    /// Number of whole steps elapsed between the Unix epoch and `at`
    pub fn counter<T: UnixTime>(&self, at: T) -> Result<u64, TotpError> {
        Ok(Totp::unix_seconds(&at)? / self.step)
    }

    /// Will generate the code valid at `at` for the given key
    ///
    /// # Errors
    ///
    /// Will return [TotpError::InvalidTimestamp](enum.TotpError.html) when `at` is not at least
    /// one second past the Unix epoch
    pub fn compute<K, T>(&self, key: K, at: T) -> Result<String, TotpError>
    where
        K: AsRef<[u8]>,
        T: UnixTime,
    {
        let counter = self.counter(at)?;
        log::trace!("computing {} code for counter {}", self.algorithm, counter);

        #[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
        let mut digest = self
            .algorithm
            .sign(key.as_ref(), counter.to_be_bytes().as_ref())?;
        let offset = (digest[digest.len() - 1] & 0x0f) as usize;
        let mut window = [0_u8; 4];
        window.copy_from_slice(&digest[offset..offset + 4]);
        let bin_code = u32::from_be_bytes(window) & 0x7fff_ffff;
        #[cfg(feature = "zeroize")]
        {
            digest.zeroize();
            window.zeroize();
        }

        Ok(format!(
            "{1:00$}",
            self.digits,
            bin_code % 10_u32.pow(self.digits as u32)
        ))
    }

    /// Generate a code from the current system time
    pub fn compute_current<K: AsRef<[u8]>>(&self, key: K) -> Result<String, TotpError> {
        self.compute(key, SystemTime::now())
    }

    /// Will check if `code` is the one valid at `at`, comparing in constant time.
    /// Codes from the surrounding steps are not accepted
    pub fn check<K, T>(&self, key: K, at: T, code: &str) -> Result<bool, TotpError>
    where
        K: AsRef<[u8]>,
        T: UnixTime,
    {
        let expected = self.compute(key, at)?;
        Ok(constant_time_eq(expected.as_bytes(), code.as_bytes()))
    }

    /// Returns the timestamp of the first second of the step following `at`
    ///
    /// # Errors
    ///
    /// Will return [TotpError::InvalidTimestamp](enum.TotpError.html) when `at` is invalid, or when
    /// the next step would start past `u64::MAX`
    pub fn next_step<T: UnixTime>(&self, at: T) -> Result<u64, TotpError> {
        let secs = Totp::unix_seconds(&at)?;
        (secs / self.step)
            .checked_add(1)
            .and_then(|next| next.checked_mul(self.step))
            .ok_or(TotpError::InvalidTimestamp(i128::from(secs)))
    }

    /// Seconds left before the code valid at `at` expires, between 1 and `step`
    pub fn ttl<T: UnixTime>(&self, at: T) -> Result<u64, TotpError> {
        let secs = Totp::unix_seconds(&at)?;
        Ok(self.step - (secs % self.step))
    }

    /// Give the ttl (in seconds) of the current code
    pub fn ttl_current(&self) -> Result<u64, TotpError> {
        self.ttl(SystemTime::now())
    }
}
