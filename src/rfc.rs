use crate::Algorithm;
use crate::Totp;
use crate::TotpError;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Parameters are not compliant to the recommendations of [rfc-6238](https://tools.ietf.org/html/rfc6238)
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum Rfc6238Error {
    /// Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code
    #[error("Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code. {0} digits is not allowed")]
    InvalidDigits(usize),
}

pub(crate) fn assert_digits(digits: usize) -> Result<(), Rfc6238Error> {
    if !(6..=8).contains(&digits) {
        Err(Rfc6238Error::InvalidDigits(digits))
    } else {
        Ok(())
    }
}

/// [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options to create a [Totp](struct.Totp.html)
///
/// # Example
/// ```
/// use totp_gen::{Algorithm, Rfc6238, Totp};
///
/// let mut rfc = Rfc6238::with_defaults();
///
/// // optional, set digits and algorithm
/// rfc.digits(8).unwrap();
/// rfc.algorithm(Algorithm::SHA256);
///
/// let totp = Totp::from_rfc6238(rfc).unwrap();
/// assert_eq!(totp.digits(), 8);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(try_from = "Rfc6238Config"))]
pub struct Rfc6238 {
    /// SHA-1 unless told otherwise
    algorithm: Algorithm,
    /// Per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3), this can oscilate between 6 and 8 digits
    digits: usize,
    /// The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 30 seconds
    step: u64,
}

/// Unchecked mirror of [Rfc6238](struct.Rfc6238.html), deserialized first and validated like [Rfc6238::new](struct.Rfc6238.html#method.new)
#[cfg(feature = "serde_support")]
#[derive(Deserialize)]
struct Rfc6238Config {
    algorithm: Algorithm,
    digits: usize,
    step: u64,
}

#[cfg(feature = "serde_support")]
impl TryFrom<Rfc6238Config> for Rfc6238 {
    type Error = Rfc6238Error;

    fn try_from(config: Rfc6238Config) -> Result<Self, Self::Error> {
        assert_digits(config.digits)?;
        Ok(Rfc6238 {
            algorithm: config.algorithm,
            digits: config.digits,
            step: config.step,
        })
    }
}

impl Rfc6238 {
    /// Create an [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options that can be turned into a [Totp](struct.Totp.html)
    ///
    /// # Errors
    ///
    /// will return a [Rfc6238Error](enum.Rfc6238Error.html) when `digits` is lower than 6 or higher than 8
    pub fn new(digits: usize) -> Result<Rfc6238, Rfc6238Error> {
        assert_digits(digits)?;
        Ok(Rfc6238 {
            algorithm: Algorithm::SHA1,
            digits,
            step: 30,
        })
    }

    /// SHA-1, 6 digits, 30 seconds
    pub fn with_defaults() -> Rfc6238 {
        Rfc6238 {
            algorithm: Algorithm::SHA1,
            digits: 6,
            step: 30,
        }
    }

    /// Set the `digits`
    pub fn digits(&mut self, value: usize) -> Result<(), Rfc6238Error> {
        assert_digits(value)?;
        self.digits = value;
        Ok(())
    }

    /// Set the `algorithm`
    pub fn algorithm(&mut self, value: Algorithm) {
        self.algorithm = value;
    }
}

impl Default for Rfc6238 {
    fn default() -> Self {
        Rfc6238::with_defaults()
    }
}

impl TryFrom<Rfc6238> for Totp {
    type Error = TotpError;

    /// Try to create a [Totp](struct.Totp.html) from a [Rfc6238](struct.Rfc6238.html) config
    fn try_from(rfc: Rfc6238) -> Result<Self, Self::Error> {
        Totp::new(rfc.algorithm, rfc.digits, rfc.step)
    }
}

#[cfg(test)]
mod tests {
    use super::{Rfc6238, Rfc6238Error, Totp};
    use crate::Algorithm;

    #[test]
    fn new_rfc_digits() {
        for x in 0..=20 {
            let rfc = Rfc6238::new(x);
            if !(6..=8).contains(&x) {
                assert!(rfc.is_err());
                assert_eq!(rfc.unwrap_err(), Rfc6238Error::InvalidDigits(x))
            } else {
                assert!(rfc.is_ok());
            }
        }
    }

    #[test]
    fn rfc_to_totp_ok() {
        let rfc = Rfc6238::new(8).unwrap();
        let totp = Totp::try_from(rfc);
        assert!(totp.is_ok());
        let otp = totp.unwrap();
        assert_eq!(otp.algorithm(), Algorithm::SHA1);
        assert_eq!(otp.digits(), 8);
        assert_eq!(otp.step(), 30)
    }

    #[test]
    fn rfc_default_matches_with_defaults() {
        assert_eq!(Rfc6238::default(), Rfc6238::with_defaults());
        let totp = Totp::from_rfc6238(Rfc6238::default()).unwrap();
        assert_eq!(totp.digits(), 6);
    }

    #[test]
    fn rfc_with_default_set_values() {
        let mut rfc = Rfc6238::with_defaults();
        rfc.algorithm(Algorithm::SHA512);
        assert_eq!(rfc.algorithm, Algorithm::SHA512);
        let fail = rfc.digits(4);
        assert!(fail.is_err());
        assert_eq!(fail.unwrap_err(), Rfc6238Error::InvalidDigits(4));
        assert_eq!(rfc.digits, 6);
        let ok = rfc.digits(8);
        assert!(ok.is_ok());
        assert_eq!(rfc.digits, 8)
    }

    #[test]
    #[cfg(feature = "serde_support")]
    fn deserialize_checks_digits() {
        let rfc: Rfc6238 =
            serde_json::from_str(r#"{"algorithm":"SHA256","digits":8,"step":30}"#).unwrap();
        assert_eq!(rfc.digits, 8);
        assert_eq!(rfc.algorithm, Algorithm::SHA256);

        let short = r#"{"algorithm":"SHA1","digits":3,"step":30}"#;
        assert!(serde_json::from_str::<Rfc6238>(short).is_err());
        let long = r#"{"algorithm":"SHA1","digits":9,"step":30}"#;
        assert!(serde_json::from_str::<Rfc6238>(long).is_err());
    }

    #[test]
    fn digits_error_message() {
        assert_eq!(
            Rfc6238Error::InvalidDigits(5).to_string(),
            "Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code. 5 digits is not allowed"
        );
    }
}
