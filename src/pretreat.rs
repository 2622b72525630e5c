use std::{borrow::Cow, fmt::Display, str::FromStr};

use crate::{Error, Result};

/// Rewrites a raw value before it is counted.
pub trait Transformer {
    fn transform<'v>(&self, value: &'v str) -> Result<Cow<'v, str>>;
}

/// A parsed per-attribute pretreatment option.
///
/// Option grammar: an empty or single-character option is the identity,
/// `/N` buckets integers to `floor(value / N) * N`, anything else is kept
/// verbatim and currently treated as the identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Pretreat {
    #[default]
    Identity,
    Bucket(i64),
    Other(String),
}

impl FromStr for Pretreat {
    type Err = Error;

    fn from_str(option: &str) -> Result<Self> {
        if option.chars().count() <= 1 {
            return Ok(Self::Identity);
        }
        match option.strip_prefix('/') {
            Some(n) => match n.parse::<i64>() {
                Ok(n) if n > 0 => Ok(Self::Bucket(n)),
                _ => Err(Error::InvalidOption(format!(
                    "bucket width must be a positive integer: {option}"
                ))),
            },
            None => Ok(Self::Other(option.to_string())),
        }
    }
}

impl Display for Pretreat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => Ok(()),
            Self::Bucket(n) => write!(f, "/{n}"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

impl Transformer for Pretreat {
    fn transform<'v>(&self, value: &'v str) -> Result<Cow<'v, str>> {
        match self {
            Self::Identity | Self::Other(_) => Ok(Cow::Borrowed(value)),
            Self::Bucket(n) => {
                let bucket = value
                    .parse::<i64>()
                    .ok()
                    .and_then(|v| v.div_euclid(*n).checked_mul(*n))
                    .ok_or_else(|| Error::Pretreat {
                        value: value.to_string(),
                        option: self.to_string(),
                    })?;
                Ok(Cow::Owned(bucket.to_string()))
            }
        }
    }
}

/// Applies the option string `option` to `value`.
pub fn pretreat(value: &str, option: &str) -> Result<String> {
    let p: Pretreat = option.parse()?;
    Ok(p.transform(value)?.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_options() {
        assert_eq!("".parse::<Pretreat>().unwrap(), Pretreat::Identity);
        assert_eq!("/".parse::<Pretreat>().unwrap(), Pretreat::Identity);
        assert_eq!("/10".parse::<Pretreat>().unwrap(), Pretreat::Bucket(10));
        assert_eq!("#2".parse::<Pretreat>().unwrap(), Pretreat::Other("#2".into()));
        assert!("/0".parse::<Pretreat>().is_err());
        assert!("/-3".parse::<Pretreat>().is_err());
        assert!("/ten".parse::<Pretreat>().is_err());
    }

    #[test]
    fn bucket() {
        assert_eq!(pretreat("37", "/10").unwrap(), "30");
        assert_eq!(pretreat("40", "/10").unwrap(), "40");
        assert_eq!(pretreat("0", "/7").unwrap(), "0");
        assert_eq!(pretreat("-3", "/10").unwrap(), "-10");
        assert_eq!(pretreat("9223372036854775807", "/10").unwrap(), "9223372036854775800");
        assert!(matches!(
            pretreat("-9223372036854775808", "/10"),
            Err(Error::Pretreat { .. })
        ));
    }

    #[test]
    fn identity_options() {
        assert_eq!(pretreat("sunny", "").unwrap(), "sunny");
        assert_eq!(pretreat("sunny", "x").unwrap(), "sunny");
        assert_eq!(pretreat("sunny", "#upper").unwrap(), "sunny");
    }

    #[test]
    fn bucket_rejects_non_numeric() {
        match pretreat("sunny", "/10") {
            Err(Error::Pretreat { value, option }) => {
                assert_eq!(value, "sunny");
                assert_eq!(option, "/10");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn display_round_trips_option() {
        assert_eq!(Pretreat::Bucket(5).to_string(), "/5");
        assert_eq!(Pretreat::Identity.to_string(), "");
    }
}
