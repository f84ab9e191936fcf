//! Route segments carrying whole serde values (list queries and the like).
//!
//! The value is CBOR-encoded then base64url-encoded, so any serde type can sit
//! in a path segment and survive a reload or a shared link.

use std::{fmt::Display, str::FromStr};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};


#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UrlParam<T>(pub T);

impl<T> From<T> for UrlParam<T> {
    fn from(value: T) -> Self {
        UrlParam(value)
    }
}

impl<T> UrlParam<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Serialize> Display for UrlParam<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut cbor = Vec::new();
        ciborium::into_writer(&self.0, &mut cbor).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", URL_SAFE_NO_PAD.encode(cbor))
    }
}

#[derive(Debug)]
pub enum UrlParamError {
    Base64(base64::DecodeError),
    Cbor(ciborium::de::Error<std::io::Error>),
}

impl std::fmt::Display for UrlParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64(err) => write!(f, "url segment is not base64url: {}", err),
            Self::Cbor(err) => write!(f, "url segment does not decode: {}", err),
        }
    }
}

impl<T: for<'de> Deserialize<'de>> FromStr for UrlParam<T> {
    type Err = UrlParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // links produced before padding was dropped still carry '='
        let cbor = URL_SAFE_NO_PAD
            .decode(s.trim_end_matches('=').as_bytes())
            .map_err(UrlParamError::Base64)?;
        let value = ciborium::from_reader(cbor.as_slice()).map_err(UrlParamError::Cbor)?;
        Ok(UrlParam(value))
    }
}
