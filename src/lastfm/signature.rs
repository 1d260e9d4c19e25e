use std::fmt;

use md5::{Digest, Md5};

/// An `api_sig` value: the lowercase hex MD5 digest of a canonical parameter string.
///
/// Signatures are computed per request and never cached; two requests with the
/// same parameters simply compute the same value again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// Length of a rendered signature in hex characters.
    pub const LEN: usize = 32;

    /// Hashes the UTF-8 bytes of `base` (see [`crate::params::ParamSet::signature_base`]).
    pub fn compute(base: &str) -> Self {
        let digest = Md5::digest(base.as_bytes());
        Signature(hex::encode(digest))
    }

    /// The 32 hex characters, as stored in `api_sig`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
