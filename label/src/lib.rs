//! 128-bit labels built on top of the [`md5`] accumulator.
//!
//! Two independent ways to obtain a [`Label`]:
//!
//! - [`fingerprint`] derives one deterministically from a name, by hashing
//!   the name followed by [`SALT`]. Being a `const fn`, it can run at
//!   compile time.
//! - [`random`] fills one from an injected entropy source and reports a
//!   failing source as an error.
//!
//! Neither sets the version or variant bits of an RFC 4122 UUID, so a label
//! must not be passed off as one.
//!
//! # Usage
//!
//! ```rust
//! use md5_label::{fingerprint, Label};
//! use hex_literal::hex;
//!
//! const FROG: Label = fingerprint(b"frog");
//!
//! assert_eq!(FROG.as_bytes(), &hex!("3779d871aaaffc74302bc326f41c313a"));
//! assert_eq!(FROG, fingerprint(b"frog"));
//! ```

#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use rand_core::{self, CryptoRng, Error, RngCore};

use core::fmt;
use md5::{Md5, OUTPUT_LEN};

/// Salt appended to every name before hashing.
pub const SALT: &[u8] = b"This is my salt!";

/// A 128-bit label.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label([u8; OUTPUT_LEN]);

impl Label {
    /// Wrap raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; OUTPUT_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; OUTPUT_LEN] {
        &self.0
    }

    /// Unwrap into raw bytes.
    #[inline]
    pub const fn into_bytes(self) -> [u8; OUTPUT_LEN] {
        self.0
    }

    /// The label as an integer, first byte most significant.
    #[inline]
    pub const fn to_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl AsRef<[u8]> for Label {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; OUTPUT_LEN]> for Label {
    #[inline]
    fn from(bytes: [u8; OUTPUT_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Label> for [u8; OUTPUT_LEN] {
    #[inline]
    fn from(label: Label) -> Self {
        label.0
    }
}

impl From<Label> for u128 {
    #[inline]
    fn from(label: Label) -> Self {
        label.to_u128()
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({:#034x})", self.to_u128())
    }
}

/// Derive a label from `name` and [`SALT`].
#[inline]
pub const fn fingerprint(name: &[u8]) -> Label {
    fingerprint_with_salt(name, SALT)
}

/// Derive a label from `name` and a caller supplied `salt`.
///
/// Equivalent to the MD5 digest of `name` immediately followed by `salt`.
pub const fn fingerprint_with_salt(name: &[u8], salt: &[u8]) -> Label {
    Label(Md5::new().append(name).append(salt).finish())
}

/// Fill a label from `rng`.
///
/// A failure of the entropy source is returned as is; no partially filled
/// or zeroed label is ever produced.
pub fn random<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Label, Error> {
    let mut bytes = [0u8; OUTPUT_LEN];
    if let Err(err) = rng.try_fill_bytes(&mut bytes) {
        log::warn!("entropy source failed while generating a label: {}", err);
        return Err(err);
    }
    log::trace!("generated random label");
    Ok(Label(bytes))
}

/// Fill a label from the operating system's entropy source.
#[cfg(feature = "getrandom")]
#[cfg_attr(docsrs, doc(cfg(feature = "getrandom")))]
pub fn random_os() -> Result<Label, Error> {
    random(&mut rand_core::OsRng)
}
