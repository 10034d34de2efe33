//! A streaming, `const`-evaluable implementation of the [MD5][1]
//! message-digest algorithm.
//!
//! MD5 is broken as a cryptographic hash. Use it as a checksum or a
//! deterministic fingerprint, never where collision resistance matters.
//!
//! # Usage
//!
//! ```rust
//! use md5::{Md5, Digest};
//! use hex_literal::hex;
//!
//! // create a Md5 hasher instance
//! let mut hasher = Md5::new();
//!
//! // process input message
//! hasher.update(b"hello world");
//!
//! // acquire hash digest in the form of GenericArray,
//! // which in this case is equivalent to [u8; 16]
//! let result = hasher.finalize();
//! assert_eq!(result[..], hex!("5eb63bbbe01eeed093cb22bb8f5acdc3"));
//! ```
//!
//! The accumulator can also be driven by value, which works in `const`
//! items:
//!
//! ```rust
//! use hex_literal::hex;
//!
//! const DIGEST: [u8; 16] = md5::Md5::new()
//!     .append(b"message ")
//!     .append(b"digest")
//!     .finish();
//!
//! assert_eq!(DIGEST, hex!("f96b697d7cb7938d525a2f31aaf161d0"));
//! assert_eq!(DIGEST, md5::compute(b"message digest"));
//! ```
//!
//! Also see [RustCrypto/hashes][2] readme.
//!
//! [1]: https://www.rfc-editor.org/rfc/rfc1321
//! [2]: https://github.com/RustCrypto/hashes

#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use digest::{self, Digest};

use digest::{
    consts::U16, FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update,
};

mod compress;
mod consts;

use compress::{compress, read_words, write_words, Block};

/// Size of one compression block in bytes.
pub const BLOCK_LEN: usize = 64;

/// Size of an MD5 digest in bytes.
pub const OUTPUT_LEN: usize = 16;

/// Offset of the length words in the final block.
const LEN_OFFSET: usize = 56;

/// MD5 accumulator.
///
/// Holds the running state, the pending partial block and the 64-bit
/// message length in bits, kept as two 32-bit halves.
#[derive(Clone)]
pub struct Md5 {
    state: [u32; 4],
    buffer: Block,
    len_lo: u32,
    len_hi: u32,
}

impl Md5 {
    /// Create an accumulator with the initial MD5 state.
    #[inline]
    pub const fn new() -> Self {
        Self {
            state: consts::S0,
            buffer: [0; BLOCK_LEN],
            len_lo: 0,
            len_hi: 0,
        }
    }

    /// Number of pending bytes in the buffer.
    #[inline(always)]
    const fn pos(&self) -> usize {
        ((self.len_lo >> 3) & 0x3f) as usize
    }

    /// Feed `data` into the accumulator and return it.
    ///
    /// Every time the buffer fills up a block is compressed. Splitting the
    /// same message across several calls yields the same digest.
    pub const fn append(mut self, data: &[u8]) -> Self {
        let mut k = self.pos();
        let (len_lo, len_hi) = add_len(self.len_lo, self.len_hi, data.len() as u64);
        self.len_lo = len_lo;
        self.len_hi = len_hi;

        let mut i = 0;
        while i < data.len() {
            self.buffer[k] = data[i];
            k += 1;
            if k == BLOCK_LEN {
                self.state = compress(self.state, &read_words(&self.buffer));
                k = 0;
            }
            i += 1;
        }
        self
    }

    /// Pad the message, inject its bit length and return the digest.
    pub const fn finish(self) -> [u8; OUTPUT_LEN] {
        let k = self.pos();
        let (len_lo, len_hi) = (self.len_lo, self.len_hi);

        let pad_len = if k < LEN_OFFSET {
            LEN_OFFSET - k
        } else {
            BLOCK_LEN + LEN_OFFSET - k
        };
        let padding = consts::PADDING;
        let (padding, _) = padding.split_at(pad_len);
        let last = self.append(padding);

        let mut words = read_words(&last.buffer);
        words[14] = len_lo;
        words[15] = len_hi;
        write_words(&compress(last.state, &words))
    }
}

/// Add `len` bytes to the bit counter, carrying from the low into the
/// high half.
#[inline(always)]
const fn add_len(lo: u32, hi: u32, len: u64) -> (u32, u32) {
    let bits = (len as u32) << 3;
    let lo = lo.wrapping_add(bits);
    let mut hi = hi;
    if lo < bits {
        hi = hi.wrapping_add(1);
    }
    (lo, hi.wrapping_add((len >> 29) as u32))
}

/// Compute the MD5 digest of `data` in one shot.
#[inline]
pub const fn compute(data: &[u8]) -> [u8; OUTPUT_LEN] {
    Md5::new().append(data).finish()
}

impl Default for Md5 {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl HashMarker for Md5 {}

impl OutputSizeUser for Md5 {
    type OutputSize = U16;
}

impl Update for Md5 {
    #[inline]
    fn update(&mut self, data: &[u8]) {
        *self = core::mem::take(self).append(data);
    }
}

impl FixedOutput for Md5 {
    #[inline]
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.finish());
    }
}

impl FixedOutputReset for Md5 {
    #[inline]
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        out.copy_from_slice(&core::mem::take(self).finish());
    }
}

impl Reset for Md5 {
    #[inline]
    fn reset(&mut self) {
        *self = Self::new();
    }
}

opaque_debug::implement!(Md5);

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(len_lo: u32, len_hi: u32) -> Md5 {
        Md5 {
            len_lo,
            len_hi,
            ..Md5::new()
        }
    }

    fn same(a: &Md5, b: &Md5) -> bool {
        a.state == b.state && a.buffer == b.buffer && a.len_lo == b.len_lo && a.len_hi == b.len_hi
    }

    #[test]
    fn empty_append_is_noop() {
        let fresh = Md5::new();
        assert!(same(&fresh.clone().append(&[]), &fresh));

        let partial = Md5::new().append(b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789");
        assert!(same(&partial.clone().append(b""), &partial));
    }

    #[test]
    fn full_block_resets_buffer() {
        let h = Md5::new().append(&[0x61; 64]);
        assert_eq!(h.pos(), 0);
        assert_eq!(h.len_lo, 512);
        assert_ne!(h.state, consts::S0);

        let h = h.append(&[0x61; 70]);
        assert_eq!(h.pos(), 6);
        assert_eq!(h.len_lo, 8 * 134);
    }

    #[test]
    fn counter_carries_into_high_word() {
        assert_eq!(add_len(0xFFFF_FFF8, 0, 1), (0, 1));
        assert_eq!(add_len(0x8000_0000, 0, 1 << 28), (0, 1));
        assert_eq!(add_len(0xFFFF_FFF0, 7, 1), (0xFFFF_FFF8, 7));
        assert_eq!(add_len(0, u32::MAX, 1 << 29), (0, 0));
    }

    #[test]
    fn large_length_feeds_high_word() {
        assert_eq!(add_len(0, 0, 1 << 29), (0, 1));
        assert_eq!(add_len(8, 3, (1 << 29) + 1), (16, 4));
        assert_eq!(add_len(0, 0, 5 << 32), (0, 5 << 3));
    }

    #[test]
    fn append_carries_across_halves() {
        // 512 bits short of wrapping the low word, buffer empty
        let h = seeded(0xFFFF_FE00, 0).append(&[0u8; BLOCK_LEN]);
        assert_eq!((h.len_lo, h.len_hi), (0, 1));
        assert_eq!(h.pos(), 0);

        let h = seeded(0xFFFF_FE00, 0).append(&[0u8; BLOCK_LEN + 3]);
        assert_eq!((h.len_lo, h.len_hi), (24, 1));
        assert_eq!(h.pos(), 3);
    }

    #[test]
    fn finish_injects_both_length_words() {
        let mut words = [0u32; 16];
        words[0] = 0x80;
        words[14] = 0;
        words[15] = 1;
        let expected = write_words(&compress(consts::S0, &words));

        assert_eq!(seeded(0, 1).finish(), expected);
        assert_ne!(seeded(0, 1).finish(), Md5::new().finish());
    }

    #[test]
    fn finish_spills_padding_into_extra_block() {
        let data = [0x5a; 60];
        let h = Md5::new().append(&data);
        assert_eq!(h.pos(), 60);

        let mut first = [0u8; BLOCK_LEN];
        first[..60].copy_from_slice(&data);
        first[60] = 0x80;
        let state = compress(consts::S0, &read_words(&first));

        let mut words = [0u32; 16];
        words[14] = 8 * 60;
        let expected = write_words(&compress(state, &words));

        assert_eq!(h.finish(), expected);
    }
}
