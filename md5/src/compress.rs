use crate::consts::{G, K, S};

pub(crate) type Block = [u8; 64];

#[inline(always)]
const fn mix(round: usize, b: u32, c: u32, d: u32) -> u32 {
    match round {
        0 => (b & c) | (!b & d),
        1 => (b & d) | (c & !d),
        2 => b ^ c ^ d,
        _ => c ^ (b | !d),
    }
}

/// Unpack a block into sixteen little-endian words.
#[inline(always)]
pub(crate) const fn read_words(block: &Block) -> [u32; 16] {
    let mut words = [0u32; 16];
    let mut i = 0;
    while i < 16 {
        let j = 4 * i;
        words[i] = u32::from_le_bytes([block[j], block[j + 1], block[j + 2], block[j + 3]]);
        i += 1;
    }
    words
}

/// Serialize the state words, little-endian, word 0 first.
#[inline(always)]
pub(crate) const fn write_words(state: &[u32; 4]) -> [u8; 16] {
    let mut out = [0u8; 16];
    let mut i = 0;
    while i < 4 {
        let bytes = state[i].to_le_bytes();
        let mut j = 0;
        while j < 4 {
            out[4 * i + j] = bytes[j];
            j += 1;
        }
        i += 1;
    }
    out
}

/// MD5 compression function: runs the 64 steps over one block of message
/// words and returns the fed-forward state.
pub(crate) const fn compress(state: [u32; 4], input: &[u32; 16]) -> [u32; 4] {
    let mut a = state[0];
    let mut b = state[1];
    let mut c = state[2];
    let mut d = state[3];

    let mut step = 0;
    while step < 64 {
        let round = step / 16;
        let t = a
            .wrapping_add(mix(round, b, c, d))
            .wrapping_add(input[G[step]])
            .wrapping_add(K[step]);
        let new_b = b.wrapping_add(t.rotate_left(S[round][step % 4]));
        a = d;
        d = c;
        c = b;
        b = new_b;
        step += 1;
    }

    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_little_endian() {
        let mut block = [0u8; 64];
        block[..4].copy_from_slice(&[0x01, 0x02, 0x03, 0x04]);
        block[60..].copy_from_slice(&[0xff, 0x00, 0x00, 0x80]);
        let words = read_words(&block);
        assert_eq!(words[0], 0x0403_0201);
        assert_eq!(words[15], 0x8000_00ff);
        assert!(words[1..15].iter().all(|&w| w == 0));

        let out = write_words(&[0x0403_0201, 0, 0, 0x8000_00ff]);
        assert_eq!(out[..4], [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(out[12..], [0xff, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn mixing_functions() {
        let (b, c, d) = (0xF0F0_F0F0, 0xCCCC_CCCC, 0xAAAA_AAAA);
        assert_eq!(mix(0, b, c, d), 0xCACA_CACA);
        assert_eq!(mix(1, b, c, d), 0xE4E4_E4E4);
        assert_eq!(mix(2, b, c, d), 0x9696_9696);
        assert_eq!(mix(3, b, c, d), 0x3939_3939);
    }
}
