// crates/epos-rs/src/frame/crc.rs
//! CRC-16 engines for the two EPOS wire formats.
//!
//! The canonical format uses CRC-16/CCITT (generator 0x1021, MSB first)
//! and feeds each payload word high byte first. The alternate format uses
//! the reflected table-driven CRC (generator 0x8408) over bytes in natural
//! order. The two are mutually incompatible.

/// Generator polynomial of the MSB-first CCITT checksum.
pub const CCITT_POLYNOMIAL: u16 = 0x1021;

/// Generator polynomial of the reflected (LSB-first) checksum.
pub const REFLECTED_POLYNOMIAL: u16 = 0x8408;

/// Feeds a single byte into the MSB-first CCITT checksum.
#[inline]
pub const fn crc_byte(mut crc: u16, data: u8) -> u16 {
    crc ^= (data as u16) << 8;
    let mut bit = 0;
    while bit < 8 {
        if crc & 0x8000 != 0 {
            crc = (crc << 1) ^ CCITT_POLYNOMIAL;
        } else {
            crc <<= 1;
        }
        bit += 1;
    }
    crc
}

/// Computes the MSB-first CCITT checksum over `bytes` in natural order.
pub fn compute(seed: u16, bytes: &[u8]) -> u16 {
    bytes.iter().fold(seed, |crc, &b| crc_byte(crc, b))
}

/// Computes the CCITT checksum over 16-bit little-endian words, feeding the
/// second byte of each pair before the first.
///
/// A trailing odd byte is ignored; callers only pass word-aligned payloads.
pub fn compute_words(seed: u16, bytes: &[u8]) -> u16 {
    bytes
        .chunks_exact(2)
        .fold(seed, |crc, word| crc_byte(crc_byte(crc, word[1]), word[0]))
}

/// Lookup table for the reflected checksum, built at compile time.
pub static REFLECTED_TABLE: [u16; 256] = build_reflected_table();

const fn build_reflected_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u16;
        let mut bit = 0;
        while bit < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ REFLECTED_POLYNOMIAL;
            } else {
                crc >>= 1;
            }
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Computes the reflected table-driven checksum over `bytes` in natural order.
pub fn compute_reflected(seed: u16, bytes: &[u8]) -> u16 {
    bytes.iter().fold(seed, |crc, &b| {
        REFLECTED_TABLE[((crc ^ b as u16) & 0xFF) as usize] ^ (crc >> 8)
    })
}
