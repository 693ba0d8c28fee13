// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! KLV framing per SMPTE ST 336: a fixed 16-byte universal-label key, a BER-encoded length, and
//! that many value bytes.

use mxf_core::errors::{malformed_klv_error, Result};
use mxf_core::io::ReadBytes;

use crate::labels::Ul;

/// A decoded KLV header. The stream is positioned at the first value byte after a read.
#[derive(Copy, Clone, Debug)]
pub struct KlvHeader {
    /// The 16-byte key.
    pub key: Ul,
    /// The key's offset in the stream.
    pub pos: u64,
    /// The size of the encoded length field in bytes (1-9).
    pub len_size: u8,
    /// The size of the value in bytes.
    pub value_len: u64,
}

impl KlvHeader {
    /// The total encoded size of the KLV including key, length, and value.
    pub fn total_len(&self) -> u64 {
        16 + u64::from(self.len_size) + self.value_len
    }
}

/// Reads a single KLV header from the stream, leaving the stream at the first value byte.
pub fn read_klv_header<R: ReadBytes>(reader: &mut R) -> Result<KlvHeader> {
    let pos = reader.pos();

    let mut key = [0u8; 16];
    reader.read_buf_exact(&mut key)?;

    let (value_len, len_size) = read_ber_length(reader)?;

    Ok(KlvHeader { key: Ul(key), pos, len_size, value_len })
}

/// Reads a BER-encoded length and returns its value and encoded size in bytes.
///
/// Short form: high bit of the first byte clear, the byte itself is the length. Long form: the
/// low seven bits give the count of following big-endian length bytes. Counts above eight would
/// overflow a `u64` and are rejected, as is a count of zero (the indefinite form, which KLV does
/// not permit).
pub fn read_ber_length<R: ReadBytes>(reader: &mut R) -> Result<(u64, u8)> {
    let first = reader.read_byte()?;

    if first & 0x80 == 0 {
        return Ok((u64::from(first), 1));
    }

    let count = usize::from(first & 0x7f);

    if count == 0 {
        return malformed_klv_error("indefinite ber length");
    }
    if count > 8 {
        return malformed_klv_error("ber length exceeds 8 octets");
    }

    let mut bytes = [0u8; 8];
    reader.read_buf_exact(&mut bytes[8 - count..])?;

    Ok((u64::from_be_bytes(bytes), 1 + count as u8))
}

/// Appends the canonical minimal BER encoding of `len` to `out`.
///
/// Lengths below 128 use the one-byte short form; anything larger uses the long form with the
/// fewest big-endian octets that represent the value.
pub fn encode_ber_length(len: u64, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }

    let count = (8 - len.leading_zeros() / 8).max(1) as usize;

    out.push(0x80 | count as u8);
    out.extend_from_slice(&len.to_be_bytes()[8 - count..]);
}

#[cfg(test)]
mod tests {
    use mxf_core::io::BufReader;

    use super::{encode_ber_length, read_ber_length, read_klv_header};

    fn decode(buf: &[u8]) -> (u64, u8) {
        read_ber_length(&mut BufReader::new(buf)).unwrap()
    }

    #[test]
    fn ber_short_form() {
        assert_eq!(decode(&[0x00]), (0, 1));
        assert_eq!(decode(&[0x01]), (1, 1));
        assert_eq!(decode(&[0x7f]), (127, 1));
    }

    #[test]
    fn ber_long_form() {
        assert_eq!(decode(&[0x81, 0x80]), (128, 2));
        assert_eq!(decode(&[0x82, 0xff, 0xff]), (0xffff, 3));
        assert_eq!(decode(&[0x85, 0x01, 0x00, 0x00, 0x00, 0x00]), (1 << 32, 6));
        assert_eq!(
            decode(&[0x88, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]),
            (u64::MAX, 9)
        );
    }

    #[test]
    fn ber_non_minimal_is_accepted() {
        assert_eq!(decode(&[0x82, 0x00, 0x05]), (5, 3));
    }

    #[test]
    fn ber_invalid_forms() {
        assert!(read_ber_length(&mut BufReader::new(&[0x80])).is_err());
        assert!(read_ber_length(&mut BufReader::new(&[0x89, 0, 0, 0, 0, 0, 0, 0, 0, 1])).is_err());
        assert!(read_ber_length(&mut BufReader::new(&[0x84, 0x01])).is_err());
    }

    #[test]
    fn ber_round_trips_to_canonical_form() {
        for len in [0u64, 1, 127, 128, (1 << 16) - 1, 1 << 32, (1 << 56) - 1] {
            let mut encoded = Vec::new();
            encode_ber_length(len, &mut encoded);

            if len < 128 {
                assert_eq!(encoded.len(), 1);
            }
            else {
                assert!(encoded.len() >= 2 && encoded.len() <= 9);
                // Minimal: the leading length octet is never zero.
                assert_ne!(encoded[1], 0);
            }

            assert_eq!(decode(&encoded), (len, encoded.len() as u8));
        }
    }

    #[test]
    fn klv_header_reads_key_and_length() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&[0x06; 16]);
        buf.extend_from_slice(&[0x83, 0x01, 0x00, 0x00]);

        let mut reader = BufReader::new(&buf);
        let hdr = read_klv_header(&mut reader).unwrap();

        assert_eq!(hdr.key.0, [0x06; 16]);
        assert_eq!(hdr.pos, 0);
        assert_eq!(hdr.len_size, 4);
        assert_eq!(hdr.value_len, 0x0001_0000);
        assert_eq!(hdr.total_len(), 16 + 4 + 0x0001_0000);
    }

    #[test]
    fn klv_header_truncated_key_fails() {
        let mut reader = BufReader::new(&[0x06; 10]);
        assert!(read_klv_header(&mut reader).is_err());
    }
}
