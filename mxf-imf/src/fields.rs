// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field value types and the local-set field walker.
//!
//! A structural set's value is a run of `(local_tag, length, value)` triples. The
//! [`LocalSetReader`] iterates those triples, resolving each tag to a universal label through
//! the primer pack. Tags the primer does not declare are skipped with a warning; everything
//! else is handed to the set decoders, which read the value with the typed methods here.

use std::fmt;

use mxf_core::errors::{field_decode_error, Result};
use mxf_core::io::{BufReader, ReadBytes};

use crate::diag::ParseLog;
use crate::labels::Ul;
use crate::primer::PrimerPack;

/// An opaque 16- or 32-byte identity: an instance UID, a package UMID, or a strong reference.
///
/// The raw bytes are preserved and two identities are equal only when their full stored bytes
/// are. A 32-byte UMID is never silently truncated; cross-matching against its embedded
/// material number is an explicit operation.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct MxfUid {
    len: u8,
    bytes: [u8; 32],
}

impl MxfUid {
    /// An identity from a 16-byte label or instance UID.
    pub fn from_ul(ul: [u8; 16]) -> MxfUid {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&ul);
        MxfUid { len: 16, bytes }
    }

    /// An identity from a 32-byte SMPTE UMID.
    pub fn from_umid(umid: [u8; 32]) -> MxfUid {
        MxfUid { len: 32, bytes: umid }
    }

    /// The stored bytes, 16 or 32 of them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    pub fn is_umid(&self) -> bool {
        self.len == 32
    }

    /// The material-number portion of a UMID, as a 16-byte identity. Used when cross-matching
    /// package references of differing widths.
    pub fn material_number(&self) -> Option<MxfUid> {
        if !self.is_umid() {
            return None;
        }

        let mut mn = [0u8; 16];
        mn.copy_from_slice(&self.bytes[16..32]);
        Some(MxfUid::from_ul(mn))
    }

    /// Returns if every stored byte is zero. A zero source package reference marks the end of a
    /// source reference chain.
    pub fn is_zero(&self) -> bool {
        self.as_bytes().iter().all(|b| *b == 0)
    }
}

impl fmt::Display for MxfUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 && i % 4 == 0 {
                write!(f, ".")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for MxfUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A rational number with a non-zero denominator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// An 8-byte SMPTE timestamp.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timestamp {
    pub year: i16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Fractional seconds in units of 1/250 s.
    pub quarter_msec: u8,
}

/// A local field resolved through the primer.
#[derive(Copy, Clone, Debug)]
pub struct LocalField {
    pub tag: u16,
    pub ul: Ul,
    pub len: u16,
}

/// Iterates the `(local_tag, length, value)` triples of one structural set's value.
pub struct LocalSetReader<'a> {
    reader: BufReader<'a>,
    primer: &'a PrimerPack,
    log: &'a mut ParseLog,
    current: Option<LocalField>,
    /// Position one past the current field's value.
    value_end: u64,
}

impl<'a> LocalSetReader<'a> {
    pub fn new(value: &'a [u8], primer: &'a PrimerPack, log: &'a mut ParseLog) -> Self {
        LocalSetReader { reader: BufReader::new(value), primer, log, current: None, value_end: 0 }
    }

    /// Advances to the next declared field, skipping fields whose local tag the primer does not
    /// declare, and any unread remainder of the previous field's value. Returns `None` when the
    /// set value is exhausted.
    pub fn next_field(&mut self) -> Result<Option<LocalField>> {
        loop {
            if self.reader.pos() < self.value_end {
                self.reader.ignore_bytes(self.value_end - self.reader.pos())?;
            }
            self.current = None;

            match self.reader.bytes_available() {
                0 => return Ok(None),
                1..=3 => return field_decode_error("truncated local tag header"),
                _ => (),
            }

            let tag = self.reader.read_be_u16()?;
            let len = self.reader.read_be_u16()?;

            if self.reader.bytes_available() < usize::from(len) {
                return field_decode_error("local field value overruns the set");
            }

            self.value_end = self.reader.pos() + u64::from(len);

            match self.primer.lookup(tag) {
                Some(ul) => {
                    let field = LocalField { tag, ul, len };
                    self.current = Some(field);
                    return Ok(Some(field));
                }
                None => {
                    self.log.warn(format!(
                        "local tag 0x{:04x} not declared in the primer, field skipped",
                        tag
                    ));
                    self.reader.ignore_bytes(u64::from(len))?;
                }
            }
        }
    }

    fn current(&self) -> LocalField {
        self.current.expect("a field header must be read before its value")
    }

    fn expect_len(&self, len: u16, msg: &'static str) -> Result<()> {
        if self.current().len != len {
            return field_decode_error(msg);
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.expect_len(1, "expected a 1-byte value")?;
        self.reader.read_byte()
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.expect_len(2, "expected a 2-byte value")?;
        self.reader.read_be_u16()
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.expect_len(4, "expected a 4-byte value")?;
        self.reader.read_be_u32()
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.expect_len(8, "expected an 8-byte value")?;
        self.reader.read_be_u64()
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.expect_len(8, "expected an 8-byte value")?;
        self.reader.read_be_i64()
    }

    pub fn read_rational(&mut self) -> Result<Rational> {
        self.expect_len(8, "expected an 8-byte rational")?;

        let num = self.reader.read_be_i32()?;
        let den = self.reader.read_be_i32()?;

        if den == 0 {
            return field_decode_error("zero rational denominator");
        }

        Ok(Rational { num, den })
    }

    pub fn read_timestamp(&mut self) -> Result<Timestamp> {
        self.expect_len(8, "expected an 8-byte timestamp")?;

        Ok(Timestamp {
            year: self.reader.read_be_u16()? as i16,
            month: self.reader.read_byte()?,
            day: self.reader.read_byte()?,
            hour: self.reader.read_byte()?,
            minute: self.reader.read_byte()?,
            second: self.reader.read_byte()?,
            quarter_msec: self.reader.read_byte()?,
        })
    }

    pub fn read_ul(&mut self) -> Result<Ul> {
        self.expect_len(16, "expected a 16-byte label")?;

        let mut bytes = [0u8; 16];
        self.reader.read_buf_exact(&mut bytes)?;
        Ok(Ul(bytes))
    }

    /// Reads a strong reference: the 16-byte instance UID of another set.
    pub fn read_ref(&mut self) -> Result<MxfUid> {
        self.expect_len(16, "expected a 16-byte strong reference")?;

        let mut bytes = [0u8; 16];
        self.reader.read_buf_exact(&mut bytes)?;
        Ok(MxfUid::from_ul(bytes))
    }

    /// Reads a 16-byte UID or a 32-byte UMID, preserving the stored width.
    pub fn read_uid(&mut self) -> Result<MxfUid> {
        match self.current().len {
            16 => self.read_ref(),
            32 => {
                let mut bytes = [0u8; 32];
                self.reader.read_buf_exact(&mut bytes)?;
                Ok(MxfUid::from_umid(bytes))
            }
            _ => field_decode_error("expected a 16- or 32-byte identity"),
        }
    }

    /// Reads a UTF-16BE string, stopping at the first NUL.
    pub fn read_utf16(&mut self) -> Result<String> {
        let len = self.current().len;

        if len % 2 != 0 {
            return field_decode_error("odd utf-16 string length");
        }

        let bytes = self.reader.read_buf_bytes_ref(usize::from(len))?;

        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .take_while(|unit| *unit != 0)
            .collect();

        Ok(String::from_utf16_lossy(&units))
    }

    /// Reads a 7-bit ISO string, stopping at the first NUL.
    pub fn read_iso7(&mut self) -> Result<String> {
        let len = self.current().len;

        let bytes = self.reader.read_buf_bytes_ref(usize::from(len))?;
        let bytes = bytes.split(|b| *b == 0).next().unwrap_or(bytes);

        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Reads a batch of strong references: `(count, item_size)` followed by `count` 16-byte
    /// instance UIDs.
    pub fn read_ref_batch(&mut self) -> Result<Vec<MxfUid>> {
        let (count, item_size) = self.read_batch_header()?;

        // Some writers record a zero item size for empty batches.
        if count > 0 && item_size != 16 {
            return field_decode_error("strong reference batch item size is not 16");
        }

        let mut refs = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let mut bytes = [0u8; 16];
            self.reader.read_buf_exact(&mut bytes)?;
            refs.push(MxfUid::from_ul(bytes));
        }

        Ok(refs)
    }

    /// Reads a batch of 16-byte universal labels.
    pub fn read_ul_batch(&mut self) -> Result<Vec<Ul>> {
        let (count, item_size) = self.read_batch_header()?;

        // Some writers record a zero item size for empty batches.
        if count > 0 && item_size != 16 {
            return field_decode_error("label batch item size is not 16");
        }

        let mut labels = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let mut bytes = [0u8; 16];
            self.reader.read_buf_exact(&mut bytes)?;
            labels.push(Ul(bytes));
        }

        Ok(labels)
    }

    fn read_batch_header(&mut self) -> Result<(u32, u32)> {
        let len = self.current().len;

        if len < 8 {
            return field_decode_error("truncated batch header");
        }

        let count = self.reader.read_be_u32()?;
        let item_size = self.reader.read_be_u32()?;

        if u64::from(count) * u64::from(item_size) != u64::from(len) - 8 {
            return field_decode_error("batch does not fill the field value");
        }

        Ok((count, item_size))
    }

    /// Reads the current field's value as an opaque blob.
    pub fn read_blob(&mut self) -> Result<Box<[u8]>> {
        let len = self.current().len;
        Ok(self.reader.read_buf_bytes_ref(usize::from(len))?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalSetReader, MxfUid};
    use crate::diag::ParseLog;
    use crate::labels::props;
    use crate::primer::PrimerPack;

    fn primer() -> PrimerPack {
        let mut value = Vec::new();
        let entries: [(u16, [u8; 16]); 3] = [
            (0x3c0a, props::INSTANCE_UID.0),
            (0x4b01, props::EDIT_RATE.0),
            (0x4402, props::PACKAGE_NAME.0),
        ];
        value.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        value.extend_from_slice(&18u32.to_be_bytes());
        for (tag, ul) in entries {
            value.extend_from_slice(&tag.to_be_bytes());
            value.extend_from_slice(&ul);
        }
        PrimerPack::read(&value).unwrap()
    }

    fn field(tag: u16, value: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&tag.to_be_bytes());
        bytes.extend_from_slice(&(value.len() as u16).to_be_bytes());
        bytes.extend_from_slice(value);
        bytes
    }

    #[test]
    fn walks_fields_and_skips_undeclared_tags() {
        let primer = primer();
        let mut log = ParseLog::new();

        let mut value = Vec::new();
        value.extend_from_slice(&field(0x3c0a, &[0xaa; 16]));
        // 0x9999 is not in the primer.
        value.extend_from_slice(&field(0x9999, &[1, 2, 3]));
        value.extend_from_slice(&field(0x4b01, &[0, 0, 0, 24, 0, 0, 0, 1]));

        let mut lsr = LocalSetReader::new(&value, &primer, &mut log);

        let f = lsr.next_field().unwrap().unwrap();
        assert_eq!(f.ul, props::INSTANCE_UID);
        assert_eq!(lsr.read_ref().unwrap(), MxfUid::from_ul([0xaa; 16]));

        let f = lsr.next_field().unwrap().unwrap();
        assert_eq!(f.ul, props::EDIT_RATE);
        let rate = lsr.read_rational().unwrap();
        assert_eq!((rate.num, rate.den), (24, 1));

        assert!(lsr.next_field().unwrap().is_none());
        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn unread_values_are_skipped_on_advance() {
        let primer = primer();
        let mut log = ParseLog::new();

        let mut value = Vec::new();
        value.extend_from_slice(&field(0x4402, &[0, 0x41, 0, 0x42]));
        value.extend_from_slice(&field(0x3c0a, &[0xbb; 16]));

        let mut lsr = LocalSetReader::new(&value, &primer, &mut log);

        // Do not read the package name value.
        lsr.next_field().unwrap().unwrap();

        let f = lsr.next_field().unwrap().unwrap();
        assert_eq!(f.ul, props::INSTANCE_UID);
    }

    #[test]
    fn utf16_strings_stop_at_nul() {
        let primer = primer();
        let mut log = ParseLog::new();

        let value = field(0x4402, &[0, 0x41, 0, 0x42, 0, 0, 0, 0x43]);
        let mut lsr = LocalSetReader::new(&value, &primer, &mut log);

        lsr.next_field().unwrap().unwrap();
        assert_eq!(lsr.read_utf16().unwrap(), "AB");
    }

    #[test]
    fn zero_rational_denominator_fails() {
        let primer = primer();
        let mut log = ParseLog::new();

        let value = field(0x4b01, &[0, 0, 0, 24, 0, 0, 0, 0]);
        let mut lsr = LocalSetReader::new(&value, &primer, &mut log);

        lsr.next_field().unwrap().unwrap();
        assert!(lsr.read_rational().is_err());
    }

    #[test]
    fn overrunning_field_fails() {
        let primer = primer();
        let mut log = ParseLog::new();

        let mut value = field(0x3c0a, &[0xcc; 16]);
        // Declare 16 bytes but provide 4.
        value.truncate(4 + 4);

        let mut lsr = LocalSetReader::new(&value, &primer, &mut log);
        assert!(lsr.next_field().is_err());
    }

    #[test]
    fn umids_keep_their_width() {
        let umid = MxfUid::from_umid([7u8; 32]);
        let ul = MxfUid::from_ul([7u8; 16]);

        assert_ne!(umid, ul);
        assert_eq!(umid.material_number().unwrap(), ul);
        assert!(ul.material_number().is_none());
        assert!(!umid.is_zero());
        assert!(MxfUid::from_ul([0u8; 16]).is_zero());
    }
}
