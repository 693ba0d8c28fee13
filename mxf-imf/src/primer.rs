// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The primer pack: the per-partition table mapping 2-byte local tags to universal labels.

use mxf_core::errors::{Error, Result};
use mxf_core::io::{BufReader, ReadBytes};

use crate::labels::Ul;

/// The size of one primer batch entry: a 2-byte local tag followed by a 16-byte label.
const PRIMER_ITEM_SIZE: u32 = 18;

/// An immutable local tag to universal label mapping.
///
/// Local tags are only meaningful within the partition whose primer declared them. The mapping
/// is a flat vector of pairs; primers are small enough that a linear scan beats a hash map.
pub struct PrimerPack {
    entries: Vec<(u16, Ul)>,
}

impl PrimerPack {
    /// Decodes a primer pack from the value bytes of its KLV.
    ///
    /// The value is a batch header (`count`, `item_size`) followed by `count` entries. An item
    /// size other than 18, a batch that does not fill the value exactly, or a repeated local tag
    /// is malformed.
    pub fn read(value: &[u8]) -> Result<PrimerPack> {
        let mut reader = BufReader::new(value);

        if reader.bytes_available() < 8 {
            return Err(Error::MalformedPrimer("truncated batch header"));
        }

        let count = reader.read_be_u32()?;
        let item_size = reader.read_be_u32()?;

        if item_size != PRIMER_ITEM_SIZE {
            return Err(Error::MalformedPrimer("batch item size is not 18"));
        }

        if u64::from(count) * u64::from(item_size) != reader.bytes_available() as u64 {
            return Err(Error::MalformedPrimer("batch does not fill the value"));
        }

        let mut entries: Vec<(u16, Ul)> = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let tag = reader.read_be_u16()?;

            let mut ul = [0u8; 16];
            reader.read_buf_exact(&mut ul)?;

            if entries.iter().any(|(t, _)| *t == tag) {
                return Err(Error::MalformedPrimer("duplicate local tag"));
            }

            entries.push((tag, Ul(ul)));
        }

        Ok(PrimerPack { entries })
    }

    /// Resolves a local tag to its declared label.
    pub fn lookup(&self, tag: u16) -> Option<Ul> {
        self.entries.iter().find(|(t, _)| *t == tag).map(|(_, ul)| *ul)
    }

    /// The number of declared local tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::PrimerPack;
    use crate::labels::props;

    fn batch(entries: &[(u16, [u8; 16])], item_size: u32) -> Vec<u8> {
        let mut value = Vec::new();
        value.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        value.extend_from_slice(&item_size.to_be_bytes());
        for (tag, ul) in entries {
            value.extend_from_slice(&tag.to_be_bytes());
            value.extend_from_slice(ul);
        }
        value
    }

    #[test]
    fn decodes_and_resolves_tags() {
        let value = batch(
            &[(0x3c0a, props::INSTANCE_UID.0), (0x8001, props::SUB_DESCRIPTORS.0)],
            18,
        );

        let primer = PrimerPack::read(&value).unwrap();
        assert_eq!(primer.len(), 2);
        assert_eq!(primer.lookup(0x3c0a), Some(props::INSTANCE_UID));
        assert_eq!(primer.lookup(0x8001), Some(props::SUB_DESCRIPTORS));
        assert_eq!(primer.lookup(0x4401), None);
    }

    #[test]
    fn rejects_bad_item_size() {
        let value = batch(&[(0x3c0a, props::INSTANCE_UID.0)], 20);
        assert!(PrimerPack::read(&value).is_err());
    }

    #[test]
    fn rejects_duplicate_tags() {
        let value = batch(
            &[(0x3c0a, props::INSTANCE_UID.0), (0x3c0a, props::PACKAGE_UID.0)],
            18,
        );
        assert!(PrimerPack::read(&value).is_err());
    }

    #[test]
    fn rejects_short_batch() {
        let mut value = batch(&[(0x3c0a, props::INSTANCE_UID.0)], 18);
        value.truncate(value.len() - 1);
        assert!(PrimerPack::read(&value).is_err());
    }
}
