// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The partition pack: the fixed-schema record opening every MXF partition.

use mxf_core::errors::{Error, Result};
use mxf_core::io::{BufReader, ReadBytes};

use crate::labels::{Ul, PARTITION_PACK_PREFIX};

/// The partition kind, selected by byte 14 of the partition pack key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PartitionKind {
    Header,
    Body,
    Footer,
}

/// The partition status, selected by byte 15 of the partition pack key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PartitionStatus {
    OpenIncomplete,
    ClosedIncomplete,
    OpenComplete,
    ClosedComplete,
}

/// Classifies a key in the partition pack family into its kind and status.
pub fn classify_partition_key(key: &Ul) -> Option<(PartitionKind, PartitionStatus)> {
    if key.masked().0[0..13] != PARTITION_PACK_PREFIX {
        return None;
    }

    let kind = match key.0[13] {
        0x02 => PartitionKind::Header,
        0x03 => PartitionKind::Body,
        0x04 => PartitionKind::Footer,
        _ => return None,
    };

    let status = match key.0[14] {
        0x01 => PartitionStatus::OpenIncomplete,
        0x02 => PartitionStatus::ClosedIncomplete,
        0x03 => PartitionStatus::OpenComplete,
        0x04 => PartitionStatus::ClosedComplete,
        _ => return None,
    };

    Some((kind, status))
}

/// A decoded partition pack.
#[derive(Clone, Debug)]
pub struct PartitionPack {
    pub kind: PartitionKind,
    pub status: PartitionStatus,
    pub major_version: u16,
    pub minor_version: u16,
    pub kag_size: u32,
    /// This partition's offset from the start of the file body.
    pub this_partition: u64,
    pub previous_partition: u64,
    pub footer_partition: u64,
    /// The size of the header metadata region, measured from the first byte of the primer pack.
    pub header_byte_count: u64,
    pub index_byte_count: u64,
    pub index_sid: u32,
    pub body_offset: u64,
    pub body_sid: u32,
    pub operational_pattern: Ul,
    pub essence_containers: Vec<Ul>,
}

/// The fixed portion of a partition pack value: everything up to the essence container batch.
const PARTITION_PACK_FIXED_LEN: usize = 80;

impl PartitionPack {
    /// Decodes a partition pack from its key and value bytes.
    pub fn read(key: &Ul, value: &[u8]) -> Result<PartitionPack> {
        let (kind, status) = match classify_partition_key(key) {
            Some(classified) => classified,
            None => return Err(Error::InvalidPartitionPack("not a partition pack key")),
        };

        if value.len() < PARTITION_PACK_FIXED_LEN + 8 {
            return Err(Error::InvalidPartitionPack("truncated partition pack"));
        }

        let mut reader = BufReader::new(value);

        let major_version = reader.read_be_u16()?;
        let minor_version = reader.read_be_u16()?;
        let kag_size = reader.read_be_u32()?;
        let this_partition = reader.read_be_u64()?;
        let previous_partition = reader.read_be_u64()?;
        let footer_partition = reader.read_be_u64()?;
        let header_byte_count = reader.read_be_u64()?;
        let index_byte_count = reader.read_be_u64()?;
        let index_sid = reader.read_be_u32()?;
        let body_offset = reader.read_be_u64()?;
        let body_sid = reader.read_be_u32()?;

        let mut operational_pattern = [0u8; 16];
        reader.read_buf_exact(&mut operational_pattern)?;

        let count = reader.read_be_u32()?;
        let item_size = reader.read_be_u32()?;

        if item_size != 16 {
            return Err(Error::InvalidPartitionPack("essence container batch item size is not 16"));
        }
        if u64::from(count) * 16 != reader.bytes_available() as u64 {
            return Err(Error::InvalidPartitionPack("essence container batch size mismatch"));
        }

        let mut essence_containers = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let mut ul = [0u8; 16];
            reader.read_buf_exact(&mut ul)?;
            essence_containers.push(Ul(ul));
        }

        Ok(PartitionPack {
            kind,
            status,
            major_version,
            minor_version,
            kag_size,
            this_partition,
            previous_partition,
            footer_partition,
            header_byte_count,
            index_byte_count,
            index_sid,
            body_offset,
            body_sid,
            operational_pattern: Ul(operational_pattern),
            essence_containers,
        })
    }

    pub fn is_header(&self) -> bool {
        self.kind == PartitionKind::Header
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_partition_key, PartitionKind, PartitionPack, PartitionStatus};
    use crate::labels::{Ul, PRIMER_PACK};

    fn header_key() -> Ul {
        Ul([
            0x06, 0x0e, 0x2b, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0d, 0x01, 0x02, 0x01, 0x01, 0x02,
            0x04, 0x00,
        ])
    }

    fn pack_value(header_byte_count: u64, containers: usize) -> Vec<u8> {
        let mut value = Vec::new();
        value.extend_from_slice(&1u16.to_be_bytes()); // major
        value.extend_from_slice(&3u16.to_be_bytes()); // minor
        value.extend_from_slice(&512u32.to_be_bytes()); // kag
        value.extend_from_slice(&0u64.to_be_bytes()); // this partition
        value.extend_from_slice(&0u64.to_be_bytes()); // previous
        value.extend_from_slice(&0u64.to_be_bytes()); // footer
        value.extend_from_slice(&header_byte_count.to_be_bytes());
        value.extend_from_slice(&0u64.to_be_bytes()); // index byte count
        value.extend_from_slice(&0u32.to_be_bytes()); // index sid
        value.extend_from_slice(&0u64.to_be_bytes()); // body offset
        value.extend_from_slice(&0u32.to_be_bytes()); // body sid
        value.extend_from_slice(&[0x06; 16]); // operational pattern
        value.extend_from_slice(&(containers as u32).to_be_bytes());
        value.extend_from_slice(&16u32.to_be_bytes());
        for i in 0..containers {
            value.extend_from_slice(&[i as u8; 16]);
        }
        value
    }

    #[test]
    fn classifies_kind_and_status() {
        assert_eq!(
            classify_partition_key(&header_key()),
            Some((PartitionKind::Header, PartitionStatus::ClosedComplete))
        );
        assert_eq!(classify_partition_key(&PRIMER_PACK), None);
    }

    #[test]
    fn decodes_fixed_fields_and_batch() {
        let pack = PartitionPack::read(&header_key(), &pack_value(8192, 2)).unwrap();

        assert!(pack.is_header());
        assert_eq!(pack.major_version, 1);
        assert_eq!(pack.minor_version, 3);
        assert_eq!(pack.kag_size, 512);
        assert_eq!(pack.header_byte_count, 8192);
        assert_eq!(pack.essence_containers.len(), 2);
        assert_eq!(pack.essence_containers[1], Ul([1; 16]));
    }

    #[test]
    fn rejects_truncated_pack() {
        let mut value = pack_value(0, 0);
        value.truncate(40);
        assert!(PartitionPack::read(&header_key(), &value).is_err());
    }

    #[test]
    fn rejects_non_partition_key() {
        assert!(PartitionPack::read(&PRIMER_PACK, &pack_value(0, 0)).is_err());
    }
}
