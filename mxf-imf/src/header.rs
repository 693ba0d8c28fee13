// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The header partition facade.
//!
//! [`HeaderPartition::try_new`] performs the whole construction pass: partition pack, primer,
//! structural sets, graph resolution, and indexing. The byte source is only borrowed for that
//! call; afterwards the value is deeply immutable and safe to share across threads for
//! querying.

use mxf_core::errors::{decode_error, Error, Result};
use mxf_core::io::{MediaSourceStream, ReadBytes};

use crate::diag::ParseLog;
use crate::fields::MxfUid;
use crate::klv::read_klv_header;
use crate::labels::{SetType, INDEX_TABLE_SEGMENT};
use crate::partition::PartitionPack;
use crate::primer::PrimerPack;
use crate::resolver::{
    resolve, BoArena, ContentStorage, EssenceContainerData, InterchangeObject, MaterialPackage,
    Preface, ResolvedGraph, Sequence, SourceClip, SourcePackage, TimelineTrack,
};
use crate::sets::{IdentificationBo, SetBo, WaveAudioDescriptorBo};

/// A parsed MXF header partition, constrained to the IMF essence component profile.
///
/// Construction consumes the byte source sequentially in a single pass; the partition must begin
/// at absolute offset 0 of the source. Non-fatal defects accumulate in the [`parse log`]
/// (unknown sets, unknown local tags, dangling references); any fatal defect fails the
/// constructor.
///
/// [`parse log`]: HeaderPartition::parse_log
pub struct HeaderPartition {
    partition_pack: PartitionPack,
    primer: PrimerPack,
    arena: BoArena,
    graph: ResolvedGraph,
    log: ParseLog,
}

impl HeaderPartition {
    /// Reads the header partition from the start of the given stream.
    pub fn try_new(mss: &mut MediaSourceStream<'_>) -> Result<HeaderPartition> {
        let mut log = ParseLog::new();
        let fatal_mark = log.fatal_count();

        let offset = mss.pos();
        if offset != 0 {
            log.fatal(format!("header partition at byte offset {}, expected 0", offset));
            return Err(Error::UnexpectedOffset(offset));
        }

        // The partition pack opens the partition.
        let klv = read_klv_header(mss)?;

        if !klv.key.is_partition_pack() {
            log.fatal("first klv is not a partition pack");
            return Err(Error::InvalidPartitionPack("first klv is not a partition pack"));
        }

        let value = mss.read_boxed_slice_exact(klv.value_len as usize)?;

        let partition_pack = match PartitionPack::read(&klv.key, &value) {
            Ok(pack) => pack,
            Err(err) => {
                log.fatal(format!("{}", err));
                return Err(err);
            }
        };

        if !partition_pack.is_header() {
            log.fatal("partition pack does not describe a header partition");
            return Err(Error::InvalidPartitionPack("not a header partition"));
        }

        // The primer pack follows, with at most one fill item in between.
        let mut klv = read_klv_header(mss)?;

        if klv.key.is_fill() {
            mss.ignore_bytes(klv.value_len)?;
            klv = read_klv_header(mss)?;
        }

        if !klv.key.is_primer() {
            log.fatal("neither the first nor the post-fill klv is a primer pack");
            return Err(Error::MissingPrimer(
                "neither the first nor the post-fill klv is a primer pack",
            ));
        }

        // The header metadata region is measured from the primer pack's first byte.
        let metadata_start = klv.pos;
        let header_byte_count = partition_pack.header_byte_count;

        let value = mss.read_boxed_slice_exact(klv.value_len as usize)?;

        let primer = match PrimerPack::read(&value) {
            Ok(primer) => primer,
            Err(err) => {
                log.fatal(format!("{}", err));
                return Err(err);
            }
        };

        // Decode structural sets until the metadata region is exhausted.
        let mut arena = BoArena::new();

        loop {
            if header_byte_count > 0 && mss.pos() - metadata_start >= header_byte_count {
                break;
            }

            let klv = match read_klv_header(mss) {
                Ok(klv) => klv,
                // An open partition leaves the byte count zero; the stream end closes the
                // region instead.
                Err(Error::EndOfStream) if header_byte_count == 0 => break,
                Err(err) => return Err(err),
            };

            if klv.key.is_fill() {
                mss.ignore_bytes(klv.value_len)?;
                continue;
            }

            if klv.key.masked() == INDEX_TABLE_SEGMENT.masked() {
                mss.ignore_bytes(klv.value_len)?;
                break;
            }

            if !klv.key.is_local_set() {
                log::debug!("key {} ends the structural metadata region", klv.key);
                break;
            }

            match klv.key.set_type() {
                Some(set_type) => {
                    let value = mss.read_boxed_slice_exact(klv.value_len as usize)?;

                    let bo = match SetBo::read(set_type, &value, &primer, &mut log) {
                        Ok(bo) => bo,
                        Err(err) => {
                            log.fatal(format!("{:?} set failed to decode: {}", set_type, err));
                            return Err(err);
                        }
                    };

                    arena.insert(bo, &mut log);
                }
                None => {
                    log.warn(format!("unknown structural set key {}, value skipped", klv.key));
                    mss.ignore_bytes(klv.value_len)?;
                }
            }
        }

        // Resolve the strong-reference graph and materialize the rich objects.
        let graph = resolve(&arena, &mut log)?;

        // Exactly one preface per header partition.
        let prefaces = graph.by_class.get(&SetType::Preface).map_or(0, |v| v.len());

        if prefaces == 0 {
            log.fatal("header partition has no preface set");
            return Err(Error::NoPreface);
        }
        if prefaces > 1 {
            log.fatal(format!("header partition has {} preface sets", prefaces));
            return Err(Error::MultiplePreface(prefaces));
        }

        // Every fatal path above returns directly; this is the final gate over anything recorded
        // fatal during this run.
        if log.fatal_count() > fatal_mark {
            return decode_error("mxf: fatal diagnostics recorded during parse");
        }

        Ok(HeaderPartition { partition_pack, primer, arena, graph, log })
    }

    /// The decoded partition pack.
    pub fn partition_pack(&self) -> &PartitionPack {
        &self.partition_pack
    }

    /// The decoded primer pack.
    pub fn primer(&self) -> &PrimerPack {
        &self.primer
    }

    /// The diagnostics accumulated while parsing.
    pub fn parse_log(&self) -> &ParseLog {
        &self.log
    }

    /// All materialized objects, in construction (topological) order.
    pub fn objects(&self) -> &[InterchangeObject] {
        &self.graph.objects
    }

    /// Looks up an object by instance UID, or by package UID for generic packages.
    pub fn object(&self, uid: MxfUid) -> Option<&InterchangeObject> {
        self.graph.by_uid.get(&uid).map(|&index| &self.graph.objects[index])
    }

    /// Looks up a byte object by instance UID, full package UID, or UMID material number.
    pub fn bo(&self, uid: MxfUid) -> Option<&SetBo> {
        self.arena.get(uid)
    }

    fn class_objects(&self, kind: SetType) -> impl Iterator<Item = &InterchangeObject> + '_ {
        self.graph
            .by_class
            .get(&kind)
            .map(|indexes| indexes.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&index| &self.graph.objects[index])
    }

    /// The sole preface of the partition.
    pub fn preface(&self) -> Option<&Preface> {
        self.class_objects(SetType::Preface).find_map(|object| match object {
            InterchangeObject::Preface(preface) => Some(preface),
            _ => None,
        })
    }

    pub fn content_storage_list(&self) -> Vec<&ContentStorage> {
        self.class_objects(SetType::ContentStorage)
            .filter_map(|object| match object {
                InterchangeObject::ContentStorage(cs) => Some(cs),
                _ => None,
            })
            .collect()
    }

    pub fn material_packages(&self) -> Vec<&MaterialPackage> {
        self.class_objects(SetType::MaterialPackage)
            .filter_map(|object| match object {
                InterchangeObject::MaterialPackage(package) => Some(package),
                _ => None,
            })
            .collect()
    }

    pub fn source_packages(&self) -> Vec<&SourcePackage> {
        self.class_objects(SetType::SourcePackage)
            .filter_map(|object| match object {
                InterchangeObject::SourcePackage(package) => Some(package),
                _ => None,
            })
            .collect()
    }

    pub fn essence_container_data_list(&self) -> Vec<&EssenceContainerData> {
        self.class_objects(SetType::EssenceContainerData)
            .filter_map(|object| match object {
                InterchangeObject::EssenceContainerData(ecd) => Some(ecd),
                _ => None,
            })
            .collect()
    }

    /// The identification sets of the header metadata, in decode order.
    pub fn identifications(&self) -> Vec<&IdentificationBo> {
        self.arena
            .bos()
            .iter()
            .filter_map(|bo| match bo {
                SetBo::Identification(ident) => Some(ident),
                _ => None,
            })
            .collect()
    }

    /// The wave audio essence descriptors of the header metadata, in decode order.
    pub fn wave_audio_essence_descriptors(&self) -> Vec<&WaveAudioDescriptorBo> {
        self.arena
            .bos()
            .iter()
            .filter_map(|bo| match bo {
                SetBo::WaveAudioDescriptor(wave) => Some(wave),
                _ => None,
            })
            .collect()
    }

    /// The essence descriptor of every source package, dereferenced through the byte object
    /// map.
    pub fn essence_descriptors(&self) -> Vec<&SetBo> {
        self.arena
            .bos()
            .iter()
            .filter_map(|bo| match bo {
                SetBo::SourcePackage(package) => package.descriptor,
                _ => None,
            })
            .filter_map(|uid| self.arena.get(uid))
            .collect()
    }

    /// Every sub-descriptor referenced by any essence descriptor, dereferenced through the byte
    /// object map.
    pub fn sub_descriptors(&self) -> Vec<&SetBo> {
        self.essence_descriptors()
            .iter()
            .flat_map(|descriptor| self.sub_descriptors_of(descriptor))
            .collect()
    }

    /// The sub-descriptors referenced by one essence descriptor.
    pub fn sub_descriptors_of(&self, descriptor: &SetBo) -> Vec<&SetBo> {
        descriptor
            .sub_descriptor_uids()
            .iter()
            .filter_map(|&uid| self.arena.get(uid))
            .collect()
    }

    pub fn timeline_track(&self, uid: MxfUid) -> Option<&TimelineTrack> {
        match self.object(uid) {
            Some(InterchangeObject::TimelineTrack(track)) => Some(track),
            _ => None,
        }
    }

    pub fn sequence(&self, uid: MxfUid) -> Option<&Sequence> {
        match self.object(uid) {
            Some(InterchangeObject::Sequence(sequence)) => Some(sequence),
            _ => None,
        }
    }

    pub fn source_clip(&self, uid: MxfUid) -> Option<&SourceClip> {
        match self.object(uid) {
            Some(InterchangeObject::SourceClip(clip)) => Some(clip),
            _ => None,
        }
    }

    pub fn material_package(&self, uid: MxfUid) -> Option<&MaterialPackage> {
        match self.object(uid) {
            Some(InterchangeObject::MaterialPackage(package)) => Some(package),
            _ => None,
        }
    }

    pub fn source_package(&self, uid: MxfUid) -> Option<&SourcePackage> {
        match self.object(uid) {
            Some(InterchangeObject::SourcePackage(package)) => Some(package),
            _ => None,
        }
    }

    pub fn essence_container_data(&self, uid: MxfUid) -> Option<&EssenceContainerData> {
        match self.object(uid) {
            Some(InterchangeObject::EssenceContainerData(ecd)) => Some(ecd),
            _ => None,
        }
    }

    /// Returns if the partition materialized any object of the given class.
    pub fn has(&self, kind: SetType) -> bool {
        self.graph.by_class.get(&kind).is_some_and(|indexes| !indexes.is_empty())
    }

    pub fn has_material_package(&self) -> bool {
        self.has(SetType::MaterialPackage)
    }

    pub fn has_source_package(&self) -> bool {
        self.has(SetType::SourcePackage)
    }

    pub fn has_timeline_track(&self) -> bool {
        self.has(SetType::TimelineTrack)
    }

    pub fn has_wave_audio_essence_descriptor(&self) -> bool {
        self.has(SetType::WaveAudioDescriptor)
    }

    /// The essence duration of the first material package: the maximum over its timeline tracks
    /// of the summed durations of each track's sequence components. Components that do not
    /// resolve are skipped.
    pub fn essence_duration(&self) -> Result<i64> {
        let package = self
            .arena
            .bos()
            .iter()
            .find_map(|bo| match bo {
                SetBo::MaterialPackage(package) => Some(package),
                _ => None,
            });

        let package = match package {
            Some(package) => package,
            None => return decode_error("mxf: header partition has no material package"),
        };

        let mut duration = None;

        for &track_uid in &package.tracks {
            let track = match self.arena.get(track_uid) {
                Some(SetBo::TimelineTrack(track)) => track,
                _ => continue,
            };

            let sequence = match track.sequence.and_then(|uid| self.arena.get(uid)) {
                Some(SetBo::Sequence(sequence)) => sequence,
                _ => continue,
            };

            let sum: i64 = sequence
                .components
                .iter()
                .filter_map(|&uid| self.arena.get(uid))
                .filter_map(|bo| bo.duration())
                .sum();

            duration = Some(duration.map_or(sum, |max: i64| max.max(sum)));
        }

        match duration {
            Some(duration) => Ok(duration),
            None => decode_error("mxf: material package has no timeline tracks"),
        }
    }

    /// All byte objects of the given structural-set class, in decode order.
    pub fn structural_metadata(&self, kind: SetType) -> Vec<&SetBo> {
        self.arena.bos().iter().filter(|bo| bo.set_type() == kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use mxf_core::errors::Error;
    use mxf_core::io::{MediaSourceStream, ReadBytes};

    use super::HeaderPartition;
    use crate::fields::MxfUid;
    use crate::klv::encode_ber_length;
    use crate::labels::{self, props, SetType, Ul};

    const HEADER_CLOSED_COMPLETE: Ul = Ul([
        0x06, 0x0e, 0x2b, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0d, 0x01, 0x02, 0x01, 0x01, 0x02, 0x04,
        0x00,
    ]);

    /// Local tags declared by the test primer.
    const PRIMER_TAGS: &[(u16, Ul)] = &[
        (0x3c0a, props::INSTANCE_UID),
        (0x3b03, props::CONTENT_STORAGE),
        (0x3b08, props::PRIMARY_PACKAGE),
        (0x1901, props::PACKAGES),
        (0x1902, props::ESSENCE_CONTAINER_DATA_REFS),
        (0x2701, props::LINKED_PACKAGE_UID),
        (0x4401, props::PACKAGE_UID),
        (0x4403, props::TRACKS),
        (0x4701, props::DESCRIPTOR),
        (0x4801, props::TRACK_ID),
        (0x4803, props::SEQUENCE),
        (0x1001, props::STRUCTURAL_COMPONENTS),
        (0x0202, props::DURATION),
        (0x1101, props::SOURCE_PACKAGE_ID),
        (0x3d0a, props::BLOCK_ALIGN),
        (0x8001, props::SUB_DESCRIPTORS),
    ];

    fn klv(key: Ul, value: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&key.0);
        encode_ber_length(value.len() as u64, &mut bytes);
        bytes.extend_from_slice(value);
        bytes
    }

    fn field(tag: u16, value: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&tag.to_be_bytes());
        bytes.extend_from_slice(&(value.len() as u16).to_be_bytes());
        bytes.extend_from_slice(value);
        bytes
    }

    fn ref_batch(items: &[[u8; 16]]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(items.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&16u32.to_be_bytes());
        for item in items {
            bytes.extend_from_slice(item);
        }
        bytes
    }

    fn umid(seed: u8) -> [u8; 32] {
        let mut bytes = [seed; 32];
        bytes[0] = 0x06;
        bytes
    }

    /// Assembles a complete synthetic header partition.
    struct HeaderBuilder {
        fills_before_primer: usize,
        sets: Vec<Vec<u8>>,
    }

    impl HeaderBuilder {
        fn new() -> Self {
            HeaderBuilder { fills_before_primer: 0, sets: Vec::new() }
        }

        fn fill_before_primer(mut self, count: usize) -> Self {
            self.fills_before_primer = count;
            self
        }

        fn set(mut self, key: Ul, fields: &[Vec<u8>]) -> Self {
            let value: Vec<u8> = fields.iter().flatten().copied().collect();
            self.sets.push(klv(key, &value));
            self
        }

        fn build(self) -> Vec<u8> {
            // Primer batch.
            let mut primer_value = Vec::new();
            primer_value.extend_from_slice(&(PRIMER_TAGS.len() as u32).to_be_bytes());
            primer_value.extend_from_slice(&18u32.to_be_bytes());
            for (tag, ul) in PRIMER_TAGS {
                primer_value.extend_from_slice(&tag.to_be_bytes());
                primer_value.extend_from_slice(&ul.0);
            }
            let primer_klv = klv(labels::PRIMER_PACK, &primer_value);

            let sets_len: usize = self.sets.iter().map(Vec::len).sum();
            let header_byte_count = (primer_klv.len() + sets_len) as u64;

            // Partition pack.
            let mut pack = Vec::new();
            pack.extend_from_slice(&1u16.to_be_bytes());
            pack.extend_from_slice(&3u16.to_be_bytes());
            pack.extend_from_slice(&0u32.to_be_bytes()); // kag size
            pack.extend_from_slice(&0u64.to_be_bytes()); // this partition
            pack.extend_from_slice(&0u64.to_be_bytes()); // previous
            pack.extend_from_slice(&0u64.to_be_bytes()); // footer
            pack.extend_from_slice(&header_byte_count.to_be_bytes());
            pack.extend_from_slice(&0u64.to_be_bytes()); // index byte count
            pack.extend_from_slice(&0u32.to_be_bytes()); // index sid
            pack.extend_from_slice(&0u64.to_be_bytes()); // body offset
            pack.extend_from_slice(&0u32.to_be_bytes()); // body sid
            pack.extend_from_slice(&[0x06; 16]); // operational pattern
            pack.extend_from_slice(&0u32.to_be_bytes()); // essence container count
            pack.extend_from_slice(&16u32.to_be_bytes());

            let mut bytes = klv(HEADER_CLOSED_COMPLETE, &pack);

            for _ in 0..self.fills_before_primer {
                bytes.extend_from_slice(&klv(labels::FILL_ITEM, &[0u8; 8]));
            }

            bytes.extend_from_slice(&primer_klv);
            for set in &self.sets {
                bytes.extend_from_slice(set);
            }

            bytes
        }
    }

    /// The minimal valid header: a preface, a content storage, and an empty material package.
    fn minimal_builder() -> HeaderBuilder {
        HeaderBuilder::new()
            .set(
                labels::PREFACE,
                &[
                    field(0x3c0a, &[0x00; 16]),
                    field(0x3b08, &[0x01; 16]),
                    field(0x3b03, &[0x02; 16]),
                ],
            )
            .set(
                labels::CONTENT_STORAGE,
                &[field(0x3c0a, &[0x02; 16]), field(0x1901, &ref_batch(&[[0x01; 16]]))],
            )
            .set(
                labels::MATERIAL_PACKAGE,
                &[
                    field(0x3c0a, &[0x01; 16]),
                    field(0x4401, &umid(0xd0)),
                    field(0x4403, &ref_batch(&[])),
                ],
            )
    }

    fn parse(bytes: Vec<u8>) -> mxf_core::errors::Result<HeaderPartition> {
        let mut mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)));
        HeaderPartition::try_new(&mut mss)
    }

    #[test]
    fn minimal_valid_header() {
        let header = parse(minimal_builder().build()).unwrap();

        let preface = header.preface().unwrap();
        assert_eq!(preface.primary_package, Some(MxfUid::from_ul([0x01; 16])));
        assert_eq!(preface.content_storage, MxfUid::from_ul([0x02; 16]));

        assert_eq!(header.content_storage_list().len(), 1);
        assert_eq!(header.material_packages().len(), 1);
        assert!(header.source_packages().is_empty());
        assert!(header.has_material_package());
        assert!(!header.has_source_package());

        // No timeline tracks: the duration computation refuses.
        assert!(header.essence_duration().is_err());
    }

    #[test]
    fn uid_indexing_is_dual_keyed() {
        let header = parse(minimal_builder().build()).unwrap();

        let by_instance = header.material_package(MxfUid::from_ul([0x01; 16])).unwrap();
        let by_package = header.material_package(MxfUid::from_umid(umid(0xd0))).unwrap();

        assert_eq!(by_instance.instance_uid, by_package.instance_uid);

        // A lookup with the wrong kind misses.
        assert!(header.timeline_track(MxfUid::from_ul([0x01; 16])).is_none());
        assert!(header.material_package(MxfUid::from_ul([0x7f; 16])).is_none());
    }

    #[test]
    fn construction_order_is_topological() {
        let header = parse(minimal_builder().build()).unwrap();

        // The preface depends on everything else; it must come last. The material package
        // precedes the content storage that references it.
        let kinds: Vec<SetType> = header.objects().iter().map(|o| o.kind()).collect();
        assert_eq!(
            kinds,
            vec![SetType::MaterialPackage, SetType::ContentStorage, SetType::Preface]
        );
    }

    #[test]
    fn nonzero_offset_is_fatal() {
        let mut bytes = vec![0u8; 4096];
        bytes.extend_from_slice(&minimal_builder().build());

        let mut mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)));
        mss.ignore_bytes(4096).unwrap();

        match HeaderPartition::try_new(&mut mss) {
            Err(Error::UnexpectedOffset(4096)) => (),
            other => panic!("expected UnexpectedOffset, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn two_prefaces_are_fatal() {
        let bytes = minimal_builder()
            .set(
                labels::PREFACE,
                &[field(0x3c0a, &[0x70; 16]), field(0x3b03, &[0x02; 16])],
            )
            .build();

        match parse(bytes) {
            Err(Error::MultiplePreface(2)) => (),
            other => panic!("expected MultiplePreface, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_preface_is_fatal() {
        let bytes = HeaderBuilder::new()
            .set(
                labels::MATERIAL_PACKAGE,
                &[
                    field(0x3c0a, &[0x01; 16]),
                    field(0x4401, &umid(0xd0)),
                    field(0x4403, &ref_batch(&[])),
                ],
            )
            .build();

        match parse(bytes) {
            Err(Error::NoPreface) => (),
            other => panic!("expected NoPreface, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn one_fill_before_primer_is_accepted() {
        let header = parse(minimal_builder().fill_before_primer(1).build()).unwrap();
        assert!(header.preface().is_some());
    }

    #[test]
    fn two_fills_before_primer_are_fatal() {
        match parse(minimal_builder().fill_before_primer(2).build()) {
            Err(Error::MissingPrimer(_)) => (),
            other => panic!("expected MissingPrimer, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn reference_cycle_is_fatal() {
        let bytes = minimal_builder()
            .set(
                labels::SEQUENCE,
                &[field(0x3c0a, &[0x51; 16]), field(0x1001, &ref_batch(&[[0x52; 16]]))],
            )
            .set(
                labels::SEQUENCE,
                &[field(0x3c0a, &[0x52; 16]), field(0x1001, &ref_batch(&[[0x51; 16]]))],
            )
            .build();

        match parse(bytes) {
            Err(Error::CyclicGraph) => (),
            other => panic!("expected CyclicGraph, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn unknown_structural_sets_are_skipped_with_a_warning() {
        let unknown_key =
            Ul([0x06, 0x0e, 0x2b, 0x34, 0x02, 0x53, 0x01, 0x01, 0x0d, 0x01, 0x01, 0x01, 0x01,
                0x01, 0xfe, 0x00]);

        let header = parse(
            minimal_builder().set(unknown_key, &[field(0x3c0a, &[0x60; 16])]).build(),
        )
        .unwrap();

        assert!(header.preface().is_some());
        assert!(!header.parse_log().entries().is_empty());
    }

    fn clip(uid: u8, duration: i64) -> Vec<Vec<u8>> {
        vec![
            field(0x3c0a, &[uid; 16]),
            field(0x0202, &duration.to_be_bytes()),
            field(0x1101, &[0x00; 32]),
        ]
    }

    /// Two tracks with component durations [24, 24] and [48]; the essence duration is the
    /// maximum track sum.
    #[test]
    fn essence_duration_is_the_maximum_track_sum() {
        let bytes = HeaderBuilder::new()
            .set(
                labels::PREFACE,
                &[field(0x3c0a, &[0x00; 16]), field(0x3b03, &[0x02; 16])],
            )
            .set(
                labels::CONTENT_STORAGE,
                &[field(0x3c0a, &[0x02; 16]), field(0x1901, &ref_batch(&[[0x01; 16]]))],
            )
            .set(
                labels::MATERIAL_PACKAGE,
                &[
                    field(0x3c0a, &[0x01; 16]),
                    field(0x4401, &umid(0xd0)),
                    field(0x4403, &ref_batch(&[[0x11; 16], [0x12; 16]])),
                ],
            )
            .set(
                labels::TIMELINE_TRACK,
                &[field(0x3c0a, &[0x11; 16]), field(0x4801, &1u32.to_be_bytes()), field(0x4803, &[0x21; 16])],
            )
            .set(
                labels::TIMELINE_TRACK,
                &[field(0x3c0a, &[0x12; 16]), field(0x4801, &2u32.to_be_bytes()), field(0x4803, &[0x22; 16])],
            )
            .set(
                labels::SEQUENCE,
                &[
                    field(0x3c0a, &[0x21; 16]),
                    field(0x1001, &ref_batch(&[[0x31; 16], [0x32; 16]])),
                ],
            )
            .set(
                labels::SEQUENCE,
                &[field(0x3c0a, &[0x22; 16]), field(0x1001, &ref_batch(&[[0x33; 16]]))],
            )
            .set(labels::SOURCE_CLIP, &clip(0x31, 24))
            .set(labels::SOURCE_CLIP, &clip(0x32, 24))
            .set(labels::SOURCE_CLIP, &clip(0x33, 48))
            .build();

        let header = parse(bytes).unwrap();

        assert_eq!(header.essence_duration().unwrap(), 48);
        assert!(header.has_timeline_track());

        // Typed lookups resolve through the graph.
        let track = header.timeline_track(MxfUid::from_ul([0x11; 16])).unwrap();
        let sequence = header.sequence(track.sequence).unwrap();
        assert_eq!(sequence.components.len(), 2);
        assert!(header.source_clip(sequence.components[0]).is_some());
    }

    fn wave_header(sub_descriptor_sets: Vec<(Ul, Vec<Vec<u8>>)>, sub_refs: &[[u8; 16]]) -> Vec<u8> {
        let mut builder = HeaderBuilder::new()
            .set(
                labels::PREFACE,
                &[field(0x3c0a, &[0x00; 16]), field(0x3b03, &[0x02; 16])],
            )
            .set(
                labels::CONTENT_STORAGE,
                &[
                    field(0x3c0a, &[0x02; 16]),
                    field(0x1901, &ref_batch(&[[0x01; 16]])),
                    field(0x1902, &ref_batch(&[[0x05; 16]])),
                ],
            )
            .set(
                labels::ESSENCE_CONTAINER_DATA,
                &[field(0x3c0a, &[0x05; 16]), field(0x2701, &umid(0xe0))],
            )
            .set(
                labels::SOURCE_PACKAGE,
                &[
                    field(0x3c0a, &[0x01; 16]),
                    field(0x4401, &umid(0xe0)),
                    field(0x4403, &ref_batch(&[])),
                    field(0x4701, &[0x40; 16]),
                ],
            )
            .set(
                labels::WAVE_AUDIO_DESCRIPTOR,
                &[
                    field(0x3c0a, &[0x40; 16]),
                    field(0x3d0a, &4u16.to_be_bytes()),
                    field(0x8001, &ref_batch(sub_refs)),
                ],
            );

        for (key, fields) in sub_descriptor_sets {
            builder = builder.set(key, &fields);
        }

        builder.build()
    }

    #[test]
    fn wave_descriptor_with_audio_labels_resolves() {
        let bytes = wave_header(
            vec![(
                labels::AUDIO_CHANNEL_LABEL_SUB_DESCRIPTOR,
                vec![field(0x3c0a, &[0x41; 16])],
            )],
            &[[0x41; 16]],
        );

        let header = parse(bytes).unwrap();

        assert!(header.has_wave_audio_essence_descriptor());
        assert_eq!(header.wave_audio_essence_descriptors().len(), 1);

        // The descriptor of the source package dereferences through the byte object map.
        let descriptors = header.essence_descriptors();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].set_type(), SetType::WaveAudioDescriptor);

        let subs = header.sub_descriptors();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].set_type(), SetType::AudioChannelLabelSubDescriptor);

        // The essence container data linked the source package by its package umid.
        let ecd_list = header.essence_container_data_list();
        assert_eq!(ecd_list.len(), 1);
        assert_eq!(ecd_list[0].linked_package, MxfUid::from_ul([0x01; 16]));
    }

    #[test]
    fn wave_descriptor_without_audio_labels_is_invalid() {
        let bytes = wave_header(
            vec![(
                labels::JPEG2000_SUB_DESCRIPTOR,
                vec![field(0x3c0a, &[0x41; 16])],
            )],
            &[[0x41; 16]],
        );

        match parse(bytes) {
            Err(Error::InvalidDescriptor(_)) => (),
            other => panic!("expected InvalidDescriptor, got {:?}", other.map(|_| ())),
        }
    }
}
