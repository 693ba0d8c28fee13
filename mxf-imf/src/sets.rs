// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Byte objects: the raw decoded form of each registered structural-metadata set.
//!
//! A byte object (BO) is self-contained. Its references to other sets are bare instance UIDs
//! (or package UMIDs); resolving them into an object graph is the resolver's job. Fields whose
//! label a class does not declare are tolerated and kept as opaque blobs.

use mxf_core::errors::{decode_error, Result};

use crate::diag::ParseLog;
use crate::fields::{LocalSetReader, MxfUid, Rational, Timestamp};
use crate::labels::{props, SetType, Ul};
use crate::primer::PrimerPack;

/// State shared by every structural set.
#[derive(Debug)]
pub struct BoCommon {
    pub instance_uid: MxfUid,
    pub set_type: SetType,
    pub generation_uid: Option<MxfUid>,
    /// Primer-declared fields this class does not parse, keyed by label, in byte order.
    pub unknown: Vec<(Ul, Box<[u8]>)>,
}

/// Accumulates the shared fields while a set's value is walked.
#[derive(Default)]
struct CommonParts {
    instance_uid: Option<MxfUid>,
    generation_uid: Option<MxfUid>,
    unknown: Vec<(Ul, Box<[u8]>)>,
}

impl CommonParts {
    /// Consumes a field shared by every interchange object. Returns false when the field
    /// belongs to the concrete class.
    fn try_field(&mut self, lsr: &mut LocalSetReader<'_>, ul: Ul) -> Result<bool> {
        match ul {
            props::INSTANCE_UID => self.instance_uid = Some(lsr.read_ref()?),
            props::GENERATION_UID => self.generation_uid = Some(lsr.read_ref()?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn keep_unknown(&mut self, lsr: &mut LocalSetReader<'_>, ul: Ul) -> Result<()> {
        self.unknown.push((ul, lsr.read_blob()?));
        Ok(())
    }

    fn finish(self, set_type: SetType) -> Result<BoCommon> {
        let instance_uid = match self.instance_uid {
            Some(uid) => uid,
            None => return decode_error("mxf: structural set missing instance uid"),
        };

        Ok(BoCommon {
            instance_uid,
            set_type,
            generation_uid: self.generation_uid,
            unknown: self.unknown,
        })
    }
}

/// A decoder for one registered structural-set class.
trait StructuralSet: Sized {
    const TYPE: SetType;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self>;
}

#[derive(Debug)]
pub struct PrefaceBo {
    pub common: BoCommon,
    pub last_modified: Option<Timestamp>,
    pub version: Option<u16>,
    pub operational_pattern: Option<Ul>,
    pub essence_containers: Vec<Ul>,
    pub dm_schemes: Vec<Ul>,
    pub content_storage: Option<MxfUid>,
    pub primary_package: Option<MxfUid>,
    pub identifications: Vec<MxfUid>,
}

impl StructuralSet for PrefaceBo {
    const TYPE: SetType = SetType::Preface;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut last_modified = None;
        let mut version = None;
        let mut operational_pattern = None;
        let mut essence_containers = Vec::new();
        let mut dm_schemes = Vec::new();
        let mut content_storage = None;
        let mut primary_package = None;
        let mut identifications = Vec::new();

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::LAST_MODIFIED_DATE => last_modified = Some(lsr.read_timestamp()?),
                props::VERSION => version = Some(lsr.read_u16()?),
                props::OPERATIONAL_PATTERN => operational_pattern = Some(lsr.read_ul()?),
                props::ESSENCE_CONTAINERS => essence_containers = lsr.read_ul_batch()?,
                props::DM_SCHEMES => dm_schemes = lsr.read_ul_batch()?,
                props::CONTENT_STORAGE => content_storage = Some(lsr.read_ref()?),
                props::PRIMARY_PACKAGE => primary_package = Some(lsr.read_ref()?),
                props::IDENTIFICATIONS => identifications = lsr.read_ref_batch()?,
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self {
            common: common.finish(Self::TYPE)?,
            last_modified,
            version,
            operational_pattern,
            essence_containers,
            dm_schemes,
            content_storage,
            primary_package,
            identifications,
        })
    }
}

#[derive(Debug)]
pub struct IdentificationBo {
    pub common: BoCommon,
    pub this_generation: Option<MxfUid>,
    pub company_name: Option<String>,
    pub product_name: Option<String>,
    pub version_string: Option<String>,
    pub platform: Option<String>,
    pub product_uid: Option<MxfUid>,
    pub modification_date: Option<Timestamp>,
}

impl StructuralSet for IdentificationBo {
    const TYPE: SetType = SetType::Identification;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut this_generation = None;
        let mut company_name = None;
        let mut product_name = None;
        let mut version_string = None;
        let mut platform = None;
        let mut product_uid = None;
        let mut modification_date = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::THIS_GENERATION_UID => this_generation = Some(lsr.read_ref()?),
                props::COMPANY_NAME => company_name = Some(lsr.read_utf16()?),
                props::PRODUCT_NAME => product_name = Some(lsr.read_utf16()?),
                props::VERSION_STRING => version_string = Some(lsr.read_utf16()?),
                props::PLATFORM => platform = Some(lsr.read_utf16()?),
                props::PRODUCT_UID => product_uid = Some(lsr.read_uid()?),
                props::MODIFICATION_DATE => modification_date = Some(lsr.read_timestamp()?),
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self {
            common: common.finish(Self::TYPE)?,
            this_generation,
            company_name,
            product_name,
            version_string,
            platform,
            product_uid,
            modification_date,
        })
    }
}

#[derive(Debug)]
pub struct ContentStorageBo {
    pub common: BoCommon,
    pub packages: Vec<MxfUid>,
    pub essence_container_data: Vec<MxfUid>,
}

impl StructuralSet for ContentStorageBo {
    const TYPE: SetType = SetType::ContentStorage;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut packages = Vec::new();
        let mut essence_container_data = Vec::new();

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::PACKAGES => packages = lsr.read_ref_batch()?,
                props::ESSENCE_CONTAINER_DATA_REFS => {
                    essence_container_data = lsr.read_ref_batch()?
                }
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self { common: common.finish(Self::TYPE)?, packages, essence_container_data })
    }
}

#[derive(Debug)]
pub struct EssenceContainerDataBo {
    pub common: BoCommon,
    /// The package UID (not instance UID) of the linked package.
    pub linked_package_uid: Option<MxfUid>,
    pub index_sid: Option<u32>,
    pub body_sid: Option<u32>,
}

impl StructuralSet for EssenceContainerDataBo {
    const TYPE: SetType = SetType::EssenceContainerData;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut linked_package_uid = None;
        let mut index_sid = None;
        let mut body_sid = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::LINKED_PACKAGE_UID => linked_package_uid = Some(lsr.read_uid()?),
                props::INDEX_SID => index_sid = Some(lsr.read_u32()?),
                props::BODY_SID => body_sid = Some(lsr.read_u32()?),
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self { common: common.finish(Self::TYPE)?, linked_package_uid, index_sid, body_sid })
    }
}

#[derive(Debug)]
pub struct MaterialPackageBo {
    pub common: BoCommon,
    pub package_uid: MxfUid,
    pub name: Option<String>,
    pub creation_date: Option<Timestamp>,
    pub modified_date: Option<Timestamp>,
    pub tracks: Vec<MxfUid>,
}

impl StructuralSet for MaterialPackageBo {
    const TYPE: SetType = SetType::MaterialPackage;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut package_uid = None;
        let mut name = None;
        let mut creation_date = None;
        let mut modified_date = None;
        let mut tracks = Vec::new();

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::PACKAGE_UID => package_uid = Some(lsr.read_uid()?),
                props::PACKAGE_NAME => name = Some(lsr.read_utf16()?),
                props::PACKAGE_CREATION_DATE => creation_date = Some(lsr.read_timestamp()?),
                props::PACKAGE_MODIFIED_DATE => modified_date = Some(lsr.read_timestamp()?),
                props::TRACKS => tracks = lsr.read_ref_batch()?,
                other => common.keep_unknown(lsr, other)?,
            }
        }

        let package_uid = match package_uid {
            Some(uid) => uid,
            None => return decode_error("mxf: material package missing package uid"),
        };

        Ok(Self {
            common: common.finish(Self::TYPE)?,
            package_uid,
            name,
            creation_date,
            modified_date,
            tracks,
        })
    }
}

#[derive(Debug)]
pub struct SourcePackageBo {
    pub common: BoCommon,
    pub package_uid: MxfUid,
    pub name: Option<String>,
    pub creation_date: Option<Timestamp>,
    pub modified_date: Option<Timestamp>,
    pub tracks: Vec<MxfUid>,
    pub descriptor: Option<MxfUid>,
}

impl StructuralSet for SourcePackageBo {
    const TYPE: SetType = SetType::SourcePackage;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut package_uid = None;
        let mut name = None;
        let mut creation_date = None;
        let mut modified_date = None;
        let mut tracks = Vec::new();
        let mut descriptor = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::PACKAGE_UID => package_uid = Some(lsr.read_uid()?),
                props::PACKAGE_NAME => name = Some(lsr.read_utf16()?),
                props::PACKAGE_CREATION_DATE => creation_date = Some(lsr.read_timestamp()?),
                props::PACKAGE_MODIFIED_DATE => modified_date = Some(lsr.read_timestamp()?),
                props::TRACKS => tracks = lsr.read_ref_batch()?,
                props::DESCRIPTOR => descriptor = Some(lsr.read_ref()?),
                other => common.keep_unknown(lsr, other)?,
            }
        }

        let package_uid = match package_uid {
            Some(uid) => uid,
            None => return decode_error("mxf: source package missing package uid"),
        };

        Ok(Self {
            common: common.finish(Self::TYPE)?,
            package_uid,
            name,
            creation_date,
            modified_date,
            tracks,
            descriptor,
        })
    }
}

#[derive(Debug)]
pub struct TimelineTrackBo {
    pub common: BoCommon,
    pub track_id: Option<u32>,
    pub track_number: Option<u32>,
    pub name: Option<String>,
    pub edit_rate: Option<Rational>,
    pub origin: Option<i64>,
    pub sequence: Option<MxfUid>,
}

impl StructuralSet for TimelineTrackBo {
    const TYPE: SetType = SetType::TimelineTrack;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut track_id = None;
        let mut track_number = None;
        let mut name = None;
        let mut edit_rate = None;
        let mut origin = None;
        let mut sequence = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::TRACK_ID => track_id = Some(lsr.read_u32()?),
                props::TRACK_NUMBER => track_number = Some(lsr.read_u32()?),
                props::TRACK_NAME => name = Some(lsr.read_utf16()?),
                props::EDIT_RATE => edit_rate = Some(lsr.read_rational()?),
                props::ORIGIN => origin = Some(lsr.read_i64()?),
                props::SEQUENCE => sequence = Some(lsr.read_ref()?),
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self {
            common: common.finish(Self::TYPE)?,
            track_id,
            track_number,
            name,
            edit_rate,
            origin,
            sequence,
        })
    }
}

#[derive(Debug)]
pub struct SequenceBo {
    pub common: BoCommon,
    pub data_definition: Option<Ul>,
    pub duration: Option<i64>,
    pub components: Vec<MxfUid>,
}

impl StructuralSet for SequenceBo {
    const TYPE: SetType = SetType::Sequence;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut data_definition = None;
        let mut duration = None;
        let mut components = Vec::new();

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::DATA_DEFINITION => data_definition = Some(lsr.read_ul()?),
                props::DURATION => duration = Some(lsr.read_i64()?),
                props::STRUCTURAL_COMPONENTS => components = lsr.read_ref_batch()?,
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self { common: common.finish(Self::TYPE)?, data_definition, duration, components })
    }
}

#[derive(Debug)]
pub struct SourceClipBo {
    pub common: BoCommon,
    pub data_definition: Option<Ul>,
    pub duration: Option<i64>,
    pub start_position: Option<i64>,
    /// The package UID (not instance UID) of the referenced source package. Zero marks the end
    /// of a source reference chain.
    pub source_package_id: Option<MxfUid>,
    pub source_track_id: Option<u32>,
}

impl StructuralSet for SourceClipBo {
    const TYPE: SetType = SetType::SourceClip;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut data_definition = None;
        let mut duration = None;
        let mut start_position = None;
        let mut source_package_id = None;
        let mut source_track_id = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::DATA_DEFINITION => data_definition = Some(lsr.read_ul()?),
                props::DURATION => duration = Some(lsr.read_i64()?),
                props::START_POSITION => start_position = Some(lsr.read_i64()?),
                props::SOURCE_PACKAGE_ID => source_package_id = Some(lsr.read_uid()?),
                props::SOURCE_TRACK_ID => source_track_id = Some(lsr.read_u32()?),
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self {
            common: common.finish(Self::TYPE)?,
            data_definition,
            duration,
            start_position,
            source_package_id,
            source_track_id,
        })
    }
}

/// Fields shared by every file descriptor.
#[derive(Debug, Default)]
pub struct FileDescriptorBo {
    pub sample_rate: Option<Rational>,
    pub container_duration: Option<i64>,
    pub essence_container: Option<Ul>,
    pub codec: Option<Ul>,
    pub linked_track_id: Option<u32>,
    pub sub_descriptors: Vec<MxfUid>,
}

fn try_file_descriptor_field(
    fd: &mut FileDescriptorBo,
    lsr: &mut LocalSetReader<'_>,
    ul: Ul,
) -> Result<bool> {
    match ul {
        props::SAMPLE_RATE => fd.sample_rate = Some(lsr.read_rational()?),
        props::CONTAINER_DURATION => fd.container_duration = Some(lsr.read_i64()?),
        props::ESSENCE_CONTAINER => fd.essence_container = Some(lsr.read_ul()?),
        props::CODEC => fd.codec = Some(lsr.read_ul()?),
        props::LINKED_TRACK_ID => fd.linked_track_id = Some(lsr.read_u32()?),
        props::SUB_DESCRIPTORS => fd.sub_descriptors = lsr.read_ref_batch()?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Fields shared by the picture essence descriptors.
#[derive(Debug, Default)]
pub struct PictureDescriptorBo {
    pub frame_layout: Option<u8>,
    pub stored_width: Option<u32>,
    pub stored_height: Option<u32>,
    pub aspect_ratio: Option<Rational>,
    pub picture_coding: Option<Ul>,
}

fn try_picture_descriptor_field(
    pd: &mut PictureDescriptorBo,
    lsr: &mut LocalSetReader<'_>,
    ul: Ul,
) -> Result<bool> {
    match ul {
        props::FRAME_LAYOUT => pd.frame_layout = Some(lsr.read_u8()?),
        props::STORED_WIDTH => pd.stored_width = Some(lsr.read_u32()?),
        props::STORED_HEIGHT => pd.stored_height = Some(lsr.read_u32()?),
        props::ASPECT_RATIO => pd.aspect_ratio = Some(lsr.read_rational()?),
        props::PICTURE_ESSENCE_CODING => pd.picture_coding = Some(lsr.read_ul()?),
        _ => return Ok(false),
    }
    Ok(true)
}

#[derive(Debug)]
pub struct CdciDescriptorBo {
    pub common: BoCommon,
    pub file: FileDescriptorBo,
    pub picture: PictureDescriptorBo,
    pub component_depth: Option<u32>,
    pub horizontal_subsampling: Option<u32>,
    pub vertical_subsampling: Option<u32>,
    pub color_siting: Option<u8>,
    pub black_ref_level: Option<u32>,
    pub white_ref_level: Option<u32>,
    pub color_range: Option<u32>,
}

impl StructuralSet for CdciDescriptorBo {
    const TYPE: SetType = SetType::CdciDescriptor;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut file = FileDescriptorBo::default();
        let mut picture = PictureDescriptorBo::default();
        let mut component_depth = None;
        let mut horizontal_subsampling = None;
        let mut vertical_subsampling = None;
        let mut color_siting = None;
        let mut black_ref_level = None;
        let mut white_ref_level = None;
        let mut color_range = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)?
                || try_file_descriptor_field(&mut file, lsr, field.ul)?
                || try_picture_descriptor_field(&mut picture, lsr, field.ul)?
            {
                continue;
            }
            match field.ul {
                props::COMPONENT_DEPTH => component_depth = Some(lsr.read_u32()?),
                props::HORIZONTAL_SUBSAMPLING => horizontal_subsampling = Some(lsr.read_u32()?),
                props::VERTICAL_SUBSAMPLING => vertical_subsampling = Some(lsr.read_u32()?),
                props::COLOR_SITING => color_siting = Some(lsr.read_u8()?),
                props::BLACK_REF_LEVEL => black_ref_level = Some(lsr.read_u32()?),
                props::WHITE_REF_LEVEL => white_ref_level = Some(lsr.read_u32()?),
                props::COLOR_RANGE => color_range = Some(lsr.read_u32()?),
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self {
            common: common.finish(Self::TYPE)?,
            file,
            picture,
            component_depth,
            horizontal_subsampling,
            vertical_subsampling,
            color_siting,
            black_ref_level,
            white_ref_level,
            color_range,
        })
    }
}

#[derive(Debug)]
pub struct RgbaDescriptorBo {
    pub common: BoCommon,
    pub file: FileDescriptorBo,
    pub picture: PictureDescriptorBo,
    pub component_max_ref: Option<u32>,
    pub component_min_ref: Option<u32>,
    pub pixel_layout: Option<Box<[u8]>>,
}

impl StructuralSet for RgbaDescriptorBo {
    const TYPE: SetType = SetType::RgbaDescriptor;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut file = FileDescriptorBo::default();
        let mut picture = PictureDescriptorBo::default();
        let mut component_max_ref = None;
        let mut component_min_ref = None;
        let mut pixel_layout = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)?
                || try_file_descriptor_field(&mut file, lsr, field.ul)?
                || try_picture_descriptor_field(&mut picture, lsr, field.ul)?
            {
                continue;
            }
            match field.ul {
                props::COMPONENT_MAX_REF => component_max_ref = Some(lsr.read_u32()?),
                props::COMPONENT_MIN_REF => component_min_ref = Some(lsr.read_u32()?),
                props::PIXEL_LAYOUT => pixel_layout = Some(lsr.read_blob()?),
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self {
            common: common.finish(Self::TYPE)?,
            file,
            picture,
            component_max_ref,
            component_min_ref,
            pixel_layout,
        })
    }
}

/// Fields shared by the sound essence descriptors.
#[derive(Debug, Default)]
pub struct SoundDescriptorBo {
    pub audio_sampling_rate: Option<Rational>,
    pub locked: Option<bool>,
    pub channel_count: Option<u32>,
    pub quantization_bits: Option<u32>,
    pub sound_compression: Option<Ul>,
}

fn try_sound_descriptor_field(
    sd: &mut SoundDescriptorBo,
    lsr: &mut LocalSetReader<'_>,
    ul: Ul,
) -> Result<bool> {
    match ul {
        props::AUDIO_SAMPLING_RATE => sd.audio_sampling_rate = Some(lsr.read_rational()?),
        props::LOCKED => sd.locked = Some(lsr.read_bool()?),
        props::CHANNEL_COUNT => sd.channel_count = Some(lsr.read_u32()?),
        props::QUANTIZATION_BITS => sd.quantization_bits = Some(lsr.read_u32()?),
        props::SOUND_COMPRESSION => sd.sound_compression = Some(lsr.read_ul()?),
        _ => return Ok(false),
    }
    Ok(true)
}

#[derive(Debug)]
pub struct WaveAudioDescriptorBo {
    pub common: BoCommon,
    pub file: FileDescriptorBo,
    pub sound: SoundDescriptorBo,
    pub block_align: Option<u16>,
    pub avg_bps: Option<u32>,
    pub channel_assignment: Option<Ul>,
}

impl StructuralSet for WaveAudioDescriptorBo {
    const TYPE: SetType = SetType::WaveAudioDescriptor;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut file = FileDescriptorBo::default();
        let mut sound = SoundDescriptorBo::default();
        let mut block_align = None;
        let mut avg_bps = None;
        let mut channel_assignment = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)?
                || try_file_descriptor_field(&mut file, lsr, field.ul)?
                || try_sound_descriptor_field(&mut sound, lsr, field.ul)?
            {
                continue;
            }
            match field.ul {
                props::BLOCK_ALIGN => block_align = Some(lsr.read_u16()?),
                props::AVG_BPS => avg_bps = Some(lsr.read_u32()?),
                props::CHANNEL_ASSIGNMENT => channel_assignment = Some(lsr.read_ul()?),
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self {
            common: common.finish(Self::TYPE)?,
            file,
            sound,
            block_align,
            avg_bps,
            channel_assignment,
        })
    }
}

/// Fields shared by the multichannel audio label sub-descriptors.
#[derive(Debug, Default)]
pub struct McaLabelBo {
    pub label_dictionary_id: Option<Ul>,
    pub link_id: Option<MxfUid>,
    pub tag_symbol: Option<String>,
    pub tag_name: Option<String>,
    pub channel_id: Option<u32>,
    pub spoken_language: Option<String>,
}

fn try_mca_label_field(
    mca: &mut McaLabelBo,
    lsr: &mut LocalSetReader<'_>,
    ul: Ul,
) -> Result<bool> {
    match ul {
        props::MCA_LABEL_DICTIONARY_ID => mca.label_dictionary_id = Some(lsr.read_ul()?),
        props::MCA_LINK_ID => mca.link_id = Some(lsr.read_uid()?),
        props::MCA_TAG_SYMBOL => mca.tag_symbol = Some(lsr.read_utf16()?),
        props::MCA_TAG_NAME => mca.tag_name = Some(lsr.read_utf16()?),
        props::MCA_CHANNEL_ID => mca.channel_id = Some(lsr.read_u32()?),
        props::RFC5646_SPOKEN_LANGUAGE => mca.spoken_language = Some(lsr.read_iso7()?),
        _ => return Ok(false),
    }
    Ok(true)
}

#[derive(Debug)]
pub struct AudioChannelLabelBo {
    pub common: BoCommon,
    pub mca: McaLabelBo,
    pub soundfield_group_link_id: Option<MxfUid>,
}

impl StructuralSet for AudioChannelLabelBo {
    const TYPE: SetType = SetType::AudioChannelLabelSubDescriptor;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut mca = McaLabelBo::default();
        let mut soundfield_group_link_id = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? || try_mca_label_field(&mut mca, lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::SOUNDFIELD_GROUP_LINK_ID => {
                    soundfield_group_link_id = Some(lsr.read_uid()?)
                }
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self { common: common.finish(Self::TYPE)?, mca, soundfield_group_link_id })
    }
}

#[derive(Debug)]
pub struct SoundfieldGroupLabelBo {
    pub common: BoCommon,
    pub mca: McaLabelBo,
}

impl StructuralSet for SoundfieldGroupLabelBo {
    const TYPE: SetType = SetType::SoundfieldGroupLabelSubDescriptor;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut mca = McaLabelBo::default();

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? || try_mca_label_field(&mut mca, lsr, field.ul)? {
                continue;
            }
            common.keep_unknown(lsr, field.ul)?;
        }

        Ok(Self { common: common.finish(Self::TYPE)?, mca })
    }
}

#[derive(Debug)]
pub struct Jpeg2000SubDescriptorBo {
    pub common: BoCommon,
    pub rsiz: Option<u16>,
    pub xsiz: Option<u32>,
    pub ysiz: Option<u32>,
    pub csiz: Option<u16>,
}

impl StructuralSet for Jpeg2000SubDescriptorBo {
    const TYPE: SetType = SetType::Jpeg2000SubDescriptor;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut rsiz = None;
        let mut xsiz = None;
        let mut ysiz = None;
        let mut csiz = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::J2K_RSIZ => rsiz = Some(lsr.read_u16()?),
                props::J2K_XSIZ => xsiz = Some(lsr.read_u32()?),
                props::J2K_YSIZ => ysiz = Some(lsr.read_u32()?),
                props::J2K_CSIZ => csiz = Some(lsr.read_u16()?),
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self { common: common.finish(Self::TYPE)?, rsiz, xsiz, ysiz, csiz })
    }
}

#[derive(Debug)]
pub struct PhdrMetadataTrackSubDescriptorBo {
    pub common: BoCommon,
    pub data_definition: Option<Ul>,
    pub source_track_id: Option<u32>,
    pub simple_payload_sid: Option<u32>,
}

impl StructuralSet for PhdrMetadataTrackSubDescriptorBo {
    const TYPE: SetType = SetType::PhdrMetadataTrackSubDescriptor;

    fn read(lsr: &mut LocalSetReader<'_>) -> Result<Self> {
        let mut common = CommonParts::default();
        let mut data_definition = None;
        let mut source_track_id = None;
        let mut simple_payload_sid = None;

        while let Some(field) = lsr.next_field()? {
            if common.try_field(lsr, field.ul)? {
                continue;
            }
            match field.ul {
                props::DATA_DEFINITION => data_definition = Some(lsr.read_ul()?),
                props::SOURCE_TRACK_ID => source_track_id = Some(lsr.read_u32()?),
                props::PHDR_SIMPLE_PAYLOAD_SID => simple_payload_sid = Some(lsr.read_u32()?),
                other => common.keep_unknown(lsr, other)?,
            }
        }

        Ok(Self {
            common: common.finish(Self::TYPE)?,
            data_definition,
            source_track_id,
            simple_payload_sid,
        })
    }
}

/// The decoded form of one structural-metadata set.
#[derive(Debug)]
pub enum SetBo {
    Preface(PrefaceBo),
    Identification(IdentificationBo),
    ContentStorage(ContentStorageBo),
    EssenceContainerData(EssenceContainerDataBo),
    MaterialPackage(MaterialPackageBo),
    SourcePackage(SourcePackageBo),
    TimelineTrack(TimelineTrackBo),
    Sequence(SequenceBo),
    SourceClip(SourceClipBo),
    CdciDescriptor(CdciDescriptorBo),
    RgbaDescriptor(RgbaDescriptorBo),
    WaveAudioDescriptor(WaveAudioDescriptorBo),
    AudioChannelLabel(AudioChannelLabelBo),
    SoundfieldGroupLabel(SoundfieldGroupLabelBo),
    Jpeg2000SubDescriptor(Jpeg2000SubDescriptorBo),
    PhdrMetadataTrackSubDescriptor(PhdrMetadataTrackSubDescriptorBo),
}

impl SetBo {
    /// Decodes the value bytes of a structural-metadata KLV into the byte object registered for
    /// its class.
    pub(crate) fn read(
        set_type: SetType,
        value: &[u8],
        primer: &PrimerPack,
        log: &mut ParseLog,
    ) -> Result<SetBo> {
        let mut lsr = LocalSetReader::new(value, primer, log);

        Ok(match set_type {
            SetType::Preface => SetBo::Preface(PrefaceBo::read(&mut lsr)?),
            SetType::Identification => SetBo::Identification(IdentificationBo::read(&mut lsr)?),
            SetType::ContentStorage => SetBo::ContentStorage(ContentStorageBo::read(&mut lsr)?),
            SetType::EssenceContainerData => {
                SetBo::EssenceContainerData(EssenceContainerDataBo::read(&mut lsr)?)
            }
            SetType::MaterialPackage => SetBo::MaterialPackage(MaterialPackageBo::read(&mut lsr)?),
            SetType::SourcePackage => SetBo::SourcePackage(SourcePackageBo::read(&mut lsr)?),
            SetType::TimelineTrack => SetBo::TimelineTrack(TimelineTrackBo::read(&mut lsr)?),
            SetType::Sequence => SetBo::Sequence(SequenceBo::read(&mut lsr)?),
            SetType::SourceClip => SetBo::SourceClip(SourceClipBo::read(&mut lsr)?),
            SetType::CdciDescriptor => SetBo::CdciDescriptor(CdciDescriptorBo::read(&mut lsr)?),
            SetType::RgbaDescriptor => SetBo::RgbaDescriptor(RgbaDescriptorBo::read(&mut lsr)?),
            SetType::WaveAudioDescriptor => {
                SetBo::WaveAudioDescriptor(WaveAudioDescriptorBo::read(&mut lsr)?)
            }
            SetType::AudioChannelLabelSubDescriptor => {
                SetBo::AudioChannelLabel(AudioChannelLabelBo::read(&mut lsr)?)
            }
            SetType::SoundfieldGroupLabelSubDescriptor => {
                SetBo::SoundfieldGroupLabel(SoundfieldGroupLabelBo::read(&mut lsr)?)
            }
            SetType::Jpeg2000SubDescriptor => {
                SetBo::Jpeg2000SubDescriptor(Jpeg2000SubDescriptorBo::read(&mut lsr)?)
            }
            SetType::PhdrMetadataTrackSubDescriptor => {
                SetBo::PhdrMetadataTrackSubDescriptor(PhdrMetadataTrackSubDescriptorBo::read(
                    &mut lsr,
                )?)
            }
        })
    }

    pub fn common(&self) -> &BoCommon {
        match self {
            SetBo::Preface(bo) => &bo.common,
            SetBo::Identification(bo) => &bo.common,
            SetBo::ContentStorage(bo) => &bo.common,
            SetBo::EssenceContainerData(bo) => &bo.common,
            SetBo::MaterialPackage(bo) => &bo.common,
            SetBo::SourcePackage(bo) => &bo.common,
            SetBo::TimelineTrack(bo) => &bo.common,
            SetBo::Sequence(bo) => &bo.common,
            SetBo::SourceClip(bo) => &bo.common,
            SetBo::CdciDescriptor(bo) => &bo.common,
            SetBo::RgbaDescriptor(bo) => &bo.common,
            SetBo::WaveAudioDescriptor(bo) => &bo.common,
            SetBo::AudioChannelLabel(bo) => &bo.common,
            SetBo::SoundfieldGroupLabel(bo) => &bo.common,
            SetBo::Jpeg2000SubDescriptor(bo) => &bo.common,
            SetBo::PhdrMetadataTrackSubDescriptor(bo) => &bo.common,
        }
    }

    pub fn instance_uid(&self) -> MxfUid {
        self.common().instance_uid
    }

    pub fn set_type(&self) -> SetType {
        self.common().set_type
    }

    /// The package UID of a generic package, used for dual-key indexing.
    pub fn package_uid(&self) -> Option<MxfUid> {
        match self {
            SetBo::MaterialPackage(bo) => Some(bo.package_uid),
            SetBo::SourcePackage(bo) => Some(bo.package_uid),
            _ => None,
        }
    }

    /// Every outgoing strong reference of this set, in field order. Package-UID references
    /// (essence container data and source clips) are included; the resolver translates them to
    /// instance UIDs. Zero source references mark the end of a chain and are excluded.
    pub fn strong_refs(&self) -> Vec<MxfUid> {
        let mut refs = Vec::new();

        match self {
            SetBo::Preface(bo) => {
                refs.extend(bo.content_storage);
                refs.extend(bo.primary_package);
                refs.extend_from_slice(&bo.identifications);
            }
            SetBo::ContentStorage(bo) => {
                refs.extend_from_slice(&bo.packages);
                refs.extend_from_slice(&bo.essence_container_data);
            }
            SetBo::EssenceContainerData(bo) => refs.extend(bo.linked_package_uid),
            SetBo::MaterialPackage(bo) => refs.extend_from_slice(&bo.tracks),
            SetBo::SourcePackage(bo) => {
                refs.extend_from_slice(&bo.tracks);
                refs.extend(bo.descriptor);
            }
            SetBo::TimelineTrack(bo) => refs.extend(bo.sequence),
            SetBo::Sequence(bo) => refs.extend_from_slice(&bo.components),
            SetBo::SourceClip(bo) => {
                refs.extend(bo.source_package_id.filter(|uid| !uid.is_zero()));
            }
            SetBo::CdciDescriptor(bo) => refs.extend_from_slice(&bo.file.sub_descriptors),
            SetBo::RgbaDescriptor(bo) => refs.extend_from_slice(&bo.file.sub_descriptors),
            SetBo::WaveAudioDescriptor(bo) => refs.extend_from_slice(&bo.file.sub_descriptors),
            SetBo::Identification(_)
            | SetBo::AudioChannelLabel(_)
            | SetBo::SoundfieldGroupLabel(_)
            | SetBo::Jpeg2000SubDescriptor(_)
            | SetBo::PhdrMetadataTrackSubDescriptor(_) => (),
        }

        refs
    }

    /// The sub-descriptor references of an essence descriptor.
    pub fn sub_descriptor_uids(&self) -> &[MxfUid] {
        match self {
            SetBo::CdciDescriptor(bo) => &bo.file.sub_descriptors,
            SetBo::RgbaDescriptor(bo) => &bo.file.sub_descriptors,
            SetBo::WaveAudioDescriptor(bo) => &bo.file.sub_descriptors,
            _ => &[],
        }
    }

    /// The duration of a structural component, if this set is one and declares it.
    pub fn duration(&self) -> Option<i64> {
        match self {
            SetBo::Sequence(bo) => bo.duration,
            SetBo::SourceClip(bo) => bo.duration,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SetBo;
    use crate::diag::ParseLog;
    use crate::fields::MxfUid;
    use crate::labels::{props, SetType, Ul};
    use crate::primer::PrimerPack;

    fn primer(entries: &[(u16, Ul)]) -> PrimerPack {
        let mut value = Vec::new();
        value.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        value.extend_from_slice(&18u32.to_be_bytes());
        for (tag, ul) in entries {
            value.extend_from_slice(&tag.to_be_bytes());
            value.extend_from_slice(&ul.0);
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

    fn ref_batch(items: &[[u8; 16]]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(items.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&16u32.to_be_bytes());
        for item in items {
            bytes.extend_from_slice(item);
        }
        bytes
    }

    #[test]
    fn decodes_a_preface_set() {
        let primer = primer(&[
            (0x3c0a, props::INSTANCE_UID),
            (0x3b03, props::CONTENT_STORAGE),
            (0x3b08, props::PRIMARY_PACKAGE),
            (0x3b05, props::VERSION),
        ]);
        let mut log = ParseLog::new();

        let mut value = Vec::new();
        value.extend_from_slice(&field(0x3c0a, &[0x10; 16]));
        value.extend_from_slice(&field(0x3b05, &[0x01, 0x03]));
        value.extend_from_slice(&field(0x3b03, &[0x20; 16]));
        value.extend_from_slice(&field(0x3b08, &[0x30; 16]));

        let bo = SetBo::read(SetType::Preface, &value, &primer, &mut log).unwrap();

        assert_eq!(bo.instance_uid(), MxfUid::from_ul([0x10; 16]));
        assert_eq!(bo.set_type(), SetType::Preface);

        match &bo {
            SetBo::Preface(preface) => {
                assert_eq!(preface.version, Some(0x0103));
                assert_eq!(preface.content_storage, Some(MxfUid::from_ul([0x20; 16])));
                assert_eq!(preface.primary_package, Some(MxfUid::from_ul([0x30; 16])));
            }
            other => panic!("unexpected byte object {:?}", other),
        }

        let refs = bo.strong_refs();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0], MxfUid::from_ul([0x20; 16]));
    }

    #[test]
    fn missing_instance_uid_is_fatal() {
        let primer = primer(&[(0x3c0a, props::INSTANCE_UID), (0x3b05, props::VERSION)]);
        let mut log = ParseLog::new();

        let value = field(0x3b05, &[0x01, 0x02]);
        assert!(SetBo::read(SetType::Preface, &value, &primer, &mut log).is_err());
    }

    #[test]
    fn undeclared_class_fields_are_kept_as_blobs() {
        let primer = primer(&[
            (0x3c0a, props::INSTANCE_UID),
            // A declared tag whose label the sequence class does not parse.
            (0x4b01, props::EDIT_RATE),
        ]);
        let mut log = ParseLog::new();

        let mut value = Vec::new();
        value.extend_from_slice(&field(0x3c0a, &[0x11; 16]));
        value.extend_from_slice(&field(0x4b01, &[0, 0, 0, 24, 0, 0, 0, 1]));

        let bo = SetBo::read(SetType::Sequence, &value, &primer, &mut log).unwrap();
        let unknown = &bo.common().unknown;

        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].0, props::EDIT_RATE);
        assert_eq!(unknown[0].1.len(), 8);
    }

    #[test]
    fn sequence_preserves_component_order() {
        let primer = primer(&[
            (0x3c0a, props::INSTANCE_UID),
            (0x1001, props::STRUCTURAL_COMPONENTS),
        ]);
        let mut log = ParseLog::new();

        let mut value = Vec::new();
        value.extend_from_slice(&field(0x3c0a, &[0x01; 16]));
        value.extend_from_slice(&field(0x1001, &ref_batch(&[[0xa1; 16], [0xa2; 16], [0xa3; 16]])));

        let bo = SetBo::read(SetType::Sequence, &value, &primer, &mut log).unwrap();

        match &bo {
            SetBo::Sequence(seq) => {
                let components: Vec<_> = seq.components.iter().copied().collect();
                assert_eq!(
                    components,
                    vec![
                        MxfUid::from_ul([0xa1; 16]),
                        MxfUid::from_ul([0xa2; 16]),
                        MxfUid::from_ul([0xa3; 16]),
                    ]
                );
            }
            other => panic!("unexpected byte object {:?}", other),
        }
    }

    #[test]
    fn zero_source_clip_reference_is_not_an_edge() {
        let primer = primer(&[
            (0x3c0a, props::INSTANCE_UID),
            (0x1101, props::SOURCE_PACKAGE_ID),
            (0x0202, props::DURATION),
        ]);
        let mut log = ParseLog::new();

        let mut value = Vec::new();
        value.extend_from_slice(&field(0x3c0a, &[0x09; 16]));
        value.extend_from_slice(&field(0x1101, &[0x00; 32]));
        value.extend_from_slice(&field(0x0202, &24i64.to_be_bytes()));

        let bo = SetBo::read(SetType::SourceClip, &value, &primer, &mut log).unwrap();

        assert!(bo.strong_refs().is_empty());
        assert_eq!(bo.duration(), Some(24));
    }

    #[test]
    fn wave_audio_descriptor_collects_sub_descriptors() {
        let primer = primer(&[
            (0x3c0a, props::INSTANCE_UID),
            (0x3d0a, props::BLOCK_ALIGN),
            (0x8001, props::SUB_DESCRIPTORS),
        ]);
        let mut log = ParseLog::new();

        let mut value = Vec::new();
        value.extend_from_slice(&field(0x3c0a, &[0x40; 16]));
        value.extend_from_slice(&field(0x3d0a, &[0x00, 0x04]));
        value.extend_from_slice(&field(0x8001, &ref_batch(&[[0x41; 16], [0x42; 16]])));

        let bo = SetBo::read(SetType::WaveAudioDescriptor, &value, &primer, &mut log).unwrap();

        assert_eq!(bo.sub_descriptor_uids().len(), 2);
        assert_eq!(bo.strong_refs().len(), 2);

        match &bo {
            SetBo::WaveAudioDescriptor(wave) => assert_eq!(wave.block_align, Some(4)),
            other => panic!("unexpected byte object {:?}", other),
        }
    }
}
