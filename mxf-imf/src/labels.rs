// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SMPTE universal labels: the 16-byte key space of ST 336, the registered keys this parser
//! understands, and the structural-set schema table.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

/// A 16-byte SMPTE universal label.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ul(pub [u8; 16]);

impl Ul {
    /// Returns the label with its registry version byte (byte 8) zeroed. The MXF specification
    /// defines that byte as a don't-care when matching registered keys.
    pub fn masked(&self) -> Ul {
        let mut bytes = self.0;
        bytes[7] = 0;
        Ul(bytes)
    }

    /// Returns if the label lies in the SMPTE-administered key space.
    pub fn is_smpte(&self) -> bool {
        self.0[0..4] == [0x06, 0x0e, 0x2b, 0x34]
    }

    /// Returns if the key designates a local set (2-byte tag, 2-byte length member coding).
    pub fn is_local_set(&self) -> bool {
        self.is_smpte() && self.0[4] == 0x02 && self.0[5] == 0x53
    }

    /// Returns if the key is a KLV fill item.
    pub fn is_fill(&self) -> bool {
        self.masked() == FILL_ITEM.masked()
    }

    /// Returns if the key is a primer pack.
    pub fn is_primer(&self) -> bool {
        self.masked() == PRIMER_PACK.masked()
    }

    /// Returns if the key lies in the partition pack family (header, body, or footer, any
    /// status).
    pub fn is_partition_pack(&self) -> bool {
        let masked = self.masked();
        masked.0[0..13] == PARTITION_PACK_PREFIX && matches!(self.0[13], 0x02..=0x04)
    }

    /// Returns the structural-set class registered for this key, if any.
    pub fn set_type(&self) -> Option<SetType> {
        SET_CLASSES.get(&self.masked()).copied()
    }
}

impl fmt::Display for Ul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 && i % 4 == 0 {
                write!(f, ".")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Ul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// The shared 13-byte prefix of the partition pack key family, registry version masked. Byte 14
/// selects the partition kind (or the primer pack), byte 15 the partition status.
pub const PARTITION_PACK_PREFIX: [u8; 13] =
    [0x06, 0x0e, 0x2b, 0x34, 0x02, 0x05, 0x01, 0x00, 0x0d, 0x01, 0x02, 0x01, 0x01];

/// The primer pack key.
pub const PRIMER_PACK: Ul =
    Ul([0x06, 0x0e, 0x2b, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0d, 0x01, 0x02, 0x01, 0x01, 0x05, 0x01, 0x00]);

/// The KLV fill item key.
pub const FILL_ITEM: Ul =
    Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x03, 0x01, 0x02, 0x10, 0x01, 0x00, 0x00, 0x00]);

/// The index table segment key. Its presence ends the structural-metadata region.
pub const INDEX_TABLE_SEGMENT: Ul =
    Ul([0x06, 0x0e, 0x2b, 0x34, 0x02, 0x53, 0x01, 0x01, 0x0d, 0x01, 0x02, 0x01, 0x01, 0x10, 0x01, 0x00]);

/// Builds a structural-set key from its item designator byte. All structural-metadata sets share
/// the `0d.01.01.01.01.01.xx.00` suffix pattern.
const fn set_key(item: u8) -> Ul {
    Ul([0x06, 0x0e, 0x2b, 0x34, 0x02, 0x53, 0x01, 0x01, 0x0d, 0x01, 0x01, 0x01, 0x01, 0x01, item, 0x00])
}

pub const PREFACE: Ul = set_key(0x2f);
pub const IDENTIFICATION: Ul = set_key(0x30);
pub const CONTENT_STORAGE: Ul = set_key(0x18);
pub const ESSENCE_CONTAINER_DATA: Ul = set_key(0x23);
pub const MATERIAL_PACKAGE: Ul = set_key(0x36);
pub const SOURCE_PACKAGE: Ul = set_key(0x37);
pub const TIMELINE_TRACK: Ul = set_key(0x3b);
pub const SEQUENCE: Ul = set_key(0x0f);
pub const SOURCE_CLIP: Ul = set_key(0x11);
pub const CDCI_DESCRIPTOR: Ul = set_key(0x28);
pub const RGBA_DESCRIPTOR: Ul = set_key(0x29);
pub const WAVE_AUDIO_DESCRIPTOR: Ul = set_key(0x48);
pub const JPEG2000_SUB_DESCRIPTOR: Ul = set_key(0x5a);
pub const PHDR_METADATA_TRACK_SUB_DESCRIPTOR: Ul = set_key(0x61);
pub const AUDIO_CHANNEL_LABEL_SUB_DESCRIPTOR: Ul = set_key(0x6b);
pub const SOUNDFIELD_GROUP_LABEL_SUB_DESCRIPTOR: Ul = set_key(0x6c);

/// The structural-set classes registered with this parser.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SetType {
    Preface,
    Identification,
    ContentStorage,
    EssenceContainerData,
    MaterialPackage,
    SourcePackage,
    TimelineTrack,
    Sequence,
    SourceClip,
    CdciDescriptor,
    RgbaDescriptor,
    WaveAudioDescriptor,
    AudioChannelLabelSubDescriptor,
    SoundfieldGroupLabelSubDescriptor,
    Jpeg2000SubDescriptor,
    PhdrMetadataTrackSubDescriptor,
}

impl SetType {
    /// The simple class name used for per-class indexing.
    pub fn name(&self) -> &'static str {
        match *self {
            SetType::Preface => "Preface",
            SetType::Identification => "Identification",
            SetType::ContentStorage => "ContentStorage",
            SetType::EssenceContainerData => "EssenceContainerData",
            SetType::MaterialPackage => "MaterialPackage",
            SetType::SourcePackage => "SourcePackage",
            SetType::TimelineTrack => "TimelineTrack",
            SetType::Sequence => "Sequence",
            SetType::SourceClip => "SourceClip",
            SetType::CdciDescriptor => "CDCIPictureEssenceDescriptor",
            SetType::RgbaDescriptor => "RGBAPictureEssenceDescriptor",
            SetType::WaveAudioDescriptor => "WaveAudioEssenceDescriptor",
            SetType::AudioChannelLabelSubDescriptor => "AudioChannelLabelSubDescriptor",
            SetType::SoundfieldGroupLabelSubDescriptor => "SoundFieldGroupLabelSubDescriptor",
            SetType::Jpeg2000SubDescriptor => "JPEG2000PictureSubDescriptor",
            SetType::PhdrMetadataTrackSubDescriptor => "PHDRMetaDataTrackSubDescriptor",
        }
    }

    /// Returns if objects of this class are generic packages.
    pub fn is_package(&self) -> bool {
        matches!(self, SetType::MaterialPackage | SetType::SourcePackage)
    }

    /// Returns if objects of this class are generic tracks.
    pub fn is_track(&self) -> bool {
        matches!(self, SetType::TimelineTrack)
    }

    /// Returns if objects of this class are structural components.
    pub fn is_structural_component(&self) -> bool {
        matches!(self, SetType::Sequence | SetType::SourceClip)
    }

    /// Returns if objects of this class are essence descriptors.
    pub fn is_descriptor(&self) -> bool {
        matches!(
            self,
            SetType::CdciDescriptor | SetType::RgbaDescriptor | SetType::WaveAudioDescriptor
        )
    }

    /// Returns if objects of this class are sub-descriptors.
    pub fn is_sub_descriptor(&self) -> bool {
        matches!(
            self,
            SetType::AudioChannelLabelSubDescriptor
                | SetType::SoundfieldGroupLabelSubDescriptor
                | SetType::Jpeg2000SubDescriptor
                | SetType::PhdrMetadataTrackSubDescriptor
        )
    }
}

lazy_static! {
    /// Registered structural-set keys, registry version masked.
    static ref SET_CLASSES: HashMap<Ul, SetType> = {
        let mut classes = HashMap::new();
        classes.insert(PREFACE.masked(), SetType::Preface);
        classes.insert(IDENTIFICATION.masked(), SetType::Identification);
        classes.insert(CONTENT_STORAGE.masked(), SetType::ContentStorage);
        classes.insert(ESSENCE_CONTAINER_DATA.masked(), SetType::EssenceContainerData);
        classes.insert(MATERIAL_PACKAGE.masked(), SetType::MaterialPackage);
        classes.insert(SOURCE_PACKAGE.masked(), SetType::SourcePackage);
        classes.insert(TIMELINE_TRACK.masked(), SetType::TimelineTrack);
        classes.insert(SEQUENCE.masked(), SetType::Sequence);
        classes.insert(SOURCE_CLIP.masked(), SetType::SourceClip);
        classes.insert(CDCI_DESCRIPTOR.masked(), SetType::CdciDescriptor);
        classes.insert(RGBA_DESCRIPTOR.masked(), SetType::RgbaDescriptor);
        classes.insert(WAVE_AUDIO_DESCRIPTOR.masked(), SetType::WaveAudioDescriptor);
        classes.insert(JPEG2000_SUB_DESCRIPTOR.masked(), SetType::Jpeg2000SubDescriptor);
        classes.insert(
            PHDR_METADATA_TRACK_SUB_DESCRIPTOR.masked(),
            SetType::PhdrMetadataTrackSubDescriptor,
        );
        classes.insert(
            AUDIO_CHANNEL_LABEL_SUB_DESCRIPTOR.masked(),
            SetType::AudioChannelLabelSubDescriptor,
        );
        classes.insert(
            SOUNDFIELD_GROUP_LABEL_SUB_DESCRIPTOR.masked(),
            SetType::SoundfieldGroupLabelSubDescriptor,
        );
        classes
    };
}

/// Property labels declared by the registered set classes. Local tags inside a set resolve to
/// these through the primer pack.
pub mod props {
    use super::Ul;

    pub const INSTANCE_UID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x15, 0x02, 0x00, 0x00, 0x00, 0x00]);
    pub const GENERATION_UID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x05, 0x20, 0x07, 0x01, 0x08, 0x00, 0x00, 0x00]);

    // Preface.
    pub const LAST_MODIFIED_DATE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x07, 0x02, 0x01, 0x10, 0x02, 0x04, 0x00, 0x00]);
    pub const VERSION: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x03, 0x01, 0x02, 0x01, 0x05, 0x00, 0x00, 0x00]);
    pub const OPERATIONAL_PATTERN: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x05, 0x01, 0x02, 0x02, 0x03, 0x00, 0x00, 0x00, 0x00]);
    pub const ESSENCE_CONTAINERS: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x05, 0x01, 0x02, 0x02, 0x10, 0x02, 0x01, 0x00, 0x00]);
    pub const DM_SCHEMES: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x05, 0x01, 0x02, 0x02, 0x10, 0x02, 0x02, 0x00, 0x00]);
    pub const CONTENT_STORAGE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x04, 0x02, 0x01, 0x00, 0x00]);
    pub const PRIMARY_PACKAGE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x04, 0x06, 0x01, 0x01, 0x04, 0x01, 0x08, 0x00, 0x00]);
    pub const IDENTIFICATIONS: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x04, 0x06, 0x04, 0x00, 0x00]);

    // Identification.
    pub const THIS_GENERATION_UID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x05, 0x20, 0x07, 0x01, 0x01, 0x00, 0x00, 0x00]);
    pub const COMPANY_NAME: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x05, 0x20, 0x07, 0x01, 0x02, 0x01, 0x00, 0x00]);
    pub const PRODUCT_NAME: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x05, 0x20, 0x07, 0x01, 0x03, 0x01, 0x00, 0x00]);
    pub const VERSION_STRING: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x05, 0x20, 0x07, 0x01, 0x05, 0x01, 0x00, 0x00]);
    pub const PLATFORM: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x05, 0x20, 0x07, 0x01, 0x06, 0x01, 0x00, 0x00]);
    pub const PRODUCT_UID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x05, 0x20, 0x07, 0x01, 0x07, 0x00, 0x00, 0x00]);
    pub const MODIFICATION_DATE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x07, 0x02, 0x01, 0x10, 0x02, 0x03, 0x00, 0x00]);

    // Content storage.
    pub const PACKAGES: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x04, 0x05, 0x01, 0x00, 0x00]);
    pub const ESSENCE_CONTAINER_DATA_REFS: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x04, 0x05, 0x02, 0x00, 0x00]);

    // Essence container data.
    pub const LINKED_PACKAGE_UID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x06, 0x01, 0x00, 0x00, 0x00]);
    pub const INDEX_SID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x04, 0x01, 0x03, 0x04, 0x05, 0x00, 0x00, 0x00, 0x00]);
    pub const BODY_SID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x04, 0x01, 0x03, 0x04, 0x04, 0x00, 0x00, 0x00, 0x00]);

    // Generic package.
    pub const PACKAGE_UID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x15, 0x10, 0x00, 0x00, 0x00, 0x00]);
    pub const PACKAGE_NAME: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x01, 0x03, 0x03, 0x02, 0x01, 0x00, 0x00, 0x00]);
    pub const PACKAGE_CREATION_DATE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x07, 0x02, 0x01, 0x10, 0x01, 0x03, 0x00, 0x00]);
    pub const PACKAGE_MODIFIED_DATE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x07, 0x02, 0x01, 0x10, 0x02, 0x05, 0x00, 0x00]);
    pub const TRACKS: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x04, 0x06, 0x05, 0x00, 0x00]);
    pub const DESCRIPTOR: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x04, 0x02, 0x03, 0x00, 0x00]);

    // Generic track.
    pub const TRACK_ID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x01, 0x07, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00]);
    pub const TRACK_NUMBER: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x01, 0x04, 0x01, 0x03, 0x00, 0x00, 0x00, 0x00]);
    pub const TRACK_NAME: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x01, 0x07, 0x01, 0x02, 0x01, 0x00, 0x00, 0x00]);
    pub const SEQUENCE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x04, 0x02, 0x04, 0x00, 0x00]);
    pub const EDIT_RATE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x05, 0x30, 0x04, 0x05, 0x00, 0x00, 0x00, 0x00]);
    pub const ORIGIN: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x07, 0x02, 0x01, 0x03, 0x01, 0x03, 0x00, 0x00]);

    // Structural component.
    pub const DATA_DEFINITION: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x04, 0x07, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]);
    pub const DURATION: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x07, 0x02, 0x02, 0x01, 0x01, 0x03, 0x00, 0x00]);
    pub const STRUCTURAL_COMPONENTS: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x04, 0x06, 0x09, 0x00, 0x00]);

    // Source clip.
    pub const START_POSITION: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x07, 0x02, 0x01, 0x03, 0x01, 0x04, 0x00, 0x00]);
    pub const SOURCE_PACKAGE_ID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x03, 0x01, 0x00, 0x00, 0x00]);
    pub const SOURCE_TRACK_ID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x03, 0x02, 0x00, 0x00, 0x00]);

    // File descriptor.
    pub const LINKED_TRACK_ID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x05, 0x06, 0x01, 0x01, 0x03, 0x05, 0x00, 0x00, 0x00]);
    pub const SAMPLE_RATE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x04, 0x06, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00]);
    pub const CONTAINER_DURATION: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x04, 0x06, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00]);
    pub const ESSENCE_CONTAINER: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x04, 0x01, 0x02, 0x00, 0x00]);
    pub const CODEC: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x06, 0x01, 0x01, 0x04, 0x01, 0x03, 0x00, 0x00]);
    pub const SUB_DESCRIPTORS: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x09, 0x06, 0x01, 0x01, 0x04, 0x06, 0x10, 0x00, 0x00]);

    // Generic picture essence descriptor.
    pub const FRAME_LAYOUT: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x04, 0x01, 0x03, 0x01, 0x04, 0x00, 0x00, 0x00]);
    pub const STORED_WIDTH: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x04, 0x01, 0x05, 0x02, 0x02, 0x00, 0x00, 0x00]);
    pub const STORED_HEIGHT: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x04, 0x01, 0x05, 0x02, 0x01, 0x00, 0x00, 0x00]);
    pub const ASPECT_RATIO: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x04, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00]);
    pub const PICTURE_ESSENCE_CODING: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x04, 0x01, 0x06, 0x01, 0x00, 0x00, 0x00, 0x00]);

    // CDCI picture essence descriptor.
    pub const COMPONENT_DEPTH: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x04, 0x01, 0x05, 0x03, 0x0a, 0x00, 0x00, 0x00]);
    pub const HORIZONTAL_SUBSAMPLING: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x04, 0x01, 0x05, 0x01, 0x05, 0x00, 0x00, 0x00]);
    pub const VERTICAL_SUBSAMPLING: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x04, 0x01, 0x05, 0x01, 0x10, 0x00, 0x00, 0x00]);
    pub const COLOR_SITING: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x04, 0x01, 0x05, 0x01, 0x06, 0x00, 0x00, 0x00]);
    pub const BLACK_REF_LEVEL: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x04, 0x01, 0x05, 0x03, 0x03, 0x00, 0x00, 0x00]);
    pub const WHITE_REF_LEVEL: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x04, 0x01, 0x05, 0x03, 0x04, 0x00, 0x00, 0x00]);
    pub const COLOR_RANGE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x04, 0x01, 0x05, 0x03, 0x05, 0x00, 0x00, 0x00]);

    // RGBA picture essence descriptor.
    pub const COMPONENT_MAX_REF: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x04, 0x01, 0x05, 0x03, 0x0b, 0x00, 0x00, 0x00]);
    pub const COMPONENT_MIN_REF: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x04, 0x01, 0x05, 0x03, 0x0c, 0x00, 0x00, 0x00]);
    pub const PIXEL_LAYOUT: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x04, 0x01, 0x05, 0x03, 0x06, 0x00, 0x00, 0x00]);

    // Generic sound essence descriptor.
    pub const AUDIO_SAMPLING_RATE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x05, 0x04, 0x02, 0x03, 0x01, 0x01, 0x01, 0x00, 0x00]);
    pub const LOCKED: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x04, 0x04, 0x02, 0x03, 0x01, 0x04, 0x00, 0x00, 0x00]);
    pub const CHANNEL_COUNT: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x05, 0x04, 0x02, 0x01, 0x01, 0x04, 0x00, 0x00, 0x00]);
    pub const QUANTIZATION_BITS: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x04, 0x04, 0x02, 0x03, 0x03, 0x04, 0x00, 0x00, 0x00]);
    pub const SOUND_COMPRESSION: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x02, 0x04, 0x02, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00]);

    // Wave audio essence descriptor.
    pub const BLOCK_ALIGN: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x05, 0x04, 0x02, 0x03, 0x02, 0x01, 0x00, 0x00, 0x00]);
    pub const AVG_BPS: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x05, 0x04, 0x02, 0x03, 0x03, 0x05, 0x00, 0x00, 0x00]);
    pub const CHANNEL_ASSIGNMENT: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x07, 0x04, 0x02, 0x01, 0x01, 0x05, 0x00, 0x00, 0x00]);

    // Multichannel audio label sub-descriptors.
    pub const MCA_LABEL_DICTIONARY_ID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0d, 0x01, 0x03, 0x07, 0x01, 0x01, 0x00, 0x00, 0x00]);
    pub const MCA_TAG_SYMBOL: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0d, 0x01, 0x03, 0x07, 0x01, 0x02, 0x00, 0x00, 0x00]);
    pub const MCA_TAG_NAME: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0d, 0x01, 0x03, 0x07, 0x01, 0x03, 0x00, 0x00, 0x00]);
    pub const MCA_CHANNEL_ID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0d, 0x01, 0x03, 0x07, 0x01, 0x04, 0x00, 0x00, 0x00]);
    pub const MCA_LINK_ID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0d, 0x01, 0x03, 0x07, 0x01, 0x05, 0x00, 0x00, 0x00]);
    pub const SOUNDFIELD_GROUP_LINK_ID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0d, 0x01, 0x03, 0x07, 0x01, 0x06, 0x00, 0x00, 0x00]);
    pub const RFC5646_SPOKEN_LANGUAGE: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0d, 0x03, 0x01, 0x01, 0x02, 0x03, 0x15, 0x00, 0x00]);

    // JPEG 2000 picture sub-descriptor.
    pub const J2K_RSIZ: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0a, 0x04, 0x01, 0x06, 0x03, 0x01, 0x00, 0x00, 0x00]);
    pub const J2K_XSIZ: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0a, 0x04, 0x01, 0x06, 0x03, 0x02, 0x00, 0x00, 0x00]);
    pub const J2K_YSIZ: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0a, 0x04, 0x01, 0x06, 0x03, 0x03, 0x00, 0x00, 0x00]);
    pub const J2K_CSIZ: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0a, 0x04, 0x01, 0x06, 0x03, 0x0a, 0x00, 0x00, 0x00]);

    // PHDR metadata track sub-descriptor.
    pub const PHDR_SIMPLE_PAYLOAD_SID: Ul =
        Ul([0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x0e, 0x04, 0x06, 0x08, 0x03, 0x00, 0x00, 0x00, 0x00]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_version_is_masked_for_set_lookup() {
        // The same key with a different registry version byte must classify identically.
        let mut key = PREFACE;
        key.0[7] = 0x7f;
        assert_eq!(key.set_type(), Some(SetType::Preface));
        assert_eq!(PREFACE.set_type(), Some(SetType::Preface));
    }

    #[test]
    fn unregistered_set_keys_are_unknown() {
        assert_eq!(set_key(0xfe).set_type(), None);
        assert_eq!(FILL_ITEM.set_type(), None);
    }

    #[test]
    fn key_families_classify() {
        let header_closed_complete = Ul([
            0x06, 0x0e, 0x2b, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0d, 0x01, 0x02, 0x01, 0x01, 0x02,
            0x04, 0x00,
        ]);
        assert!(header_closed_complete.is_partition_pack());
        assert!(!header_closed_complete.is_primer());

        assert!(PRIMER_PACK.is_primer());
        assert!(!PRIMER_PACK.is_partition_pack());

        // Both fill item registry versions are accepted.
        let mut legacy_fill = FILL_ITEM;
        legacy_fill.0[7] = 0x01;
        assert!(legacy_fill.is_fill());

        assert!(PREFACE.is_local_set());
        assert!(!FILL_ITEM.is_local_set());
    }

    #[test]
    fn display_is_dotted_hex() {
        assert_eq!(PRIMER_PACK.to_string(), "060e2b34.02050101.0d010201.01050100");
    }
}
