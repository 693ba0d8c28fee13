// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graph resolution: from a flat arena of byte objects to materialized interchange objects.
//!
//! Strong references between sets form a DAG over instance UIDs. The resolver sorts that graph
//! topologically (a cycle is fatal) and then materializes rich objects leaves-first, so every
//! object's dependents exist before the object itself is built. Objects reference one another by
//! UID into the arena, never by owning pointers; the cross-referential package/track/sequence/
//! clip structure makes owned links impossible to express.

use std::collections::HashMap;

use mxf_core::errors::{Error, Result};

use crate::diag::ParseLog;
use crate::fields::{MxfUid, Rational};
use crate::labels::SetType;
use crate::sets::SetBo;

/// The arena of decoded byte objects, in first-encounter order.
pub struct BoArena {
    bos: Vec<SetBo>,
    by_uid: HashMap<MxfUid, usize>,
    /// Package-UID and UMID-material-number aliases of generic packages.
    aliases: HashMap<MxfUid, usize>,
}

impl BoArena {
    pub fn new() -> Self {
        BoArena { bos: Vec::new(), by_uid: HashMap::new(), aliases: HashMap::new() }
    }

    /// Inserts a decoded set. A repeated instance UID is recorded as an error and the later set
    /// replaces the earlier one in place.
    pub fn insert(&mut self, bo: SetBo, log: &mut ParseLog) {
        let uid = bo.instance_uid();

        let index = match self.by_uid.get(&uid) {
            Some(&index) => {
                log.error(format!("duplicate instance uid {}, later set replaces earlier", uid));
                self.bos[index] = bo;
                index
            }
            None => {
                self.bos.push(bo);
                self.by_uid.insert(uid, self.bos.len() - 1);
                self.bos.len() - 1
            }
        };

        if let Some(package_uid) = self.bos[index].package_uid() {
            self.aliases.insert(package_uid, index);
            if let Some(mn) = package_uid.material_number() {
                self.aliases.insert(mn, index);
            }
        }
    }

    /// Resolves a reference to an arena index: by instance UID, by full package UID, or by UMID
    /// material number when the widths differ.
    pub fn index_of(&self, uid: MxfUid) -> Option<usize> {
        if let Some(&index) = self.by_uid.get(&uid) {
            return Some(index);
        }
        if let Some(&index) = self.aliases.get(&uid) {
            return Some(index);
        }
        uid.material_number().and_then(|mn| self.aliases.get(&mn)).copied()
    }

    /// Resolves a reference to its byte object.
    pub fn get(&self, uid: MxfUid) -> Option<&SetBo> {
        self.index_of(uid).map(|index| &self.bos[index])
    }

    pub fn bos(&self) -> &[SetBo] {
        &self.bos
    }

    pub fn len(&self) -> usize {
        self.bos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bos.is_empty()
    }
}

impl Default for BoArena {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    Unmarked,
    Temporary,
    Permanent,
}

/// Orders the arena so every object follows all of its dependents (leaves first, roots last).
///
/// Three-colour depth-first search. Meeting a temporary mark means the walk re-entered a node on
/// the current path, i.e. the graph has a cycle. Nodes are visited in first-encounter order and
/// edges in field order, so the output is deterministic.
pub fn topological_order(arena: &BoArena, log: &mut ParseLog) -> Result<Vec<usize>> {
    let edges: Vec<Vec<usize>> = arena
        .bos()
        .iter()
        .map(|bo| {
            bo.strong_refs()
                .into_iter()
                .filter_map(|uid| {
                    let index = arena.index_of(uid);
                    if index.is_none() {
                        // Possibly a reference into a body partition; not an error here.
                        log::debug!("strong reference {} does not resolve in this partition", uid);
                    }
                    index
                })
                .collect()
        })
        .collect();

    let mut marks = vec![Mark::Unmarked; arena.len()];
    let mut order = Vec::with_capacity(arena.len());

    fn visit(
        index: usize,
        edges: &[Vec<usize>],
        marks: &mut [Mark],
        order: &mut Vec<usize>,
    ) -> Result<()> {
        match marks[index] {
            Mark::Permanent => return Ok(()),
            Mark::Temporary => return Err(Error::CyclicGraph),
            Mark::Unmarked => (),
        }

        marks[index] = Mark::Temporary;

        for &dep in &edges[index] {
            visit(dep, edges, marks, order)?;
        }

        marks[index] = Mark::Permanent;
        order.push(index);

        Ok(())
    }

    for index in 0..arena.len() {
        if let Err(err) = visit(index, &edges, &mut marks, &mut order) {
            log.fatal("strong-reference graph contains a cycle");
            return Err(err);
        }
    }

    Ok(order)
}

/// A materialized interchange object. Dependent objects are referenced by the instance UID they
/// were indexed under; dereference through the owning [`HeaderPartition`].
///
/// [`HeaderPartition`]: crate::HeaderPartition
#[derive(Debug)]
pub enum InterchangeObject {
    Preface(Preface),
    Identification(Identification),
    ContentStorage(ContentStorage),
    EssenceContainerData(EssenceContainerData),
    MaterialPackage(MaterialPackage),
    SourcePackage(SourcePackage),
    TimelineTrack(TimelineTrack),
    Sequence(Sequence),
    SourceClip(SourceClip),
    CdciDescriptor(CdciDescriptor),
    RgbaDescriptor(RgbaDescriptor),
    WaveAudioDescriptor(WaveAudioDescriptor),
    AudioChannelLabel(AudioChannelLabel),
    SoundfieldGroupLabel(SoundfieldGroupLabel),
    Jpeg2000SubDescriptor(Jpeg2000SubDescriptor),
    PhdrMetadataTrackSubDescriptor(PhdrMetadataTrackSubDescriptor),
}

#[derive(Debug)]
pub struct Preface {
    pub instance_uid: MxfUid,
    /// The primary package, when declared and present in this partition.
    pub primary_package: Option<MxfUid>,
    pub content_storage: MxfUid,
}

#[derive(Debug)]
pub struct Identification {
    pub instance_uid: MxfUid,
}

#[derive(Debug)]
pub struct ContentStorage {
    pub instance_uid: MxfUid,
    pub packages: Vec<MxfUid>,
    pub essence_container_data: Vec<MxfUid>,
}

#[derive(Debug)]
pub struct EssenceContainerData {
    pub instance_uid: MxfUid,
    /// The linked generic package, by instance UID.
    pub linked_package: MxfUid,
}

#[derive(Debug)]
pub struct MaterialPackage {
    pub instance_uid: MxfUid,
    pub package_uid: MxfUid,
    pub tracks: Vec<MxfUid>,
}

#[derive(Debug)]
pub struct SourcePackage {
    pub instance_uid: MxfUid,
    pub package_uid: MxfUid,
    pub tracks: Vec<MxfUid>,
    pub descriptor: MxfUid,
}

#[derive(Debug)]
pub struct TimelineTrack {
    pub instance_uid: MxfUid,
    pub track_id: Option<u32>,
    pub edit_rate: Option<Rational>,
    pub sequence: MxfUid,
}

#[derive(Debug)]
pub struct Sequence {
    pub instance_uid: MxfUid,
    pub duration: Option<i64>,
    /// The resolved structural components, in declared order.
    pub components: Vec<MxfUid>,
}

#[derive(Debug)]
pub struct SourceClip {
    pub instance_uid: MxfUid,
    pub duration: Option<i64>,
    /// The referenced source package, by instance UID, when it lives in this partition.
    pub source_package: Option<MxfUid>,
}

#[derive(Debug)]
pub struct CdciDescriptor {
    pub instance_uid: MxfUid,
}

#[derive(Debug)]
pub struct RgbaDescriptor {
    pub instance_uid: MxfUid,
}

#[derive(Debug)]
pub struct WaveAudioDescriptor {
    pub instance_uid: MxfUid,
}

#[derive(Debug)]
pub struct AudioChannelLabel {
    pub instance_uid: MxfUid,
}

#[derive(Debug)]
pub struct SoundfieldGroupLabel {
    pub instance_uid: MxfUid,
}

#[derive(Debug)]
pub struct Jpeg2000SubDescriptor {
    pub instance_uid: MxfUid,
}

#[derive(Debug)]
pub struct PhdrMetadataTrackSubDescriptor {
    pub instance_uid: MxfUid,
}

impl InterchangeObject {
    pub fn kind(&self) -> SetType {
        match self {
            InterchangeObject::Preface(_) => SetType::Preface,
            InterchangeObject::Identification(_) => SetType::Identification,
            InterchangeObject::ContentStorage(_) => SetType::ContentStorage,
            InterchangeObject::EssenceContainerData(_) => SetType::EssenceContainerData,
            InterchangeObject::MaterialPackage(_) => SetType::MaterialPackage,
            InterchangeObject::SourcePackage(_) => SetType::SourcePackage,
            InterchangeObject::TimelineTrack(_) => SetType::TimelineTrack,
            InterchangeObject::Sequence(_) => SetType::Sequence,
            InterchangeObject::SourceClip(_) => SetType::SourceClip,
            InterchangeObject::CdciDescriptor(_) => SetType::CdciDescriptor,
            InterchangeObject::RgbaDescriptor(_) => SetType::RgbaDescriptor,
            InterchangeObject::WaveAudioDescriptor(_) => SetType::WaveAudioDescriptor,
            InterchangeObject::AudioChannelLabel(_) => SetType::AudioChannelLabelSubDescriptor,
            InterchangeObject::SoundfieldGroupLabel(_) => {
                SetType::SoundfieldGroupLabelSubDescriptor
            }
            InterchangeObject::Jpeg2000SubDescriptor(_) => SetType::Jpeg2000SubDescriptor,
            InterchangeObject::PhdrMetadataTrackSubDescriptor(_) => {
                SetType::PhdrMetadataTrackSubDescriptor
            }
        }
    }

    pub fn instance_uid(&self) -> MxfUid {
        match self {
            InterchangeObject::Preface(o) => o.instance_uid,
            InterchangeObject::Identification(o) => o.instance_uid,
            InterchangeObject::ContentStorage(o) => o.instance_uid,
            InterchangeObject::EssenceContainerData(o) => o.instance_uid,
            InterchangeObject::MaterialPackage(o) => o.instance_uid,
            InterchangeObject::SourcePackage(o) => o.instance_uid,
            InterchangeObject::TimelineTrack(o) => o.instance_uid,
            InterchangeObject::Sequence(o) => o.instance_uid,
            InterchangeObject::SourceClip(o) => o.instance_uid,
            InterchangeObject::CdciDescriptor(o) => o.instance_uid,
            InterchangeObject::RgbaDescriptor(o) => o.instance_uid,
            InterchangeObject::WaveAudioDescriptor(o) => o.instance_uid,
            InterchangeObject::AudioChannelLabel(o) => o.instance_uid,
            InterchangeObject::SoundfieldGroupLabel(o) => o.instance_uid,
            InterchangeObject::Jpeg2000SubDescriptor(o) => o.instance_uid,
            InterchangeObject::PhdrMetadataTrackSubDescriptor(o) => o.instance_uid,
        }
    }

    /// The package UID of a generic package variant.
    pub fn package_uid(&self) -> Option<MxfUid> {
        match self {
            InterchangeObject::MaterialPackage(o) => Some(o.package_uid),
            InterchangeObject::SourcePackage(o) => Some(o.package_uid),
            _ => None,
        }
    }
}

/// The materialized object graph with its lookup indexes.
pub struct ResolvedGraph {
    /// Objects in construction (topological) order.
    pub objects: Vec<InterchangeObject>,
    /// Instance UIDs, and additionally package UIDs for generic packages, to object index.
    pub by_uid: HashMap<MxfUid, usize>,
    /// Object indexes per class, in construction order.
    pub by_class: HashMap<SetType, Vec<usize>>,
}

impl ResolvedGraph {
    fn kind_of(&self, uid: MxfUid) -> Option<SetType> {
        self.by_uid.get(&uid).map(|&index| self.objects[index].kind())
    }

    /// Canonicalizes a reference to the instance UID of the materialized object it resolves to,
    /// requiring the object kind to satisfy `want`.
    fn resolve_as(
        &self,
        arena: &BoArena,
        uid: MxfUid,
        want: impl Fn(SetType) -> bool,
    ) -> Option<MxfUid> {
        let canonical = arena.get(uid)?.instance_uid();
        let kind = self.kind_of(canonical)?;
        if want(kind) {
            Some(canonical)
        }
        else {
            None
        }
    }

    fn index(&mut self, object: InterchangeObject) {
        let index = self.objects.len();
        let uid = object.instance_uid();
        let package_uid = object.package_uid();
        let kind = object.kind();

        self.objects.push(object);
        self.by_uid.insert(uid, index);
        if let Some(package_uid) = package_uid {
            self.by_uid.insert(package_uid, index);
        }
        self.by_class.entry(kind).or_default().push(index);
    }
}

/// Materializes rich objects from the arena, walking the topological order so dependents are
/// always built before the objects that hold them.
pub fn resolve(arena: &BoArena, log: &mut ParseLog) -> Result<ResolvedGraph> {
    let order = topological_order(arena, log)?;

    let mut graph = ResolvedGraph {
        objects: Vec::with_capacity(order.len()),
        by_uid: HashMap::new(),
        by_class: HashMap::new(),
    };

    for index in order {
        let object = materialize(&arena.bos()[index], arena, &graph, log)?;
        graph.index(object);
    }

    Ok(graph)
}

fn materialize(
    bo: &SetBo,
    arena: &BoArena,
    graph: &ResolvedGraph,
    log: &mut ParseLog,
) -> Result<InterchangeObject> {
    let object = match bo {
        SetBo::Preface(bo) => {
            let content_storage = bo
                .content_storage
                .and_then(|uid| graph.resolve_as(arena, uid, |k| k == SetType::ContentStorage));

            let content_storage = match content_storage {
                Some(uid) => uid,
                None => {
                    log.fatal("preface has no resolvable content storage");
                    return Err(Error::UnresolvedStrongRef("preface content storage"));
                }
            };

            let primary_package = bo.primary_package.and_then(|uid| {
                let resolved = graph.resolve_as(arena, uid, |k| k.is_package());
                if resolved.is_none() {
                    log.warn(format!("preface primary package {} does not resolve", uid));
                }
                resolved
            });

            InterchangeObject::Preface(Preface {
                instance_uid: bo.common.instance_uid,
                primary_package,
                content_storage,
            })
        }
        SetBo::Identification(bo) => {
            InterchangeObject::Identification(Identification { instance_uid: bo.common.instance_uid })
        }
        SetBo::ContentStorage(bo) => {
            let packages = bo
                .packages
                .iter()
                .filter_map(|&uid| graph.resolve_as(arena, uid, |k| k.is_package()))
                .collect();

            let essence_container_data = bo
                .essence_container_data
                .iter()
                .filter_map(|&uid| {
                    graph.resolve_as(arena, uid, |k| k == SetType::EssenceContainerData)
                })
                .collect();

            InterchangeObject::ContentStorage(ContentStorage {
                instance_uid: bo.common.instance_uid,
                packages,
                essence_container_data,
            })
        }
        SetBo::EssenceContainerData(bo) => {
            let linked_package = bo
                .linked_package_uid
                .and_then(|uid| graph.resolve_as(arena, uid, |k| k.is_package()));

            let linked_package = match linked_package {
                Some(uid) => uid,
                None => {
                    log.fatal("essence container data has no resolvable linked package");
                    return Err(Error::UnresolvedStrongRef(
                        "essence container data linked package",
                    ));
                }
            };

            InterchangeObject::EssenceContainerData(EssenceContainerData {
                instance_uid: bo.common.instance_uid,
                linked_package,
            })
        }
        SetBo::MaterialPackage(bo) => {
            let tracks = bo
                .tracks
                .iter()
                .filter_map(|&uid| graph.resolve_as(arena, uid, |k| k.is_track()))
                .collect();

            InterchangeObject::MaterialPackage(MaterialPackage {
                instance_uid: bo.common.instance_uid,
                package_uid: bo.package_uid,
                tracks,
            })
        }
        SetBo::SourcePackage(bo) => {
            let tracks = bo
                .tracks
                .iter()
                .filter_map(|&uid| graph.resolve_as(arena, uid, |k| k.is_track()))
                .collect();

            let descriptor = bo
                .descriptor
                .and_then(|uid| graph.resolve_as(arena, uid, |k| k.is_descriptor()));

            let descriptor = match descriptor {
                Some(uid) => uid,
                None => {
                    log.fatal("source package has no resolvable essence descriptor");
                    return Err(Error::UnresolvedStrongRef("source package descriptor"));
                }
            };

            InterchangeObject::SourcePackage(SourcePackage {
                instance_uid: bo.common.instance_uid,
                package_uid: bo.package_uid,
                tracks,
                descriptor,
            })
        }
        SetBo::TimelineTrack(bo) => {
            let sequence = bo
                .sequence
                .and_then(|uid| graph.resolve_as(arena, uid, |k| k == SetType::Sequence));

            let sequence = match sequence {
                Some(uid) => uid,
                None => {
                    log.fatal("timeline track has no resolvable sequence");
                    return Err(Error::UnresolvedStrongRef("timeline track sequence"));
                }
            };

            InterchangeObject::TimelineTrack(TimelineTrack {
                instance_uid: bo.common.instance_uid,
                track_id: bo.track_id,
                edit_rate: bo.edit_rate,
                sequence,
            })
        }
        SetBo::Sequence(bo) => {
            let components = bo
                .components
                .iter()
                .filter_map(|&uid| {
                    let resolved =
                        graph.resolve_as(arena, uid, |k| k.is_structural_component());
                    if resolved.is_none() {
                        log.warn(format!("sequence component {} does not resolve", uid));
                    }
                    resolved
                })
                .collect();

            InterchangeObject::Sequence(Sequence {
                instance_uid: bo.common.instance_uid,
                duration: bo.duration,
                components,
            })
        }
        SetBo::SourceClip(bo) => {
            let source_package = bo
                .source_package_id
                .filter(|uid| !uid.is_zero())
                .and_then(|uid| graph.resolve_as(arena, uid, |k| k.is_package()));

            InterchangeObject::SourceClip(SourceClip {
                instance_uid: bo.common.instance_uid,
                duration: bo.duration,
                source_package,
            })
        }
        SetBo::CdciDescriptor(bo) => {
            InterchangeObject::CdciDescriptor(CdciDescriptor { instance_uid: bo.common.instance_uid })
        }
        SetBo::RgbaDescriptor(bo) => {
            InterchangeObject::RgbaDescriptor(RgbaDescriptor { instance_uid: bo.common.instance_uid })
        }
        SetBo::WaveAudioDescriptor(bo) => {
            // A wave audio descriptor that references sub-descriptors must be labelled by at
            // least one channel or soundfield group label.
            if !bo.file.sub_descriptors.is_empty() {
                let labelled = bo.file.sub_descriptors.iter().any(|&uid| {
                    matches!(
                        graph.kind_of(uid),
                        Some(
                            SetType::AudioChannelLabelSubDescriptor
                                | SetType::SoundfieldGroupLabelSubDescriptor
                        )
                    )
                });

                if !labelled {
                    log.fatal("wave audio descriptor has no audio label sub-descriptor");
                    return Err(Error::InvalidDescriptor(
                        "wave audio descriptor has no audio label sub-descriptor",
                    ));
                }
            }

            InterchangeObject::WaveAudioDescriptor(WaveAudioDescriptor {
                instance_uid: bo.common.instance_uid,
            })
        }
        SetBo::AudioChannelLabel(bo) => {
            InterchangeObject::AudioChannelLabel(AudioChannelLabel {
                instance_uid: bo.common.instance_uid,
            })
        }
        SetBo::SoundfieldGroupLabel(bo) => {
            InterchangeObject::SoundfieldGroupLabel(SoundfieldGroupLabel {
                instance_uid: bo.common.instance_uid,
            })
        }
        SetBo::Jpeg2000SubDescriptor(bo) => {
            InterchangeObject::Jpeg2000SubDescriptor(Jpeg2000SubDescriptor {
                instance_uid: bo.common.instance_uid,
            })
        }
        SetBo::PhdrMetadataTrackSubDescriptor(bo) => {
            InterchangeObject::PhdrMetadataTrackSubDescriptor(PhdrMetadataTrackSubDescriptor {
                instance_uid: bo.common.instance_uid,
            })
        }
    };

    Ok(object)
}
