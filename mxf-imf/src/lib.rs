// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An MXF (SMPTE ST 377-1) header partition parser constrained to the IMF essence component
//! profile (SMPTE ST 2067-5).
//!
//! The parser reads the opening partition of an MXF file: the partition pack, the primer pack,
//! and the structural-metadata sets, then resolves the strong-reference graph between sets into
//! typed interchange objects. [`HeaderPartition`] is the query surface over the result.
//!
//! ```no_run
//! use std::fs::File;
//!
//! use mxf_core::io::MediaSourceStream;
//! use mxf_imf::HeaderPartition;
//!
//! # fn main() -> mxf_core::errors::Result<()> {
//! let file = File::open("essence.mxf")?;
//! let mut mss = MediaSourceStream::new(Box::new(file));
//!
//! let header = HeaderPartition::try_new(&mut mss)?;
//!
//! if let Some(preface) = header.preface() {
//!     println!("content storage: {}", preface.content_storage);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod diag;
pub mod fields;
pub mod header;
pub mod klv;
pub mod labels;
pub mod partition;
pub mod primer;
pub mod resolver;
pub mod sets;

pub use crate::header::HeaderPartition;
