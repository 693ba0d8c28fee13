// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared structs and traits for the mxf-rs crates.
//!
//! `mxf-core` provides the byte-source abstraction consumed by the parser crates and the common
//! error type reported by them. It contains no MXF knowledge of its own.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod errors;
pub mod io;
