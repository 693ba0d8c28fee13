// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::io;
use std::result;

/// `Error` provides an enumeration of all possible errors reported by the mxf-rs crates.
#[derive(Debug)]
pub enum Error {
    /// An IO error occurred while reading or seeking the byte source.
    IoError(io::Error),
    /// The KLV framing was malformed: a truncated key, or an invalid BER length.
    MalformedKlv(&'static str),
    /// The header partition did not begin at byte offset 0 of the source.
    UnexpectedOffset(u64),
    /// The first KLV was not a valid header partition pack.
    InvalidPartitionPack(&'static str),
    /// Neither the KLV following the partition pack nor the one after a single fill item was a
    /// primer pack.
    MissingPrimer(&'static str),
    /// The primer pack batch was malformed or contained a duplicate local tag.
    MalformedPrimer(&'static str),
    /// A declared field's value could not be decoded: a size mismatch, a zero rational
    /// denominator, or a truncated value.
    FieldDecode(&'static str),
    /// The structural metadata was malformed in a way not covered by a more specific variant.
    DecodeError(&'static str),
    /// The header partition contained no preface set.
    NoPreface,
    /// The header partition contained more than one preface set.
    MultiplePreface(usize),
    /// A wave audio descriptor listed strong references but none resolved to a recognized audio
    /// label sub-descriptor.
    InvalidDescriptor(&'static str),
    /// The strong-reference graph over instance UIDs contained a cycle.
    CyclicGraph,
    /// A strong reference required by an object's construction did not resolve.
    UnresolvedStrongRef(&'static str),
    /// The byte source ended before the requested bytes could be read.
    EndOfStream,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::IoError(ref err) => write!(f, "io error: {}", err),
            Error::MalformedKlv(msg) => write!(f, "malformed klv: {}", msg),
            Error::UnexpectedOffset(pos) => {
                write!(f, "header partition at byte offset {}, expected 0", pos)
            }
            Error::InvalidPartitionPack(msg) => write!(f, "invalid partition pack: {}", msg),
            Error::MissingPrimer(msg) => write!(f, "missing primer pack: {}", msg),
            Error::MalformedPrimer(msg) => write!(f, "malformed primer pack: {}", msg),
            Error::FieldDecode(msg) => write!(f, "field decode failure: {}", msg),
            Error::DecodeError(msg) => write!(f, "malformed structural metadata: {}", msg),
            Error::NoPreface => write!(f, "header partition has no preface set"),
            Error::MultiplePreface(n) => {
                write!(f, "header partition has {} preface sets, expected 1", n)
            }
            Error::InvalidDescriptor(msg) => write!(f, "invalid essence descriptor: {}", msg),
            Error::CyclicGraph => write!(f, "strong-reference graph contains a cycle"),
            Error::UnresolvedStrongRef(msg) => write!(f, "unresolved strong reference: {}", msg),
            Error::EndOfStream => write!(f, "unexpected end of stream"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IoError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::EndOfStream,
            _ => Error::IoError(err),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create a malformed KLV error.
pub fn malformed_klv_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::MalformedKlv(desc))
}

/// Convenience function to create a field decode error.
pub fn field_decode_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::FieldDecode(desc))
}

/// Convenience function to create a generic decode error.
pub fn decode_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::DecodeError(desc))
}

/// Convenience function to create an end-of-stream error.
pub fn end_of_stream_error<T>() -> Result<T> {
    Err(Error::EndOfStream)
}
