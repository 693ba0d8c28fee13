// mxf-rs
// Copyright (c) 2026 The mxf-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp;
use std::io::{Read, Seek, SeekFrom};

use crate::errors::{end_of_stream_error, Result};

use super::{MediaSource, ReadBytes};

const BUFFER_LEN: usize = 32 * 1024;

/// `MediaSourceStream` is a buffered stream over a [`MediaSource`], tracking the absolute byte
/// position of the source.
///
/// Reads are strictly sequential. Skips are serviced by seeking when the underlying source is
/// seekable, and by reading and discarding otherwise, so forward-only sources are fully
/// supported.
pub struct MediaSourceStream<'s> {
    /// The source reader.
    inner: Box<dyn MediaSource + 's>,
    /// The intermediate read buffer.
    buf: Box<[u8]>,
    /// The position of the next byte to consume from the buffer.
    read_pos: usize,
    /// The position one past the last valid byte in the buffer.
    end_pos: usize,
    /// The absolute source position of the next byte to be consumed.
    abs_pos: u64,
    /// Whether the inner source reported itself seekable at construction.
    is_seekable: bool,
}

impl<'s> MediaSourceStream<'s> {
    /// Instantiate a new `MediaSourceStream` over the given source.
    pub fn new(inner: Box<dyn MediaSource + 's>) -> Self {
        let is_seekable = inner.is_seekable();

        MediaSourceStream {
            inner,
            buf: vec![0u8; BUFFER_LEN].into_boxed_slice(),
            read_pos: 0,
            end_pos: 0,
            abs_pos: 0,
            is_seekable,
        }
    }

    /// Returns if the underlying source is seekable.
    pub fn is_seekable(&self) -> bool {
        self.is_seekable
    }

    /// Returns the length in bytes of the underlying source, if available.
    pub fn byte_len(&self) -> Option<u64> {
        self.inner.byte_len()
    }

    /// The number of buffered bytes that have not been consumed yet.
    fn unread_len(&self) -> usize {
        self.end_pos - self.read_pos
    }

    /// Refills the buffer from the source. Returns an end-of-stream error if the source is
    /// exhausted.
    fn fetch(&mut self) -> Result<()> {
        if self.read_pos == self.end_pos {
            let len = self.inner.read(&mut self.buf)?;

            if len == 0 {
                return end_of_stream_error();
            }

            self.read_pos = 0;
            self.end_pos = len;
        }

        Ok(())
    }
}

impl ReadBytes for MediaSourceStream<'_> {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8> {
        self.fetch()?;

        let byte = self.buf[self.read_pos];
        self.read_pos += 1;
        self.abs_pos += 1;

        Ok(byte)
    }

    fn read_double_bytes(&mut self) -> Result<[u8; 2]> {
        let mut bytes = [0u8; 2];
        self.read_buf_exact(&mut bytes)?;
        Ok(bytes)
    }

    fn read_quad_bytes(&mut self) -> Result<[u8; 4]> {
        let mut bytes = [0u8; 4];
        self.read_buf_exact(&mut bytes)?;
        Ok(bytes)
    }

    fn read_buf_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut written = 0;

        while written < buf.len() {
            self.fetch()?;

            let count = cmp::min(self.unread_len(), buf.len() - written);

            buf[written..written + count]
                .copy_from_slice(&self.buf[self.read_pos..self.read_pos + count]);

            self.read_pos += count;
            self.abs_pos += count as u64;
            written += count;
        }

        Ok(())
    }

    fn ignore_bytes(&mut self, count: u64) -> Result<()> {
        // Consume from the buffer first.
        let buffered = cmp::min(self.unread_len() as u64, count);

        self.read_pos += buffered as usize;
        self.abs_pos += buffered;

        let mut remaining = count - buffered;

        if remaining == 0 {
            return Ok(());
        }

        if self.is_seekable {
            self.inner.seek(SeekFrom::Current(remaining as i64))?;
            self.abs_pos += remaining;
        }
        else {
            // Forward-only source. Read and discard.
            let mut discard = [0u8; 1024];

            while remaining > 0 {
                let count = cmp::min(remaining, discard.len() as u64) as usize;
                self.read_buf_exact(&mut discard[..count])?;
                remaining -= count as u64;
            }
        }

        Ok(())
    }

    #[inline(always)]
    fn pos(&self) -> u64 {
        self.abs_pos
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::MediaSourceStream;
    use crate::io::ReadBytes;

    #[test]
    fn sequential_reads_track_position() {
        let data: Vec<u8> = (0u8..64).collect();
        let mut mss = MediaSourceStream::new(Box::new(Cursor::new(data)));

        assert_eq!(mss.pos(), 0);
        assert_eq!(mss.read_byte().unwrap(), 0);
        assert_eq!(mss.read_be_u16().unwrap(), 0x0102);
        mss.ignore_bytes(5).unwrap();
        assert_eq!(mss.pos(), 8);
        assert_eq!(mss.read_byte().unwrap(), 8);
    }

    #[test]
    fn end_of_stream_is_reported() {
        let mut mss = MediaSourceStream::new(Box::new(Cursor::new(vec![1u8, 2])));
        let mut buf = [0u8; 4];
        assert!(mss.read_buf_exact(&mut buf).is_err());
    }
}
