/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Raw deflate decompression of the pixel stream
//!
//! The stream has neither the two byte zlib header nor the adler32
//! trailer, so the inflater runs without zlib framing.
use flate2::{Decompress, FlushDecompress, Status};
use log::trace;

/// Smallest growth step for the output buffer
const MIN_GROWTH: usize = 1 << 12;

/// Why a raw deflate stream could not be inflated
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum InflateFailure {
    /// Invalid codes, distances, block types etc.
    Corrupt(String),
    /// The input ended before the final block did
    UnexpectedEof,
    /// Output would grow past the limit
    ///
    /// Configured limit and the output size reached when we stopped
    LimitExceeded(usize, usize)
}

/// Result of a successful inflate
pub(crate) struct Inflated {
    pub data:     Vec<u8>,
    /// Number of input bytes that made up the stream
    pub consumed: usize
}

/// Inflate a raw deflate stream
///
/// # Arguments
/// - `data`: The compressed stream
/// - `size_hint`: Expected output size, used for the first allocation
/// - `limit`: Maximum output size, the inflater errors out instead of
///    growing the output past it
///
/// Only a stream that reaches its final block is returned, anything else
/// is an error with no output.
pub(crate) fn inflate_raw(
    data: &[u8], size_hint: usize, limit: usize
) -> Result<Inflated, InflateFailure> {
    let mut inflater = Decompress::new(false);
    // one byte past the limit so a stream of exactly `limit` bytes
    // always has room to report its end
    let hard_cap = limit.saturating_add(1);
    let mut out = Vec::with_capacity(size_hint.min(hard_cap));

    loop {
        if out.len() == out.capacity() {
            if out.len() >= hard_cap {
                return Err(InflateFailure::LimitExceeded(limit, out.len()));
            }
            let grow_by = out
                .capacity()
                .max(MIN_GROWTH)
                .min(hard_cap - out.len());
            out.reserve_exact(grow_by);
        }

        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        let start = in_before as usize;

        // `Finish` would make the first call a one shot decode needing the
        // whole output up front, so stream in with `None`
        let status = inflater
            .decompress_vec(&data[start..], &mut out, FlushDecompress::None)
            .map_err(|e| InflateFailure::Corrupt(e.to_string()))?;

        if status == Status::StreamEnd {
            break;
        }
        if out.len() > limit {
            return Err(InflateFailure::LimitExceeded(limit, out.len()));
        }

        let progressed = inflater.total_in() != in_before || inflater.total_out() != out_before;

        if !progressed && out.len() < out.capacity() {
            // output space left but the inflater can't move, input ran out
            return Err(InflateFailure::UnexpectedEof);
        }
    }
    if out.len() > limit {
        return Err(InflateFailure::LimitExceeded(limit, out.len()));
    }
    let consumed = inflater.total_in() as usize;

    trace!("Inflated {} bytes into {} bytes", consumed, out.len());

    Ok(Inflated {
        data: out,
        consumed
    })
}
