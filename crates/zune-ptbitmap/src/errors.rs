/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding.
use core::fmt::{Debug, Display, Formatter};

use zune_core::bytestream::ZByteIoError;

use crate::constants::PTBITMAP_MAGIC;

/// Errors in the container layout, raised before any pixel data is touched
#[non_exhaustive]
pub enum FormatErrors {
    /// The first 16 bytes are not `PTBitmapBuffer__`
    ///
    /// Carries the bytes that were found instead
    InvalidMagic([u8; 16]),
    /// The container ends before a region it declares
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we needed
    /// - 2nd argument is the number of bytes actually present
    Truncated(usize, usize),
    /// Width or height is zero
    ZeroDimensions(usize, usize)
}

/// Errors raised while turning the compressed stream into pixels
#[non_exhaustive]
pub enum DecodeErrors {
    /// The raw deflate stream could not be inflated
    ///
    /// # Arguments
    /// - 1st argument is the byte offset the stream starts at
    /// - 2nd argument is the reason reported by the inflater
    CorruptStream(usize, String),
    /// The inflated stream is not exactly `width*height*4` bytes
    LengthMismatch { expected: usize, actual: usize },
    /// Width or height is above the configured maximum
    ///
    /// Dimension name, configured limit, found value
    TooLargeDimensions(&'static str, usize, usize),
    /// Output would be larger than the configured inflate limit
    ///
    /// Configured limit, size that was needed. A size of `usize::MAX`
    /// means the size calculation overflowed
    OutputLimitExceeded(usize, usize),
    /// Caller supplied buffer too small, expected and found sizes
    TooSmallOutput(usize, usize),
    /// Bytes left after the final deflate block, stream offset and count
    TrailingData(usize, usize)
}

/// Possible errors that may occur when decoding a `PTBitmapBuffer`
pub enum PtBitmapErrors {
    Format(FormatErrors),
    Decode(DecodeErrors),
    IoErrors(ZByteIoError)
}

impl Debug for FormatErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            FormatErrors::InvalidMagic(found) => {
                writeln!(
                    f,
                    "Invalid magic bytes, expected {:?} but found {:?}",
                    String::from_utf8_lossy(&PTBITMAP_MAGIC),
                    String::from_utf8_lossy(found)
                )
            }
            FormatErrors::Truncated(needed, found) => {
                writeln!(
                    f,
                    "Truncated container, needed {needed} bytes but only {found} are present"
                )
            }
            FormatErrors::ZeroDimensions(width, height) => {
                writeln!(f, "Zero dimensions found, width {width} height {height}")
            }
        }
    }
}

impl Debug for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeErrors::CorruptStream(offset, reason) => {
                writeln!(
                    f,
                    "Corrupt raw deflate stream starting at offset {offset}: {reason}"
                )
            }
            DecodeErrors::LengthMismatch { expected, actual } => {
                writeln!(
                    f,
                    "Inflated length mismatch, expected {expected} bytes but found {actual}"
                )
            }
            DecodeErrors::TooLargeDimensions(dimension, limit, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension}, {found} exceeds {limit}"
                )
            }
            DecodeErrors::OutputLimitExceeded(limit, size) => {
                if *size == usize::MAX {
                    writeln!(f, "Output size overflows, limit is {limit}")
                } else {
                    writeln!(
                        f,
                        "Output limit exceeded, set limit was {limit} and output size is {size}"
                    )
                }
            }
            DecodeErrors::TooSmallOutput(expected, found) => {
                writeln!(
                    f,
                    "Too small output size, expected {expected}, but found {found}"
                )
            }
            DecodeErrors::TrailingData(offset, count) => {
                writeln!(
                    f,
                    "{count} trailing bytes after the deflate stream starting at offset {offset}"
                )
            }
        }
    }
}

impl Debug for PtBitmapErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PtBitmapErrors::Format(err) => writeln!(f, "Format error: {:?}", err),
            PtBitmapErrors::Decode(err) => writeln!(f, "Decode error: {:?}", err),
            PtBitmapErrors::IoErrors(err) => writeln!(f, "I/O error {:?}", err)
        }
    }
}

impl Display for FormatErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl Display for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl Display for PtBitmapErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for FormatErrors {}

impl std::error::Error for DecodeErrors {}

impl std::error::Error for PtBitmapErrors {}

impl From<FormatErrors> for PtBitmapErrors {
    fn from(value: FormatErrors) -> Self {
        PtBitmapErrors::Format(value)
    }
}

impl From<DecodeErrors> for PtBitmapErrors {
    fn from(value: DecodeErrors) -> Self {
        PtBitmapErrors::Decode(value)
    }
}

impl From<ZByteIoError> for PtBitmapErrors {
    fn from(value: ZByteIoError) -> Self {
        PtBitmapErrors::IoErrors(value)
    }
}
