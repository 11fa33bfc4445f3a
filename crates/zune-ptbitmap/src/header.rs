/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::constants::{
    HeaderField, HEIGHT_FIELD, PROFILE_LENGTH_FIELD, PTBITMAP_BYTES_PER_PIXEL,
    PTBITMAP_HEADER_SIZE, PTBITMAP_MAGIC, VERSION_FIELD, WIDTH_FIELD
};
use crate::errors::FormatErrors;

/// Fields stored in the fixed 98 byte header of a `PTBitmapBuffer`
///
/// Reserved regions are not carried, their meaning is unknown and
/// any later use of them has to be keyed off `version`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PtBitmapHeader {
    /// Always equal to [`PTBITMAP_MAGIC`]
    pub magic:          [u8; 16],
    pub version:        u32,
    pub width:          u32,
    pub height:         u32,
    /// Length of the embedded color profile, a 24 bit value
    pub profile_length: u32
}

impl PtBitmapHeader {
    /// Parse the fixed header region.
    ///
    /// `header` is whatever prefix of the container is available, only the
    /// first 98 bytes are looked at. The signature is checked before
    /// anything else, on mismatch no other byte is interpreted.
    pub fn parse(header: &[u8]) -> Result<PtBitmapHeader, FormatErrors> {
        let magic: [u8; 16] = match header.get(..PTBITMAP_MAGIC.len()) {
            Some(bytes) => {
                let mut magic = [0; 16];
                magic.copy_from_slice(bytes);
                magic
            }
            None => {
                return Err(FormatErrors::Truncated(
                    PTBITMAP_MAGIC.len(),
                    header.len()
                ))
            }
        };

        if magic != PTBITMAP_MAGIC {
            return Err(FormatErrors::InvalidMagic(magic));
        }
        if header.len() < PTBITMAP_HEADER_SIZE {
            return Err(FormatErrors::Truncated(PTBITMAP_HEADER_SIZE, header.len()));
        }

        let parsed = PtBitmapHeader {
            magic,
            version: read_field(header, VERSION_FIELD)?,
            width: read_field(header, WIDTH_FIELD)?,
            height: read_field(header, HEIGHT_FIELD)?,
            profile_length: read_field(header, PROFILE_LENGTH_FIELD)?
        };

        if parsed.width == 0 || parsed.height == 0 {
            return Err(FormatErrors::ZeroDimensions(
                parsed.width as usize,
                parsed.height as usize
            ));
        }
        Ok(parsed)
    }

    /// Offset of the first byte of the compressed pixel stream
    pub const fn stream_offset(&self) -> usize {
        PTBITMAP_HEADER_SIZE + self.profile_length as usize
    }

    /// Number of bytes the pixel stream must inflate to, `width*height*4`
    ///
    /// Returns `None` if the calculation overflows a usize
    pub fn pixel_bytes(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(PTBITMAP_BYTES_PER_PIXEL)
    }
}

fn read_field(header: &[u8], field: HeaderField) -> Result<u32, FormatErrors> {
    field
        .read(header)
        .ok_or(FormatErrors::Truncated(field.end(), header.len()))
}

/// Return true if `bytes` starts with the `PTBitmapBuffer__` signature
///
/// This only sniffs the signature, the rest of the container may still be invalid
pub fn probe_ptbitmap(bytes: &[u8]) -> bool {
    bytes.get(..PTBITMAP_MAGIC.len()) == Some(&PTBITMAP_MAGIC[..])
}
