/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Byte layout of a `PTBitmapBuffer` header
//!
//! Every fixed-offset field is described once in [`HEADER_FIELDS`] and read
//! through [`HeaderField::read`], reserved regions are never listed.

/// Signature every container starts with, the two trailing underscores
/// are part of it.
pub const PTBITMAP_MAGIC: [u8; 16] = *b"PTBitmapBuffer__";

/// Size of the fixed header region, the color profile starts here.
pub const PTBITMAP_HEADER_SIZE: usize = 98;

/// Bytes per stored pixel, a single BGRA8 group.
pub const PTBITMAP_BYTES_PER_PIXEL: usize = 4;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FieldEndian {
    Little,
    Big
}

/// A single unsigned integer field inside the fixed header.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HeaderField {
    pub name:   &'static str,
    pub offset: usize,
    /// Width in bytes, at most 4.
    pub width:  usize,
    pub endian: FieldEndian
}

impl HeaderField {
    /// End offset (exclusive) of this field
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Read this field from the fixed header bytes.
    ///
    /// Returns `None` if `header` does not cover the field.
    pub fn read(&self, header: &[u8]) -> Option<u32> {
        let bytes = header.get(self.offset..self.end())?;

        let value = match self.endian {
            FieldEndian::Big => bytes
                .iter()
                .fold(0_u32, |acc, byte| (acc << 8) | u32::from(*byte)),
            FieldEndian::Little => bytes
                .iter()
                .rev()
                .fold(0_u32, |acc, byte| (acc << 8) | u32::from(*byte))
        };
        Some(value)
    }
}

pub const VERSION_FIELD: HeaderField = HeaderField {
    name:   "version",
    offset: 16,
    width:  4,
    endian: FieldEndian::Little
};

pub const WIDTH_FIELD: HeaderField = HeaderField {
    name:   "width",
    offset: 28,
    width:  4,
    endian: FieldEndian::Little
};

pub const HEIGHT_FIELD: HeaderField = HeaderField {
    name:   "height",
    offset: 32,
    width:  4,
    endian: FieldEndian::Little
};

// 24 bit and big endian, unlike everything before it
pub const PROFILE_LENGTH_FIELD: HeaderField = HeaderField {
    name:   "profile_length",
    offset: 95,
    width:  3,
    endian: FieldEndian::Big
};

/// All interpreted header fields in file order.
///
/// `[20,28)` and `[36,95)` are reserved and deliberately absent.
pub const HEADER_FIELDS: [HeaderField; 4] =
    [VERSION_FIELD, WIDTH_FIELD, HEIGHT_FIELD, PROFILE_LENGTH_FIELD];
