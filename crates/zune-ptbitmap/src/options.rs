/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Options respected by [`PtBitmapDecoder`](crate::PtBitmapDecoder)
///
/// All limits are checked against header values before the
/// output buffer is allocated.
#[derive(Copy, Clone, Debug)]
pub struct PtBitmapOptions {
    /// Maximum width for which the decoder will
    /// not try to decode images larger than it
    ///
    /// - Default value: 16384
    max_width:     usize,
    /// Maximum height for which the decoder will
    /// not try to decode images larger than it
    ///
    /// - Default value: 16384
    max_height:    usize,
    /// Maximum number of bytes the inflater may produce
    ///
    /// - Default value: 1 GiB, enough for a max sized image
    inflate_limit: usize,
    /// Treat bytes after the final deflate block as an error
    ///
    /// When false, they are logged via the log crate and ignored
    ///
    /// - Default value: false
    strict_mode:   bool
}

impl Default for PtBitmapOptions {
    fn default() -> Self {
        Self {
            max_width:     1 << 14,
            max_height:    1 << 14,
            inflate_limit: 1 << 30,
            strict_mode:   false
        }
    }
}

impl PtBitmapOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder
    /// should not try to decode images greater than this height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Get the maximum number of bytes the inflater may produce
    pub const fn inflate_limit(&self) -> usize {
        self.inflate_limit
    }

    /// Return true if trailing data after the stream is an error
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the maximum number of bytes the inflater may produce.
    ///
    /// Images whose `width*height*4` is above this are rejected
    /// before any decompression happens
    #[must_use]
    pub fn set_inflate_limit(mut self, limit: usize) -> Self {
        self.inflate_limit = limit;
        self
    }

    /// Set whether the decoder should reject containers with
    /// data after the final deflate block
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}
