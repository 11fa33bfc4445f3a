/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{trace, warn};
use zune_core::bit_depth::BitDepth;
use zune_core::bytestream::{ZByteIoError, ZByteReaderTrait, ZReader};
use zune_core::colorspace::ColorSpace;

use crate::constants::{PTBITMAP_HEADER_SIZE, PTBITMAP_MAGIC};
use crate::errors::{DecodeErrors, FormatErrors, PtBitmapErrors};
use crate::header::{probe_ptbitmap, PtBitmapHeader};
use crate::inflate::{inflate_raw, InflateFailure};
use crate::options::PtBitmapOptions;
use crate::swizzle::{bgra_to_rgba, bgra_to_rgba_into};

const PTBITMAP_COLORSPACE: ColorSpace = ColorSpace::RGBA;
const PTBITMAP_BIT_DEPTH: BitDepth = BitDepth::Eight;

/// A fully decoded `PTBitmapBuffer` image
///
/// Pixels are RGBA8, row-major and top to bottom,
/// `pixels().len()` is always `width*height*4`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedPixelBuffer {
    width:  usize,
    height: usize,
    pixels: Vec<u8>
}

impl DecodedPixelBuffer {
    /// Return the width and height of the image
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The RGBA8 pixels
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer returning the RGBA8 pixels
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Channel order of [`pixels`](Self::pixels), always RGBA
    pub const fn colorspace(&self) -> ColorSpace {
        PTBITMAP_COLORSPACE
    }

    /// Always eight bits per channel
    pub const fn bit_depth(&self) -> BitDepth {
        PTBITMAP_BIT_DEPTH
    }
}

/// Inflated BGRA bytes whose length matched the header dimensions
struct ValidatedPixels(Vec<u8>);

/// Check the inflated stream is exactly `expected` bytes long
///
/// This is the only integrity check the format allows, there is no
/// checksum over the pixel data.
fn validate_length(pixels: Vec<u8>, expected: usize) -> Result<ValidatedPixels, DecodeErrors> {
    if pixels.len() != expected {
        return Err(DecodeErrors::LengthMismatch {
            expected,
            actual: pixels.len()
        });
    }
    Ok(ValidatedPixels(pixels))
}

fn inflate_error(offset: usize, failure: InflateFailure) -> DecodeErrors {
    match failure {
        InflateFailure::Corrupt(reason) => DecodeErrors::CorruptStream(offset, reason),
        InflateFailure::UnexpectedEof => {
            DecodeErrors::CorruptStream(offset, String::from("unexpected end of stream"))
        }
        InflateFailure::LimitExceeded(limit, size) => {
            DecodeErrors::OutputLimitExceeded(limit, size)
        }
    }
}

/// Fill as much of `buf` as the source allows, returning the number of
/// bytes written.
fn read_up_to<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, buf: &mut [u8]
) -> Result<usize, ZByteIoError> {
    let mut filled = 0;

    while filled < buf.len() {
        match stream.read_bytes(&mut buf[filled..])? {
            0 => break,
            read => filled += read
        }
    }
    Ok(filled)
}

/// A `PTBitmapBuffer` decoder
///
/// The decoder is initialized by calling `new`
/// and either of [`decode_headers`] to read the header and the color profile
/// or [`decode`] to return RGBA pixels.
///
/// Decoding is fail fast, on error nothing of the image is returned.
///
/// # Example
/// ```no_run
/// use zune_core::bytestream::ZCursor;
/// use zune_ptbitmap::PtBitmapDecoder;
///
/// let data = std::fs::read("layer.bin").unwrap();
/// let mut decoder = PtBitmapDecoder::new(ZCursor::new(&data));
///
/// let image = decoder.decode().unwrap();
/// let (w, h) = image.dimensions();
/// assert_eq!(image.pixels().len(), w * h * 4);
/// ```
///
/// [`decode_headers`]:PtBitmapDecoder::decode_headers
/// [`decode`]:PtBitmapDecoder::decode
pub struct PtBitmapDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:      ZReader<T>,
    options:     PtBitmapOptions,
    header:      Option<PtBitmapHeader>,
    icc_profile: Vec<u8>
}

impl<T> PtBitmapDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new decoder with the default options
    ///
    /// # Arguments
    /// - `data`: The container bytes, starting at the signature
    pub fn new(data: T) -> PtBitmapDecoder<T> {
        PtBitmapDecoder::new_with_options(data, PtBitmapOptions::default())
    }

    /// Create a new decoder that obeys specified restrictions
    ///
    /// E.g can be used to set width, height and inflate limits to prevent OOM attacks
    ///
    /// # Example
    /// ```
    /// use zune_core::bytestream::ZCursor;
    /// use zune_ptbitmap::{PtBitmapDecoder, PtBitmapOptions};
    ///
    /// let options = PtBitmapOptions::default()
    ///     .set_max_width(512)
    ///     .set_max_height(512);
    ///
    /// let mut decoder = PtBitmapDecoder::new_with_options(ZCursor::new([]), options);
    /// assert!(decoder.decode_headers().is_err());
    /// ```
    pub fn new_with_options(data: T, options: PtBitmapOptions) -> PtBitmapDecoder<T> {
        PtBitmapDecoder {
            stream: ZReader::new(data),
            options,
            header: None,
            icc_profile: Vec::new()
        }
    }

    /// Decode the fixed header and the embedded color profile,
    /// storing them in the decoder
    ///
    /// Calling this more than once is a no-op.
    ///
    /// # Returns
    /// - On success: Nothing
    /// - On error: The error encountered, nothing is stored
    pub fn decode_headers(&mut self) -> Result<(), PtBitmapErrors> {
        self.read_headers().map(|_| ())
    }

    fn read_headers(&mut self) -> Result<PtBitmapHeader, PtBitmapErrors> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        let mut fixed = [0_u8; PTBITMAP_HEADER_SIZE];

        // nothing past the signature is read when it does not match
        let mut filled = read_up_to(&mut self.stream, &mut fixed[..PTBITMAP_MAGIC.len()])?;

        if probe_ptbitmap(&fixed[..filled]) {
            filled += read_up_to(&mut self.stream, &mut fixed[filled..])?;
        }
        let header = PtBitmapHeader::parse(&fixed[..filled])?;

        trace!("Container version: {}", header.version);
        trace!("Image width: {}", header.width);
        trace!("Image height: {}", header.height);
        trace!("Color profile length: {}", header.profile_length);

        self.check_limits(&header)?;

        let mut icc_profile = vec![0; header.profile_length as usize];
        let found = read_up_to(&mut self.stream, &mut icc_profile)?;

        if found != icc_profile.len() {
            return Err(
                FormatErrors::Truncated(header.stream_offset(), PTBITMAP_HEADER_SIZE + found).into()
            );
        }

        self.icc_profile = icc_profile;
        self.header = Some(header);

        Ok(header)
    }

    fn check_limits(&self, header: &PtBitmapHeader) -> Result<(), DecodeErrors> {
        let width = header.width as usize;
        let height = header.height as usize;

        if width > self.options.max_width() {
            return Err(DecodeErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(DecodeErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                height
            ));
        }
        let limit = self.options.inflate_limit();

        match header.pixel_bytes() {
            Some(size) if size <= limit => Ok(()),
            Some(size) => Err(DecodeErrors::OutputLimitExceeded(limit, size)),
            None => Err(DecodeErrors::OutputLimitExceeded(limit, usize::MAX))
        }
    }

    fn read_stream(&mut self) -> Result<Vec<u8>, ZByteIoError> {
        let mut data = Vec::new();
        let mut chunk = [0_u8; 1 << 14];

        loop {
            let read = read_up_to(&mut self.stream, &mut chunk)?;
            data.extend_from_slice(&chunk[..read]);

            if read < chunk.len() {
                break;
            }
        }
        Ok(data)
    }

    /// Inflate and validate the pixel stream, BGRA order is untouched
    fn decode_validated(&mut self) -> Result<(PtBitmapHeader, ValidatedPixels), PtBitmapErrors> {
        let header = self.read_headers()?;
        let limit = self.options.inflate_limit();

        let expected = header
            .pixel_bytes()
            .ok_or(DecodeErrors::OutputLimitExceeded(limit, usize::MAX))?;

        let offset = header.stream_offset();
        let compressed = self.read_stream()?;

        trace!("Compressed stream: {} bytes at offset {}", compressed.len(), offset);

        let inflated =
            inflate_raw(&compressed, expected, limit).map_err(|e| inflate_error(offset, e))?;

        let trailing = compressed.len() - inflated.consumed;

        if trailing > 0 {
            if self.options.strict_mode() {
                return Err(DecodeErrors::TrailingData(offset, trailing).into());
            }
            warn!("{trailing} bytes after the end of the deflate stream, ignoring them");
        }

        let pixels = validate_length(inflated.data, expected)?;

        Ok((header, pixels))
    }

    /// Decode the container returning RGBA pixels or the error
    /// encountered during decoding
    ///
    /// # Returns
    /// - On success: The decoded image, its pixel count always matches the header
    /// - On error: An instance of [PtBitmapErrors] explaining which stage failed
    ///
    /// [PtBitmapErrors]:crate::errors::PtBitmapErrors
    pub fn decode(&mut self) -> Result<DecodedPixelBuffer, PtBitmapErrors> {
        let (header, ValidatedPixels(mut pixels)) = self.decode_validated()?;

        bgra_to_rgba(&mut pixels);

        Ok(DecodedPixelBuffer {
            width: header.width as usize,
            height: header.height as usize,
            pixels
        })
    }

    /// Decode the container and store RGBA pixels into `pixels`
    ///
    /// The buffer must be at least [`output_buffer_size`] bytes long,
    /// it is only written once the whole stream inflated and validated.
    ///
    /// [`output_buffer_size`]:Self::output_buffer_size
    pub fn decode_into(&mut self, pixels: &mut [u8]) -> Result<(), PtBitmapErrors> {
        let header = self.read_headers()?;

        if let Some(size) = header.pixel_bytes() {
            if pixels.len() < size {
                return Err(DecodeErrors::TooSmallOutput(size, pixels.len()).into());
            }
        }
        let (_, ValidatedPixels(bgra)) = self.decode_validated()?;

        bgra_to_rgba_into(&bgra, &mut pixels[..bgra.len()]);

        Ok(())
    }

    /// Return the number of bytes required to hold the decoded image
    ///
    /// # Returns
    ///  - `Some(usize)`: `width*height*4`
    ///  - `None`: Headers were not decoded
    pub fn output_buffer_size(&self) -> Option<usize> {
        self.header.as_ref().and_then(PtBitmapHeader::pixel_bytes)
    }

    /// Return the width and height of the image
    ///
    /// Or none if the headers haven't been decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header
            .map(|header| (header.width as usize, header.height as usize))
    }

    /// Return the parsed header or none if headers haven't been decoded
    pub const fn header(&self) -> Option<&PtBitmapHeader> {
        self.header.as_ref()
    }

    /// Return the container version field
    pub fn version(&self) -> Option<u32> {
        self.header.map(|header| header.version)
    }

    /// Return the embedded color profile
    ///
    /// The bytes are opaque, they are carried for a color managing consumer.
    ///
    /// # Returns
    /// - `Some(profile)`: Headers were decoded and the profile is not empty
    /// - `None`: Headers weren't decoded or the profile length is zero
    pub fn icc_profile(&self) -> Option<&[u8]> {
        if self.header.is_some() && !self.icc_profile.is_empty() {
            Some(&self.icc_profile)
        } else {
            None
        }
    }

    /// Returns the output colorspace, always RGBA
    pub const fn colorspace(&self) -> ColorSpace {
        PTBITMAP_COLORSPACE
    }

    /// Return the bit depth of the decoded image
    ///
    /// This is always 8
    pub const fn bit_depth(&self) -> BitDepth {
        PTBITMAP_BIT_DEPTH
    }
}

#[cfg(test)]
mod tests {
    use zune_core::bytestream::ZCursor;

    use super::*;

    // 8x8 solid BGRA (B6,74,33,FF) as stored by the writing application
    const SOLID_8X8: [u8; 9] = [0xdb, 0x56, 0x62, 0xfc, 0x7f, 0xdb, 0x08, 0xc6, 0x00];

    fn container(width: u32, height: u32, profile: &[u8], stream: &[u8]) -> Vec<u8> {
        let mut data = vec![0; PTBITMAP_HEADER_SIZE];
        data[..16].copy_from_slice(&PTBITMAP_MAGIC);
        data[16..20].copy_from_slice(&1_u32.to_le_bytes());
        data[28..32].copy_from_slice(&width.to_le_bytes());
        data[32..36].copy_from_slice(&height.to_le_bytes());
        data[95..98].copy_from_slice(&(profile.len() as u32).to_be_bytes()[1..]);
        data.extend_from_slice(profile);
        data.extend_from_slice(stream);
        data
    }

    #[test]
    fn decode_solid_square() {
        let data = container(8, 8, &[], &SOLID_8X8);
        let image = PtBitmapDecoder::new(ZCursor::new(&data)).decode().unwrap();

        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(image.pixels().len(), 256);
        for pixel in image.pixels().chunks_exact(4) {
            assert_eq!(pixel, &[0x33, 0x74, 0xB6, 0xFF]);
        }
    }

    #[test]
    fn headers_without_pixels() {
        let profile = [9_u8; 5];
        let data = container(8, 8, &profile, &SOLID_8X8);
        let mut decoder = PtBitmapDecoder::new(ZCursor::new(&data));

        assert!(decoder.dimensions().is_none());
        assert!(decoder.icc_profile().is_none());

        decoder.decode_headers().unwrap();
        decoder.decode_headers().unwrap();

        assert_eq!(decoder.dimensions(), Some((8, 8)));
        assert_eq!(decoder.version(), Some(1));
        assert_eq!(decoder.output_buffer_size(), Some(256));
        assert_eq!(decoder.icc_profile(), Some(&profile[..]));
        assert_eq!(decoder.header().map(|h| h.stream_offset()), Some(103));
    }

    #[test]
    fn length_mismatch() {
        // stream holds 8x8 pixels but header claims 8x7
        let data = container(8, 7, &[], &SOLID_8X8);

        assert!(matches!(
            PtBitmapDecoder::new(ZCursor::new(&data)).decode(),
            Err(PtBitmapErrors::Decode(DecodeErrors::LengthMismatch {
                expected: 224,
                actual:   256
            }))
        ));
    }

    #[test]
    fn corrupt_stream_reports_offset() {
        let data = container(8, 8, &[1, 2, 3], &SOLID_8X8[..SOLID_8X8.len() - 1]);

        assert!(matches!(
            PtBitmapDecoder::new(ZCursor::new(&data)).decode(),
            Err(PtBitmapErrors::Decode(DecodeErrors::CorruptStream(101, _)))
        ));
    }

    #[test]
    fn truncated_profile() {
        let mut data = container(8, 8, &[0; 10], &[]);
        data.truncate(PTBITMAP_HEADER_SIZE + 4);

        assert!(matches!(
            PtBitmapDecoder::new(ZCursor::new(&data)).decode_headers(),
            Err(PtBitmapErrors::Format(FormatErrors::Truncated(108, 102)))
        ));
    }

    #[test]
    fn limits_checked_before_inflate() {
        let data = container(8, 8, &[], &SOLID_8X8);

        let options = PtBitmapOptions::default().set_max_width(4);
        assert!(matches!(
            PtBitmapDecoder::new_with_options(ZCursor::new(&data), options).decode(),
            Err(PtBitmapErrors::Decode(DecodeErrors::TooLargeDimensions(
                "width",
                4,
                8
            )))
        ));

        let options = PtBitmapOptions::default().set_max_height(7);
        assert!(matches!(
            PtBitmapDecoder::new_with_options(ZCursor::new(&data), options).decode(),
            Err(PtBitmapErrors::Decode(DecodeErrors::TooLargeDimensions(
                "height",
                7,
                8
            )))
        ));

        let options = PtBitmapOptions::default().set_inflate_limit(255);
        assert!(matches!(
            PtBitmapDecoder::new_with_options(ZCursor::new(&data), options).decode_headers(),
            Err(PtBitmapErrors::Decode(DecodeErrors::OutputLimitExceeded(
                255, 256
            )))
        ));
    }

    #[test]
    fn decode_into_buffer() {
        let data = container(8, 8, &[], &SOLID_8X8);

        let mut small = vec![0; 255];
        assert!(matches!(
            PtBitmapDecoder::new(ZCursor::new(&data)).decode_into(&mut small),
            Err(PtBitmapErrors::Decode(DecodeErrors::TooSmallOutput(256, 255)))
        ));
        assert!(small.iter().all(|x| *x == 0));

        let mut out = vec![0; 300];
        PtBitmapDecoder::new(ZCursor::new(&data))
            .decode_into(&mut out)
            .unwrap();

        assert!(out[..256]
            .chunks_exact(4)
            .all(|pixel| pixel == [0x33, 0x74, 0xB6, 0xFF]));
        assert!(out[256..].iter().all(|x| *x == 0));
    }

    #[test]
    fn trailing_data() {
        let mut stream = SOLID_8X8.to_vec();
        stream.extend_from_slice(&[0xAB; 3]);
        let data = container(8, 8, &[], &stream);

        assert!(PtBitmapDecoder::new(ZCursor::new(&data)).decode().is_ok());

        let options = PtBitmapOptions::default().set_strict_mode(true);
        assert!(matches!(
            PtBitmapDecoder::new_with_options(ZCursor::new(&data), options).decode(),
            Err(PtBitmapErrors::Decode(DecodeErrors::TrailingData(98, 3)))
        ));
    }
}
