/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! BGRA to RGBA channel reordering
//!
//! Stored pixels are `B,G,R,A`, we hand out `R,G,B,A`.
//! Row order and pixel count are untouched.

/// Reorder BGRA pixels to RGBA in place
///
/// A trailing group smaller than four bytes is left as is,
/// callers validate lengths before getting here.
pub fn bgra_to_rgba(pixels: &mut [u8]) {
    for pixel in pixels.chunks_exact_mut(4) {
        // swap blue and red
        pixel.swap(0, 2);
    }
}

/// Reorder BGRA pixels from `src` into `dst` as RGBA
///
/// Only `min(src.len(), dst.len())` rounded down to whole pixels is written.
pub fn bgra_to_rgba_into(src: &[u8], dst: &mut [u8]) {
    for (out, pixel) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        out[0] = pixel[2];
        out[1] = pixel[1];
        out[2] = pixel[0];
        out[3] = pixel[3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_red_and_blue() {
        let mut pixels = [0xB6, 0x74, 0x33, 0xFF, 1, 2, 3, 4];
        bgra_to_rgba(&mut pixels);
        assert_eq!(pixels, [0x33, 0x74, 0xB6, 0xFF, 3, 2, 1, 4]);
    }

    #[test]
    fn copy_matches_in_place() {
        let src: Vec<u8> = (0..=255).collect();
        let mut in_place = src.clone();
        let mut copied = vec![0; src.len()];

        bgra_to_rgba(&mut in_place);
        bgra_to_rgba_into(&src, &mut copied);

        assert_eq!(in_place, copied);
    }

    #[test]
    fn reorder_twice_is_identity() {
        let src: Vec<u8> = (0..64).map(|x| x * 3).collect();
        let mut pixels = src.clone();

        bgra_to_rgba(&mut pixels);
        bgra_to_rgba(&mut pixels);

        assert_eq!(pixels, src);
    }

    #[test]
    fn partial_group_untouched() {
        let mut pixels = [1, 2, 3, 4, 5, 6];
        bgra_to_rgba(&mut pixels);
        assert_eq!(pixels, [3, 2, 1, 4, 5, 6]);
    }
}
