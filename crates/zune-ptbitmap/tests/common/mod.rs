/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(dead_code)]

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;
use nanorand::{Rng, WyRand};
use zune_ptbitmap::constants::{PTBITMAP_HEADER_SIZE, PTBITMAP_MAGIC};

/// Raw deflate `data`, no zlib header and no adler32 trailer
pub fn deflate_raw(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Build a container around an already compressed stream
pub fn container(width: u32, height: u32, profile: &[u8], stream: &[u8]) -> Vec<u8> {
    let mut data = vec![0; PTBITMAP_HEADER_SIZE];

    data[..16].copy_from_slice(&PTBITMAP_MAGIC);
    data[16..20].copy_from_slice(&1_u32.to_le_bytes());
    // reserved regions get noise, the decoder must not care
    data[20..28].copy_from_slice(&[0x5A; 8]);
    data[28..32].copy_from_slice(&width.to_le_bytes());
    data[32..36].copy_from_slice(&height.to_le_bytes());
    data[36..95].fill(0xC3);
    data[95..98].copy_from_slice(&(profile.len() as u32).to_be_bytes()[1..]);

    data.extend_from_slice(profile);
    data.extend_from_slice(stream);
    data
}

/// Random BGRA pixels for a `width` x `height` image
pub fn random_bgra(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut pixels = vec![0_u8; width * height * 4];
    WyRand::new_seed(seed).fill(&mut pixels);
    pixels
}

/// What the decoder should hand back for `bgra`
pub fn expected_rgba(bgra: &[u8]) -> Vec<u8> {
    bgra.chunks_exact(4)
        .flat_map(|px| [px[2], px[1], px[0], px[3]])
        .collect()
}
