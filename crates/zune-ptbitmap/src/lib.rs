/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A `PTBitmapBuffer` decoder
//!
//! `PTBitmapBuffer` is a container found inside layered document files, it holds
//! a raw deflate compressed BGRA8 image together with an embedded color profile.
//! It has the following format:
//! ```text
//! ╔═══════════════╤════════════════════════════════════════════════════════╗
//! ║ Bytes         │ Description                                            ║
//! ╠═══════════════╪════════════════════════════════════════════════════════╣
//! ║ 16            │ "PTBitmapBuffer__" magic value                         ║
//! ╟───────────────┼────────────────────────────────────────────────────────╢
//! ║ 4             │ 32-Bit LE unsigned integer (version)                   ║
//! ╟───────────────┼────────────────────────────────────────────────────────╢
//! ║ 8             │ Reserved                                               ║
//! ╟───────────────┼────────────────────────────────────────────────────────╢
//! ║ 4             │ 32-Bit LE unsigned integer (width)                     ║
//! ╟───────────────┼────────────────────────────────────────────────────────╢
//! ║ 4             │ 32-Bit LE unsigned integer (height)                    ║
//! ╟───────────────┼────────────────────────────────────────────────────────╢
//! ║ 59            │ Reserved                                               ║
//! ╟───────────────┼────────────────────────────────────────────────────────╢
//! ║ 3             │ 24-Bit BE unsigned integer (color profile length)      ║
//! ╟───────────────┼────────────────────────────────────────────────────────╢
//! ║ [length]      │ Color profile, opaque                                  ║
//! ╟───────────────┼────────────────────────────────────────────────────────╢
//! ║ [rest]        │ Raw deflate stream of width*height BGRA8 pixels,       ║
//! ║               │ row-major, top to bottom                               ║
//! ╚═══════════════╧════════════════════════════════════════════════════════╝
//! ```
//!
//! The decoder returns RGBA8 pixels.
//!
//! # Features
//! - Limits on width, height and inflated size checked before allocating
//! - Fail fast, no partially decoded image is ever returned
//! - Fuzz tested
//!
//! # Note
//! Channel order and orientation are assumed to be BGRA and top to bottom,
//! the reserved header bytes are not inspected for flags that may say otherwise.

pub use decoder::*;
pub use errors::*;
pub use header::*;
pub use options::*;
pub use zune_core;

pub mod constants;
mod decoder;
mod errors;
mod header;
mod inflate;
mod options;
pub mod swizzle;
