#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use zune_ptbitmap::zune_core::bytestream::ZCursor;
    use zune_ptbitmap::{PtBitmapDecoder, PtBitmapOptions};

    // keep allocations small so the fuzzer explores instead of swapping
    let options = PtBitmapOptions::default()
        .set_max_width(1 << 10)
        .set_max_height(1 << 10)
        .set_inflate_limit(1 << 22);

    let mut decoder = PtBitmapDecoder::new_with_options(ZCursor::new(data), options);

    if let Ok(image) = decoder.decode() {
        let (width, height) = image.dimensions();
        assert_eq!(image.pixels().len(), width * height * 4);
    }
});
