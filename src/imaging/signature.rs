//! Magic-byte classification of header buffers.
//!
//! | Format | Min length | Magic |
//! |--------|-----------:|-------|
//! | PNG    | 24 | `89 50 4E 47` at 0 |
//! | JPEG   |  4 | `FF D8` at 0 |
//! | GIF    | 10 | `GIF8` at 0 |
//! | BMP    | 26 | `BM` at 0 |
//! | WebP   | 30 | `RIFF` at 0 and `WEBP` at 8 |
//!
//! The minimum length is the shortest buffer the matching parser can read
//! dimensions from. A shorter buffer is "no match", never an error.

use super::bytes::has_tag;
use crate::types::ImageFormat;

/// Fixed signature of one raster format.
#[derive(Debug)]
pub struct Signature {
    pub format: ImageFormat,
    pub min_len: usize,
    magic: fn(&[u8]) -> bool,
}

impl Signature {
    pub fn matches(&self, data: &[u8]) -> bool {
        data.len() >= self.min_len && (self.magic)(data)
    }
}

fn png_magic(data: &[u8]) -> bool {
    has_tag(data, 0, &[0x89, 0x50, 0x4E, 0x47])
}

fn jpeg_magic(data: &[u8]) -> bool {
    has_tag(data, 0, &[0xFF, 0xD8])
}

fn gif_magic(data: &[u8]) -> bool {
    has_tag(data, 0, b"GIF8")
}

fn bmp_magic(data: &[u8]) -> bool {
    has_tag(data, 0, b"BM")
}

fn webp_magic(data: &[u8]) -> bool {
    has_tag(data, 0, b"RIFF") && has_tag(data, 8, b"WEBP")
}

pub const PNG: Signature = Signature {
    format: ImageFormat::Png,
    min_len: 24,
    magic: png_magic,
};

pub const JPEG: Signature = Signature {
    format: ImageFormat::Jpeg,
    min_len: 4,
    magic: jpeg_magic,
};

pub const GIF: Signature = Signature {
    format: ImageFormat::Gif,
    min_len: 10,
    magic: gif_magic,
};

pub const BMP: Signature = Signature {
    format: ImageFormat::Bmp,
    min_len: 26,
    magic: bmp_magic,
};

pub const WEBP: Signature = Signature {
    format: ImageFormat::Webp,
    min_len: 30,
    magic: webp_magic,
};

/// Signatures in detection order. The magics are disjoint, so the order only
/// decides how many checks run before a hit.
pub const SIGNATURES: [&Signature; 5] = [&PNG, &JPEG, &GIF, &BMP, &WEBP];

/// Classify a buffer by its leading bytes.
pub fn detect(data: &[u8]) -> Option<ImageFormat> {
    SIGNATURES
        .iter()
        .find(|sig| sig.matches(data))
        .map(|sig| sig.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn detects_each_format() {
        assert_eq!(detect(&png_bytes(1, 1)), Some(ImageFormat::Png));
        assert_eq!(detect(&jpeg_bytes(1, 1)), Some(ImageFormat::Jpeg));
        assert_eq!(detect(&gif_bytes(1, 1)), Some(ImageFormat::Gif));
        assert_eq!(detect(&bmp_bytes(1, 1)), Some(ImageFormat::Bmp));
        assert_eq!(detect(&webp_vp8_bytes(1, 1)), Some(ImageFormat::Webp));
        assert_eq!(detect(&webp_vp8l_bytes(1, 1)), Some(ImageFormat::Webp));
    }

    #[test]
    fn short_buffers_do_not_match() {
        let png = png_bytes(10, 10);
        assert!(!PNG.matches(&png[..23]));
        assert!(PNG.matches(&png[..24]));

        let gif = gif_bytes(10, 10);
        assert!(!GIF.matches(&gif[..9]));

        let bmp = bmp_bytes(10, 10);
        assert!(!BMP.matches(&bmp[..25]));

        let webp = webp_vp8_bytes(10, 10);
        assert!(!WEBP.matches(&webp[..29]));

        assert!(!JPEG.matches(&[0xFF, 0xD8, 0xFF]));
        assert_eq!(detect(&[]), None);
    }

    #[test]
    fn riff_without_webp_is_unknown() {
        let mut data = webp_vp8_bytes(10, 10);
        data[8..12].copy_from_slice(b"WAVE");
        assert_eq!(detect(&data), None);
    }

    #[test]
    fn random_bytes_are_unknown() {
        assert_eq!(detect(&noise_bytes(256)), None);
        assert_eq!(detect(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"), None);
    }
}
