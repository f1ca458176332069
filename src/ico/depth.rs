use crate::consts::{PNG_IHDR, PNG_SIGNATURE};
use crate::error::{Error, Result};
use crate::ico::IconImageEntry;
use crate::util::{read_u16, read_u8};

// Offsets of the IHDR fields counted from the start of the PNG stream.
const IHDR_BIT_DEPTH: usize = 24;
const IHDR_COLOR_TYPE: usize = 25;
// Signature, chunk length, chunk type and the 13 bytes of IHDR data.
const IHDR_END: usize = 29;
const PNG_MIN_LEN: usize = 51;
const LEGACY_MIN_LEN: usize = 22;
const LEGACY_BIT_COUNT: usize = 12;

/// True if `bytes` starts with the PNG signature followed by an `IHDR` chunk.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE) && bytes.get(12..16) == Some(&PNG_IHDR[..])
}

/// Bits per pixel for a PNG with the given per-channel bit depth and color type.
///
/// # Arguments
///
/// * `bit_depth`: the IHDR bit depth
/// * `color_type`: the IHDR color type
///
/// returns: `Result<u16>`
pub fn png_bit_depth(bit_depth: u8, color_type: u8) -> Result<u16> {
    let channels = match color_type {
        // grayscale, palette
        0 | 3 => 1,
        // truecolor
        2 => 3,
        // grayscale + alpha
        4 => 2,
        // truecolor + alpha
        6 => 4,
        other => return Err(Error::UnsupportedFormat(other)),
    };
    Ok(bit_depth as u16 * channels)
}

/// Reports the bit depth of an image's header bytes. A PNG stream reports the depth from its
/// `IHDR` chunk; any other buffer of at least 22 bytes reports the little-endian `u16` at offset 12.
///
/// # Arguments
///
/// * `image`: the header bytes of an image
///
/// returns: `Result<u16>`
pub fn bit_depth(image: &[u8]) -> Result<u16> {
    if image.len() >= PNG_MIN_LEN && is_png(image) {
        return png_bit_depth(image[IHDR_BIT_DEPTH], image[IHDR_COLOR_TYPE]);
    }
    if image.len() >= LEGACY_MIN_LEN {
        if let Some(bit_count) = read_u16(image, LEGACY_BIT_COUNT) {
            return Ok(bit_count);
        }
    }
    Err(Error::malformed(format!(
        "{} bytes are too few to read an image header",
        image.len()
    )))
}

/// Depth of one image inside an icon file: the `IHDR` depth for a PNG payload, the entry's bit
/// count otherwise.
pub(crate) fn image_bit_depth(entry: &IconImageEntry, payload: &[u8]) -> Result<u16> {
    if payload.len() >= IHDR_END && is_png(payload) {
        let bit_depth = read_u8(payload, IHDR_BIT_DEPTH).unwrap_or_default();
        let color_type = read_u8(payload, IHDR_COLOR_TYPE).unwrap_or_default();
        return png_bit_depth(bit_depth, color_type);
    }
    Ok(entry.prefix.bit_count())
}
