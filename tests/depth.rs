use pe_icon_util::ico::{bit_depth, png_bit_depth};
use pe_icon_util::Error;

fn png_header(bit_depth: u8, color_type: u8) -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&[0, 0, 0, 13]);
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&[0, 0, 0, 32, 0, 0, 0, 32]);
    data.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);
    data.resize(64, 0);
    data
}

#[test]
fn truecolor_png() {
    assert_eq!(bit_depth(&png_header(8, 2)), Ok(24));
}

#[test]
fn truecolor_alpha_png() {
    assert_eq!(bit_depth(&png_header(8, 6)), Ok(32));
}

#[test]
fn grayscale_png() {
    assert_eq!(bit_depth(&png_header(1, 0)), Ok(1));
}

#[test]
fn png_color_type_table() {
    assert_eq!(png_bit_depth(4, 3), Ok(4));
    assert_eq!(png_bit_depth(8, 4), Ok(16));
    assert_eq!(png_bit_depth(16, 6), Ok(64));
    assert_eq!(png_bit_depth(8, 7), Err(Error::UnsupportedFormat(7)));
}

#[test]
fn legacy_header() {
    let mut data = vec![0u8; 22];
    data[12] = 0x20;
    data[13] = 0x00;
    assert_eq!(bit_depth(&data), Ok(32));
}

#[test]
fn too_short() {
    assert!(matches!(
        bit_depth(&[0u8; 10]),
        Err(Error::MalformedResource(_))
    ));
    assert!(matches!(bit_depth(&[]), Err(Error::MalformedResource(_))));
}
