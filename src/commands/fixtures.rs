//! Small PE and icon files for the command tests.

use pe_icon_util::consts::{IMAGE_FILE_MACHINE_AMD64, RESOURCE_HIGH_BIT, RT_GROUP_ICON, RT_ICON};

const SECTION_RVA: u32 = 0x1000;
const SIZE_OF_HEADERS: usize = 0x200;

fn put_u16(out: &mut [u8], at: usize, value: u16) {
    out[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut [u8], at: usize, value: u32) {
    out[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// A `RT_GROUP_ICON` resource with 32 bpp entries of (width, bytes_in_res, id).
pub fn group_icon(entries: &[(u8, u32, u16)]) -> Vec<u8> {
    let mut bytes = vec![0, 0, 1, 0];
    bytes.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for &(width, size, id) in entries {
        bytes.extend_from_slice(&[width, width, 0, 0, 1, 0, 32, 0]);
        bytes.extend_from_slice(&size.to_le_bytes());
        bytes.extend_from_slice(&id.to_le_bytes());
    }
    bytes
}

/// An icon file with a 16x16 image of 2 bytes and a 32x32 image of 3 bytes.
pub fn two_image_icon() -> Vec<u8> {
    let mut data = vec![0, 0, 1, 0, 2, 0];
    data.extend_from_slice(&[16, 16, 0, 0, 1, 0, 8, 0]);
    data.extend_from_slice(&2u32.to_le_bytes());
    data.extend_from_slice(&38u32.to_le_bytes());
    data.extend_from_slice(&[32, 32, 0, 0, 1, 0, 32, 0]);
    data.extend_from_slice(&3u32.to_le_bytes());
    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&[1, 2, 3, 4, 5]);
    data
}

/// Resource tree with one type table per type and one language per resource. Every table, data
/// entry and payload is appended in the order it is first needed.
fn build_rsrc(types: &[(u32, &[(u16, Vec<u8>)])]) -> Vec<u8> {
    let mut out = vec![0u8; 16 + 8 * types.len()];
    put_u16(&mut out, 14, types.len() as u16);
    for (t, (type_id, resources)) in types.iter().enumerate() {
        let table = out.len();
        put_u32(&mut out, 16 + 8 * t, *type_id);
        put_u32(&mut out, 16 + 8 * t + 4, table as u32 | RESOURCE_HIGH_BIT);
        out.resize(table + 16 + 8 * resources.len(), 0);
        put_u16(&mut out, table + 14, resources.len() as u16);

        for (r, (id, data)) in resources.iter().enumerate() {
            let lang = out.len();
            let data_entry = lang + 24;
            let payload = data_entry + 16;
            out.resize(payload + data.len(), 0);

            put_u32(&mut out, table + 16 + 8 * r, *id as u32);
            put_u32(&mut out, table + 16 + 8 * r + 4, lang as u32 | RESOURCE_HIGH_BIT);
            put_u16(&mut out, lang + 14, 1);
            put_u32(&mut out, lang + 16, 1033);
            put_u32(&mut out, lang + 20, data_entry as u32);
            put_u32(&mut out, data_entry, SECTION_RVA + payload as u32);
            put_u32(&mut out, data_entry + 4, data.len() as u32);
            out[payload..].copy_from_slice(data);
        }
    }
    out
}

/// An on-disk PE32+ carrying the given `RT_ICON` and `RT_GROUP_ICON` resources in a `.rsrc`
/// section at RVA 0x1000. Without any resource the image has no sections at all.
pub fn pe_with_icons(icons: &[(u16, Vec<u8>)], groups: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let rsrc = if icons.is_empty() && groups.is_empty() {
        Vec::new()
    } else {
        build_rsrc(&[(RT_ICON, icons), (RT_GROUP_ICON, groups)])
    };

    let mut out = vec![0u8; SIZE_OF_HEADERS];
    out[0..2].copy_from_slice(b"MZ");
    put_u32(&mut out, 0x3C, 0x40);
    out[0x40..0x44].copy_from_slice(b"PE\0\0");

    let file_header = 0x44;
    put_u16(&mut out, file_header, IMAGE_FILE_MACHINE_AMD64);
    put_u16(&mut out, file_header + 2, u16::from(!rsrc.is_empty()));
    put_u16(&mut out, file_header + 16, 240);

    let optional = file_header + 20;
    put_u16(&mut out, optional, 0x20B);
    put_u32(&mut out, optional + 60, SIZE_OF_HEADERS as u32);
    put_u32(&mut out, optional + 108, 16);
    if rsrc.is_empty() {
        return out;
    }
    put_u32(&mut out, optional + 112 + 16, SECTION_RVA);
    put_u32(&mut out, optional + 112 + 20, rsrc.len() as u32);

    let section = optional + 240;
    out[section..section + 6].copy_from_slice(b".rsrc\0");
    put_u32(&mut out, section + 8, rsrc.len() as u32);
    put_u32(&mut out, section + 12, SECTION_RVA);
    put_u32(&mut out, section + 16, rsrc.len() as u32);
    put_u32(&mut out, section + 20, SIZE_OF_HEADERS as u32);

    out.extend_from_slice(&rsrc);
    out
}
