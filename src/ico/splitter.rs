use crate::consts::{ICON_DIR_ENTRY_SIZE, ICON_DIR_SIZE, SINGLE_IMAGE_OFFSET};
use crate::error::{Error, Result};
use crate::ico::{read_entries, IcoContainer};
use crate::util::slice_at;

/// Splits an icon file holding several images into one single-image icon file per image, in entry
/// order. Each output keeps the source's reserved and type fields and the entry's first twelve
/// bytes, with the count forced to 1 and the image offset forced to 22.
///
/// # Arguments
///
/// * `container`: the bytes of a complete icon file
///
/// returns: `Result<Vec<IcoContainer>>`
pub fn split(container: &[u8]) -> Result<Vec<IcoContainer>> {
    let entries = read_entries(container)?;
    if entries.is_empty() {
        return Err(Error::malformed("icon file declares no images"));
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let payload = slice_at(
                container,
                entry.image_offset as usize,
                entry.bytes_in_res as usize,
            )
            .ok_or_else(|| Error::malformed(format!("image {i} is truncated")))?;

            let mut data = Vec::with_capacity(SINGLE_IMAGE_OFFSET as usize + payload.len());
            data.extend_from_slice(&container[..4]);
            data.extend_from_slice(&1u16.to_le_bytes());
            data.extend_from_slice(entry.prefix.as_bytes());
            data.extend_from_slice(&entry.bytes_in_res.to_le_bytes());
            data.extend_from_slice(&SINGLE_IMAGE_OFFSET.to_le_bytes());
            debug_assert_eq!(data.len(), ICON_DIR_SIZE + ICON_DIR_ENTRY_SIZE);
            data.extend_from_slice(payload);
            Ok(IcoContainer::from_vec(data))
        })
        .collect()
}
