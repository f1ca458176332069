//! The standalone icon file format: an `ICONDIR` header, `ICONDIRENTRY` records and the image
//! payloads laid out back to back after the last record.

mod builder;
mod depth;
mod splitter;

pub use builder::{build, build_from_provider};
pub use depth::{bit_depth, is_png, png_bit_depth};
pub use splitter::split;

use crate::consts::{ICON_DIR_ENTRY_SIZE, ICON_DIR_SIZE};
use crate::error::{Error, Result};
use crate::resource::icon::EntryPrefix;
use crate::util::{read_u16, read_u32, slice_at};
use tracing::warn;

/// An `ICONDIRENTRY`: the group entry's prefix and size, with the resource id replaced by the offset
/// of the payload in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconImageEntry {
    pub prefix: EntryPrefix,
    pub bytes_in_res: u32,
    pub image_offset: u32,
}

impl IconImageEntry {
    pub(crate) fn read(data: &[u8], offset: usize) -> Option<Self> {
        Some(Self {
            prefix: EntryPrefix::read(data, offset)?,
            bytes_in_res: read_u32(data, offset + 8)?,
            image_offset: read_u32(data, offset + 12)?,
        })
    }
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.prefix.as_bytes());
        out.extend_from_slice(&self.bytes_in_res.to_le_bytes());
        out.extend_from_slice(&self.image_offset.to_le_bytes());
    }
}

/// Reads the entry table of an icon file and checks that every payload lies inside `data`.
pub(crate) fn read_entries(data: &[u8]) -> Result<Vec<IconImageEntry>> {
    let count = read_u16(data, 4).ok_or_else(|| {
        Error::malformed(format!(
            "icon file is {} bytes, the header alone needs {ICON_DIR_SIZE}",
            data.len()
        ))
    })? as usize;
    let table_end = ICON_DIR_SIZE + ICON_DIR_ENTRY_SIZE * count;
    if data.len() < table_end {
        return Err(Error::malformed(format!(
            "icon file declares {count} entries ({table_end} bytes) but is only {} bytes",
            data.len()
        )));
    }

    (0..count)
        .map(|i| {
            let entry = IconImageEntry::read(data, ICON_DIR_SIZE + ICON_DIR_ENTRY_SIZE * i)
                .ok_or_else(|| Error::malformed("icon entry is truncated"))?;
            slice_at(data, entry.image_offset as usize, entry.bytes_in_res as usize).ok_or_else(
                || {
                    Error::malformed(format!(
                        "image {i} ({} bytes at {}) runs past the end of the {} byte file",
                        entry.bytes_in_res,
                        entry.image_offset,
                        data.len()
                    ))
                },
            )?;
            Ok(entry)
        })
        .collect()
}

/// A complete icon file held in memory. Built by [`build`], produced by [`split`], or read from
/// disk with [`IcoContainer::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcoContainer {
    data: Vec<u8>,
}

impl IcoContainer {
    pub(crate) fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }
    /// Validates `data` as an icon file: header, entry table and every payload range.
    ///
    /// # Arguments
    ///
    /// * `data`: the bytes of an `.ico` file
    ///
    /// returns: `Result<IcoContainer>`
    pub fn parse(data: Vec<u8>) -> Result<Self> {
        read_entries(&data)?;
        let kind = read_u16(&data, 2).unwrap_or_default();
        if kind != 1 {
            warn!(kind, "icon file has an unexpected image type");
        }
        Ok(Self { data })
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
    /// Size of the whole file in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }
    /// True if the file holds no images.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
    /// Number of images, as declared by the header.
    pub fn count(&self) -> u16 {
        read_u16(&self.data, 4).unwrap_or_default()
    }
    pub fn entries(&self) -> Result<Vec<IconImageEntry>> {
        read_entries(&self.data)
    }
    /// Returns the payload of the image at `index`.
    pub fn image(&self, index: usize) -> Result<&[u8]> {
        let entries = self.entries()?;
        let entry = entries.get(index).ok_or_else(|| {
            Error::malformed(format!(
                "image {index} requested from a file with {} images",
                entries.len()
            ))
        })?;
        slice_at(
            &self.data,
            entry.image_offset as usize,
            entry.bytes_in_res as usize,
        )
        .ok_or_else(|| Error::malformed(format!("image {index} is truncated")))
    }
    /// Splits the file into one single-image file per entry.
    pub fn split(&self) -> Result<Vec<IcoContainer>> {
        split(&self.data)
    }
    /// Bit depth of the first image. PNG payloads report the depth from their `IHDR` chunk,
    /// everything else reports the entry's bit count.
    pub fn bit_depth(&self) -> Result<u16> {
        let entry = self
            .entries()?
            .into_iter()
            .next()
            .ok_or_else(|| Error::malformed("icon file holds no images"))?;
        depth::image_bit_depth(&entry, self.image(0)?)
    }
}

impl AsRef<[u8]> for IcoContainer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<IcoContainer> for Vec<u8> {
    fn from(container: IcoContainer) -> Self {
        container.data
    }
}
