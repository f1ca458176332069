//! `RT_GROUP_ICON` resources: a `GRPICONDIR` header followed by `GRPICONDIRENTRY` records that
//! reference each image by its `RT_ICON` id.

use crate::consts::{GROUP_ICON_DIR_ENTRY_SIZE, ICON_DIR_SIZE};
use crate::error::{Error, Result};
use crate::util::{read_u16, read_u32, slice_at};
use tracing::warn;

/// The eight bytes shared by `GRPICONDIRENTRY` and `ICONDIRENTRY`: width, height, color count,
/// reserved, planes and bit count. Kept as raw bytes so they are copied through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryPrefix(pub [u8; 8]);

impl EntryPrefix {
    /// Width in pixels. Zero on disk means 256.
    pub fn width(&self) -> u32 {
        dimension(self.0[0])
    }
    /// Height in pixels. Zero on disk means 256.
    pub fn height(&self) -> u32 {
        dimension(self.0[1])
    }
    pub fn color_count(&self) -> u8 {
        self.0[2]
    }
    pub fn planes(&self) -> u16 {
        u16::from_le_bytes([self.0[4], self.0[5]])
    }
    pub fn bit_count(&self) -> u16 {
        u16::from_le_bytes([self.0[6], self.0[7]])
    }
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
    pub(crate) fn read(data: &[u8], offset: usize) -> Option<Self> {
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(slice_at(data, offset, 8)?);
        Some(Self(prefix))
    }
}

fn dimension(raw: u8) -> u32 {
    if raw == 0 {
        256
    } else {
        raw as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupIconEntry {
    pub prefix: EntryPrefix,
    pub bytes_in_res: u32,
    pub id: u16,
}

/// A parsed `RT_GROUP_ICON` resource. Entry order is the image order of the assembled icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupIconDirectory {
    pub reserved: u16,
    pub kind: u16,
    pub entries: Vec<GroupIconEntry>,
}

impl GroupIconDirectory {
    /// Parses a group icon resource. Only the directory is read; the images it references are
    /// fetched separately.
    ///
    /// # Arguments
    ///
    /// * `bytes`: the raw `RT_GROUP_ICON` resource
    ///
    /// returns: `Result<GroupIconDirectory>`
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < ICON_DIR_SIZE {
            return Err(Error::malformed(format!(
                "group icon directory is {} bytes, the header alone needs {ICON_DIR_SIZE}",
                bytes.len()
            )));
        }
        let reserved = read_u16(bytes, 0).unwrap_or_default();
        let kind = read_u16(bytes, 2).unwrap_or_default();
        let count = read_u16(bytes, 4).unwrap_or_default() as usize;

        let needed = ICON_DIR_SIZE + GROUP_ICON_DIR_ENTRY_SIZE * count;
        if bytes.len() < needed {
            return Err(Error::malformed(format!(
                "group icon directory declares {count} entries ({needed} bytes) but is only {} bytes",
                bytes.len()
            )));
        }
        if kind != 1 {
            warn!(kind, "group icon directory has an unexpected resource type");
        }

        let entries = (0..count)
            .map(|i| {
                let offset = ICON_DIR_SIZE + GROUP_ICON_DIR_ENTRY_SIZE * i;
                Some(GroupIconEntry {
                    prefix: EntryPrefix::read(bytes, offset)?,
                    bytes_in_res: read_u32(bytes, offset + 8)?,
                    id: read_u16(bytes, offset + 12)?,
                })
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::malformed("group icon entry is truncated"))?;

        Ok(Self {
            reserved,
            kind,
            entries,
        })
    }
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
