//! Walks the three level resource tree (type -> name/id -> language) of a PE.

pub mod icon;

use crate::consts::RESOURCE_HIGH_BIT;
use crate::definitions::{
    FromLeBytes, IMAGE_RESOURCE_DIRECTORY_ENTRY, RESOURCE_DATA_ENTRY, RESOURCE_DIRECTORY_TABLE,
};
use crate::error::{Error, Result};
use crate::util::{read_u16, slice_at};
use crate::PE;
use std::fmt;
use tracing::trace;

/// Identifies a resource, or a resource type, inside a resource directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceName {
    Id(u32),
    Name(String),
}

impl ResourceName {
    /// Ids compare exactly. Names compare ignoring ASCII case, since the resource compiler
    /// upper-cases them.
    pub fn matches(&self, other: &ResourceName) -> bool {
        match (self, other) {
            (ResourceName::Id(a), ResourceName::Id(b)) => a == b,
            (ResourceName::Name(a), ResourceName::Name(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceName::Id(id) => write!(f, "#{id}"),
            ResourceName::Name(name) => f.write_str(name),
        }
    }
}

impl From<u16> for ResourceName {
    fn from(id: u16) -> Self {
        ResourceName::Id(id as u32)
    }
}

impl From<&str> for ResourceName {
    fn from(name: &str) -> Self {
        ResourceName::Name(name.to_owned())
    }
}

#[derive(Debug, Clone)]
struct DirectoryEntry {
    name: ResourceName,
    offset: u32,
    is_directory: bool,
}

/// The root of a PE's resource tree. Offsets inside the tree are relative to the root table; data
/// entries hold RVAs that are translated through the owning `PE`.
#[derive(Copy, Clone)]
pub struct ResourceDirectory<'a> {
    pe: PE<'a>,
    base: usize,
}

impl<'a> ResourceDirectory<'a> {
    pub(crate) fn new(pe: PE<'a>, base: usize) -> Result<Self> {
        if base >= pe.as_slice().len() {
            return Err(Error::malformed(format!(
                "resource directory offset {base:#x} is outside of the file"
            )));
        }
        Ok(Self { pe, base })
    }
    #[inline(always)]
    fn tree(&self) -> &'a [u8] {
        &self.pe.as_slice()[self.base..]
    }
    /// Lists the entries of the table at `offset`. Named entries come first, like on disk.
    fn table(&self, offset: u32) -> Result<Vec<DirectoryEntry>> {
        let offset = offset as usize;
        let table = RESOURCE_DIRECTORY_TABLE::read(self.tree(), offset).ok_or_else(|| {
            Error::malformed(format!("resource table at {offset:#x} is truncated"))
        })?;
        let count = table.NumberOfNameEntries as usize + table.NumberOfIDEntries as usize;
        let entries_start = offset + RESOURCE_DIRECTORY_TABLE::SIZE;
        slice_at(
            self.tree(),
            entries_start,
            count * IMAGE_RESOURCE_DIRECTORY_ENTRY::SIZE,
        )
        .ok_or_else(|| {
            Error::malformed(format!(
                "resource table at {offset:#x} declares {count} entries past the end of the file"
            ))
        })?;

        (0..count)
            .map(|i| {
                let raw = IMAGE_RESOURCE_DIRECTORY_ENTRY::read(
                    self.tree(),
                    entries_start + i * IMAGE_RESOURCE_DIRECTORY_ENTRY::SIZE,
                )
                .ok_or_else(|| Error::malformed("resource directory entry is truncated"))?;
                let name = if raw.Id & RESOURCE_HIGH_BIT != 0 {
                    ResourceName::Name(self.read_name(raw.Id & !RESOURCE_HIGH_BIT)?)
                } else {
                    ResourceName::Id(raw.Id)
                };
                Ok(DirectoryEntry {
                    name,
                    offset: raw.OffsetToData & !RESOURCE_HIGH_BIT,
                    is_directory: raw.OffsetToData & RESOURCE_HIGH_BIT != 0,
                })
            })
            .collect()
    }
    /// Reads an `IMAGE_RESOURCE_DIR_STRING_U`: a `u16` length followed by that many UTF-16 units.
    fn read_name(&self, offset: u32) -> Result<String> {
        let offset = offset as usize;
        let len = read_u16(self.tree(), offset)
            .ok_or_else(|| Error::malformed(format!("resource name at {offset:#x} is truncated")))?
            as usize;
        let bytes = slice_at(self.tree(), offset + 2, len * 2)
            .ok_or_else(|| Error::malformed(format!("resource name at {offset:#x} is truncated")))?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
            .collect();
        Ok(String::from_utf16_lossy(&units))
    }
    /// Finds the subdirectory for `name` in the table at `offset`.
    fn find_directory(&self, offset: u32, name: &ResourceName) -> Result<Option<u32>> {
        let Some(entry) = self
            .table(offset)?
            .into_iter()
            .find(|entry| entry.name.matches(name))
        else {
            return Ok(None);
        };
        if !entry.is_directory {
            return Err(Error::malformed(format!(
                "resource entry {name} should be a directory"
            )));
        }
        Ok(Some(entry.offset))
    }
    /// Returns the resource types present in the image.
    ///
    /// returns: `Result<Vec<ResourceName>>`
    pub fn types(&self) -> Result<Vec<ResourceName>> {
        Ok(self.table(0)?.into_iter().map(|entry| entry.name).collect())
    }
    /// Returns the name of every resource of the given type, in table order. An image without any
    /// resource of that type returns an empty list.
    ///
    /// # Arguments
    ///
    /// * `category_id`: resource type, e.g. `RT_GROUP_ICON`
    ///
    /// returns: `Result<Vec<ResourceName>>`
    pub fn names(&self, category_id: u32) -> Result<Vec<ResourceName>> {
        let Some(offset) = self.find_directory(0, &ResourceName::Id(category_id))? else {
            return Ok(Vec::new());
        };
        Ok(self.table(offset)?.into_iter().map(|entry| entry.name).collect())
    }
    /// Returns the bytes of a resource. Assumes that the first language in the lang table is the
    /// right entry to use.
    ///
    /// # Arguments
    ///
    /// * `category_id`: resource type, e.g. `RT_ICON`
    /// * `name`: `&ResourceName`
    ///
    /// returns: `Result<&[u8]>`
    pub fn data(&self, category_id: u32, name: &ResourceName) -> Result<&'a [u8]> {
        let not_found = || Error::ResourceNotFound(format!("{name} (type {category_id})"));

        //level 1: Resource type directory
        let offset = self
            .find_directory(0, &ResourceName::Id(category_id))?
            .ok_or_else(not_found)?;

        //level 2: Resource Name/ID subdirectory
        let offset = self.find_directory(offset, name)?.ok_or_else(not_found)?;

        //level 3: language subdirectory - just use the first entry.
        let language = self
            .table(offset)?
            .into_iter()
            .next()
            .ok_or_else(not_found)?;
        if language.is_directory {
            return Err(Error::malformed(format!(
                "language entry of {name} points to a directory"
            )));
        }

        let entry = RESOURCE_DATA_ENTRY::read(self.tree(), language.offset as usize)
            .ok_or_else(|| Error::malformed(format!("data entry of {name} is truncated")))?;
        let start = self.pe.rva_to_foa(entry.DataRVA).ok_or_else(|| {
            Error::malformed(format!(
                "data of {name} at RVA {:#x} is not backed by the file",
                entry.DataRVA
            ))
        })?;
        trace!(%name, category_id, start, size = entry.DataSize, "resolved resource");
        slice_at(self.pe.as_slice(), start, entry.DataSize as usize).ok_or_else(|| {
            Error::malformed(format!(
                "data of {name} ({} bytes at {start:#x}) runs past the end of the file",
                entry.DataSize
            ))
        })
    }
}
