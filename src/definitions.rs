#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(dead_code)]

//! Raw on-disk PE structures. Only the fields this crate reads are kept; `SIZE` is always the
//! full size of the structure so table strides stay correct.

use crate::util::{read_u16, read_u32, slice_at};

/// A structure that can be decoded from its little-endian on-disk representation.
pub(crate) trait FromLeBytes: Sized {
    const SIZE: usize;
    /// Decodes the structure from `bytes`, which is exactly `SIZE` bytes long.
    fn decode(bytes: &[u8]) -> Option<Self>;
    /// Reads the structure at `offset`, or `None` if it doesn't fit in `data`.
    fn read(data: &[u8], offset: usize) -> Option<Self> {
        Self::decode(slice_at(data, offset, Self::SIZE)?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IMAGE_DOS_HEADER {
    pub e_magic: u16,
    pub e_lfanew: i32,
}
impl FromLeBytes for IMAGE_DOS_HEADER {
    const SIZE: usize = 0x40;
    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            e_magic: read_u16(bytes, 0)?,
            e_lfanew: read_u32(bytes, 0x3C)? as i32,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IMAGE_FILE_HEADER {
    pub Machine: u16,
    pub NumberOfSections: u16,
    pub TimeDateStamp: u32,
    pub PointerToSymbolTable: u32,
    pub NumberOfSymbols: u32,
    pub SizeOfOptionalHeader: u16,
    pub Characteristics: u16,
}
impl FromLeBytes for IMAGE_FILE_HEADER {
    const SIZE: usize = 20;
    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            Machine: read_u16(bytes, 0)?,
            NumberOfSections: read_u16(bytes, 2)?,
            TimeDateStamp: read_u32(bytes, 4)?,
            PointerToSymbolTable: read_u32(bytes, 8)?,
            NumberOfSymbols: read_u32(bytes, 12)?,
            SizeOfOptionalHeader: read_u16(bytes, 16)?,
            Characteristics: read_u16(bytes, 18)?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IMAGE_DATA_DIRECTORY {
    pub VirtualAddress: u32,
    pub Size: u32,
}
impl FromLeBytes for IMAGE_DATA_DIRECTORY {
    const SIZE: usize = 8;
    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            VirtualAddress: read_u32(bytes, 0)?,
            Size: read_u32(bytes, 4)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IMAGE_SECTION_HEADER {
    pub Name: [u8; 8],
    // Misc.VirtualSize
    pub VirtualSize: u32,
    pub VirtualAddress: u32,
    pub SizeOfRawData: u32,
    pub PointerToRawData: u32,
    pub Characteristics: u32,
}
impl FromLeBytes for IMAGE_SECTION_HEADER {
    const SIZE: usize = 40;
    fn decode(bytes: &[u8]) -> Option<Self> {
        let mut Name = [0u8; 8];
        Name.copy_from_slice(slice_at(bytes, 0, 8)?);
        Some(Self {
            Name,
            VirtualSize: read_u32(bytes, 8)?,
            VirtualAddress: read_u32(bytes, 12)?,
            SizeOfRawData: read_u32(bytes, 16)?,
            PointerToRawData: read_u32(bytes, 20)?,
            Characteristics: read_u32(bytes, 36)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RESOURCE_DIRECTORY_TABLE {
    pub Characteristics: u32,
    pub TimeDateStamp: u32,
    pub MajorVersion: u16,
    pub MinorVersion: u16,
    pub NumberOfNameEntries: u16,
    pub NumberOfIDEntries: u16,
}
impl FromLeBytes for RESOURCE_DIRECTORY_TABLE {
    const SIZE: usize = 16;
    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            Characteristics: read_u32(bytes, 0)?,
            TimeDateStamp: read_u32(bytes, 4)?,
            MajorVersion: read_u16(bytes, 8)?,
            MinorVersion: read_u16(bytes, 10)?,
            NumberOfNameEntries: read_u16(bytes, 12)?,
            NumberOfIDEntries: read_u16(bytes, 14)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IMAGE_RESOURCE_DIRECTORY_ENTRY {
    // Name offset when the high bit is set, otherwise an integer id.
    pub Id: u32,
    // Subdirectory offset when the high bit is set, otherwise a `RESOURCE_DATA_ENTRY` offset.
    pub OffsetToData: u32,
}
impl FromLeBytes for IMAGE_RESOURCE_DIRECTORY_ENTRY {
    const SIZE: usize = 8;
    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            Id: read_u32(bytes, 0)?,
            OffsetToData: read_u32(bytes, 4)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RESOURCE_DATA_ENTRY {
    pub DataRVA: u32,
    pub DataSize: u32,
    pub CodePage: u32,
    pub Reserved: u32,
}
impl FromLeBytes for RESOURCE_DATA_ENTRY {
    const SIZE: usize = 16;
    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            DataRVA: read_u32(bytes, 0)?,
            DataSize: read_u32(bytes, 4)?,
            CodePage: read_u32(bytes, 8)?,
            Reserved: read_u32(bytes, 12)?,
        })
    }
}
