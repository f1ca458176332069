pub const IMAGE_DOS_SIGNATURE: u16 = 0x5A4D; // MZ
pub const IMAGE_NT_SIGNATURE: u32 = 0x0000_4550; // PE\0\0
pub const IMAGE_NT_OPTIONAL_HDR32_MAGIC: u16 = 0x10B;
pub const IMAGE_NT_OPTIONAL_HDR64_MAGIC: u16 = 0x20B;
pub const IMAGE_NUMBEROF_DIRECTORY_ENTRIES: usize = 16;
pub const IMAGE_DIRECTORY_ENTRY_RESOURCE: usize = 2;

// Offsets of the data directory array inside the optional header.
pub const DATA_DIRECTORY_OFFSET32: usize = 96;
pub const DATA_DIRECTORY_OFFSET64: usize = 112;

pub const IMAGE_FILE_MACHINE_I386: u16 = 0x014C;
pub const IMAGE_FILE_MACHINE_AMD64: u16 = 0x8664;

/// High bit of `IMAGE_RESOURCE_DIRECTORY_ENTRY` fields: named entry / subdirectory flag.
pub const RESOURCE_HIGH_BIT: u32 = 0x8000_0000;

pub const RT_ICON: u32 = 3;
pub const RT_GROUP_ICON: u32 = 14;

pub const ICON_DIR_SIZE: usize = 6;
pub const ICON_DIR_ENTRY_SIZE: usize = 16;
pub const GROUP_ICON_DIR_ENTRY_SIZE: usize = 14;
/// Offset of the only payload in a single-image icon file.
pub const SINGLE_IMAGE_OFFSET: u32 = (ICON_DIR_SIZE + ICON_DIR_ENTRY_SIZE) as u32;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub const PNG_IHDR: [u8; 4] = *b"IHDR";
