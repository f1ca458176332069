use crate::consts::{
    DATA_DIRECTORY_OFFSET32, DATA_DIRECTORY_OFFSET64, IMAGE_NUMBEROF_DIRECTORY_ENTRIES,
};
use crate::definitions::{FromLeBytes, IMAGE_DATA_DIRECTORY};
use crate::util::{read_u16, read_u32};
use crate::view::PeView;

/// Type that represents the `IMAGE_OPTIONAL_HEADER` portion of the PE file. Handles both the PE32
/// and the PE32+ layout.
#[derive(Copy, Clone)]
pub struct OptionalHeader<'a> {
    view: PeView<'a>,
}

impl<'a> OptionalHeader<'a> {
    #[inline(always)]
    pub(crate) fn new(view: PeView<'a>) -> Self {
        Self { view }
    }
    #[inline(always)]
    fn read_u16(&self, offset: usize) -> u16 {
        read_u16(self.view.data(), self.view.optional_header_offset() + offset).unwrap_or_default()
    }
    #[inline(always)]
    fn read_u32(&self, offset: usize) -> u32 {
        read_u32(self.view.data(), self.view.optional_header_offset() + offset).unwrap_or_default()
    }
    #[inline(always)]
    pub fn magic(&self) -> u16 {
        self.read_u16(0)
    }
    #[inline(always)]
    pub fn address_of_entry_point(&self) -> u32 {
        self.read_u32(16)
    }
    // Same offset in both layouts. `ImageBase` and `BaseOfData` only differ in how they split the
    // 8 bytes at offset 24.
    #[inline(always)]
    pub fn section_alignment(&self) -> u32 {
        self.read_u32(32)
    }
    #[inline(always)]
    pub fn file_alignment(&self) -> u32 {
        self.read_u32(36)
    }
    #[inline(always)]
    pub fn size_of_image(&self) -> u32 {
        self.read_u32(56)
    }
    #[inline(always)]
    pub fn size_of_headers(&self) -> u32 {
        self.read_u32(60)
    }
    #[inline(always)]
    pub fn number_of_rva_and_sizes(&self) -> u32 {
        if self.view.is_64bit() {
            self.read_u32(DATA_DIRECTORY_OFFSET64 - 4)
        } else {
            self.read_u32(DATA_DIRECTORY_OFFSET32 - 4)
        }
    }
    /// Returns the data directory at `index`, or `None` if the header doesn't carry that many
    /// directories or the entry is empty.
    ///
    /// # Arguments
    ///
    /// * `index`: one of the `IMAGE_DIRECTORY_ENTRY_*` constants
    ///
    /// returns: `Option<IMAGE_DATA_DIRECTORY>`
    ///
    /// # Example
    /// ```rust
    /// # use pe_icon_util::consts::IMAGE_DIRECTORY_ENTRY_RESOURCE;
    /// # use pe_icon_util::{IMAGE_DATA_DIRECTORY, PE};
    /// fn resource_range(pe: &PE) -> Option<(u32, u32)> {
    ///     let directory: IMAGE_DATA_DIRECTORY = pe
    ///         .nt_headers()
    ///         .optional_header()
    ///         .data_directory(IMAGE_DIRECTORY_ENTRY_RESOURCE)?;
    ///     Some((directory.VirtualAddress, directory.Size))
    /// }
    /// ```
    pub fn data_directory(&self, index: usize) -> Option<IMAGE_DATA_DIRECTORY> {
        let count = (self.number_of_rva_and_sizes() as usize).min(IMAGE_NUMBEROF_DIRECTORY_ENTRIES);
        if index >= count {
            return None;
        }
        let start = if self.view.is_64bit() {
            DATA_DIRECTORY_OFFSET64
        } else {
            DATA_DIRECTORY_OFFSET32
        };
        let offset =
            self.view.optional_header_offset() + start + index * IMAGE_DATA_DIRECTORY::SIZE;
        self.view
            .read::<IMAGE_DATA_DIRECTORY>(offset)
            .filter(|directory| directory.VirtualAddress != 0)
    }
    #[inline(always)]
    pub fn size_of(&self) -> usize {
        if self.view.is_64bit() {
            DATA_DIRECTORY_OFFSET64
                + IMAGE_NUMBEROF_DIRECTORY_ENTRIES * IMAGE_DATA_DIRECTORY::SIZE
        } else {
            DATA_DIRECTORY_OFFSET32
                + IMAGE_NUMBEROF_DIRECTORY_ENTRIES * IMAGE_DATA_DIRECTORY::SIZE
        }
    }
}
