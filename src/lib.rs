#![doc = include_str!("../README.md")]

use crate::consts::{
    IMAGE_DIRECTORY_ENTRY_RESOURCE, IMAGE_DOS_SIGNATURE, IMAGE_NT_OPTIONAL_HDR32_MAGIC,
    IMAGE_NT_OPTIONAL_HDR64_MAGIC, IMAGE_NT_SIGNATURE,
};
use crate::definitions::{FromLeBytes, IMAGE_DOS_HEADER, IMAGE_FILE_HEADER, IMAGE_SECTION_HEADER};
use crate::util::{read_u16, read_u32, slice_at};
use crate::view::PeView;
use tracing::trace;

pub mod consts;
mod definitions;
mod dos_header;
mod error;
mod extractor;
mod file_header;
pub mod ico;
mod nt_headers;
mod optional_header;
mod provider;
mod resource;
mod section;
mod util;
mod view;

pub use crate::definitions::IMAGE_DATA_DIRECTORY;
pub use crate::dos_header::DosHeader;
pub use crate::error::{Error, Result};
pub use crate::extractor::{extract_from_pe, ExtractOptions, ExtractedIcon, IconExtractor};
pub use crate::file_header::FileHeader;
pub use crate::ico::{IcoContainer, IconImageEntry};
pub use crate::nt_headers::NtHeaders;
pub use crate::optional_header::OptionalHeader;
pub use crate::provider::{MemoryResources, ResourceProvider};
pub use crate::resource::icon::{EntryPrefix, GroupIconDirectory, GroupIconEntry};
pub use crate::resource::{ResourceDirectory, ResourceName};
pub use crate::section::SectionHeader;

/// A read-only view that lets the user read a buffer in memory as a Windows PE. Supports 32-bit and
/// 64-bit PEs, either still in their on disk state or already mapped the way a loader lays them
/// out. Every read is bounds-checked against the buffer, so a truncated or hostile file produces an
/// error instead of reading past the end.
///
/// # Example
/// ```rust
/// # use pe_icon_util::PE;
/// # use pe_icon_util::consts::RT_GROUP_ICON;
/// fn example(slice: &[u8]) {
///     let pe = PE::from_slice(slice).expect("Could not validate that slice is a valid PE file.");
///     let groups = pe
///         .resource_directory()
///         .expect("Malformed resource directory")
///         .map(|resources| resources.names(RT_GROUP_ICON).unwrap_or_default())
///         .unwrap_or_default();
///
///     for group in groups {
///         let res = pe.get_pe_resource(RT_GROUP_ICON, &group).expect("Could not find PE resource");
///         println!("{group}: {}", res.len());
///     }
/// }
/// ```
#[derive(Copy, Clone)]
pub struct PE<'a> {
    view: PeView<'a>,
}

impl<'a> PE<'a> {
    /// Validates `slice` as a PE in its on disk state.
    ///
    /// # Arguments
    ///
    /// * `slice`: the bytes of the file
    ///
    /// returns: `Result<PE>`
    pub fn from_slice(slice: &'a [u8]) -> Result<Self> {
        Self::new(slice, false)
    }
    /// Validates `slice` as a PE that has already been mapped into memory, where every RVA is an
    /// offset into the slice.
    ///
    /// # Arguments
    ///
    /// * `slice`: the mapped image, starting at its base address
    ///
    /// returns: `Result<PE>`
    pub fn from_mapped_slice(slice: &'a [u8]) -> Result<Self> {
        Self::new(slice, true)
    }
    fn new(slice: &'a [u8], mapped: bool) -> Result<Self> {
        let dos_header = IMAGE_DOS_HEADER::read(slice, 0)
            .ok_or_else(|| Error::invalid_image("buffer is too small to hold an IMAGE_DOS_HEADER"))?;
        if dos_header.e_magic != IMAGE_DOS_SIGNATURE {
            return Err(Error::invalid_image(format!(
                "bad DOS signature {:#06x}",
                dos_header.e_magic
            )));
        }
        if dos_header.e_lfanew < 0 {
            return Err(Error::invalid_image("negative e_lfanew"));
        }

        let nt_offset = dos_header.e_lfanew as usize;
        let signature = read_u32(slice, nt_offset)
            .ok_or_else(|| Error::invalid_image("e_lfanew points outside of the buffer"))?;
        if signature != IMAGE_NT_SIGNATURE {
            return Err(Error::invalid_image(format!("bad NT signature {signature:#010x}")));
        }
        IMAGE_FILE_HEADER::read(slice, nt_offset + 4)
            .ok_or_else(|| Error::invalid_image("IMAGE_FILE_HEADER is truncated"))?;

        let optional_offset = nt_offset + 4 + IMAGE_FILE_HEADER::SIZE;
        let fixed_len = match read_u16(slice, optional_offset) {
            Some(IMAGE_NT_OPTIONAL_HDR32_MAGIC) => consts::DATA_DIRECTORY_OFFSET32,
            Some(IMAGE_NT_OPTIONAL_HDR64_MAGIC) => consts::DATA_DIRECTORY_OFFSET64,
            Some(magic) => {
                return Err(Error::invalid_image(format!(
                    "unknown optional header magic {magic:#06x}"
                )))
            }
            None => return Err(Error::invalid_image("IMAGE_OPTIONAL_HEADER is missing")),
        };
        slice_at(slice, optional_offset, fixed_len)
            .ok_or_else(|| Error::invalid_image("IMAGE_OPTIONAL_HEADER is truncated"))?;

        trace!(len = slice.len(), mapped, "validated PE headers");
        Ok(Self {
            view: PeView::new(slice, mapped),
        })
    }
    /// Returns the buffer the PE was read from.
    ///
    /// returns: &[u8]
    #[inline(always)]
    pub fn as_slice(&self) -> &'a [u8] {
        self.view.data()
    }
    /// Returns true if the optional header is the PE32+ variant, or false for PE32.
    ///
    /// returns: bool
    #[inline(always)]
    pub fn is_64bit(&self) -> bool {
        self.view.is_64bit()
    }
    /// Returns true if the PE is mapped into memory, or false is in it's "on disk" state.
    ///
    /// returns: bool
    #[inline(always)]
    pub fn is_mapped(&self) -> bool {
        self.view.is_mapped()
    }
    #[inline(always)]
    pub fn dos_header(&self) -> DosHeader<'a> {
        DosHeader::new(self.view)
    }
    #[inline(always)]
    pub fn nt_headers(&self) -> NtHeaders<'a> {
        NtHeaders::new(self.view)
    }
    /// Returns the section table.
    ///
    /// returns: `Result<Vec<SectionHeader>>`
    pub fn section_headers(&self) -> Result<Vec<SectionHeader>> {
        let count = self.nt_headers().file_header().number_of_sections() as usize;
        let start = self.view.section_headers_offset();
        (0..count)
            .map(|i| {
                self.view
                    .read::<IMAGE_SECTION_HEADER>(start + i * IMAGE_SECTION_HEADER::SIZE)
                    .map(|raw| SectionHeader::from_raw(&raw))
                    .ok_or_else(|| Error::invalid_image("section table is truncated"))
            })
            .collect()
    }
    /// Converts a relative virtual address to an offset into the buffer. Mapped images and
    /// addresses inside the headers translate to themselves.
    ///
    /// # Arguments
    ///
    /// * `rva`: `u32`
    ///
    /// returns: `Option<usize>`
    pub fn rva_to_foa(&self, rva: u32) -> Option<usize> {
        if self.is_mapped() {
            return Some(rva as usize);
        }
        if rva < self.nt_headers().optional_header().size_of_headers() {
            return Some(rva as usize);
        }
        self.section_headers()
            .ok()?
            .iter()
            .find(|section| section.contains_rva(rva))?
            .rva_to_foa(rva)
    }
    /// Returns the resource tree of the PE, or `None` if the image has no resource directory.
    ///
    /// returns: `Result<Option<ResourceDirectory>>`
    pub fn resource_directory(&self) -> Result<Option<ResourceDirectory<'a>>> {
        let Some(directory) = self
            .nt_headers()
            .optional_header()
            .data_directory(IMAGE_DIRECTORY_ENTRY_RESOURCE)
        else {
            return Ok(None);
        };
        let offset = self.rva_to_foa(directory.VirtualAddress).ok_or_else(|| {
            Error::malformed(format!(
                "resource directory RVA {:#x} is not backed by the file",
                directory.VirtualAddress
            ))
        })?;
        ResourceDirectory::new(*self, offset).map(Some)
    }
    /// Returns the data of the requested resource using the category id and resource name provided.
    /// Assumes that the first language in the lang table is the right entry to use.
    ///
    /// # Arguments
    ///
    /// * `category_id`: resource type, e.g. `RT_ICON`
    /// * `name`: `&ResourceName`
    ///
    /// returns: `Result<&[u8]>`
    pub fn get_pe_resource(&self, category_id: u32, name: &ResourceName) -> Result<&'a [u8]> {
        match self.resource_directory()? {
            Some(resources) => resources.data(category_id, name),
            None => Err(Error::ResourceNotFound(format!(
                "{name} (type {category_id}): image has no resource directory"
            ))),
        }
    }
}
