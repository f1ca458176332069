use crate::definitions::{FromLeBytes, IMAGE_FILE_HEADER};
use crate::file_header::FileHeader;
use crate::optional_header::OptionalHeader;
use crate::util::read_u32;
use crate::view::PeView;

/// Type that represents the `IMAGE_NT_HEADERS` portion of the PE file
#[derive(Copy, Clone)]
pub struct NtHeaders<'a> {
    view: PeView<'a>,
}

impl<'a> NtHeaders<'a> {
    #[inline(always)]
    pub(crate) fn new(view: PeView<'a>) -> Self {
        Self { view }
    }
    #[inline(always)]
    pub fn signature(&self) -> u32 {
        read_u32(self.view.data(), self.view.nt_headers_offset()).unwrap_or_default()
    }
    #[inline(always)]
    pub fn file_header(&self) -> FileHeader<'a> {
        FileHeader::new(self.view)
    }
    /// Returns the `OptionalHeader` structure, which allows you to inspect the PEs `IMAGE_OPTIONAL_HEADER`
    /// structure.
    #[inline(always)]
    pub fn optional_header(&self) -> OptionalHeader<'a> {
        OptionalHeader::new(self.view)
    }
    #[inline(always)]
    pub fn size_of(&self) -> usize {
        4 + IMAGE_FILE_HEADER::SIZE + self.optional_header().size_of()
    }
}
