use crate::definitions::{FromLeBytes, IMAGE_FILE_HEADER};
use crate::view::PeView;

/// Type that represents the `IMAGE_FILE_HEADER` portion of the PE file
#[derive(Copy, Clone)]
pub struct FileHeader<'a> {
    view: PeView<'a>,
}

impl<'a> FileHeader<'a> {
    #[inline(always)]
    pub(crate) fn new(view: PeView<'a>) -> Self {
        Self { view }
    }
    #[inline(always)]
    fn file_header(&self) -> Option<IMAGE_FILE_HEADER> {
        self.view.read(self.view.file_header_offset())
    }
    #[inline(always)]
    pub fn machine(&self) -> u16 {
        self.file_header().map(|h| h.Machine).unwrap_or_default()
    }
    #[inline(always)]
    pub fn number_of_sections(&self) -> u16 {
        self.file_header().map(|h| h.NumberOfSections).unwrap_or_default()
    }
    #[inline(always)]
    pub fn time_date_stamp(&self) -> u32 {
        self.file_header().map(|h| h.TimeDateStamp).unwrap_or_default()
    }
    #[inline(always)]
    pub fn pointer_to_symbol_table(&self) -> u32 {
        self.file_header().map(|h| h.PointerToSymbolTable).unwrap_or_default()
    }
    #[inline(always)]
    pub fn number_of_symbols(&self) -> u32 {
        self.file_header().map(|h| h.NumberOfSymbols).unwrap_or_default()
    }
    #[inline(always)]
    pub fn size_of_optional_header(&self) -> u16 {
        self.file_header().map(|h| h.SizeOfOptionalHeader).unwrap_or_default()
    }
    #[inline(always)]
    pub fn characteristics(&self) -> u16 {
        self.file_header().map(|h| h.Characteristics).unwrap_or_default()
    }

    #[inline(always)]
    pub fn size_of(&self) -> usize {
        IMAGE_FILE_HEADER::SIZE
    }
}
