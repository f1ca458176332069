use crate::definitions::IMAGE_DOS_HEADER;
use crate::view::PeView;

/// Type that represents the `IMAGE_DOS_HEADER` portion of the PE file.
#[derive(Copy, Clone)]
pub struct DosHeader<'a> {
    view: PeView<'a>,
}

impl<'a> DosHeader<'a> {
    #[inline(always)]
    pub(crate) fn new(view: PeView<'a>) -> Self {
        Self { view }
    }
    /// Returns the decoded `IMAGE_DOS_HEADER`. `PE` validates that the header fits before any
    /// `DosHeader` is handed out.
    #[inline(always)]
    fn dos_header(&self) -> Option<IMAGE_DOS_HEADER> {
        self.view.read(0)
    }
    #[inline(always)]
    pub fn e_magic(&self) -> u16 {
        self.dos_header().map(|h| h.e_magic).unwrap_or_default()
    }
    #[inline(always)]
    pub fn e_lfanew(&self) -> i32 {
        self.dos_header().map(|h| h.e_lfanew).unwrap_or_default()
    }
}
