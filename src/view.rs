use crate::consts::IMAGE_NT_OPTIONAL_HDR64_MAGIC;
use crate::definitions::{FromLeBytes, IMAGE_DOS_HEADER, IMAGE_FILE_HEADER};
use crate::util::read_u16;

/// The buffer that holds a PE plus the layout it is in. Every header type in this crate wraps
/// one of these, so they are all the size of a fat pointer and a flag, and all `Copy`.
#[derive(Copy, Clone)]
pub(crate) struct PeView<'a> {
    data: &'a [u8],
    mapped: bool,
}

impl<'a> PeView<'a> {
    #[inline(always)]
    pub(crate) fn new(data: &'a [u8], mapped: bool) -> Self {
        Self { data, mapped }
    }
    /// Returns the whole buffer the PE lives in.
    ///
    /// returns: &[u8]
    #[inline(always)]
    pub(crate) fn data(&self) -> &'a [u8] {
        self.data
    }
    /// Returns true if the PE is laid out as a loader maps it, or false if it is in it's "on disk" state.
    ///
    /// returns: bool
    #[inline(always)]
    pub(crate) fn is_mapped(&self) -> bool {
        self.mapped
    }
    /// Returns true if the optional header is the PE32+ variant.
    ///
    /// returns: bool
    #[inline(always)]
    pub(crate) fn is_64bit(&self) -> bool {
        read_u16(self.data, self.optional_header_offset()) == Some(IMAGE_NT_OPTIONAL_HDR64_MAGIC)
    }
    #[inline(always)]
    pub(crate) fn read<T: FromLeBytes>(&self, offset: usize) -> Option<T> {
        T::read(self.data, offset)
    }
    /// Returns the offset of `IMAGE_NT_HEADERS` in the buffer.
    ///
    /// returns: usize
    #[inline(always)]
    pub(crate) fn nt_headers_offset(&self) -> usize {
        self.read::<IMAGE_DOS_HEADER>(0)
            .map(|dos_header| dos_header.e_lfanew as usize)
            .unwrap_or_default()
    }
    /// Returns the offset of `IMAGE_FILE_HEADER` in the buffer.
    ///
    /// returns: usize
    #[inline(always)]
    pub(crate) fn file_header_offset(&self) -> usize {
        self.nt_headers_offset() + 4
    }
    /// Returns the offset of `IMAGE_OPTIONAL_HEADER` in the buffer.
    ///
    /// returns: usize
    #[inline(always)]
    pub(crate) fn optional_header_offset(&self) -> usize {
        self.file_header_offset() + IMAGE_FILE_HEADER::SIZE
    }
    /// Returns the offset of the first `IMAGE_SECTION_HEADER`.
    ///
    /// returns: usize
    pub(crate) fn section_headers_offset(&self) -> usize {
        let size_of_optional_header = self
            .read::<IMAGE_FILE_HEADER>(self.file_header_offset())
            .map(|file_header| file_header.SizeOfOptionalHeader as usize)
            .unwrap_or_default();
        self.optional_header_offset() + size_of_optional_header
    }
}
