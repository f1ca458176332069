//! Little-endian readers over byte slices. Every read is bounds-checked and returns `None`
//! when the requested range falls outside the slice.

#[inline(always)]
pub(crate) fn read_u8(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}
#[inline(always)]
pub(crate) fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}
#[inline(always)]
pub(crate) fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
/// Returns `len` bytes starting at `offset`.
#[inline(always)]
pub(crate) fn slice_at(data: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    data.get(offset..offset.checked_add(len)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        assert_eq!(read_u8(&data, 4), Some(0x05));
        assert_eq!(read_u16(&data, 0), Some(0x0201));
        assert_eq!(read_u32(&data, 1), Some(0x0504_0302));
    }

    #[test]
    fn out_of_range_reads_are_none() {
        let data = [0u8; 4];
        assert_eq!(read_u8(&data, 4), None);
        assert_eq!(read_u16(&data, 3), None);
        assert_eq!(read_u32(&data, 1), None);
        assert_eq!(read_u32(&data, usize::MAX), None);
        assert_eq!(slice_at(&data, 2, 3), None);
        assert_eq!(slice_at(&data, 2, 2), Some(&data[2..4]));
    }
}
