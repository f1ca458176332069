use crate::definitions::IMAGE_SECTION_HEADER;

/// An entry of the section table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub name: String,
    pub virtual_size: u32,
    pub virtual_address: u32,
    pub size_of_raw_data: u32,
    pub pointer_to_raw_data: u32,
    pub characteristics: u32,
}

impl SectionHeader {
    pub(crate) fn from_raw(raw: &IMAGE_SECTION_HEADER) -> Self {
        let len = raw.Name.iter().position(|&b| b == 0).unwrap_or(raw.Name.len());
        Self {
            name: String::from_utf8_lossy(&raw.Name[..len]).into_owned(),
            virtual_size: raw.VirtualSize,
            virtual_address: raw.VirtualAddress,
            size_of_raw_data: raw.SizeOfRawData,
            pointer_to_raw_data: raw.PointerToRawData,
            characteristics: raw.Characteristics,
        }
    }
    /// Returns true if `rva` falls inside this section once it is mapped. Linkers are allowed to
    /// leave `VirtualSize` at zero, so the raw size counts too.
    pub fn contains_rva(&self, rva: u32) -> bool {
        let extent = self.virtual_size.max(self.size_of_raw_data) as u64;
        let start = self.virtual_address as u64;
        (rva as u64) >= start && (rva as u64) < start + extent
    }
    /// Translates an RVA inside this section to a file offset.
    pub fn rva_to_foa(&self, rva: u32) -> Option<usize> {
        if !self.contains_rva(rva) {
            return None;
        }
        let delta = rva - self.virtual_address;
        if delta >= self.size_of_raw_data {
            // Zero-fill past the raw data, nothing backs it on disk.
            return None;
        }
        Some(self.pointer_to_raw_data as usize + delta as usize)
    }
}
