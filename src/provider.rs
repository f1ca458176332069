use crate::consts::{RT_GROUP_ICON, RT_ICON};
use crate::error::{Error, Result};
use crate::resource::ResourceName;
use crate::PE;
use std::collections::BTreeMap;

/// Source of the raw resources an icon is assembled from. Returned slices borrow from the provider.
pub trait ResourceProvider {
    /// Names of every `RT_GROUP_ICON` resource. The order must stay the same between calls.
    fn group_icon_names(&self) -> Result<Vec<ResourceName>>;
    /// Raw bytes of the named `RT_GROUP_ICON` resource.
    fn group_icon_bytes(&self, name: &ResourceName) -> Result<&[u8]>;
    /// Raw bytes of the `RT_ICON` resource with the given id.
    fn icon_bytes(&self, id: u16) -> Result<&[u8]>;
}

impl ResourceProvider for PE<'_> {
    fn group_icon_names(&self) -> Result<Vec<ResourceName>> {
        match self.resource_directory()? {
            Some(resources) => resources.names(RT_GROUP_ICON),
            None => Ok(Vec::new()),
        }
    }
    fn group_icon_bytes(&self, name: &ResourceName) -> Result<&[u8]> {
        self.get_pe_resource(RT_GROUP_ICON, name)
    }
    fn icon_bytes(&self, id: u16) -> Result<&[u8]> {
        self.get_pe_resource(RT_ICON, &ResourceName::from(id))
    }
}

/// Resources that are already in memory. Group icons are listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    groups: Vec<(ResourceName, Vec<u8>)>,
    icons: BTreeMap<u16, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }
    /// Adds a group icon, replacing any group with the same name in place.
    pub fn insert_group(&mut self, name: impl Into<ResourceName>, bytes: Vec<u8>) -> &mut Self {
        let name = name.into();
        match self.groups.iter_mut().find(|(existing, _)| existing.matches(&name)) {
            Some(group) => group.1 = bytes,
            None => self.groups.push((name, bytes)),
        }
        self
    }
    pub fn insert_icon(&mut self, id: u16, bytes: Vec<u8>) -> &mut Self {
        self.icons.insert(id, bytes);
        self
    }
}

impl ResourceProvider for MemoryResources {
    fn group_icon_names(&self) -> Result<Vec<ResourceName>> {
        Ok(self.groups.iter().map(|(name, _)| name.clone()).collect())
    }
    fn group_icon_bytes(&self, name: &ResourceName) -> Result<&[u8]> {
        self.groups
            .iter()
            .find(|(existing, _)| existing.matches(name))
            .map(|(_, bytes)| bytes.as_slice())
            .ok_or_else(|| Error::ResourceNotFound(format!("{name} (type {RT_GROUP_ICON})")))
    }
    fn icon_bytes(&self, id: u16) -> Result<&[u8]> {
        self.icons
            .get(&id)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::ResourceNotFound(format!("#{id} (type {RT_ICON})")))
    }
}
