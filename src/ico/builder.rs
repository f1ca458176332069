use crate::consts::{ICON_DIR_ENTRY_SIZE, ICON_DIR_SIZE};
use crate::error::{Error, Result};
use crate::ico::{IcoContainer, IconImageEntry};
use crate::provider::ResourceProvider;
use crate::resource::icon::GroupIconDirectory;
use crate::resource::ResourceName;
use tracing::debug;

/// Assembles a standalone icon file from a group icon directory and its images.
///
/// `resolve` is called once per entry, in entry order, with the entry's `RT_ICON` id. Every payload
/// must be exactly as long as the entry declares; otherwise nothing is returned.
///
/// # Arguments
///
/// * `directory`: the parsed `RT_GROUP_ICON` resource
/// * `resolve`: returns the `RT_ICON` payload for an id
///
/// returns: `Result<IcoContainer>`
pub fn build<F, B>(directory: &GroupIconDirectory, mut resolve: F) -> Result<IcoContainer>
where
    F: FnMut(u16) -> Result<B>,
    B: AsRef<[u8]>,
{
    let count = u16::try_from(directory.entries.len()).map_err(|_| {
        Error::malformed(format!(
            "{} entries do not fit in an icon header",
            directory.entries.len()
        ))
    })?;

    let payloads = directory
        .entries
        .iter()
        .map(|entry| {
            let payload = resolve(entry.id)?;
            let actual = payload.as_ref().len();
            if actual != entry.bytes_in_res as usize {
                return Err(Error::PayloadSizeMismatch {
                    id: entry.id,
                    declared: entry.bytes_in_res,
                    actual,
                });
            }
            Ok(payload)
        })
        .collect::<Result<Vec<B>>>()?;

    // Images start right after the entry table, in entry order.
    let mut offset = (ICON_DIR_SIZE + ICON_DIR_ENTRY_SIZE * count as usize) as u64;
    let mut entries = Vec::with_capacity(directory.entries.len());
    for entry in &directory.entries {
        let image_offset = u32::try_from(offset)
            .map_err(|_| Error::malformed("icon images exceed the 4 GiB offset range"))?;
        entries.push(IconImageEntry {
            prefix: entry.prefix,
            bytes_in_res: entry.bytes_in_res,
            image_offset,
        });
        offset += entry.bytes_in_res as u64;
    }

    let mut data = Vec::with_capacity(offset as usize);
    data.extend_from_slice(&directory.reserved.to_le_bytes());
    data.extend_from_slice(&directory.kind.to_le_bytes());
    data.extend_from_slice(&count.to_le_bytes());
    for entry in &entries {
        entry.write(&mut data);
    }
    for payload in &payloads {
        data.extend_from_slice(payload.as_ref());
    }
    debug_assert_eq!(data.len() as u64, offset);

    Ok(IcoContainer::from_vec(data))
}

/// Reads the group icon `name` from `provider` and assembles it with [`build`].
///
/// # Arguments
///
/// * `provider`: source of the `RT_GROUP_ICON` and `RT_ICON` resources
/// * `name`: name of the group icon
///
/// returns: `Result<IcoContainer>`
pub fn build_from_provider<P>(provider: &P, name: &ResourceName) -> Result<IcoContainer>
where
    P: ResourceProvider + ?Sized,
{
    let directory = GroupIconDirectory::parse(provider.group_icon_bytes(name)?)?;
    debug!(%name, images = directory.count(), "assembling group icon");
    build(&directory, |id| provider.icon_bytes(id))
}
