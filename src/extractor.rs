use crate::error::{Error, Result};
use crate::ico::{build_from_provider, IcoContainer};
use crate::provider::ResourceProvider;
use crate::resource::ResourceName;
use crate::PE;
use rayon::prelude::*;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Assemble groups on the rayon thread pool. Output order is unaffected.
    pub parallel: bool,
}

/// The outcome for one group icon. A group that fails doesn't stop the others from being extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedIcon {
    pub name: ResourceName,
    pub result: Result<IcoContainer>,
}

/// Turns every group icon of a provider into a standalone icon file.
pub struct IconExtractor<'p, P: ?Sized> {
    provider: &'p P,
    options: ExtractOptions,
}

impl<'p, P> IconExtractor<'p, P>
where
    P: ResourceProvider + Sync + ?Sized,
{
    pub fn new(provider: &'p P) -> Self {
        Self::with_options(provider, ExtractOptions::default())
    }
    pub fn with_options(provider: &'p P, options: ExtractOptions) -> Self {
        Self { provider, options }
    }
    /// Assembles a single group icon.
    pub fn extract_group(&self, name: &ResourceName) -> Result<IcoContainer> {
        build_from_provider(self.provider, name)
    }
    /// Assembles every group icon, in the order the provider lists them. Fails only if the groups
    /// can't be listed, or if there are none; per-group failures are reported in each
    /// [`ExtractedIcon`].
    ///
    /// returns: `Result<Vec<ExtractedIcon>>`
    pub fn extract_all(&self) -> Result<Vec<ExtractedIcon>> {
        let names = self.provider.group_icon_names()?;
        if names.is_empty() {
            return Err(Error::NoIconGroups);
        }
        debug!(groups = names.len(), parallel = self.options.parallel, "extracting icons");

        let extract = |name: ResourceName| {
            let result = self.extract_group(&name);
            if let Err(e) = &result {
                warn!(%name, error = %e, "skipping group icon");
            }
            ExtractedIcon { name, result }
        };

        let icons: Vec<ExtractedIcon> = if self.options.parallel {
            names.into_par_iter().map(extract).collect()
        } else {
            names.into_iter().map(extract).collect()
        };
        Ok(icons)
    }
}

/// Parses `bytes` as an on-disk PE and extracts every group icon from it.
///
/// # Arguments
///
/// * `bytes`: the contents of an `.exe` or `.dll`
/// * `options`: `ExtractOptions`
///
/// returns: `Result<Vec<ExtractedIcon>>`
pub fn extract_from_pe(bytes: &[u8], options: ExtractOptions) -> Result<Vec<ExtractedIcon>> {
    let pe = PE::from_slice(bytes)?;
    IconExtractor::with_options(&pe, options).extract_all()
}
