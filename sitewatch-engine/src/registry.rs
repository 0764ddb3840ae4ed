//! Shared status registry.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use thiserror::Error;

use sitewatch_types::{EquipmentKind, Site, StatusRecord, StatusUpdate};

use crate::config::DeploymentConfig;

/// Errors from registry access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The `(site, kind)` key was never registered.
    ///
    /// The key set is fixed at construction, so hitting this is a
    /// programming-contract violation, not a runtime condition: callers
    /// query keys outside the deployment at their own peril.
    #[error("no equipment registered for ({site}, {kind})")]
    NotFound { site: Site, kind: EquipmentKind },
}

/// Process-wide mapping from `(Site, EquipmentKind)` to the current
/// [`StatusRecord`].
///
/// The registry is an explicitly owned object: construct it from a
/// [`DeploymentConfig`], share it as `Arc<StatusRegistry>` between the
/// poller and the view layer. There is no hidden singleton.
///
/// Records are registered once with placeholder values and then only
/// mutated in place by refresh cycles; nothing is ever deleted. All
/// mutation goes through [`apply`](Self::apply), which merges a partial
/// update under the write lock, so readers observe either the record from
/// before the merge or after it, never a torn mix.
#[derive(Debug, Default)]
pub struct StatusRegistry {
    records: RwLock<BTreeMap<(Site, EquipmentKind), StatusRecord>>,
}

impl StatusRegistry {
    /// Build the registry, creating a placeholder record for every
    /// registration in the config.
    pub fn new(config: &DeploymentConfig) -> Self {
        let mut records = BTreeMap::new();
        for registration in &config.registrations {
            records.insert(
                (registration.site, registration.kind),
                registration.placeholder_record(),
            );
        }

        Self {
            records: RwLock::new(records),
        }
    }

    /// Read the current record for one key.
    ///
    /// Fails with [`RegistryError::NotFound`] only for keys outside the
    /// registration set; registered keys that have never been refreshed
    /// return their placeholder.
    pub fn get(&self, site: Site, kind: EquipmentKind) -> Result<StatusRecord, RegistryError> {
        self.records
            .read()
            .get(&(site, kind))
            .cloned()
            .ok_or(RegistryError::NotFound { site, kind })
    }

    /// Merge a partial update into the record for one key.
    ///
    /// Fields the update leaves unset keep their prior value. The merge
    /// happens under the write lock as one indivisible step.
    pub fn apply(
        &self,
        site: Site,
        kind: EquipmentKind,
        update: StatusUpdate,
    ) -> Result<(), RegistryError> {
        let mut records = self.records.write();
        match records.get_mut(&(site, kind)) {
            Some(record) => {
                record.merge(update);
                Ok(())
            }
            None => Err(RegistryError::NotFound { site, kind }),
        }
    }

    /// Clone the full set of current records.
    ///
    /// This is the bulk read surface for the view layer: synchronous,
    /// side-effect free, and never triggers a refresh.
    pub fn snapshot(&self) -> BTreeMap<(Site, EquipmentKind), StatusRecord> {
        self.records.read().clone()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the registration set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
