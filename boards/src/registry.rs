//! Game registry for the selector.
//!
//! Each ROM set self-registers via [`inventory::submit!`] with a
//! [`GameEntry`] holding its selector key, its variant and a factory
//! function. The selector discovers available games at runtime without any
//! central list.

use phosphor_ict_core::core::{Game, Probe};
use phosphor_ict_core::error::IctResult;

use crate::board::Variant;

/// A ROM set the selector can offer.
pub struct GameEntry {
    /// CLI key used to select this set (e.g., "dlair_f2").
    pub key: &'static str,
    pub variant: &'static Variant,
    /// Factory: bring the set up against the tester.
    pub create: fn(&mut dyn Probe) -> IctResult<Box<dyn Game>>,
}

impl GameEntry {
    pub const fn new(
        key: &'static str,
        variant: &'static Variant,
        create: fn(&mut dyn Probe) -> IctResult<Box<dyn Game>>,
    ) -> Self {
        Self {
            key,
            variant,
            create,
        }
    }
}

inventory::collect!(GameEntry);

/// Return all registered ROM sets, sorted by key.
pub fn all() -> Vec<&'static GameEntry> {
    let mut entries: Vec<_> = inventory::iter::<GameEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.key);
    entries
}

/// Look up a ROM set by its key.
pub fn find(key: &str) -> Option<&'static GameEntry> {
    inventory::iter::<GameEntry>
        .into_iter()
        .find(|e| e.key == key)
}
