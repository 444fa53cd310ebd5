//! The fixed school-registry source list.
//!
//! One spreadsheet per province plus one for Special Needs Education Centres.
//! The list is plain data handed to the batch loader at call time, not
//! process-wide state; callers with a different layout can build their own
//! [`SourceFile`] list directly.

use std::path::Path;

use crate::ingestion::SourceFile;

/// Registry file names, one per province plus the specialized category.
pub const PROVINCE_FILES: [&str; 10] = [
    "Eastern Cape.xlsx",
    "Free State.xlsx",
    "Gauteng.xlsx",
    "KwaZulu Natal.xlsx",
    "Limpopo.xlsx",
    "Mpumalanga.xlsx",
    "Northern Cape.xlsx",
    "North West.xlsx",
    "Western Cape.xlsx",
    "Special Needs Education Centres.xlsx",
];

/// Build the ordered source list for the standard registry layout, with every
/// file under `base_dir`.
pub fn registry_sources(base_dir: impl AsRef<Path>) -> Vec<SourceFile> {
    let base_dir = base_dir.as_ref();
    PROVINCE_FILES
        .iter()
        .map(|name| SourceFile::new(base_dir.join(name)))
        .collect()
}
