use std::collections::BTreeMap;

use crate::types::{Asset, MappingMethod};

/// Fallback keys for assets missing the mapping field. The bank's head
/// office region is used where nothing better is known.
pub const DEFAULT_LOCATION: &str = "Accra";
pub const DEFAULT_REGION: &str = "Greater Accra";
pub const DEFAULT_SECTOR: &str = "General";

/// Partition assets into named groups by mapping method.
///
/// Grouping is total: assets with a missing (or empty) mapping field fall
/// into a default group rather than being dropped. An empty asset list
/// yields an empty map. BTreeMap keeps group iteration deterministic.
pub fn group_assets(assets: &[Asset], method: MappingMethod) -> BTreeMap<String, Vec<Asset>> {
    let mut groups: BTreeMap<String, Vec<Asset>> = BTreeMap::new();
    for asset in assets {
        groups
            .entry(group_key(asset, method))
            .or_default()
            .push(asset.clone());
    }
    groups
}

/// Resolve the grouping key for a single asset.
///
/// For `Location` the key falls back to the asset's region before the
/// fixed default, so a branch-level view degrades to a regional one.
pub fn group_key(asset: &Asset, method: MappingMethod) -> String {
    match method {
        MappingMethod::Location => present(&asset.location)
            .or_else(|| present(&asset.region))
            .unwrap_or(DEFAULT_LOCATION)
            .to_string(),
        MappingMethod::Region => present(&asset.region)
            .unwrap_or(DEFAULT_REGION)
            .to_string(),
        MappingMethod::Sector => present(&asset.sector)
            .unwrap_or(DEFAULT_SECTOR)
            .to_string(),
    }
}

/// Treat empty strings the same as absent fields.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
