//! Chain id → custody asset id resolution.

use crate::custody::types::AssetId;

/// Chains the custody service has a native asset mapping for.
const ASSET_BY_CHAIN: &[(u64, &str)] = &[
    (1, "ETH"),          // Ethereum mainnet
    (5, "ETH_TEST3"),    // Goerli
    (17000, "ETH_TEST6"), // Holesky
];

/// Resolve the custody asset identifier for a chain.
///
/// Pure lookup; returns `None` for chains without a known mapping.
pub fn asset_for_chain(chain_id: u64) -> Option<AssetId> {
    ASSET_BY_CHAIN
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, asset)| AssetId::from(*asset))
}
