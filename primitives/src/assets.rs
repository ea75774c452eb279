use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Single source of truth for token identities routed through the treasury.
///
/// - `Native`: the chain's native token (managed by pallet-balances).
/// - `Local(u32)`: a locally issued asset (managed by pallet-assets).
/// - `Foreign(u32)`: a foreign asset mirrored into pallet-assets.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum AssetKind {
  /// Native token managed by pallet-balances
  #[default]
  Native,
  /// Local asset managed by pallet-assets
  Local(u32),
  /// Foreign asset managed by pallet-assets
  Foreign(u32),
}

impl From<u32> for AssetKind {
  fn from(asset_id: u32) -> Self {
    AssetKind::Local(asset_id)
  }
}

impl AssetKind {
  pub fn is_native(&self) -> bool {
    matches!(self, AssetKind::Native)
  }

  /// The pallet-assets id backing this token, `None` for the native token.
  pub fn asset_id(&self) -> Option<u32> {
    match self {
      AssetKind::Native => None,
      AssetKind::Local(id) | AssetKind::Foreign(id) => Some(*id),
    }
  }
}
