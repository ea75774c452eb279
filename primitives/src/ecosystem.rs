//! Ecosystem constants for the treasury router.
//!
//! Identities, pallet ids and fixed-point parameters shared by every pallet of the
//! router and by the runtimes that wire them together.

/// Balance type alias for consistency across the router
pub type Balance = u128;

/// Identity of an allocation bucket.
pub type BucketId = u32;

/// Identity of a converter factory. A cached converter is addressed by its factory.
pub type FactoryId = u32;

/// Identity of an auction instance owned by the external auction mechanism.
pub type AuctionId = u32;

/// Identity of a price provider known to the rate oracle.
pub type ProviderId = u32;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// The first four bytes differ between ids so that accounts stay distinct even when
/// the account type is narrower than the `modl` prefix plus the full id.
pub mod pallet_ids {
  /// Shared custody (treasury) pallet ID
  pub const TREASURY_CUSTODY_PALLET_ID: &[u8; 8] = b"trsy/cus";

  /// Allocation buckets pallet ID
  pub const ALLOCATION_BUCKETS_PALLET_ID: &[u8; 8] = b"bkts/alc";

  /// Robo router pallet ID
  pub const ROBO_PALLET_ID: &[u8; 8] = b"robo/rtr";

  /// Converter factory pallet ID
  pub const CONVERTER_FACTORY_PALLET_ID: &[u8; 8] = b"cnvf/fac";

  /// Pull guard pallet ID
  pub const PULL_GUARD_PALLET_ID: &[u8; 8] = b"grdp/pul";
}

/// Parameters shared across pallets.
pub mod params {
  use super::{Balance, BucketId};

  /// 18-decimal fixed-point unit. Oracle rates are expressed in it and weighted-set
  /// points are capped by it.
  pub const UNIT: Balance = 1_000_000_000_000_000_000;

  /// Reserved registry key that is both head and tail of the bucket chain.
  pub const SENTINEL_BUCKET: BucketId = 0;

  /// Treasury management transfer delay in blocks (~7 days at 6s/block).
  pub const TREASURY_MANAGEMENT_DELAY: u32 = 7 * 24 * 600;
}
