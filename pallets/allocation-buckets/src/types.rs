use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use primitives::{AssetKind, Balance, ManagementState, ProviderId};
use scale_info::TypeInfo;
#[cfg(feature = "runtime-benchmarks")]
use frame::deps::sp_runtime::DispatchResult;

/// Closed set of bucket variants sharing one `convert` surface.
#[derive(
  Clone, Copy, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub enum BucketKind {
  /// Weighted set of accepted tokens valued through `provider`, funded up to a floor
  Generic {
    provider: ProviderId,
    reserves_floor: Balance,
  },
  /// Converts everything into one token
  Buyback { token: AssetKind },
  /// Distributes inflow across weighted child buckets
  Split,
}

impl BucketKind {
  pub fn is_split(&self) -> bool {
    matches!(self, BucketKind::Split)
  }
}

#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen)]
pub struct BucketInfo<AccountId, BlockNumber> {
  pub kind: BucketKind,
  /// Sovereign account identifying the bucket towards the router and factories
  pub account: AccountId,
  pub management: ManagementState<AccountId, BlockNumber>,
  /// Sole caller allowed to `convert` into a generic or buyback bucket
  pub parent: Option<AccountId>,
}

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn set_rate(provider: ProviderId, token: AssetKind, rate: Balance) -> DispatchResult;
  fn create_asset(asset: AssetKind) -> DispatchResult;
  fn mint_asset(asset: AssetKind, to: &AccountId, amount: Balance) -> DispatchResult;
  /// Let the bucket account `caller` convert `from` into `to` through the router.
  fn prepare_conversion(caller: &AccountId, from: AssetKind, to: AssetKind) -> DispatchResult;
}
