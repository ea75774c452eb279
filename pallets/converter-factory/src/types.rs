use codec::{Decode, Encode, MaxEncodedLen};
use primitives::ManagementState;
use scale_info::TypeInfo;
#[cfg(feature = "runtime-benchmarks")]
use {
  frame::deps::sp_runtime::DispatchResult,
  primitives::{AssetKind, Balance},
};

#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen)]
pub struct FactoryInfo<AccountId, BlockNumber> {
  /// Sovereign account converted tokens pass through on their way to an auction
  pub account: AccountId,
  pub management: ManagementState<AccountId, BlockNumber>,
  /// May tune auction parameters through `call`
  pub operator: AccountId,
}

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn create_asset(asset: AssetKind) -> DispatchResult;
  fn mint_asset(asset: AssetKind, to: &AccountId, amount: Balance) -> DispatchResult;
}
