use codec::{Decode, Encode, MaxEncodedLen};
use primitives::FactoryId;
use scale_info::TypeInfo;
#[cfg(feature = "runtime-benchmarks")]
use {
  frame::deps::sp_runtime::{DispatchError, DispatchResult},
  primitives::{AssetKind, Balance, BucketId},
};

/// Cached converter for a `(from, to)` pair, live only while `version` is enabled.
#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen)]
pub struct ConverterEntry {
  pub factory: FactoryId,
  pub version: u32,
}

/// Factory new converters are deployed through.
#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen)]
pub struct FactoryBinding {
  pub factory: FactoryId,
  pub version: u32,
}

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  /// The `index`-th bucket below its floor, converting inflow into `want`.
  fn create_bucket(index: u32, want: AssetKind) -> Result<BucketId, DispatchError>;
  fn create_factory() -> Result<FactoryId, DispatchError>;
  fn create_asset(asset: AssetKind) -> DispatchResult;
  fn mint_asset(asset: AssetKind, to: &AccountId, amount: Balance) -> DispatchResult;
}
