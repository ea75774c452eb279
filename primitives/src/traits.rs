//! Collaborator interfaces between the router pallets.
//!
//! Each pallet names its collaborators through these traits in its `Config`, so the
//! wiring lives in the runtime and every pallet can be tested against fakes.

use crate::{AssetKind, AuctionId, Balance, BucketId, FactoryId, ProviderId};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use polkadot_sdk::sp_runtime::{DispatchError, DispatchResult};
use scale_info::TypeInfo;

/// Unit price of a token under a given provider, 18-decimal fixed point.
pub trait RateOracle {
  fn rate(provider: ProviderId, token: AssetKind) -> Option<Balance>;
}

impl RateOracle for () {
  fn rate(_: ProviderId, _: AssetKind) -> Option<Balance> {
    None
  }
}

/// Multi-asset transfers and balance queries.
pub trait AssetOps<AccountId> {
  fn transfer(from: &AccountId, to: &AccountId, token: AssetKind, amount: Balance) -> DispatchResult;

  fn balance(who: &AccountId, token: AssetKind) -> Balance;
}

/// The single balance-holding account every bucket reads and draws down.
pub trait SharedCustody<AccountId> {
  fn account() -> AccountId;

  fn balance_of(token: AssetKind) -> Balance;

  /// Moves `amount` of `token` from `from` into custody.
  fn deposit_from(from: &AccountId, token: AssetKind, amount: Balance) -> DispatchResult;

  /// Moves `amount` of `token` out of custody to `dest`.
  fn release(token: AssetKind, amount: Balance, dest: &AccountId) -> DispatchResult;
}

/// Sale parameters an operator may adjust on an auction.
#[derive(
  Clone, Copy, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub enum AuctionParameter {
  StartingPrice(Balance),
  MinimumPrice(Balance),
  StepDuration(u32),
}

/// External auction mechanism. Pricing and settlement are its own concern; proceeds
/// always go to the receiver fixed at creation.
pub trait AuctionMechanism<AccountId> {
  fn create(want: AssetKind, receiver: &AccountId) -> Result<AuctionId, DispatchError>;

  /// Account holding the tokens up for sale.
  fn account(auction: AuctionId) -> AccountId;

  fn is_enabled(auction: AuctionId, from: AssetKind) -> bool;

  fn enable(auction: AuctionId, from: AssetKind) -> DispatchResult;

  /// Starts (or restarts) the sale of `from`, returning the amount put up.
  fn kick(auction: AuctionId, from: AssetKind) -> Result<Balance, DispatchError>;

  fn available(auction: AuctionId, from: AssetKind) -> Balance;

  fn configure(auction: AuctionId, parameter: AuctionParameter) -> DispatchResult;
}

/// The router's view of allocation buckets.
pub trait AllocationUnit<AccountId> {
  fn exists(bucket: BucketId) -> bool;

  /// Bucket whose sovereign account is `who`.
  fn bucket_of(who: &AccountId) -> Option<BucketId>;

  /// Sovereign account of `bucket`.
  fn account(bucket: BucketId) -> Option<AccountId>;

  /// Whether `bucket` forwards inflow to children instead of converting it.
  fn distributes(bucket: BucketId) -> bool;

  fn above_floor(bucket: BucketId) -> Result<bool, DispatchError>;

  /// Whether `token` counts towards the bucket without conversion.
  fn accepts(bucket: BucketId, token: AssetKind) -> bool;

  fn want(bucket: BucketId) -> Result<Option<AssetKind>, DispatchError>;

  fn convert(bucket: BucketId, caller: &AccountId, token: AssetKind, amount: Balance) -> DispatchResult;
}

/// The buckets' view of the router's converter path.
pub trait ConverterRouter<AccountId> {
  fn account() -> AccountId;

  fn deploy_converter(
    caller: &AccountId,
    from: AssetKind,
    to: AssetKind,
  ) -> Result<FactoryId, DispatchError>;
}

/// Converter factories, each memoizing one auction per destination token.
pub trait ConverterFactory<AccountId> {
  fn exists(factory: FactoryId) -> bool;

  fn account(factory: FactoryId) -> Option<AccountId>;

  fn auctions(factory: FactoryId, to: AssetKind) -> Option<AuctionId>;

  fn deploy(factory: FactoryId, from: AssetKind, to: AssetKind) -> Result<AuctionId, DispatchError>;

  /// Moves `amount` of `from` already held by the factory into the auction for `to`.
  fn convert(
    factory: FactoryId,
    caller: &AccountId,
    from: AssetKind,
    amount: Balance,
    to: AssetKind,
  ) -> DispatchResult;
}

/// Registry membership checks.
pub trait BucketRegistryInspect<AccountId> {
  fn is_bucket(bucket: BucketId) -> bool;

  fn is_bucket_account(who: &AccountId) -> bool;
}

/// Entry point the permission layers delegate to.
pub trait PullTarget<AccountId> {
  fn pull(caller: &AccountId, token: AssetKind, amount: Balance) -> DispatchResult;
}
