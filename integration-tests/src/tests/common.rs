//! Shared setup for the router integration tests.

use crate::runtime::{
  AccountId, AllocationBuckets, Assets, ConverterFactory, GOV, Ledger, MANAGEMENT, PROVIDER, Robo,
  RuntimeOrigin, USD, set_rate,
};
use polkadot_sdk::frame_support::{assert_ok, traits::fungibles::Inspect};
use primitives::{
  AssetKind, AssetOps, Balance, BucketId, FactoryId,
  params::{SENTINEL_BUCKET, UNIT},
};

/// Reserve value the stable bucket is filled up to
pub const STABLE_FLOOR: Balance = 100 * UNIT;

/// Ids handed out by `deploy_router`
pub struct Deployment {
  pub factory: FactoryId,
  pub stable: BucketId,
  pub buyback: BucketId,
}

pub fn signed(who: AccountId) -> RuntimeOrigin {
  RuntimeOrigin::signed(who)
}

pub fn bucket_account(bucket: BucketId) -> AccountId {
  AllocationBuckets::bucket(bucket)
    .map(|info| info.account)
    .unwrap_or_default()
}

pub fn balance(token: AssetKind, who: AccountId) -> Balance {
  Ledger::balance(&who, token)
}

pub fn create_factory() -> FactoryId {
  assert_ok!(ConverterFactory::create_factory(signed(MANAGEMENT)));
  ConverterFactory::last_factory_id()
}

/// Point the router at `factory` under a fresh version and enable it.
pub fn switch_factory(factory: FactoryId) -> u32 {
  assert_ok!(Robo::set_factory(signed(MANAGEMENT), factory));
  let version = Robo::factory().map(|binding| binding.version).unwrap_or_default();
  assert_ok!(Robo::set_factory_version_enabled(signed(MANAGEMENT), version, true));
  version
}

/// Buyback bucket for `token`, optionally fed by a split bucket's `parent` account.
pub fn create_buyback(token: AssetKind, parent: Option<AccountId>) -> BucketId {
  assert_ok!(AllocationBuckets::create_buyback_bucket(signed(MANAGEMENT), token));
  let bucket = AllocationBuckets::last_bucket_id();
  if parent.is_some() {
    assert_ok!(AllocationBuckets::set_parent(signed(MANAGEMENT), bucket, parent));
  }
  bucket
}

/// Stable reserve bucket first, GOV buyback behind it, one enabled factory.
pub fn deploy_router() -> Deployment {
  set_rate(USD, UNIT);
  let factory = create_factory();
  switch_factory(factory);

  assert_ok!(AllocationBuckets::create_generic_bucket(signed(MANAGEMENT), PROVIDER));
  let stable = AllocationBuckets::last_bucket_id();
  assert_ok!(AllocationBuckets::add_token(signed(MANAGEMENT), stable, USD, UNIT));
  assert_ok!(AllocationBuckets::set_reserves_floor(signed(MANAGEMENT), stable, STABLE_FLOOR));

  let buyback = create_buyback(GOV, None);

  assert_ok!(Robo::add_bucket(signed(MANAGEMENT), stable, SENTINEL_BUCKET));
  assert_ok!(Robo::add_bucket(signed(MANAGEMENT), buyback, stable));

  Deployment {
    factory,
    stable,
    buyback,
  }
}

/// Total amount of `token` held across every account that takes part in routing.
pub fn routed_total(token: AssetKind, accounts: &[AccountId]) -> Balance {
  accounts.iter().map(|who| balance(token, *who)).sum()
}

pub fn total_issuance(token: AssetKind) -> Balance {
  match token {
    AssetKind::Local(id) | AssetKind::Foreign(id) => Assets::total_issuance(id),
    AssetKind::Native => 0,
  }
}
