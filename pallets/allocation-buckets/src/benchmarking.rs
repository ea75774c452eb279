#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use frame::prelude::Get;
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{
  AssetKind, AssetOps, BucketId, ConverterRouter, ProviderId, SharedCustody, params::UNIT,
};

const PROVIDER: ProviderId = 1;
const FROM: AssetKind = AssetKind::Local(1);
const TO: AssetKind = AssetKind::Local(2);

#[benchmarks]
mod benches {
  use super::*;

  fn quoted_token<T: Config>(index: u32) -> AssetKind {
    let token = AssetKind::Local(100 + index);
    T::BenchmarkHelper::set_rate(PROVIDER, token, UNIT).expect("Failed to set rate");
    token
  }

  fn generic_bucket<T: Config>(caller: &T::AccountId) -> BucketId {
    Pallet::<T>::create_generic_bucket(RawOrigin::Signed(caller.clone()).into(), PROVIDER)
      .expect("Failed to create bucket");
    LastBucketId::<T>::get()
  }

  fn split_bucket<T: Config>(caller: &T::AccountId) -> BucketId {
    Pallet::<T>::create_split_bucket(RawOrigin::Signed(caller.clone()).into())
      .expect("Failed to create bucket");
    LastBucketId::<T>::get()
  }

  fn buyback_bucket<T: Config>(caller: &T::AccountId, parent: Option<T::AccountId>) -> BucketId {
    Pallet::<T>::create_buyback_bucket(RawOrigin::Signed(caller.clone()).into(), TO)
      .expect("Failed to create bucket");
    let bucket = LastBucketId::<T>::get();
    Pallet::<T>::set_parent(RawOrigin::Signed(caller.clone()).into(), bucket, parent)
      .expect("Failed to set parent");
    bucket
  }

  fn fill_tokens<T: Config>(caller: &T::AccountId, bucket: BucketId, count: u32) {
    for index in 0..count {
      let token = quoted_token::<T>(index);
      Pallet::<T>::add_token(RawOrigin::Signed(caller.clone()).into(), bucket, token, UNIT)
        .expect("Failed to add token");
    }
  }

  #[benchmark]
  fn create_bucket() {
    let caller: T::AccountId = whitelisted_caller();

    #[extrinsic_call]
    create_generic_bucket(RawOrigin::Signed(caller), PROVIDER);

    assert!(Buckets::<T>::contains_key(LastBucketId::<T>::get()));
  }

  #[benchmark]
  fn add_token() {
    let caller: T::AccountId = whitelisted_caller();
    let bucket = generic_bucket::<T>(&caller);
    let max = T::MaxTargets::get();
    fill_tokens::<T>(&caller, bucket, max.saturating_sub(1));
    let token = quoted_token::<T>(max);

    #[extrinsic_call]
    add_token(RawOrigin::Signed(caller), bucket, token, UNIT);

    assert!(Tokens::<T>::get(bucket).contains(&token));
  }

  #[benchmark]
  fn remove_token() {
    let caller: T::AccountId = whitelisted_caller();
    let bucket = generic_bucket::<T>(&caller);
    fill_tokens::<T>(&caller, bucket, T::MaxTargets::get());
    let token = quoted_token::<T>(0);

    #[extrinsic_call]
    remove_token(RawOrigin::Signed(caller), bucket, token, 0);

    assert!(!Tokens::<T>::get(bucket).contains(&token));
  }

  #[benchmark]
  fn set_token_points() {
    let caller: T::AccountId = whitelisted_caller();
    let bucket = generic_bucket::<T>(&caller);
    fill_tokens::<T>(&caller, bucket, T::MaxTargets::get());
    let token = quoted_token::<T>(0);

    #[extrinsic_call]
    set_token_points(RawOrigin::Signed(caller), bucket, token, UNIT / 2);

    assert_eq!(Tokens::<T>::get(bucket).points(&token), UNIT / 2);
  }

  #[benchmark]
  fn add_child() {
    let caller: T::AccountId = whitelisted_caller();
    let split = split_bucket::<T>(&caller);
    let max = T::MaxTargets::get();
    for _ in 1..max {
      let child = buyback_bucket::<T>(&caller, None);
      Pallet::<T>::add_child(RawOrigin::Signed(caller.clone()).into(), split, child, UNIT)
        .expect("Failed to add child");
    }
    let child = buyback_bucket::<T>(&caller, None);

    #[extrinsic_call]
    add_child(RawOrigin::Signed(caller), split, child, UNIT);

    assert!(Children::<T>::get(split).contains(&child));
  }

  #[benchmark]
  fn remove_child() {
    let caller: T::AccountId = whitelisted_caller();
    let split = split_bucket::<T>(&caller);
    let child = buyback_bucket::<T>(&caller, None);
    Pallet::<T>::add_child(RawOrigin::Signed(caller.clone()).into(), split, child, UNIT)
      .expect("Failed to add child");

    #[extrinsic_call]
    remove_child(RawOrigin::Signed(caller), split, child, 0);

    assert!(Children::<T>::get(split).is_empty());
  }

  #[benchmark]
  fn set_child_points() {
    let caller: T::AccountId = whitelisted_caller();
    let split = split_bucket::<T>(&caller);
    let child = buyback_bucket::<T>(&caller, None);
    Pallet::<T>::add_child(RawOrigin::Signed(caller.clone()).into(), split, child, UNIT)
      .expect("Failed to add child");

    #[extrinsic_call]
    set_child_points(RawOrigin::Signed(caller), split, child, UNIT / 2);

    assert_eq!(Children::<T>::get(split).points(&child), UNIT / 2);
  }

  #[benchmark]
  fn set_provider() {
    let caller: T::AccountId = whitelisted_caller();
    let bucket = generic_bucket::<T>(&caller);
    let max = T::MaxTargets::get();
    fill_tokens::<T>(&caller, bucket, max);
    // every accepted token is checked against the new provider
    for index in 0..max {
      T::BenchmarkHelper::set_rate(PROVIDER + 1, AssetKind::Local(100 + index), UNIT)
        .expect("Failed to set rate");
    }

    #[extrinsic_call]
    set_provider(RawOrigin::Signed(caller), bucket, PROVIDER + 1);

    assert!(matches!(
      Buckets::<T>::get(bucket).map(|info| info.kind),
      Some(BucketKind::Generic { provider, .. }) if provider == PROVIDER + 1
    ));
  }

  #[benchmark]
  fn set_reserves_floor() {
    let caller: T::AccountId = whitelisted_caller();
    let bucket = generic_bucket::<T>(&caller);

    #[extrinsic_call]
    set_reserves_floor(RawOrigin::Signed(caller), bucket, 100 * UNIT);

    assert!(matches!(
      Buckets::<T>::get(bucket).map(|info| info.kind),
      Some(BucketKind::Generic { reserves_floor, .. }) if reserves_floor == 100 * UNIT
    ));
  }

  #[benchmark]
  fn set_parent() {
    let caller: T::AccountId = whitelisted_caller();
    let bucket = generic_bucket::<T>(&caller);
    let parent: T::AccountId = account("parent", 0, 0);

    #[extrinsic_call]
    set_parent(RawOrigin::Signed(caller), bucket, Some(parent.clone()));

    assert_eq!(Buckets::<T>::get(bucket).and_then(|info| info.parent), Some(parent));
  }

  #[benchmark]
  fn convert() {
    let caller: T::AccountId = whitelisted_caller();
    let router = T::Router::account();
    let split = split_bucket::<T>(&caller);
    let split_account = Pallet::<T>::sovereign_account_id(split);
    let max = T::MaxTargets::get();
    // worst case: a full split whose children all need a conversion
    for _ in 0..max {
      let child = buyback_bucket::<T>(&caller, Some(split_account.clone()));
      Pallet::<T>::add_child(RawOrigin::Signed(caller.clone()).into(), split, child, UNIT)
        .expect("Failed to add child");
      let child_account = Pallet::<T>::sovereign_account_id(child);
      T::BenchmarkHelper::prepare_conversion(&child_account, FROM, TO)
        .expect("Failed to prepare conversion");
    }
    let amount = 10 * UNIT;
    T::BenchmarkHelper::create_asset(FROM).expect("Failed to create asset");
    T::BenchmarkHelper::mint_asset(FROM, &T::Custody::account(), amount)
      .expect("Failed to fund custody");

    #[extrinsic_call]
    convert(RawOrigin::Signed(router), split, FROM, amount);

    assert_eq!(T::Custody::balance_of(FROM), 0);
  }

  #[benchmark]
  fn sweep() {
    let caller: T::AccountId = whitelisted_caller();
    let bucket = generic_bucket::<T>(&caller);
    let account = Pallet::<T>::sovereign_account_id(bucket);
    T::BenchmarkHelper::create_asset(FROM).expect("Failed to create asset");
    T::BenchmarkHelper::mint_asset(FROM, &account, UNIT).expect("Failed to fund bucket");

    #[extrinsic_call]
    sweep(RawOrigin::Signed(caller.clone()), bucket, FROM, None);

    assert_eq!(T::AssetOps::balance(&caller, FROM), UNIT);
  }

  #[benchmark]
  fn set_management() {
    let caller: T::AccountId = whitelisted_caller();
    let bucket = generic_bucket::<T>(&caller);
    let new: T::AccountId = account("management", 0, 0);

    #[extrinsic_call]
    set_management(RawOrigin::Signed(caller), bucket, new.clone());

    assert_eq!(
      Buckets::<T>::get(bucket).and_then(|info| info.management.pending_management().cloned()),
      Some(new)
    );
  }

  #[benchmark]
  fn accept_management() {
    let old: T::AccountId = account("management", 0, 0);
    let caller: T::AccountId = whitelisted_caller();
    let bucket = generic_bucket::<T>(&old);
    Pallet::<T>::set_management(RawOrigin::Signed(old).into(), bucket, caller.clone())
      .expect("Failed to offer management");

    #[extrinsic_call]
    accept_management(RawOrigin::Signed(caller.clone()), bucket);

    assert_eq!(
      Buckets::<T>::get(bucket).map(|info| info.management.management),
      Some(caller)
    );
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
