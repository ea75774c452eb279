#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{
  AssetKind, FactoryId, ManagementState,
  params::{SENTINEL_BUCKET, UNIT},
};

const FROM: AssetKind = AssetKind::Local(1);
const TO: AssetKind = AssetKind::Local(2);

#[benchmarks]
mod benches {
  use super::*;

  fn management<T: Config>() -> T::AccountId {
    let caller: T::AccountId = whitelisted_caller();
    Management::<T>::put(ManagementState::new(caller.clone()));
    caller
  }

  fn bind_factory<T: Config>() -> FactoryId {
    let factory = T::BenchmarkHelper::create_factory().expect("Failed to create factory");
    Factory::<T>::put(FactoryBinding {
      factory,
      version: 1,
    });
    FactoryVersionEnabled::<T>::insert(1, true);
    factory
  }

  #[benchmark]
  fn pull() {
    let caller: T::AccountId = whitelisted_caller();
    let ingress: T::AccountId = account("ingress", 0, 0);
    Operator::<T>::put(&caller);
    Ingress::<T>::put(&ingress);

    T::BenchmarkHelper::create_asset(FROM).expect("Failed to create asset");
    T::BenchmarkHelper::create_asset(TO).expect("Failed to create asset");
    T::BenchmarkHelper::mint_asset(FROM, &ingress, 100 * UNIT).expect("Failed to fund ingress");
    let factory = bind_factory::<T>();
    let bucket = T::BenchmarkHelper::create_bucket(0, TO).expect("Failed to create bucket");
    Pallet::<T>::link(bucket, SENTINEL_BUCKET).expect("Failed to register bucket");

    // worst case deploys a converter and hands the tokens over to it
    #[extrinsic_call]
    pull(RawOrigin::Signed(caller), FROM, 10 * UNIT);

    assert_eq!(Pallet::<T>::converter(FROM, TO), Some(factory));
  }

  #[benchmark]
  fn add_bucket() {
    let caller = management::<T>();
    let bucket = T::BenchmarkHelper::create_bucket(0, TO).expect("Failed to create bucket");

    #[extrinsic_call]
    add_bucket(RawOrigin::Signed(caller), bucket, SENTINEL_BUCKET);

    assert!(Pallet::<T>::is_bucket(bucket));
  }

  #[benchmark]
  fn remove_bucket() {
    let caller = management::<T>();
    let bucket = T::BenchmarkHelper::create_bucket(0, TO).expect("Failed to create bucket");
    Pallet::<T>::link(bucket, SENTINEL_BUCKET).expect("Failed to register bucket");

    #[extrinsic_call]
    remove_bucket(RawOrigin::Signed(caller), bucket, SENTINEL_BUCKET);

    assert!(!Pallet::<T>::is_bucket(bucket));
  }

  #[benchmark]
  fn replace_bucket() {
    let caller = management::<T>();
    let old = T::BenchmarkHelper::create_bucket(0, TO).expect("Failed to create bucket");
    let new = T::BenchmarkHelper::create_bucket(1, TO).expect("Failed to create bucket");
    Pallet::<T>::link(old, SENTINEL_BUCKET).expect("Failed to register bucket");

    #[extrinsic_call]
    replace_bucket(RawOrigin::Signed(caller), old, new, SENTINEL_BUCKET);

    assert!(Pallet::<T>::is_bucket(new));
    assert!(!Pallet::<T>::is_bucket(old));
  }

  #[benchmark]
  fn set_factory() {
    let caller = management::<T>();
    let factory = T::BenchmarkHelper::create_factory().expect("Failed to create factory");

    #[extrinsic_call]
    set_factory(RawOrigin::Signed(caller), factory);

    assert_eq!(Factory::<T>::get().map(|binding| binding.factory), Some(factory));
  }

  #[benchmark]
  fn set_factory_version_enabled() {
    let caller = management::<T>();
    bind_factory::<T>();

    #[extrinsic_call]
    set_factory_version_enabled(RawOrigin::Signed(caller), 1, false);

    assert!(!FactoryVersionEnabled::<T>::get(1));
  }

  #[benchmark]
  fn set_converter() {
    let caller = management::<T>();
    let factory = bind_factory::<T>();

    #[extrinsic_call]
    set_converter(RawOrigin::Signed(caller), FROM, TO, factory);

    assert_eq!(Pallet::<T>::converter(FROM, TO), Some(factory));
  }

  #[benchmark]
  fn deploy_converter() {
    let caller: T::AccountId = whitelisted_caller();
    Operator::<T>::put(&caller);
    let factory = bind_factory::<T>();

    #[extrinsic_call]
    deploy_converter(RawOrigin::Signed(caller), FROM, TO);

    assert_eq!(Pallet::<T>::converter(FROM, TO), Some(factory));
  }

  #[benchmark]
  fn set_operator() {
    let caller = management::<T>();
    let operator: T::AccountId = account("operator", 0, 0);

    #[extrinsic_call]
    set_operator(RawOrigin::Signed(caller), operator.clone());

    assert_eq!(Operator::<T>::get(), Some(operator));
  }

  #[benchmark]
  fn set_ingress() {
    let caller = management::<T>();
    let ingress: T::AccountId = account("ingress", 0, 0);

    #[extrinsic_call]
    set_ingress(RawOrigin::Signed(caller), ingress.clone());

    assert_eq!(Ingress::<T>::get(), Some(ingress));
  }

  #[benchmark]
  fn set_management() {
    let caller = management::<T>();
    let new: T::AccountId = account("management", 0, 0);

    #[extrinsic_call]
    set_management(RawOrigin::Signed(caller), new.clone());

    assert_eq!(Pallet::<T>::pending_management(), Some(new));
  }

  #[benchmark]
  fn accept_management() {
    let old: T::AccountId = account("management", 0, 0);
    let caller: T::AccountId = whitelisted_caller();
    Management::<T>::put(ManagementState::with_preset(old, caller.clone()));

    #[extrinsic_call]
    accept_management(RawOrigin::Signed(caller.clone()));

    assert_eq!(Pallet::<T>::management(), Some(caller));
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
