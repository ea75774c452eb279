#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{AssetKind, AssetOps, AuctionParameter, FactoryId, params::UNIT};

const TOKEN: AssetKind = AssetKind::Local(1);

#[benchmarks]
mod benches {
  use super::*;

  fn create<T: Config>(caller: &T::AccountId) -> FactoryId {
    Pallet::<T>::create_factory(RawOrigin::Signed(caller.clone()).into())
      .expect("Failed to create factory");
    LastFactoryId::<T>::get()
  }

  #[benchmark]
  fn create_factory() {
    let caller: T::AccountId = whitelisted_caller();

    #[extrinsic_call]
    create_factory(RawOrigin::Signed(caller));

    assert!(Factories::<T>::contains_key(LastFactoryId::<T>::get()));
  }

  #[benchmark]
  fn set_operator() {
    let caller: T::AccountId = whitelisted_caller();
    let factory = create::<T>(&caller);
    let operator: T::AccountId = account("operator", 0, 0);

    #[extrinsic_call]
    set_operator(RawOrigin::Signed(caller), factory, operator.clone());

    assert_eq!(Factories::<T>::get(factory).map(|info| info.operator), Some(operator));
  }

  #[benchmark]
  fn call() {
    let caller: T::AccountId = whitelisted_caller();
    let factory = create::<T>(&caller);
    Pallet::<T>::ensure_auction(factory, TOKEN).expect("Failed to deploy auction");

    #[extrinsic_call]
    call(
      RawOrigin::Signed(caller),
      factory,
      TOKEN,
      AuctionParameter::StartingPrice(UNIT),
    );
  }

  #[benchmark]
  fn sweep() {
    let caller: T::AccountId = whitelisted_caller();
    let factory = create::<T>(&caller);
    let account = Pallet::<T>::sovereign_account_id(factory);
    T::BenchmarkHelper::create_asset(TOKEN).expect("Failed to create asset");
    T::BenchmarkHelper::mint_asset(TOKEN, &account, UNIT).expect("Failed to fund factory");

    #[extrinsic_call]
    sweep(RawOrigin::Signed(caller.clone()), factory, TOKEN, None);

    assert_eq!(T::AssetOps::balance(&caller, TOKEN), UNIT);
  }

  #[benchmark]
  fn set_management() {
    let caller: T::AccountId = whitelisted_caller();
    let factory = create::<T>(&caller);
    let new: T::AccountId = account("management", 0, 0);

    #[extrinsic_call]
    set_management(RawOrigin::Signed(caller), factory, new.clone());

    assert_eq!(
      Factories::<T>::get(factory).and_then(|info| info.management.pending_management().cloned()),
      Some(new)
    );
  }

  #[benchmark]
  fn accept_management() {
    let old: T::AccountId = account("management", 0, 0);
    let caller: T::AccountId = whitelisted_caller();
    let factory = create::<T>(&old);
    Pallet::<T>::set_management(RawOrigin::Signed(old).into(), factory, caller.clone())
      .expect("Failed to offer management");

    #[extrinsic_call]
    accept_management(RawOrigin::Signed(caller.clone()), factory);

    assert_eq!(
      Factories::<T>::get(factory).map(|info| info.management.management),
      Some(caller)
    );
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
