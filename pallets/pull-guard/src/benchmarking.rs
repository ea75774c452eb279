#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{AssetKind, ManagementState, params::UNIT};

const TOKEN: AssetKind = AssetKind::Local(1);

#[benchmarks]
mod benches {
  use super::*;

  fn management<T: Config>() -> T::AccountId {
    let caller: T::AccountId = whitelisted_caller();
    Management::<T>::put(ManagementState::new(caller.clone()));
    caller
  }

  #[benchmark]
  fn pull() {
    let caller: T::AccountId = whitelisted_caller();
    Operator::<T>::put(&caller);
    Whitelist::<T>::insert(TOKEN, true);
    T::BenchmarkHelper::prepare_pull(&Pallet::<T>::account_id(), TOKEN, UNIT)
      .expect("Failed to prepare router");

    #[extrinsic_call]
    pull(RawOrigin::Signed(caller), TOKEN, UNIT);
  }

  #[benchmark]
  fn set_whitelist() {
    let caller = management::<T>();

    #[extrinsic_call]
    set_whitelist(RawOrigin::Signed(caller), TOKEN, true);

    assert!(Pallet::<T>::is_whitelisted(TOKEN));
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
