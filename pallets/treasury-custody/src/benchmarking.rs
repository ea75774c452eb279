#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use frame::deps::frame_support::traits::fungible::{Inspect, Mutate};
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{AssetKind, ManagementState, params::UNIT};

#[benchmarks]
mod benches {
  use super::*;

  fn management<T: Config>() -> T::AccountId {
    let caller: T::AccountId = whitelisted_caller();
    Management::<T>::put(ManagementState::new(caller.clone()));
    caller
  }

  #[benchmark]
  fn to_management() {
    let caller = management::<T>();
    let custody = Pallet::<T>::account_id();
    let amount = T::Currency::minimum_balance().saturating_add(UNIT);
    T::Currency::set_balance(&custody, amount);

    #[extrinsic_call]
    to_management(RawOrigin::Signed(caller.clone()), AssetKind::Native, None);

    assert_eq!(T::Currency::balance(&caller), amount);
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
