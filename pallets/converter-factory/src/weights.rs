#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn create_factory() -> Weight;
	fn set_operator() -> Weight;
	fn call() -> Weight;
	fn sweep() -> Weight;
	fn set_management() -> Weight;
	fn accept_management() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn create_factory() -> Weight {
		Weight::from_parts(30_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn set_operator() -> Weight {
		Weight::from_parts(12_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn call() -> Weight {
		Weight::from_parts(35_000_000, 4800)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn sweep() -> Weight {
		Weight::from_parts(45_000_000, 6196)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn set_management() -> Weight {
		Weight::from_parts(12_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn accept_management() -> Weight {
		Weight::from_parts(12_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
}

impl WeightInfo for () {
	fn create_factory() -> Weight {
		Weight::from_parts(30_000_000, 3600)
	}
	fn set_operator() -> Weight {
		Weight::from_parts(12_000_000, 3600)
	}
	fn call() -> Weight {
		Weight::from_parts(35_000_000, 4800)
	}
	fn sweep() -> Weight {
		Weight::from_parts(45_000_000, 6196)
	}
	fn set_management() -> Weight {
		Weight::from_parts(12_000_000, 3600)
	}
	fn accept_management() -> Weight {
		Weight::from_parts(12_000_000, 3600)
	}
}
