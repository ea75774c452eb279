#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn pull() -> Weight;
	fn set_whitelist() -> Weight;
	fn set_operator() -> Weight;
	fn set_management() -> Weight;
	fn accept_management() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn pull() -> Weight {
		Weight::from_parts(170_000_000, 12000)
			.saturating_add(T::DbWeight::get().reads(32))
			.saturating_add(T::DbWeight::get().writes(6))
	}
	fn set_whitelist() -> Weight {
		Weight::from_parts(12_000_000, 1600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_operator() -> Weight {
		Weight::from_parts(10_000_000, 1600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_management() -> Weight {
		Weight::from_parts(12_000_000, 1600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn accept_management() -> Weight {
		Weight::from_parts(12_000_000, 1600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
}

impl WeightInfo for () {
	fn pull() -> Weight {
		Weight::from_parts(170_000_000, 12000)
	}
	fn set_whitelist() -> Weight {
		Weight::from_parts(12_000_000, 1600)
	}
	fn set_operator() -> Weight {
		Weight::from_parts(10_000_000, 1600)
	}
	fn set_management() -> Weight {
		Weight::from_parts(12_000_000, 1600)
	}
	fn accept_management() -> Weight {
		Weight::from_parts(12_000_000, 1600)
	}
}
