#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn create_bucket() -> Weight;
	fn add_token() -> Weight;
	fn remove_token() -> Weight;
	fn set_token_points() -> Weight;
	fn add_child() -> Weight;
	fn remove_child() -> Weight;
	fn set_child_points() -> Weight;
	fn set_provider() -> Weight;
	fn set_reserves_floor() -> Weight;
	fn set_parent() -> Weight;
	fn convert() -> Weight;
	fn sweep() -> Weight;
	fn set_management() -> Weight;
	fn accept_management() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn create_bucket() -> Weight {
		Weight::from_parts(30_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(4))
	}
	fn add_token() -> Weight {
		Weight::from_parts(25_000_000, 4200)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn remove_token() -> Weight {
		Weight::from_parts(20_000_000, 4200)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_token_points() -> Weight {
		Weight::from_parts(20_000_000, 4200)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn add_child() -> Weight {
		Weight::from_parts(25_000_000, 4200)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn remove_child() -> Weight {
		Weight::from_parts(20_000_000, 4200)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_child_points() -> Weight {
		Weight::from_parts(20_000_000, 4200)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_provider() -> Weight {
		Weight::from_parts(40_000_000, 4200)
			.saturating_add(T::DbWeight::get().reads(18))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_reserves_floor() -> Weight {
		Weight::from_parts(15_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_parent() -> Weight {
		Weight::from_parts(15_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn convert() -> Weight {
		Weight::from_parts(180_000_000, 12000)
			.saturating_add(T::DbWeight::get().reads(40))
			.saturating_add(T::DbWeight::get().writes(16))
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
	fn create_bucket() -> Weight {
		Weight::from_parts(30_000_000, 3600)
	}
	fn add_token() -> Weight {
		Weight::from_parts(25_000_000, 4200)
	}
	fn remove_token() -> Weight {
		Weight::from_parts(20_000_000, 4200)
	}
	fn set_token_points() -> Weight {
		Weight::from_parts(20_000_000, 4200)
	}
	fn add_child() -> Weight {
		Weight::from_parts(25_000_000, 4200)
	}
	fn remove_child() -> Weight {
		Weight::from_parts(20_000_000, 4200)
	}
	fn set_child_points() -> Weight {
		Weight::from_parts(20_000_000, 4200)
	}
	fn set_provider() -> Weight {
		Weight::from_parts(40_000_000, 4200)
	}
	fn set_reserves_floor() -> Weight {
		Weight::from_parts(15_000_000, 3600)
	}
	fn set_parent() -> Weight {
		Weight::from_parts(15_000_000, 3600)
	}
	fn convert() -> Weight {
		Weight::from_parts(180_000_000, 12000)
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
