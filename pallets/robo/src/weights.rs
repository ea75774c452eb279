#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn pull() -> Weight;
	fn add_bucket() -> Weight;
	fn remove_bucket() -> Weight;
	fn replace_bucket() -> Weight;
	fn set_factory() -> Weight;
	fn set_factory_version_enabled() -> Weight;
	fn set_converter() -> Weight;
	fn deploy_converter() -> Weight;
	fn set_operator() -> Weight;
	fn set_ingress() -> Weight;
	fn set_management() -> Weight;
	fn accept_management() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn pull() -> Weight {
		Weight::from_parts(160_000_000, 12000)
			.saturating_add(T::DbWeight::get().reads(30))
			.saturating_add(T::DbWeight::get().writes(6))
	}
	fn add_bucket() -> Weight {
		Weight::from_parts(20_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(4))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn remove_bucket() -> Weight {
		Weight::from_parts(18_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn replace_bucket() -> Weight {
		Weight::from_parts(22_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(5))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn set_factory() -> Weight {
		Weight::from_parts(15_000_000, 1600)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn set_factory_version_enabled() -> Weight {
		Weight::from_parts(10_000_000, 1600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_converter() -> Weight {
		Weight::from_parts(15_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn deploy_converter() -> Weight {
		Weight::from_parts(60_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(6))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn set_operator() -> Weight {
		Weight::from_parts(10_000_000, 1600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_ingress() -> Weight {
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
		Weight::from_parts(160_000_000, 12000)
	}
	fn add_bucket() -> Weight {
		Weight::from_parts(20_000_000, 3600)
	}
	fn remove_bucket() -> Weight {
		Weight::from_parts(18_000_000, 3600)
	}
	fn replace_bucket() -> Weight {
		Weight::from_parts(22_000_000, 3600)
	}
	fn set_factory() -> Weight {
		Weight::from_parts(15_000_000, 1600)
	}
	fn set_factory_version_enabled() -> Weight {
		Weight::from_parts(10_000_000, 1600)
	}
	fn set_converter() -> Weight {
		Weight::from_parts(15_000_000, 3600)
	}
	fn deploy_converter() -> Weight {
		Weight::from_parts(60_000_000, 6000)
	}
	fn set_operator() -> Weight {
		Weight::from_parts(10_000_000, 1600)
	}
	fn set_ingress() -> Weight {
		Weight::from_parts(10_000_000, 1600)
	}
	fn set_management() -> Weight {
		Weight::from_parts(12_000_000, 1600)
	}
	fn accept_management() -> Weight {
		Weight::from_parts(12_000_000, 1600)
	}
}
