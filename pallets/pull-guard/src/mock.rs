use crate as pallet_pull_guard;
use polkadot_sdk::frame_support::{PalletId, construct_runtime, derive_impl, parameter_types};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{
  AssetKind, Balance, PullTarget, ecosystem::pallet_ids::PULL_GUARD_PALLET_ID,
};
use std::cell::RefCell;

pub const MANAGEMENT: u64 = 1;
pub const OPERATOR: u64 = 2;
pub const ALICE: u64 = 3;

pub const TOKEN_A: AssetKind = AssetKind::Local(1);
pub const TOKEN_B: AssetKind = AssetKind::Local(2);

thread_local! {
    // Pulls forwarded to the router: (caller, token, amount)
    pub static PULLS: RefCell<Vec<(u64, AssetKind, Balance)>> = const { RefCell::new(Vec::new()) };

    pub static ROUTER_FAILS: RefCell<bool> = const { RefCell::new(false) };
}

pub fn pulls() -> Vec<(u64, AssetKind, Balance)> {
  PULLS.with(|p| p.borrow().clone())
}

pub fn set_router_fails(fails: bool) {
  ROUTER_FAILS.with(|f| *f.borrow_mut() = fails);
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    PullGuard: pallet_pull_guard,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
}

parameter_types! {
  pub const GuardPalletId: PalletId = PalletId(*PULL_GUARD_PALLET_ID);
}

pub struct MockRobo;
impl PullTarget<u64> for MockRobo {
  fn pull(caller: &u64, token: AssetKind, amount: Balance) -> Result<(), DispatchError> {
    if ROUTER_FAILS.with(|f| *f.borrow()) {
      return Err(DispatchError::Other("router rejected pull"));
    }
    PULLS.with(|p| p.borrow_mut().push((*caller, token, amount)));
    Ok(())
  }
}

impl pallet_pull_guard::Config for Test {
  type Robo = MockRobo;
  type PalletId = GuardPalletId;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = GuardBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct GuardBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<u64> for GuardBenchmarkHelper {
  fn prepare_pull(_guard: &u64, _token: AssetKind, _amount: Balance) -> Result<(), DispatchError> {
    set_router_fails(false);
    Ok(())
  }
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  pallet_pull_guard::GenesisConfig::<Test> {
    management: Some(MANAGEMENT),
    operator: Some(OPERATOR),
    whitelist: vec![TOKEN_A],
  }
  .assimilate_storage(&mut t)
  .unwrap();

  PULLS.with(|p| p.borrow_mut().clear());
  set_router_fails(false);

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| System::set_block_number(1));
  ext
}
