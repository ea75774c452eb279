use crate as pallet_allocation_buckets;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl, parameter_types,
  traits::{ConstU32, ConstU64, ConstU128, fungibles::Mutate},
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{
  AssetKind, Balance, ConverterFactory, ConverterRouter, FactoryId, ProviderId, RateOracle,
  ecosystem::pallet_ids::{ALLOCATION_BUCKETS_PALLET_ID, TREASURY_CUSTODY_PALLET_ID},
  params::UNIT,
};
use std::cell::RefCell;
use std::collections::BTreeMap;

pub const MANAGEMENT: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const ROUTER: u64 = 90;
pub const FACTORY: FactoryId = 1;
pub const FACTORY_ACCOUNT: u64 = 91;
pub const PROVIDER: ProviderId = 1;
pub const OTHER_PROVIDER: ProviderId = 2;

pub const TOKEN_A: AssetKind = AssetKind::Local(1);
pub const TOKEN_B: AssetKind = AssetKind::Local(2);
pub const TOKEN_C: AssetKind = AssetKind::Local(3);

/// A converter request observed by the fake factory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
  pub factory: FactoryId,
  pub caller: u64,
  pub from: AssetKind,
  pub amount: Balance,
  pub to: AssetKind,
}

thread_local! {
    // Oracle rates: (provider, token) -> unit price
    pub static RATES: RefCell<BTreeMap<(ProviderId, AssetKind), Balance>> = const { RefCell::new(BTreeMap::new()) };

    // Converter deployments requested from the router: (caller, from, to)
    pub static DEPLOYMENTS: RefCell<Vec<(u64, AssetKind, AssetKind)>> = const { RefCell::new(Vec::new()) };

    // Conversions handed to the factory
    pub static CONVERSIONS: RefCell<Vec<Conversion>> = const { RefCell::new(Vec::new()) };
}

pub fn set_rate(provider: ProviderId, token: AssetKind, rate: Balance) {
  RATES.with(|r| r.borrow_mut().insert((provider, token), rate));
}

pub fn deployments() -> Vec<(u64, AssetKind, AssetKind)> {
  DEPLOYMENTS.with(|d| d.borrow().clone())
}

pub fn conversions() -> Vec<Conversion> {
  CONVERSIONS.with(|c| c.borrow().clone())
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    Treasury: pallet_treasury_custody,
    AllocationBuckets: pallet_allocation_buckets,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = u128;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = u128;
  type AssetId = u32;
  type AssetIdParameter = u32;
  type Currency = Balances;
  type CreateOrigin = polkadot_sdk::frame_support::traits::AsEnsureOriginWithArg<
    frame_system::EnsureSigned<Self::AccountId>,
  >;
  type ForceOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type ReserveData = ();
  type CallbackHandle = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<5>;
  type Holder = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = AssetBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct AssetBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl polkadot_sdk::pallet_assets::BenchmarkHelper<u32, ()> for AssetBenchmarkHelper {
  fn create_asset_id_parameter(id: u32) -> u32 {
    id
  }
  fn create_reserve_id_parameter(_id: u32) -> () {
    ()
  }
}

parameter_types! {
  pub const TreasuryPalletId: PalletId = PalletId(*TREASURY_CUSTODY_PALLET_ID);
  pub const BucketsPalletId: PalletId = PalletId(*ALLOCATION_BUCKETS_PALLET_ID);
}

impl pallet_treasury_custody::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type PalletId = TreasuryPalletId;
  type ManagementDelay = ConstU64<0>;
  type WeightInfo = ();
}

pub struct MockOracle;
impl RateOracle for MockOracle {
  fn rate(provider: ProviderId, token: AssetKind) -> Option<Balance> {
    RATES.with(|r| r.borrow().get(&(provider, token)).copied())
  }
}

pub struct MockRouter;
impl ConverterRouter<u64> for MockRouter {
  fn account() -> u64 {
    ROUTER
  }

  fn deploy_converter(caller: &u64, from: AssetKind, to: AssetKind) -> Result<FactoryId, DispatchError> {
    DEPLOYMENTS.with(|d| d.borrow_mut().push((*caller, from, to)));
    Ok(FACTORY)
  }
}

pub struct MockConverters;
impl ConverterFactory<u64> for MockConverters {
  fn exists(factory: FactoryId) -> bool {
    factory == FACTORY
  }

  fn account(factory: FactoryId) -> Option<u64> {
    (factory == FACTORY).then_some(FACTORY_ACCOUNT)
  }

  fn auctions(_factory: FactoryId, _to: AssetKind) -> Option<u32> {
    None
  }

  fn deploy(_factory: FactoryId, _from: AssetKind, _to: AssetKind) -> Result<u32, DispatchError> {
    Ok(0)
  }

  fn convert(
    factory: FactoryId,
    caller: &u64,
    from: AssetKind,
    amount: Balance,
    to: AssetKind,
  ) -> Result<(), DispatchError> {
    CONVERSIONS.with(|c| {
      c.borrow_mut().push(Conversion {
        factory,
        caller: *caller,
        from,
        amount,
        to,
      })
    });
    Ok(())
  }
}

impl pallet_allocation_buckets::Config for Test {
  type Custody = Treasury;
  type AssetOps = pallet_treasury_custody::AssetLedger<Test>;
  type Oracle = MockOracle;
  type Router = MockRouter;
  type Converters = MockConverters;
  type PalletId = BucketsPalletId;
  type MaxTargets = ConstU32<8>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = BucketsBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct BucketsBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::types::BenchmarkHelper<u64> for BucketsBenchmarkHelper {
  fn set_rate(provider: ProviderId, token: AssetKind, rate: Balance) -> polkadot_sdk::sp_runtime::DispatchResult {
    set_rate(provider, token, rate);
    Ok(())
  }

  fn create_asset(asset: AssetKind) -> polkadot_sdk::sp_runtime::DispatchResult {
    if let AssetKind::Local(id) | AssetKind::Foreign(id) = asset {
      let _ = Assets::force_create(frame_system::RawOrigin::Root.into(), id, ALICE, true, 1);
    }
    Ok(())
  }

  fn mint_asset(asset: AssetKind, to: &u64, amount: Balance) -> polkadot_sdk::sp_runtime::DispatchResult {
    match asset {
      AssetKind::Native => {
        Balances::force_set_balance(frame_system::RawOrigin::Root.into(), *to, amount)?;
      }
      AssetKind::Local(id) | AssetKind::Foreign(id) => {
        Assets::mint_into(id, to, amount)?;
      }
    }
    Ok(())
  }

  fn prepare_conversion(_caller: &u64, _from: AssetKind, _to: AssetKind) -> polkadot_sdk::sp_runtime::DispatchResult {
    Ok(())
  }
}

/// Mint `amount` of a local `token` straight into shared custody.
pub fn fund_custody(token: AssetKind, amount: Balance) {
  if let AssetKind::Local(id) = token {
    Assets::mint_into(id, &Treasury::account_id(), amount).unwrap();
  }
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: vec![(ALICE, 1_000 * UNIT)],
    ..Default::default()
  }
  .assimilate_storage(&mut t)
  .unwrap();

  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets: vec![(1, ALICE, true, 1), (2, ALICE, true, 1), (3, ALICE, true, 1)],
    metadata: vec![],
    accounts: vec![],
    reserves: vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_treasury_custody::GenesisConfig::<Test> {
    management: Some(MANAGEMENT),
    pending_management: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  RATES.with(|r| r.borrow_mut().clear());
  DEPLOYMENTS.with(|d| d.borrow_mut().clear());
  CONVERSIONS.with(|c| c.borrow_mut().clear());

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| System::set_block_number(1));
  ext
}
