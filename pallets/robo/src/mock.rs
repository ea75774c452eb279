use crate as pallet_robo;
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
  AllocationUnit, AssetKind, Balance, BucketId, ConverterFactory, FactoryId,
  ecosystem::pallet_ids::{ROBO_PALLET_ID, TREASURY_CUSTODY_PALLET_ID},
  params::UNIT,
};
use std::cell::RefCell;
use std::collections::BTreeMap;

pub const MANAGEMENT: u64 = 1;
pub const OPERATOR: u64 = 2;
pub const INGRESS: u64 = 3;
pub const ALICE: u64 = 4;

pub const TOKEN_A: AssetKind = AssetKind::Local(1);
pub const TOKEN_B: AssetKind = AssetKind::Local(2);
pub const TOKEN_C: AssetKind = AssetKind::Local(3);

/// Factories the fake factory pallet knows about
pub const FACTORY: FactoryId = 1;
pub const OTHER_FACTORY: FactoryId = 2;

/// A fake allocation bucket
#[derive(Clone, Debug, Default)]
pub struct FakeBucket {
  pub above_floor: bool,
  pub accepts: Vec<AssetKind>,
  /// Token the router converts inflow into
  pub want: Option<AssetKind>,
  /// Split-like bucket taking inflow through `convert`
  pub distributes: bool,
}

thread_local! {
    pub static BUCKETS: RefCell<BTreeMap<BucketId, FakeBucket>> = const { RefCell::new(BTreeMap::new()) };

    // Conversions requested by the router: (bucket, caller, token, amount)
    pub static CONVERTS: RefCell<Vec<(BucketId, u64, AssetKind, Balance)>> = const { RefCell::new(Vec::new()) };

    // Converters deployed on factories: (factory, from, to)
    pub static FACTORY_DEPLOYS: RefCell<Vec<(FactoryId, AssetKind, AssetKind)>> = const { RefCell::new(Vec::new()) };

    // Conversions handed to factories
    pub static FACTORY_CONVERTS: RefCell<Vec<FactoryConvert>> = const { RefCell::new(Vec::new()) };
}

/// A conversion observed by the fake factory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryConvert {
  pub factory: FactoryId,
  pub caller: u64,
  pub from: AssetKind,
  pub amount: Balance,
  pub to: AssetKind,
}

pub fn factory_account(factory: FactoryId) -> u64 {
  200 + factory as u64
}

/// Sovereign account of a fake bucket
pub fn bucket_account(bucket: BucketId) -> u64 {
  100 + bucket as u64
}

pub fn insert_bucket(bucket: BucketId, fake: FakeBucket) {
  BUCKETS.with(|b| b.borrow_mut().insert(bucket, fake));
}

pub fn set_above_floor(bucket: BucketId, above_floor: bool) {
  BUCKETS.with(|b| {
    if let Some(fake) = b.borrow_mut().get_mut(&bucket) {
      fake.above_floor = above_floor;
    }
  });
}

pub fn converts() -> Vec<(BucketId, u64, AssetKind, Balance)> {
  CONVERTS.with(|c| c.borrow().clone())
}

pub fn factory_deploys() -> Vec<(FactoryId, AssetKind, AssetKind)> {
  FACTORY_DEPLOYS.with(|d| d.borrow().clone())
}

pub fn factory_converts() -> Vec<FactoryConvert> {
  FACTORY_CONVERTS.with(|c| c.borrow().clone())
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    Treasury: pallet_treasury_custody,
    Robo: pallet_robo,
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
  pub const RoboPalletId: PalletId = PalletId(*ROBO_PALLET_ID);
}

impl pallet_treasury_custody::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type PalletId = TreasuryPalletId;
  type ManagementDelay = ConstU64<0>;
  type WeightInfo = ();
}

pub struct MockBuckets;
impl AllocationUnit<u64> for MockBuckets {
  fn exists(bucket: BucketId) -> bool {
    BUCKETS.with(|b| b.borrow().contains_key(&bucket))
  }

  fn bucket_of(who: &u64) -> Option<BucketId> {
    BUCKETS.with(|b| b.borrow().keys().copied().find(|bucket| bucket_account(*bucket) == *who))
  }

  fn account(bucket: BucketId) -> Option<u64> {
    Self::exists(bucket).then(|| bucket_account(bucket))
  }

  fn distributes(bucket: BucketId) -> bool {
    BUCKETS.with(|b| b.borrow().get(&bucket).is_some_and(|fake| fake.distributes))
  }

  fn above_floor(bucket: BucketId) -> Result<bool, DispatchError> {
    BUCKETS
      .with(|b| b.borrow().get(&bucket).map(|fake| fake.above_floor))
      .ok_or(DispatchError::Other("unknown bucket"))
  }

  fn accepts(bucket: BucketId, token: AssetKind) -> bool {
    BUCKETS.with(|b| {
      b.borrow()
        .get(&bucket)
        .is_some_and(|fake| fake.accepts.contains(&token))
    })
  }

  fn want(bucket: BucketId) -> Result<Option<AssetKind>, DispatchError> {
    Ok(BUCKETS.with(|b| b.borrow().get(&bucket).and_then(|fake| fake.want)))
  }

  fn convert(bucket: BucketId, caller: &u64, token: AssetKind, amount: Balance) -> Result<(), DispatchError> {
    CONVERTS.with(|c| c.borrow_mut().push((bucket, *caller, token, amount)));
    Ok(())
  }
}

pub struct MockFactories;
impl ConverterFactory<u64> for MockFactories {
  fn exists(factory: FactoryId) -> bool {
    factory == FACTORY || factory == OTHER_FACTORY
  }

  fn account(factory: FactoryId) -> Option<u64> {
    Self::exists(factory).then(|| factory_account(factory))
  }

  fn auctions(_factory: FactoryId, _to: AssetKind) -> Option<u32> {
    None
  }

  fn deploy(factory: FactoryId, from: AssetKind, to: AssetKind) -> Result<u32, DispatchError> {
    FACTORY_DEPLOYS.with(|d| {
      d.borrow_mut().push((factory, from, to));
      Ok(d.borrow().len() as u32)
    })
  }

  fn convert(
    factory: FactoryId,
    caller: &u64,
    from: AssetKind,
    amount: Balance,
    to: AssetKind,
  ) -> Result<(), DispatchError> {
    FACTORY_CONVERTS.with(|c| {
      c.borrow_mut().push(FactoryConvert {
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

impl pallet_robo::Config for Test {
  type Buckets = MockBuckets;
  type Factories = MockFactories;
  type Custody = Treasury;
  type PalletId = RoboPalletId;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = RoboBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct RoboBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::types::BenchmarkHelper<u64> for RoboBenchmarkHelper {
  fn create_bucket(index: u32, want: AssetKind) -> Result<BucketId, DispatchError> {
    let bucket = index + 1;
    insert_bucket(
      bucket,
      FakeBucket {
        want: Some(want),
        ..Default::default()
      },
    );
    Ok(bucket)
  }

  fn create_factory() -> Result<FactoryId, DispatchError> {
    Ok(FACTORY)
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
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: vec![(INGRESS, 1_000 * UNIT), (ALICE, 1_000 * UNIT)],
    ..Default::default()
  }
  .assimilate_storage(&mut t)
  .unwrap();

  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets: vec![(1, ALICE, true, 1), (2, ALICE, true, 1), (3, ALICE, true, 1)],
    metadata: vec![],
    accounts: vec![(1, INGRESS, 1_000 * UNIT), (2, INGRESS, 1_000 * UNIT)],
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

  pallet_robo::GenesisConfig::<Test> {
    management: Some(MANAGEMENT),
    operator: Some(OPERATOR),
    ingress: Some(INGRESS),
  }
  .assimilate_storage(&mut t)
  .unwrap();

  BUCKETS.with(|b| {
    let mut buckets = b.borrow_mut();
    buckets.clear();
    for bucket in 1..=4 {
      buckets.insert(bucket, FakeBucket::default());
    }
  });
  CONVERTS.with(|c| c.borrow_mut().clear());
  FACTORY_DEPLOYS.with(|d| d.borrow_mut().clear());
  FACTORY_CONVERTS.with(|c| c.borrow_mut().clear());

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| System::set_block_number(1));
  ext
}

/// Mint `amount` of a local `token` to `who`.
pub fn mint(token: AssetKind, who: u64, amount: Balance) {
  if let AssetKind::Local(id) = token {
    Assets::mint_into(id, &who, amount).unwrap();
  }
}
