//! Test runtime wiring custody, buckets, router, factories and guard together.

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
  AssetKind, AssetOps, AuctionId, AuctionMechanism, AuctionParameter, Balance, ProviderId,
  RateOracle,
  ecosystem::pallet_ids::{
    ALLOCATION_BUCKETS_PALLET_ID, CONVERTER_FACTORY_PALLET_ID, PULL_GUARD_PALLET_ID,
    ROBO_PALLET_ID, TREASURY_CUSTODY_PALLET_ID,
  },
  params::UNIT,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

pub type AccountId = u64;
pub type Ledger = pallet_treasury_custody::AssetLedger<Runtime>;

pub const MANAGEMENT: AccountId = 1;
pub const OPERATOR: AccountId = 2;
pub const INGRESS: AccountId = 3;
pub const BIDDER: AccountId = 4;
pub const SUCCESSOR: AccountId = 5;

pub const MANAGEMENT_DELAY: u64 = 10;
pub const PROVIDER: ProviderId = 1;

/// Stable reserve token
pub const USD: AssetKind = AssetKind::Local(1);
pub const ETH: AssetKind = AssetKind::Local(2);
/// Revenue token collected at ingress
pub const REV: AssetKind = AssetKind::Local(3);
/// Governance token bought back
pub const GOV: AssetKind = AssetKind::Local(4);

pub const INITIAL: Balance = 1_000_000 * UNIT;

type Block = frame_system::mocking::MockBlock<Runtime>;

construct_runtime!(
  pub struct Runtime {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    Treasury: pallet_treasury_custody,
    AllocationBuckets: pallet_allocation_buckets,
    Robo: pallet_robo,
    ConverterFactory: pallet_converter_factory,
    PullGuard: pallet_pull_guard,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Runtime {
  type Block = Block;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

impl polkadot_sdk::pallet_balances::Config for Runtime {
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

impl polkadot_sdk::pallet_assets::Config for Runtime {
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
  type BenchmarkHelper = ();
}

parameter_types! {
  pub const TreasuryPalletId: PalletId = PalletId(*TREASURY_CUSTODY_PALLET_ID);
  pub const BucketsPalletId: PalletId = PalletId(*ALLOCATION_BUCKETS_PALLET_ID);
  pub const RoboPalletId: PalletId = PalletId(*ROBO_PALLET_ID);
  pub const FactoryPalletId: PalletId = PalletId(*CONVERTER_FACTORY_PALLET_ID);
  pub const GuardPalletId: PalletId = PalletId(*PULL_GUARD_PALLET_ID);
}

impl pallet_treasury_custody::Config for Runtime {
  type Assets = Assets;
  type Currency = Balances;
  type PalletId = TreasuryPalletId;
  type ManagementDelay = ConstU64<MANAGEMENT_DELAY>;
  type WeightInfo = ();
}

impl pallet_allocation_buckets::Config for Runtime {
  type Custody = Treasury;
  type AssetOps = Ledger;
  type Oracle = FakeOracle;
  type Router = Robo;
  type Converters = ConverterFactory;
  type PalletId = BucketsPalletId;
  type MaxTargets = ConstU32<8>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = RuntimeBenchmarkHelper;
}

impl pallet_robo::Config for Runtime {
  type Buckets = AllocationBuckets;
  type Factories = ConverterFactory;
  type Custody = Treasury;
  type PalletId = RoboPalletId;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = RuntimeBenchmarkHelper;
}

impl pallet_converter_factory::Config for Runtime {
  type Auctions = FakeAuctions;
  type Registry = Robo;
  type Custody = Treasury;
  type AssetOps = Ledger;
  type PalletId = FactoryPalletId;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = RuntimeBenchmarkHelper;
}

impl pallet_pull_guard::Config for Runtime {
  type Robo = Robo;
  type PalletId = GuardPalletId;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = RuntimeBenchmarkHelper;
}

/// Benchmark setup against the real pallets of this runtime
#[cfg(feature = "runtime-benchmarks")]
pub struct RuntimeBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
mod benchmark_helper {
  use super::*;
  use polkadot_sdk::sp_runtime::DispatchResult;
  use primitives::{AllocationUnit, BucketId, FactoryId, params::SENTINEL_BUCKET};

  fn management() -> RuntimeOrigin {
    RuntimeOrigin::signed(MANAGEMENT)
  }

  fn create_asset(asset: AssetKind) -> DispatchResult {
    if let AssetKind::Local(id) | AssetKind::Foreign(id) = asset {
      let _ = Assets::force_create(RuntimeOrigin::root(), id, MANAGEMENT, true, 1);
    }
    Ok(())
  }

  fn mint_asset(asset: AssetKind, to: &AccountId, amount: Balance) -> DispatchResult {
    match asset {
      AssetKind::Native => {
        Balances::force_set_balance(RuntimeOrigin::root(), *to, amount)?;
      }
      AssetKind::Local(id) | AssetKind::Foreign(id) => {
        Assets::mint_into(id, to, amount)?;
      }
    }
    Ok(())
  }

  fn create_factory() -> Result<FactoryId, DispatchError> {
    ConverterFactory::create_factory(management())?;
    Ok(ConverterFactory::last_factory_id())
  }

  /// Bind a fresh factory to the router and enable its version, once.
  fn bind_factory() -> DispatchResult {
    if Robo::factory().is_some() {
      return Ok(());
    }
    let factory = create_factory()?;
    Robo::set_factory(management(), factory)?;
    let version = Robo::factory().map(|binding| binding.version).unwrap_or_default();
    Robo::set_factory_version_enabled(management(), version, true)
  }

  impl pallet_robo::BenchmarkHelper<AccountId> for RuntimeBenchmarkHelper {
    fn create_bucket(_index: u32, want: AssetKind) -> Result<BucketId, DispatchError> {
      AllocationBuckets::create_buyback_bucket(management(), want)?;
      Ok(AllocationBuckets::last_bucket_id())
    }

    fn create_factory() -> Result<FactoryId, DispatchError> {
      create_factory()
    }

    fn create_asset(asset: AssetKind) -> DispatchResult {
      create_asset(asset)
    }

    fn mint_asset(asset: AssetKind, to: &AccountId, amount: Balance) -> DispatchResult {
      mint_asset(asset, to, amount)
    }
  }

  impl pallet_allocation_buckets::BenchmarkHelper<AccountId> for RuntimeBenchmarkHelper {
    fn set_rate(provider: ProviderId, token: AssetKind, rate: Balance) -> DispatchResult {
      RATES.with(|r| r.borrow_mut().insert((provider, token), rate));
      Ok(())
    }

    fn create_asset(asset: AssetKind) -> DispatchResult {
      create_asset(asset)
    }

    fn mint_asset(asset: AssetKind, to: &AccountId, amount: Balance) -> DispatchResult {
      mint_asset(asset, to, amount)
    }

    fn prepare_conversion(caller: &AccountId, _from: AssetKind, _to: AssetKind) -> DispatchResult {
      bind_factory()?;
      let bucket = <AllocationBuckets as AllocationUnit<AccountId>>::bucket_of(caller)
        .ok_or(DispatchError::Other("caller is not a bucket"))?;
      if !Robo::is_bucket(bucket) {
        Robo::add_bucket(management(), bucket, SENTINEL_BUCKET)?;
      }
      Ok(())
    }
  }

  impl pallet_converter_factory::BenchmarkHelper<AccountId> for RuntimeBenchmarkHelper {
    fn create_asset(asset: AssetKind) -> DispatchResult {
      create_asset(asset)
    }

    fn mint_asset(asset: AssetKind, to: &AccountId, amount: Balance) -> DispatchResult {
      mint_asset(asset, to, amount)
    }
  }

  impl pallet_pull_guard::BenchmarkHelper<AccountId> for RuntimeBenchmarkHelper {
    fn prepare_pull(guard: &AccountId, token: AssetKind, amount: Balance) -> DispatchResult {
      Robo::set_operator(management(), *guard)?;
      mint_asset(token, &INGRESS, amount)
    }
  }
}

/// An auction held by the fake mechanism
#[derive(Clone, Debug, Default)]
pub struct FakeAuction {
  pub want: AssetKind,
  pub receiver: AccountId,
  pub enabled: BTreeSet<AssetKind>,
  pub kicks: u32,
  pub parameters: Vec<AuctionParameter>,
}

thread_local! {
    pub static RATES: RefCell<BTreeMap<(ProviderId, AssetKind), Balance>> = const { RefCell::new(BTreeMap::new()) };
    pub static AUCTIONS: RefCell<BTreeMap<AuctionId, FakeAuction>> = const { RefCell::new(BTreeMap::new()) };
}

pub fn set_rate(token: AssetKind, rate: Balance) {
  RATES.with(|r| r.borrow_mut().insert((PROVIDER, token), rate));
}

pub fn clear_rate(token: AssetKind) {
  RATES.with(|r| r.borrow_mut().remove(&(PROVIDER, token)));
}

pub fn auction(auction: AuctionId) -> FakeAuction {
  AUCTIONS.with(|a| a.borrow().get(&auction).cloned().unwrap_or_default())
}

pub struct FakeOracle;
impl RateOracle for FakeOracle {
  fn rate(provider: ProviderId, token: AssetKind) -> Option<Balance> {
    RATES.with(|r| r.borrow().get(&(provider, token)).copied())
  }
}

pub struct FakeAuctions;
impl FakeAuctions {
  /// `BIDDER` takes everything on sale for `from`, paying `price` of the wanted token.
  pub fn take(auction_id: AuctionId, from: AssetKind, price: Balance) -> Result<(), DispatchError> {
    let sale = auction(auction_id);
    let account = Self::account(auction_id);
    let lot = Ledger::balance(&account, from);
    Ledger::transfer(&account, &BIDDER, from, lot)?;
    Ledger::transfer(&BIDDER, &sale.receiver, sale.want, price)
  }
}

impl AuctionMechanism<AccountId> for FakeAuctions {
  fn create(want: AssetKind, receiver: &AccountId) -> Result<AuctionId, DispatchError> {
    AUCTIONS.with(|a| {
      let mut auctions = a.borrow_mut();
      let id = auctions.len() as AuctionId + 1;
      auctions.insert(
        id,
        FakeAuction {
          want,
          receiver: *receiver,
          ..Default::default()
        },
      );
      Ok(id)
    })
  }

  fn account(auction: AuctionId) -> AccountId {
    1_000 + auction as AccountId
  }

  fn is_enabled(auction: AuctionId, from: AssetKind) -> bool {
    AUCTIONS.with(|a| {
      a.borrow()
        .get(&auction)
        .is_some_and(|sale| sale.enabled.contains(&from))
    })
  }

  fn enable(auction: AuctionId, from: AssetKind) -> Result<(), DispatchError> {
    AUCTIONS.with(|a| {
      a.borrow_mut()
        .get_mut(&auction)
        .map(|sale| {
          sale.enabled.insert(from);
        })
        .ok_or(DispatchError::Other("unknown auction"))
    })
  }

  fn kick(auction: AuctionId, from: AssetKind) -> Result<Balance, DispatchError> {
    AUCTIONS.with(|a| {
      if let Some(sale) = a.borrow_mut().get_mut(&auction) {
        sale.kicks += 1;
      }
    });
    Ok(Self::available(auction, from))
  }

  fn available(auction: AuctionId, from: AssetKind) -> Balance {
    Ledger::balance(&Self::account(auction), from)
  }

  fn configure(auction: AuctionId, parameter: AuctionParameter) -> Result<(), DispatchError> {
    AUCTIONS.with(|a| {
      a.borrow_mut()
        .get_mut(&auction)
        .map(|sale| sale.parameters.push(parameter))
        .ok_or(DispatchError::Other("unknown auction"))
    })
  }
}

/// Mint `amount` of a local `token` to `who`.
pub fn mint(token: AssetKind, who: AccountId, amount: Balance) {
  if let AssetKind::Local(id) = token {
    assert!(Assets::mint_into(id, &who, amount).is_ok());
  }
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Runtime>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Runtime> {
    balances: vec![(MANAGEMENT, INITIAL), (INGRESS, INITIAL), (BIDDER, INITIAL)],
    ..Default::default()
  }
  .assimilate_storage(&mut t)
  .unwrap();

  polkadot_sdk::pallet_assets::GenesisConfig::<Runtime> {
    assets: vec![
      (1, MANAGEMENT, true, 1),
      (2, MANAGEMENT, true, 1),
      (3, MANAGEMENT, true, 1),
      (4, MANAGEMENT, true, 1),
    ],
    metadata: vec![],
    accounts: vec![
      (1, INGRESS, INITIAL),
      (3, INGRESS, INITIAL),
      (1, BIDDER, INITIAL),
      (2, BIDDER, INITIAL),
      (4, BIDDER, INITIAL),
    ],
    reserves: vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_treasury_custody::GenesisConfig::<Runtime> {
    management: Some(MANAGEMENT),
    pending_management: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_robo::GenesisConfig::<Runtime> {
    management: Some(MANAGEMENT),
    operator: Some(PullGuard::account_id()),
    ingress: Some(INGRESS),
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_pull_guard::GenesisConfig::<Runtime> {
    management: Some(MANAGEMENT),
    operator: Some(OPERATOR),
    whitelist: vec![USD, REV],
  }
  .assimilate_storage(&mut t)
  .unwrap();

  RATES.with(|r| r.borrow_mut().clear());
  AUCTIONS.with(|a| a.borrow_mut().clear());

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| System::set_block_number(1));
  ext
}
