use crate as pallet_converter_factory;
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
  AssetKind, AssetOps, AuctionId, AuctionMechanism, AuctionParameter, Balance,
  BucketRegistryInspect, BucketId,
  ecosystem::pallet_ids::{CONVERTER_FACTORY_PALLET_ID, TREASURY_CUSTODY_PALLET_ID},
  params::UNIT,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

pub const MANAGEMENT: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
/// Account the fake registry treats as a registered bucket
pub const BUCKET: u64 = 50;

pub const TOKEN_A: AssetKind = AssetKind::Local(1);
pub const TOKEN_B: AssetKind = AssetKind::Local(2);
pub const TOKEN_C: AssetKind = AssetKind::Local(3);

/// An auction created through the fake mechanism
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeAuction {
  pub want: AssetKind,
  pub receiver: u64,
  pub enabled: BTreeSet<AssetKind>,
  pub kicks: u32,
  pub parameters: Vec<AuctionParameter>,
}

thread_local! {
    pub static AUCTIONS: RefCell<BTreeMap<AuctionId, FakeAuction>> = const { RefCell::new(BTreeMap::new()) };

    // Accounts recognised as registered buckets
    pub static BUCKET_ACCOUNTS: RefCell<BTreeSet<u64>> = const { RefCell::new(BTreeSet::new()) };
}

pub fn auction(auction: AuctionId) -> Option<FakeAuction> {
  AUCTIONS.with(|a| a.borrow().get(&auction).cloned())
}

pub fn auction_account(auction: AuctionId) -> u64 {
  300 + auction as u64
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    Treasury: pallet_treasury_custody,
    Factory: pallet_converter_factory,
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
  pub const FactoryPalletId: PalletId = PalletId(*CONVERTER_FACTORY_PALLET_ID);
}

impl pallet_treasury_custody::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type PalletId = TreasuryPalletId;
  type ManagementDelay = ConstU64<0>;
  type WeightInfo = ();
}

pub struct MockAuctions;
impl AuctionMechanism<u64> for MockAuctions {
  fn create(want: AssetKind, receiver: &u64) -> Result<AuctionId, DispatchError> {
    AUCTIONS.with(|a| {
      let mut auctions = a.borrow_mut();
      let id = auctions.len() as AuctionId + 1;
      auctions.insert(
        id,
        FakeAuction {
          want,
          receiver: *receiver,
          enabled: BTreeSet::new(),
          kicks: 0,
          parameters: Vec::new(),
        },
      );
      Ok(id)
    })
  }

  fn account(auction: AuctionId) -> u64 {
    auction_account(auction)
  }

  fn is_enabled(auction: AuctionId, from: AssetKind) -> bool {
    AUCTIONS.with(|a| {
      a.borrow()
        .get(&auction)
        .is_some_and(|fake| fake.enabled.contains(&from))
    })
  }

  fn enable(auction: AuctionId, from: AssetKind) -> Result<(), DispatchError> {
    AUCTIONS.with(|a| {
      let mut auctions = a.borrow_mut();
      let fake = auctions
        .get_mut(&auction)
        .ok_or(DispatchError::Other("unknown auction"))?;
      if !fake.enabled.insert(from) {
        return Err(DispatchError::Other("already enabled"));
      }
      Ok(())
    })
  }

  fn kick(auction: AuctionId, from: AssetKind) -> Result<Balance, DispatchError> {
    AUCTIONS.with(|a| {
      if let Some(fake) = a.borrow_mut().get_mut(&auction) {
        fake.kicks += 1;
      }
    });
    Ok(Self::available(auction, from))
  }

  fn available(auction: AuctionId, from: AssetKind) -> Balance {
    pallet_treasury_custody::AssetLedger::<Test>::balance(&auction_account(auction), from)
  }

  fn configure(auction: AuctionId, parameter: AuctionParameter) -> Result<(), DispatchError> {
    AUCTIONS.with(|a| {
      if let Some(fake) = a.borrow_mut().get_mut(&auction) {
        fake.parameters.push(parameter);
      }
    });
    Ok(())
  }
}

pub struct MockRegistry;
impl BucketRegistryInspect<u64> for MockRegistry {
  fn is_bucket(_bucket: BucketId) -> bool {
    false
  }

  fn is_bucket_account(who: &u64) -> bool {
    BUCKET_ACCOUNTS.with(|b| b.borrow().contains(who))
  }
}

impl pallet_converter_factory::Config for Test {
  type Auctions = MockAuctions;
  type Registry = MockRegistry;
  type Custody = Treasury;
  type AssetOps = pallet_treasury_custody::AssetLedger<Test>;
  type PalletId = FactoryPalletId;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = FactoryBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct FactoryBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::types::BenchmarkHelper<u64> for FactoryBenchmarkHelper {
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

/// Mint `amount` of a local `token` to `who`.
pub fn mint(token: AssetKind, who: u64, amount: Balance) {
  if let AssetKind::Local(id) = token {
    Assets::mint_into(id, &who, amount).unwrap();
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

  AUCTIONS.with(|a| a.borrow_mut().clear());
  BUCKET_ACCOUNTS.with(|b| {
    let mut accounts = b.borrow_mut();
    accounts.clear();
    accounts.insert(BUCKET);
  });

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| System::set_block_number(1));
  ext
}
