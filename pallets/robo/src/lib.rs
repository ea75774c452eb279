//! Robo Pallet
//!
//! The treasury router. Revenue is pulled from an ingress account into shared
//! custody and offered to the registered buckets in priority order: the first bucket
//! still below its reserves floor either keeps the token as-is or converts it into
//! what it wants. When every bucket is funded the tokens simply stay in custody.
//!
//! Conversions go through a converter cache keyed by `(from, to)`. Entries are
//! deployed through the current factory and stamped with its version; toggling a
//! version hides or restores every entry deployed under it without erasing them.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

mod registry;
pub mod types;
pub use types::*;

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

#[frame::pallet]
pub mod pallet {
  use super::{ConverterEntry, FactoryBinding, WeightInfo};
  use frame::deps::sp_runtime::{
    DispatchError,
    traits::{AccountIdConversion, Zero},
  };
  use frame::prelude::*;
  use primitives::{
    AllocationUnit, AssetKind, Balance, BucketId, BucketRegistryInspect, ConverterFactory,
    ConverterRouter, FactoryId, ManagementError, ManagementState, PullTarget, SharedCustody,
  };

  pub(crate) const LOG_TARGET: &str = "runtime::robo";

  /// Configuration trait for the router pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Allocation buckets the registry points at
    type Buckets: AllocationUnit<Self::AccountId>;

    /// Converter factories deployments are delegated to
    type Factories: ConverterFactory<Self::AccountId>;

    /// Shared custody pulled revenue lands in
    type Custody: SharedCustody<Self::AccountId>;

    /// The pallet ID for the router account
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::types::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  #[pallet::storage]
  pub type Management<T: Config> =
    StorageValue<_, ManagementState<T::AccountId, BlockNumberFor<T>>, OptionQuery>;

  /// Account allowed to pull and to deploy converters directly
  #[pallet::storage]
  #[pallet::getter(fn operator)]
  pub type Operator<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Account revenue is pulled from
  #[pallet::storage]
  #[pallet::getter(fn ingress)]
  pub type Ingress<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Next pointers of the bucket registry
  #[pallet::storage]
  pub type LinkedBuckets<T: Config> =
    StorageMap<_, Blake2_128Concat, BucketId, BucketId, OptionQuery>;

  #[pallet::storage]
  pub type NumBuckets<T: Config> = StorageValue<_, u32, ValueQuery>;

  /// Converter cache: (from, to) -> factory stamped with its version
  #[pallet::storage]
  pub type Converters<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    AssetKind,
    Blake2_128Concat,
    AssetKind,
    ConverterEntry,
    OptionQuery,
  >;

  #[pallet::storage]
  #[pallet::getter(fn factory)]
  pub type Factory<T: Config> = StorageValue<_, FactoryBinding, OptionQuery>;

  #[pallet::storage]
  #[pallet::getter(fn factory_version_enabled)]
  pub type FactoryVersionEnabled<T: Config> =
    StorageMap<_, Blake2_128Concat, u32, bool, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    BucketAdded {
      bucket: BucketId,
      predecessor: BucketId,
    },
    BucketRemoved { bucket: BucketId },
    BucketReplaced { old: BucketId, new: BucketId },
    /// Revenue moved into custody; `bucket` is the one it was routed to, if any
    Pulled {
      token: AssetKind,
      amount: Balance,
      bucket: Option<BucketId>,
    },
    FactorySet { factory: FactoryId, version: u32 },
    FactoryVersionEnabledSet { version: u32, enabled: bool },
    ConverterSet {
      from: AssetKind,
      to: AssetKind,
      factory: FactoryId,
      version: u32,
    },
    ConverterDeployed {
      from: AssetKind,
      to: AssetKind,
      factory: FactoryId,
      version: u32,
    },
    /// Pulled tokens handed to a converter for the selected bucket
    ConversionStarted {
      bucket: BucketId,
      from: AssetKind,
      to: AssetKind,
      amount: Balance,
      factory: FactoryId,
    },
    OperatorSet { operator: T::AccountId },
    IngressSet { ingress: T::AccountId },
    PendingManagement { pending: T::AccountId },
    SetManagement { management: T::AccountId },
  }

  #[pallet::error]
  pub enum Error<T> {
    ManagementNotSet,
    NotManagement,
    NoPendingManagement,
    NotPendingManagement,
    TooEarly,
    /// Caller is not the operator
    NotOperator,
    /// Caller is neither the operator nor a registered bucket
    PermissionDenied,
    /// Bucket is already registered, or is the sentinel
    AlreadyPresent,
    /// The sentinel cannot be removed
    NotPresent,
    /// Bucket does not exist in the allocation pallet
    UnknownBucket,
    /// Predecessor is neither the sentinel nor registered
    UnknownPredecessor,
    /// Predecessor does not link to the bucket
    WrongPredecessor,
    UnknownFactory,
    /// No factory has been set
    NoFactory,
    /// The current factory version is disabled
    FactoryNotEnabled,
    NoIngress,
    /// The selected bucket has no token to convert into
    NothingWanted,
  }

  impl<T> From<ManagementError> for Error<T> {
    fn from(error: ManagementError) -> Self {
      match error {
        ManagementError::NotManagement => Error::NotManagement,
        ManagementError::NoPendingManagement => Error::NoPendingManagement,
        ManagementError::NotPendingManagement => Error::NotPendingManagement,
        ManagementError::TooEarly => Error::TooEarly,
      }
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Pull `amount` of `token` from ingress and route it to the first bucket below its floor
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::pull())]
    pub fn pull(origin: OriginFor<T>, token: AssetKind, amount: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_pull(&who, token, amount)
    }

    /// Register `bucket` right after `predecessor`
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::add_bucket())]
    pub fn add_bucket(
      origin: OriginFor<T>,
      bucket: BucketId,
      predecessor: BucketId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_management(&who)?;
      Self::link(bucket, predecessor)?;
      Self::deposit_event(Event::BucketAdded {
        bucket,
        predecessor,
      });
      Ok(())
    }

    /// Unregister `bucket`, which must directly follow `predecessor`
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::remove_bucket())]
    pub fn remove_bucket(
      origin: OriginFor<T>,
      bucket: BucketId,
      predecessor: BucketId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_management(&who)?;
      Self::unlink(bucket, predecessor)?;
      Self::deposit_event(Event::BucketRemoved { bucket });
      Ok(())
    }

    /// Put `new` in the place of `old`
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::replace_bucket())]
    pub fn replace_bucket(
      origin: OriginFor<T>,
      old: BucketId,
      new: BucketId,
      predecessor: BucketId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_management(&who)?;
      Self::relink(old, new, predecessor)?;
      Self::deposit_event(Event::BucketReplaced { old, new });
      Ok(())
    }

    /// Deploy new converters through `factory` under a fresh, disabled version
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::set_factory())]
    pub fn set_factory(origin: OriginFor<T>, factory: FactoryId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_management(&who)?;
      ensure!(T::Factories::exists(factory), Error::<T>::UnknownFactory);
      let version = Factory::<T>::get().map_or(1, |binding| binding.version.saturating_add(1));
      Factory::<T>::put(FactoryBinding { factory, version });
      FactoryVersionEnabled::<T>::insert(version, false);
      Self::deposit_event(Event::FactorySet { factory, version });
      Ok(())
    }

    /// Show or hide every converter deployed under `version`
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::set_factory_version_enabled())]
    pub fn set_factory_version_enabled(
      origin: OriginFor<T>,
      version: u32,
      enabled: bool,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_management(&who)?;
      FactoryVersionEnabled::<T>::insert(version, enabled);
      Self::deposit_event(Event::FactoryVersionEnabledSet { version, enabled });
      Ok(())
    }

    /// Pin the converter for `(from, to)` to `factory` at the current version; needs a factory set
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::set_converter())]
    pub fn set_converter(
      origin: OriginFor<T>,
      from: AssetKind,
      to: AssetKind,
      factory: FactoryId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_management(&who)?;
      ensure!(T::Factories::exists(factory), Error::<T>::UnknownFactory);
      let version = Factory::<T>::get().ok_or(Error::<T>::NoFactory)?.version;
      Converters::<T>::insert(from, to, ConverterEntry { factory, version });
      Self::deposit_event(Event::ConverterSet {
        from,
        to,
        factory,
        version,
      });
      Ok(())
    }

    /// Make sure a live converter exists for `(from, to)`
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::deploy_converter())]
    pub fn deploy_converter(origin: OriginFor<T>, from: AssetKind, to: AssetKind) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_deploy_converter(&who, from, to).map(|_| ())
    }

    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::set_operator())]
    pub fn set_operator(origin: OriginFor<T>, operator: T::AccountId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_management(&who)?;
      Operator::<T>::put(&operator);
      Self::deposit_event(Event::OperatorSet { operator });
      Ok(())
    }

    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::set_ingress())]
    pub fn set_ingress(origin: OriginFor<T>, ingress: T::AccountId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_management(&who)?;
      Ingress::<T>::put(&ingress);
      Self::deposit_event(Event::IngressSet { ingress });
      Ok(())
    }

    #[pallet::call_index(10)]
    #[pallet::weight(T::WeightInfo::set_management())]
    pub fn set_management(origin: OriginFor<T>, new: T::AccountId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let now = frame_system::Pallet::<T>::block_number();
      Management::<T>::try_mutate(|maybe_state| -> DispatchResult {
        let state = maybe_state.as_mut().ok_or(Error::<T>::ManagementNotSet)?;
        state
          .propose(&who, new.clone(), now, Zero::zero())
          .map_err(Error::<T>::from)?;
        Ok(())
      })?;
      Self::deposit_event(Event::PendingManagement { pending: new });
      Ok(())
    }

    #[pallet::call_index(11)]
    #[pallet::weight(T::WeightInfo::accept_management())]
    pub fn accept_management(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let now = frame_system::Pallet::<T>::block_number();
      Management::<T>::try_mutate(|maybe_state| -> DispatchResult {
        let state = maybe_state.as_mut().ok_or(Error::<T>::ManagementNotSet)?;
        state.accept(&who, now).map_err(Error::<T>::from)?;
        Ok(())
      })?;
      Self::deposit_event(Event::SetManagement { management: who });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    pub fn management() -> Option<T::AccountId> {
      Management::<T>::get().map(|state| state.management)
    }

    pub fn pending_management() -> Option<T::AccountId> {
      Management::<T>::get().and_then(|state| state.pending_management().cloned())
    }

    /// Live converter for `(from, to)`; entries of disabled versions are hidden.
    pub fn converter(from: AssetKind, to: AssetKind) -> Option<FactoryId> {
      Converters::<T>::get(from, to)
        .filter(|entry| FactoryVersionEnabled::<T>::get(entry.version))
        .map(|entry| entry.factory)
    }

    fn ensure_management(who: &T::AccountId) -> DispatchResult {
      let state = Management::<T>::get().ok_or(Error::<T>::ManagementNotSet)?;
      state.ensure_management(who).map_err(Error::<T>::from)?;
      Ok(())
    }

    fn is_operator(who: &T::AccountId) -> bool {
      Operator::<T>::get().as_ref() == Some(who)
    }

    pub(crate) fn do_pull(caller: &T::AccountId, token: AssetKind, amount: Balance) -> DispatchResult {
      ensure!(Self::is_operator(caller), Error::<T>::NotOperator);
      let ingress = Ingress::<T>::get().ok_or(Error::<T>::NoIngress)?;
      T::Custody::deposit_from(&ingress, token, amount)?;

      let mut selected = None;
      for bucket in Self::buckets() {
        if T::Buckets::above_floor(bucket)? {
          continue;
        }
        selected = Some(bucket);
        break;
      }

      match selected {
        Some(bucket) if T::Buckets::accepts(bucket, token) => {
          log::debug!(
            target: LOG_TARGET,
            "pulled {} of {:?} into bucket {} as-is",
            amount,
            token,
            bucket
          );
        }
        Some(bucket) if T::Buckets::distributes(bucket) => {
          log::debug!(
            target: LOG_TARGET,
            "pulled {} of {:?}, splitting through bucket {}",
            amount,
            token,
            bucket
          );
          T::Buckets::convert(bucket, &Self::account_id(), token, amount)?;
        }
        Some(bucket) => Self::convert_for(bucket, token, amount)?,
        None => {
          log::debug!(
            target: LOG_TARGET,
            "every bucket above its floor, {} of {:?} stays in custody",
            amount,
            token
          );
        }
      }

      Self::deposit_event(Event::Pulled {
        token,
        amount,
        bucket: selected,
      });
      Ok(())
    }

    /// Auction `amount` of `token` from custody into what `bucket` wants, on its behalf.
    fn convert_for(bucket: BucketId, token: AssetKind, amount: Balance) -> DispatchResult {
      let want = T::Buckets::want(bucket)?.ok_or(Error::<T>::NothingWanted)?;
      let account = T::Buckets::account(bucket).ok_or(Error::<T>::UnknownBucket)?;
      let factory = Self::ensure_converter(token, want)?;
      let factory_account = T::Factories::account(factory).ok_or(Error::<T>::UnknownFactory)?;
      T::Custody::release(token, amount, &factory_account)?;
      T::Factories::convert(factory, &account, token, amount, want)?;
      log::debug!(
        target: LOG_TARGET,
        "pulled {} of {:?}, converting into {:?} for bucket {} on factory {}",
        amount,
        token,
        want,
        bucket,
        factory
      );
      Self::deposit_event(Event::ConversionStarted {
        bucket,
        from: token,
        to: want,
        amount,
        factory,
      });
      Ok(())
    }

    pub(crate) fn do_deploy_converter(
      caller: &T::AccountId,
      from: AssetKind,
      to: AssetKind,
    ) -> Result<FactoryId, DispatchError> {
      let registered = T::Buckets::bucket_of(caller).is_some_and(Self::is_bucket);
      ensure!(
        Self::is_operator(caller) || registered,
        Error::<T>::PermissionDenied
      );
      Self::ensure_converter(from, to)
    }

    /// Live converter for `(from, to)`, deployed through the current factory if missing.
    fn ensure_converter(from: AssetKind, to: AssetKind) -> Result<FactoryId, DispatchError> {
      let binding = Factory::<T>::get().ok_or(Error::<T>::NoFactory)?;
      ensure!(
        FactoryVersionEnabled::<T>::get(binding.version),
        Error::<T>::FactoryNotEnabled
      );
      if let Some(factory) = Self::converter(from, to) {
        return Ok(factory);
      }

      T::Factories::deploy(binding.factory, from, to)?;
      Converters::<T>::insert(
        from,
        to,
        ConverterEntry {
          factory: binding.factory,
          version: binding.version,
        },
      );
      log::debug!(
        target: LOG_TARGET,
        "deployed converter {:?} -> {:?} on factory {} (version {})",
        from,
        to,
        binding.factory,
        binding.version
      );
      Self::deposit_event(Event::ConverterDeployed {
        from,
        to,
        factory: binding.factory,
        version: binding.version,
      });
      Ok(binding.factory)
    }
  }

  impl<T: Config> ConverterRouter<T::AccountId> for Pallet<T> {
    fn account() -> T::AccountId {
      Self::account_id()
    }

    fn deploy_converter(
      caller: &T::AccountId,
      from: AssetKind,
      to: AssetKind,
    ) -> Result<FactoryId, DispatchError> {
      Self::do_deploy_converter(caller, from, to)
    }
  }

  impl<T: Config> BucketRegistryInspect<T::AccountId> for Pallet<T> {
    fn is_bucket(bucket: BucketId) -> bool {
      Self::is_bucket(bucket)
    }

    fn is_bucket_account(who: &T::AccountId) -> bool {
      T::Buckets::bucket_of(who).is_some_and(Self::is_bucket)
    }
  }

  impl<T: Config> PullTarget<T::AccountId> for Pallet<T> {
    fn pull(caller: &T::AccountId, token: AssetKind, amount: Balance) -> DispatchResult {
      Self::do_pull(caller, token, amount)
    }
  }

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    pub management: Option<T::AccountId>,
    pub operator: Option<T::AccountId>,
    pub ingress: Option<T::AccountId>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
      if let Some(management) = &self.management {
        Management::<T>::put(ManagementState::new(management.clone()));
      }
      if let Some(operator) = &self.operator {
        Operator::<T>::put(operator);
      }
      if let Some(ingress) = &self.ingress {
        Ingress::<T>::put(ingress);
      }
    }
  }
}
