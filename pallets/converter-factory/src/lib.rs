//! Converter Factory Pallet
//!
//! A converter factory owns one auction per destination token. Buckets release the
//! tokens they cannot use into the factory account and call `convert`, which moves
//! them into the auction for the wanted token and kicks it. Auction proceeds always
//! settle into shared custody, the receiver fixed when the auction is created.
//!
//! The factory operator can tune live auctions through `call`; management can hand
//! over the operator role, sweep stray balances and transfer management itself.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

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
  use super::{FactoryInfo, WeightInfo};
  use frame::deps::sp_runtime::{
    DispatchError,
    traits::{AccountIdConversion, Zero},
  };
  use frame::prelude::*;
  use primitives::{
    AssetKind, AssetOps, AuctionId, AuctionMechanism, AuctionParameter, Balance,
    BucketRegistryInspect, ConverterFactory, FactoryId, ManagementError, ManagementState,
    SharedCustody,
  };

  pub(crate) const LOG_TARGET: &str = "runtime::converter-factory";

  pub type FactoryInfoOf<T> =
    FactoryInfo<<T as frame_system::Config>::AccountId, BlockNumberFor<T>>;

  /// Configuration trait for the converter factory pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Auction mechanism the factory deploys into
    type Auctions: AuctionMechanism<Self::AccountId>;

    /// Registry deciding which accounts may convert
    type Registry: BucketRegistryInspect<Self::AccountId>;

    /// Shared custody receiving auction proceeds
    type Custody: SharedCustody<Self::AccountId>;

    /// Asset movements out of factory accounts
    type AssetOps: AssetOps<Self::AccountId>;

    /// The pallet ID factory accounts are derived from
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
  #[pallet::getter(fn last_factory_id)]
  pub type LastFactoryId<T: Config> = StorageValue<_, FactoryId, ValueQuery>;

  #[pallet::storage]
  pub type Factories<T: Config> =
    StorageMap<_, Blake2_128Concat, FactoryId, FactoryInfoOf<T>, OptionQuery>;

  /// Auction of each factory per destination token, created on first use
  #[pallet::storage]
  pub type Auctions<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    FactoryId,
    Blake2_128Concat,
    AssetKind,
    AuctionId,
    OptionQuery,
  >;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    FactoryCreated {
      factory: FactoryId,
      management: T::AccountId,
      account: T::AccountId,
    },
    OperatorSet {
      factory: FactoryId,
      operator: T::AccountId,
    },
    AuctionDeployed {
      factory: FactoryId,
      to: AssetKind,
      auction: AuctionId,
    },
    /// Tokens moved into an auction and put up for sale
    Converted {
      factory: FactoryId,
      from: AssetKind,
      to: AssetKind,
      amount: Balance,
      auction: AuctionId,
      kicked: Balance,
      on_sale: Balance,
    },
    AuctionConfigured {
      factory: FactoryId,
      to: AssetKind,
      parameter: AuctionParameter,
    },
    Swept {
      factory: FactoryId,
      token: AssetKind,
      amount: Balance,
      management: T::AccountId,
    },
    PendingManagement {
      factory: FactoryId,
      pending: T::AccountId,
    },
    SetManagement {
      factory: FactoryId,
      management: T::AccountId,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    UnknownFactory,
    NotManagement,
    NoPendingManagement,
    NotPendingManagement,
    TooEarly,
    NotOperator,
    /// Caller is not a registered bucket
    PermissionDenied,
    /// No auction exists for the destination token yet
    NoAuction,
    FactoryIdOverflow,
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
    /// Create a factory; the caller becomes both management and operator
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::create_factory())]
    pub fn create_factory(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let factory = LastFactoryId::<T>::get()
        .checked_add(1)
        .ok_or(Error::<T>::FactoryIdOverflow)?;
      let account = Self::sovereign_account_id(factory);
      LastFactoryId::<T>::put(factory);
      frame_system::Pallet::<T>::inc_providers(&account);
      Factories::<T>::insert(
        factory,
        FactoryInfo {
          account: account.clone(),
          management: ManagementState::new(who.clone()),
          operator: who.clone(),
        },
      );
      Self::deposit_event(Event::FactoryCreated {
        factory,
        management: who,
        account,
      });
      Ok(())
    }

    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_operator())]
    pub fn set_operator(
      origin: OriginFor<T>,
      factory: FactoryId,
      operator: T::AccountId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Factories::<T>::try_mutate(factory, |maybe_info| -> DispatchResult {
        let info = maybe_info.as_mut().ok_or(Error::<T>::UnknownFactory)?;
        info.management.ensure_management(&who).map_err(Error::<T>::from)?;
        info.operator = operator.clone();
        Ok(())
      })?;
      Self::deposit_event(Event::OperatorSet { factory, operator });
      Ok(())
    }

    /// Adjust a parameter of the auction selling into `to`
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::call())]
    pub fn call(
      origin: OriginFor<T>,
      factory: FactoryId,
      to: AssetKind,
      parameter: AuctionParameter,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let info = Factories::<T>::get(factory).ok_or(Error::<T>::UnknownFactory)?;
      ensure!(info.operator == who, Error::<T>::NotOperator);
      let auction = Auctions::<T>::get(factory, to).ok_or(Error::<T>::NoAuction)?;
      T::Auctions::configure(auction, parameter)?;
      Self::deposit_event(Event::AuctionConfigured {
        factory,
        to,
        parameter,
      });
      Ok(())
    }

    /// Recover a stray balance from the factory account to management
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::sweep())]
    pub fn sweep(
      origin: OriginFor<T>,
      factory: FactoryId,
      token: AssetKind,
      amount: Option<Balance>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let info = Factories::<T>::get(factory).ok_or(Error::<T>::UnknownFactory)?;
      info.management.ensure_management(&who).map_err(Error::<T>::from)?;
      let amount = amount.unwrap_or_else(|| T::AssetOps::balance(&info.account, token));
      T::AssetOps::transfer(&info.account, &who, token, amount)?;
      Self::deposit_event(Event::Swept {
        factory,
        token,
        amount,
        management: who,
      });
      Ok(())
    }

    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::set_management())]
    pub fn set_management(
      origin: OriginFor<T>,
      factory: FactoryId,
      new: T::AccountId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let now = frame_system::Pallet::<T>::block_number();
      Factories::<T>::try_mutate(factory, |maybe_info| -> DispatchResult {
        let info = maybe_info.as_mut().ok_or(Error::<T>::UnknownFactory)?;
        info
          .management
          .propose(&who, new.clone(), now, Zero::zero())
          .map_err(Error::<T>::from)?;
        Ok(())
      })?;
      Self::deposit_event(Event::PendingManagement {
        factory,
        pending: new,
      });
      Ok(())
    }

    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::accept_management())]
    pub fn accept_management(origin: OriginFor<T>, factory: FactoryId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let now = frame_system::Pallet::<T>::block_number();
      Factories::<T>::try_mutate(factory, |maybe_info| -> DispatchResult {
        let info = maybe_info.as_mut().ok_or(Error::<T>::UnknownFactory)?;
        info.management.accept(&who, now).map_err(Error::<T>::from)?;
        Ok(())
      })?;
      Self::deposit_event(Event::SetManagement {
        factory,
        management: who,
      });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    pub fn sovereign_account_id(factory: FactoryId) -> T::AccountId {
      let seed = frame::hashing::blake2_256(&(b"factory", factory).encode());
      let mut id_bytes = T::PalletId::get().0;
      for (i, b) in seed.iter().enumerate() {
        id_bytes[i % 8] ^= b;
      }
      PalletId(id_bytes).into_sub_account_truncating(factory)
    }

    pub fn factory(factory: FactoryId) -> Option<FactoryInfoOf<T>> {
      Factories::<T>::get(factory)
    }

    pub fn auctions(factory: FactoryId, to: AssetKind) -> Option<AuctionId> {
      Auctions::<T>::get(factory, to)
    }

    /// Auction selling into `to`, created with custody as receiver on first use.
    pub(crate) fn ensure_auction(factory: FactoryId, to: AssetKind) -> Result<AuctionId, DispatchError> {
      ensure!(Factories::<T>::contains_key(factory), Error::<T>::UnknownFactory);
      if let Some(auction) = Auctions::<T>::get(factory, to) {
        return Ok(auction);
      }
      let auction = T::Auctions::create(to, &T::Custody::account())?;
      Auctions::<T>::insert(factory, to, auction);
      log::debug!(
        target: LOG_TARGET,
        "factory {} deployed auction {} buying {:?}",
        factory,
        auction,
        to
      );
      Self::deposit_event(Event::AuctionDeployed {
        factory,
        to,
        auction,
      });
      Ok(auction)
    }

    pub(crate) fn do_convert(
      factory: FactoryId,
      caller: &T::AccountId,
      from: AssetKind,
      amount: Balance,
      to: AssetKind,
    ) -> DispatchResult {
      ensure!(
        T::Registry::is_bucket_account(caller),
        Error::<T>::PermissionDenied
      );
      let info = Factories::<T>::get(factory).ok_or(Error::<T>::UnknownFactory)?;
      let auction = Self::ensure_auction(factory, to)?;
      if !T::Auctions::is_enabled(auction, from) {
        T::Auctions::enable(auction, from)?;
      }
      T::AssetOps::transfer(&info.account, &T::Auctions::account(auction), from, amount)?;
      let kicked = T::Auctions::kick(auction, from)?;
      let on_sale = T::Auctions::available(auction, from);
      log::debug!(
        target: LOG_TARGET,
        "factory {} kicked auction {} with {} of {:?} for {:?}, {} on sale",
        factory,
        auction,
        kicked,
        from,
        to,
        on_sale
      );
      Self::deposit_event(Event::Converted {
        factory,
        from,
        to,
        amount,
        auction,
        kicked,
        on_sale,
      });
      Ok(())
    }
  }

  impl<T: Config> ConverterFactory<T::AccountId> for Pallet<T> {
    fn exists(factory: FactoryId) -> bool {
      Factories::<T>::contains_key(factory)
    }

    fn account(factory: FactoryId) -> Option<T::AccountId> {
      Factories::<T>::get(factory).map(|info| info.account)
    }

    fn auctions(factory: FactoryId, to: AssetKind) -> Option<AuctionId> {
      Self::auctions(factory, to)
    }

    fn deploy(factory: FactoryId, _from: AssetKind, to: AssetKind) -> Result<AuctionId, DispatchError> {
      Self::ensure_auction(factory, to)
    }

    fn convert(
      factory: FactoryId,
      caller: &T::AccountId,
      from: AssetKind,
      amount: Balance,
      to: AssetKind,
    ) -> DispatchResult {
      Self::do_convert(factory, caller, from, amount, to)
    }
  }
}
