//! Pull Guard Pallet
//!
//! Front door for router pulls. The guard account is configured as the router's
//! operator, and the guard forwards a pull only when its own operator asks for a
//! whitelisted token. Management curates the whitelist and the operator.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  /// Get the router ready to accept a pull of `amount` of `token` from `guard`.
  fn prepare_pull(
    guard: &AccountId,
    token: primitives::AssetKind,
    amount: primitives::Balance,
  ) -> frame::deps::sp_runtime::DispatchResult;
}

#[frame::pallet]
pub mod pallet {
  use super::WeightInfo;
  use alloc::vec::Vec;
  use frame::deps::sp_runtime::traits::{AccountIdConversion, Zero};
  use frame::prelude::*;
  use primitives::{AssetKind, Balance, ManagementError, ManagementState, PullTarget};

  pub(crate) const LOG_TARGET: &str = "runtime::pull-guard";

  /// Configuration trait for the pull guard pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Router pulls are forwarded to
    type Robo: PullTarget<Self::AccountId>;

    /// The pallet ID for the guard account
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  #[pallet::storage]
  pub type Management<T: Config> =
    StorageValue<_, ManagementState<T::AccountId, BlockNumberFor<T>>, OptionQuery>;

  #[pallet::storage]
  #[pallet::getter(fn operator)]
  pub type Operator<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Tokens the operator may pull
  #[pallet::storage]
  pub type Whitelist<T: Config> = StorageMap<_, Blake2_128Concat, AssetKind, bool, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    WhitelistSet { token: AssetKind, whitelisted: bool },
    OperatorSet { operator: T::AccountId },
    /// Pull forwarded to the router
    Pulled { token: AssetKind, amount: Balance },
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
    NotOperator,
    NotWhitelisted,
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
    /// Pull a whitelisted token through the router
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::pull())]
    pub fn pull(origin: OriginFor<T>, token: AssetKind, amount: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(
        Operator::<T>::get().as_ref() == Some(&who),
        Error::<T>::NotOperator
      );
      ensure!(Whitelist::<T>::get(token), Error::<T>::NotWhitelisted);
      T::Robo::pull(&Self::account_id(), token, amount)?;
      log::debug!(target: LOG_TARGET, "forwarded pull of {} {:?}", amount, token);
      Self::deposit_event(Event::Pulled { token, amount });
      Ok(())
    }

    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_whitelist())]
    pub fn set_whitelist(origin: OriginFor<T>, token: AssetKind, whitelisted: bool) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_management(&who)?;
      Whitelist::<T>::insert(token, whitelisted);
      Self::deposit_event(Event::WhitelistSet { token, whitelisted });
      Ok(())
    }

    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_operator())]
    pub fn set_operator(origin: OriginFor<T>, operator: T::AccountId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_management(&who)?;
      Operator::<T>::put(&operator);
      Self::deposit_event(Event::OperatorSet { operator });
      Ok(())
    }

    #[pallet::call_index(3)]
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

    #[pallet::call_index(4)]
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

    pub fn is_whitelisted(token: AssetKind) -> bool {
      Whitelist::<T>::get(token)
    }

    pub fn management() -> Option<T::AccountId> {
      Management::<T>::get().map(|state| state.management)
    }

    pub fn pending_management() -> Option<T::AccountId> {
      Management::<T>::get().and_then(|state| state.pending_management().cloned())
    }

    fn ensure_management(who: &T::AccountId) -> DispatchResult {
      let state = Management::<T>::get().ok_or(Error::<T>::ManagementNotSet)?;
      state.ensure_management(who).map_err(Error::<T>::from)?;
      Ok(())
    }
  }

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    pub management: Option<T::AccountId>,
    pub operator: Option<T::AccountId>,
    /// Tokens whitelisted from the start
    pub whitelist: Vec<AssetKind>,
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
      for token in &self.whitelist {
        Whitelist::<T>::insert(token, true);
      }
    }
  }
}
