//! Treasury Custody Pallet
//!
//! Shared custody for the treasury router. Pulled revenue lands in this pallet's
//! account, every bucket values its reserves from the balances held here, and
//! conversions release tokens from here into converter factories.
//!
//! Management may sweep balances out with `to_management` and hands over control
//! through a two-phase transfer that only completes once `ManagementDelay` blocks
//! have passed. A pending management preset at genesis skips that delay once.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

use core::marker::PhantomData;
use frame::deps::sp_runtime::DispatchResult;
use primitives::{AssetKind, AssetOps, Balance};

/// `AssetOps` over the runtime's native currency and assets pallet, shared with the
/// other router pallets so they move tokens exactly the way custody does.
pub struct AssetLedger<T>(PhantomData<T>);

impl<T: Config> AssetOps<T::AccountId> for AssetLedger<T> {
  fn transfer(
    from: &T::AccountId,
    to: &T::AccountId,
    token: AssetKind,
    amount: Balance,
  ) -> DispatchResult {
    Pallet::<T>::transfer_asset(from, to, token, amount)
  }

  fn balance(who: &T::AccountId, token: AssetKind) -> Balance {
    Pallet::<T>::asset_balance(who, token)
  }
}

#[frame::pallet]
pub mod pallet {
  use super::WeightInfo;
  use frame::deps::{
    frame_support::traits::{
      fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
      fungibles::{Inspect as FungiblesInspect, Mutate as FungiblesMutate},
      tokens::Preservation,
    },
    sp_runtime::{
      DispatchError,
      traits::{AccountIdConversion, Zero},
    },
  };
  use frame::prelude::*;
  use primitives::{AssetKind, Balance, ManagementError, ManagementState, SharedCustody};

  pub(crate) const LOG_TARGET: &str = "runtime::treasury-custody";

  /// Configuration trait for the treasury custody pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// The assets pallet for managing fungible tokens (AssetKind::Local / Foreign)
    type Assets: FungiblesInspect<Self::AccountId, AssetId = u32, Balance = u128>
      + FungiblesMutate<Self::AccountId, AssetId = u32, Balance = u128>;

    /// The currency trait for managing native tokens (AssetKind::Native)
    type Currency: NativeInspect<Self::AccountId, Balance = u128>
      + NativeMutate<Self::AccountId, Balance = u128>;

    /// The pallet ID for the custody account
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Blocks a proposed management must wait before it can accept
    #[pallet::constant]
    type ManagementDelay: Get<BlockNumberFor<Self>>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Current management and any pending transfer
  #[pallet::storage]
  pub type Management<T: Config> =
    StorageValue<_, ManagementState<T::AccountId, BlockNumberFor<T>>, OptionQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Custody balance swept to management
    ToManagement {
      token: AssetKind,
      amount: Balance,
      management: T::AccountId,
    },
    /// Management transfer offered
    PendingManagement {
      pending: T::AccountId,
      not_before: BlockNumberFor<T>,
    },
    /// Management transfer completed
    SetManagement { management: T::AccountId },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Management has not been configured
    ManagementNotSet,
    /// Caller is not the current management
    NotManagement,
    /// No management transfer is pending
    NoPendingManagement,
    /// Caller is not the pending management
    NotPendingManagement,
    /// The management transfer delay has not elapsed
    TooEarly,
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
    /// Sweep `amount` of `token` (the whole balance when `None`) to management
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::to_management())]
    pub fn to_management(
      origin: OriginFor<T>,
      token: AssetKind,
      amount: Option<Balance>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let state = Management::<T>::get().ok_or(Error::<T>::ManagementNotSet)?;
      state.ensure_management(&who).map_err(Error::<T>::from)?;
      let custody = Self::account_id();
      let amount = amount.unwrap_or_else(|| Self::asset_balance(&custody, token));
      Self::transfer_asset(&custody, &state.management, token, amount)?;
      Self::deposit_event(Event::ToManagement {
        token,
        amount,
        management: state.management,
      });
      Ok(())
    }

    /// Offer management to `new`; it may accept once the delay has passed
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_management())]
    pub fn set_management(origin: OriginFor<T>, new: T::AccountId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let now = frame_system::Pallet::<T>::block_number();
      let not_before = Management::<T>::try_mutate(|maybe_state| {
        let state = maybe_state.as_mut().ok_or(Error::<T>::ManagementNotSet)?;
        state
          .propose(&who, new.clone(), now, T::ManagementDelay::get())
          .map_err(Error::<T>::from)
      })?;
      Self::deposit_event(Event::PendingManagement {
        pending: new,
        not_before,
      });
      Ok(())
    }

    /// Accept a pending management offer
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::accept_management())]
    pub fn accept_management(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let now = frame_system::Pallet::<T>::block_number();
      Management::<T>::try_mutate(|maybe_state| {
        let state = maybe_state.as_mut().ok_or(Error::<T>::ManagementNotSet)?;
        state.accept(&who, now).map_err(Error::<T>::from)
      })?;
      log::debug!(target: LOG_TARGET, "custody management handed over to {:?}", who);
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

    pub(crate) fn transfer_asset(
      from: &T::AccountId,
      to: &T::AccountId,
      token: AssetKind,
      amount: Balance,
    ) -> DispatchResult {
      if amount.is_zero() {
        return Ok(());
      }
      match token {
        AssetKind::Native => {
          <T::Currency as NativeMutate<T::AccountId>>::transfer(
            from,
            to,
            amount,
            Preservation::Expendable,
          )
          .map(|_| ())
        }
        AssetKind::Local(id) | AssetKind::Foreign(id) => {
          T::Assets::transfer(id, from, to, amount, Preservation::Expendable).map(|_| ())
        }
      }
    }

    pub(crate) fn asset_balance(who: &T::AccountId, token: AssetKind) -> Balance {
      match token {
        AssetKind::Native => <T::Currency as NativeInspect<T::AccountId>>::balance(who),
        AssetKind::Local(id) | AssetKind::Foreign(id) => T::Assets::balance(id, who),
      }
    }
  }

  impl<T: Config> SharedCustody<T::AccountId> for Pallet<T> {
    fn account() -> T::AccountId {
      Self::account_id()
    }

    fn balance_of(token: AssetKind) -> Balance {
      Self::asset_balance(&Self::account_id(), token)
    }

    fn deposit_from(from: &T::AccountId, token: AssetKind, amount: Balance) -> DispatchResult {
      Self::transfer_asset(from, &Self::account_id(), token, amount)
    }

    fn release(token: AssetKind, amount: Balance, dest: &T::AccountId) -> Result<(), DispatchError> {
      Self::transfer_asset(&Self::account_id(), dest, token, amount)
    }
  }

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    /// Initial management
    pub management: Option<T::AccountId>,
    /// Pending management that may accept without waiting for the delay
    pub pending_management: Option<T::AccountId>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
      if let Some(management) = &self.management {
        let state = match &self.pending_management {
          Some(pending) => ManagementState::with_preset(management.clone(), pending.clone()),
          None => ManagementState::new(management.clone()),
        };
        Management::<T>::put(state);
      }
    }
  }
}
