//! Allocation Buckets Pallet
//!
//! Purpose-built reserves the router funds in priority order. Three variants share
//! one `convert` surface:
//!
//! - **Generic**: a points-weighted set of accepted tokens valued through a rate
//!   provider. Its `want` is the accepted token with the lowest value per point, and
//!   it reports `above_floor` once its reserves reach the configured floor.
//! - **Buyback**: converts every inflow into a single token.
//! - **Split**: forwards inflow to weighted child buckets, giving the last child the
//!   rounding remainder so the full amount is always distributed.
//!
//! Tokens never sit in bucket accounts. Reserves are valued against the shared
//! custody balances and conversions release tokens from custody straight into the
//! converter factory chosen by the router.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

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
  use super::{BucketInfo, BucketKind, WeightInfo};
  use alloc::vec::Vec;
  use frame::deps::sp_runtime::{
    DispatchError,
    traits::{AccountIdConversion, Zero},
  };
  use frame::prelude::*;
  use primitives::{
    AllocationUnit, AssetKind, AssetOps, Balance, BucketId, ConverterFactory, ConverterRouter,
    FactoryId, ManagementError, ManagementState, ProviderId, RateOracle, SharedCustody, WeightedSet,
    WeightedSetError, params::UNIT,
  };
  use sp_arithmetic::{Rounding, helpers_128bit::multiply_by_rational_with_rounding};

  pub(crate) const LOG_TARGET: &str = "runtime::allocation-buckets";

  pub type BucketInfoOf<T> =
    BucketInfo<<T as frame_system::Config>::AccountId, BlockNumberFor<T>>;
  pub type TokenSetOf<T> = WeightedSet<AssetKind, <T as Config>::MaxTargets>;
  pub type ChildSetOf<T> = WeightedSet<BucketId, <T as Config>::MaxTargets>;

  /// Configuration trait for the allocation buckets pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Shared custody valued by generic buckets and drawn down by conversions
    type Custody: SharedCustody<Self::AccountId>;

    /// Asset movements for sweeping stray balances out of bucket accounts
    type AssetOps: AssetOps<Self::AccountId>;

    /// Unit prices per provider
    type Oracle: RateOracle;

    /// Router providing the converter path
    type Router: ConverterRouter<Self::AccountId>;

    /// Converter factories receiving tokens to auction
    type Converters: ConverterFactory<Self::AccountId>;

    /// The pallet ID bucket accounts are derived from
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Maximum tokens or children per bucket
    #[pallet::constant]
    type MaxTargets: Get<u32>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::types::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Last bucket id handed out; ids start at 1 so the registry sentinel is never a bucket
  #[pallet::storage]
  #[pallet::getter(fn last_bucket_id)]
  pub type LastBucketId<T: Config> = StorageValue<_, BucketId, ValueQuery>;

  #[pallet::storage]
  pub type Buckets<T: Config> = StorageMap<_, Blake2_128Concat, BucketId, BucketInfoOf<T>, OptionQuery>;

  /// Reverse index from sovereign account to bucket
  #[pallet::storage]
  pub type BucketAccounts<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, BucketId, OptionQuery>;

  /// Accepted tokens of generic buckets
  #[pallet::storage]
  pub type Tokens<T: Config> = StorageMap<_, Blake2_128Concat, BucketId, TokenSetOf<T>, ValueQuery>;

  /// Child buckets of split buckets
  #[pallet::storage]
  pub type Children<T: Config> = StorageMap<_, Blake2_128Concat, BucketId, ChildSetOf<T>, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    BucketCreated {
      bucket: BucketId,
      kind: BucketKind,
      management: T::AccountId,
      account: T::AccountId,
    },
    TokenAdded {
      bucket: BucketId,
      token: AssetKind,
      points: Balance,
      index: u32,
    },
    TokenRemoved { bucket: BucketId, token: AssetKind },
    TokenPointsSet {
      bucket: BucketId,
      token: AssetKind,
      points: Balance,
    },
    ChildAdded {
      bucket: BucketId,
      child: BucketId,
      points: Balance,
      index: u32,
    },
    ChildRemoved { bucket: BucketId, child: BucketId },
    ChildPointsSet {
      bucket: BucketId,
      child: BucketId,
      points: Balance,
    },
    ProviderSet { bucket: BucketId, provider: ProviderId },
    ReservesFloorSet {
      bucket: BucketId,
      reserves_floor: Balance,
    },
    ParentSet {
      bucket: BucketId,
      parent: Option<T::AccountId>,
    },
    /// Inflow already counts towards the bucket and stays in custody
    Retained {
      bucket: BucketId,
      token: AssetKind,
      amount: Balance,
    },
    /// A split bucket forwarded a share to a child
    Distributed {
      bucket: BucketId,
      child: BucketId,
      token: AssetKind,
      amount: Balance,
    },
    /// Inflow handed to a converter to be auctioned into `to`
    ConversionRequested {
      bucket: BucketId,
      from: AssetKind,
      to: AssetKind,
      amount: Balance,
      converter: FactoryId,
    },
    Swept {
      bucket: BucketId,
      token: AssetKind,
      amount: Balance,
      management: T::AccountId,
    },
    PendingManagement {
      bucket: BucketId,
      pending: T::AccountId,
    },
    SetManagement {
      bucket: BucketId,
      management: T::AccountId,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    UnknownBucket,
    /// Operation does not apply to this bucket variant
    WrongVariant,
    /// Caller may not convert into this bucket
    PermissionDenied,
    NotManagement,
    NoPendingManagement,
    NotPendingManagement,
    TooEarly,
    /// Points are zero or exceed UNIT
    PointsOutOfRange,
    AlreadyPresent,
    NotPresent,
    /// Index does not hold the given target
    IndexMismatch,
    TooManyTargets,
    /// Provider has no rate for the token
    NoRate,
    /// Generic bucket has no accepted tokens
    NoTokens,
    /// Split bucket has no children
    NoTargets,
    /// A split bucket cannot be its own child
    SelfReference,
    UnknownConverter,
    BucketIdOverflow,
    SovereignAccountCollision,
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

  impl<T> From<WeightedSetError> for Error<T> {
    fn from(error: WeightedSetError) -> Self {
      match error {
        WeightedSetError::PointsOutOfRange => Error::PointsOutOfRange,
        WeightedSetError::AlreadyPresent => Error::AlreadyPresent,
        WeightedSetError::NotPresent => Error::NotPresent,
        WeightedSetError::IndexMismatch => Error::IndexMismatch,
        WeightedSetError::Full => Error::TooManyTargets,
      }
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Create a generic bucket valued through `provider`; the caller becomes management
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::create_bucket())]
    pub fn create_generic_bucket(origin: OriginFor<T>, provider: ProviderId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_create(
        who,
        BucketKind::Generic {
          provider,
          reserves_floor: Zero::zero(),
        },
      )
      .map(|_| ())
    }

    /// Create a buyback bucket for `token`; the caller becomes management
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::create_bucket())]
    pub fn create_buyback_bucket(origin: OriginFor<T>, token: AssetKind) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_create(who, BucketKind::Buyback { token }).map(|_| ())
    }

    /// Create an empty split bucket; the caller becomes management
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::create_bucket())]
    pub fn create_split_bucket(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_create(who, BucketKind::Split).map(|_| ())
    }

    /// Accept `token` in a generic bucket with weight `points`
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::add_token())]
    pub fn add_token(
      origin: OriginFor<T>,
      bucket: BucketId,
      token: AssetKind,
      points: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let info = Self::ensure_management(bucket, &who)?;
      let BucketKind::Generic { provider, .. } = info.kind else {
        return Err(Error::<T>::WrongVariant.into());
      };
      let index = Tokens::<T>::try_mutate(bucket, |tokens| -> Result<u32, DispatchError> {
        let index = tokens.add(token, points).map_err(Error::<T>::from)?;
        ensure!(T::Oracle::rate(provider, token).is_some(), Error::<T>::NoRate);
        Ok(index)
      })?;
      Self::deposit_event(Event::TokenAdded {
        bucket,
        token,
        points,
        index,
      });
      Ok(())
    }

    /// Stop accepting `token`; `index` must be its current position
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::remove_token())]
    pub fn remove_token(
      origin: OriginFor<T>,
      bucket: BucketId,
      token: AssetKind,
      index: u32,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_generic_management(bucket, &who)?;
      Tokens::<T>::try_mutate(bucket, |tokens| {
        tokens.remove(&token, index).map_err(Error::<T>::from)
      })?;
      Self::deposit_event(Event::TokenRemoved { bucket, token });
      Ok(())
    }

    /// Change the weight of an accepted token
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::set_token_points())]
    pub fn set_token_points(
      origin: OriginFor<T>,
      bucket: BucketId,
      token: AssetKind,
      points: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_generic_management(bucket, &who)?;
      Tokens::<T>::try_mutate(bucket, |tokens| {
        tokens.set_points(&token, points).map_err(Error::<T>::from)
      })?;
      Self::deposit_event(Event::TokenPointsSet {
        bucket,
        token,
        points,
      });
      Ok(())
    }

    /// Add `child` to a split bucket with weight `points`
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::add_child())]
    pub fn add_child(
      origin: OriginFor<T>,
      bucket: BucketId,
      child: BucketId,
      points: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_split_management(bucket, &who)?;
      ensure!(child != bucket, Error::<T>::SelfReference);
      ensure!(Buckets::<T>::contains_key(child), Error::<T>::UnknownBucket);
      let index = Children::<T>::try_mutate(bucket, |children| {
        children.add(child, points).map_err(Error::<T>::from)
      })?;
      Self::deposit_event(Event::ChildAdded {
        bucket,
        child,
        points,
        index,
      });
      Ok(())
    }

    /// Remove `child` from a split bucket; `index` must be its current position
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::remove_child())]
    pub fn remove_child(
      origin: OriginFor<T>,
      bucket: BucketId,
      child: BucketId,
      index: u32,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_split_management(bucket, &who)?;
      Children::<T>::try_mutate(bucket, |children| {
        children.remove(&child, index).map_err(Error::<T>::from)
      })?;
      Self::deposit_event(Event::ChildRemoved { bucket, child });
      Ok(())
    }

    /// Change the weight of a child bucket
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::set_child_points())]
    pub fn set_child_points(
      origin: OriginFor<T>,
      bucket: BucketId,
      child: BucketId,
      points: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_split_management(bucket, &who)?;
      Children::<T>::try_mutate(bucket, |children| {
        children.set_points(&child, points).map_err(Error::<T>::from)
      })?;
      Self::deposit_event(Event::ChildPointsSet {
        bucket,
        child,
        points,
      });
      Ok(())
    }

    /// Switch the rate provider; every accepted token must be quoted by the new one
    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::set_provider())]
    pub fn set_provider(
      origin: OriginFor<T>,
      bucket: BucketId,
      provider: ProviderId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let mut info = Self::ensure_management(bucket, &who)?;
      let BucketKind::Generic { reserves_floor, .. } = info.kind else {
        return Err(Error::<T>::WrongVariant.into());
      };
      let quoted = Tokens::<T>::get(bucket)
        .iter()
        .all(|entry| T::Oracle::rate(provider, entry.target).is_some());
      ensure!(quoted, Error::<T>::NoRate);
      info.kind = BucketKind::Generic {
        provider,
        reserves_floor,
      };
      Buckets::<T>::insert(bucket, info);
      Self::deposit_event(Event::ProviderSet { bucket, provider });
      Ok(())
    }

    /// Set the reserve value a generic bucket must reach to be skipped by pulls
    #[pallet::call_index(10)]
    #[pallet::weight(T::WeightInfo::set_reserves_floor())]
    pub fn set_reserves_floor(
      origin: OriginFor<T>,
      bucket: BucketId,
      reserves_floor: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let mut info = Self::ensure_management(bucket, &who)?;
      let BucketKind::Generic { provider, .. } = info.kind else {
        return Err(Error::<T>::WrongVariant.into());
      };
      info.kind = BucketKind::Generic {
        provider,
        reserves_floor,
      };
      Buckets::<T>::insert(bucket, info);
      Self::deposit_event(Event::ReservesFloorSet {
        bucket,
        reserves_floor,
      });
      Ok(())
    }

    /// Set the sole account allowed to convert into a generic or buyback bucket
    #[pallet::call_index(11)]
    #[pallet::weight(T::WeightInfo::set_parent())]
    pub fn set_parent(
      origin: OriginFor<T>,
      bucket: BucketId,
      parent: Option<T::AccountId>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let mut info = Self::ensure_management(bucket, &who)?;
      ensure!(!info.kind.is_split(), Error::<T>::WrongVariant);
      info.parent = parent.clone();
      Buckets::<T>::insert(bucket, info);
      Self::deposit_event(Event::ParentSet { bucket, parent });
      Ok(())
    }

    /// Route `amount` of `token`, already held in custody, into `bucket`
    #[pallet::call_index(12)]
    #[pallet::weight(T::WeightInfo::convert())]
    pub fn convert(
      origin: OriginFor<T>,
      bucket: BucketId,
      token: AssetKind,
      amount: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_convert(&who, bucket, token, amount)
    }

    /// Recover a stray balance from the bucket account to management
    #[pallet::call_index(13)]
    #[pallet::weight(T::WeightInfo::sweep())]
    pub fn sweep(
      origin: OriginFor<T>,
      bucket: BucketId,
      token: AssetKind,
      amount: Option<Balance>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let info = Self::ensure_management(bucket, &who)?;
      let amount = amount.unwrap_or_else(|| T::AssetOps::balance(&info.account, token));
      T::AssetOps::transfer(&info.account, &who, token, amount)?;
      Self::deposit_event(Event::Swept {
        bucket,
        token,
        amount,
        management: who,
      });
      Ok(())
    }

    /// Offer management of `bucket` to `new`
    #[pallet::call_index(14)]
    #[pallet::weight(T::WeightInfo::set_management())]
    pub fn set_management(
      origin: OriginFor<T>,
      bucket: BucketId,
      new: T::AccountId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let now = frame_system::Pallet::<T>::block_number();
      Buckets::<T>::try_mutate(bucket, |maybe_info| -> DispatchResult {
        let info = maybe_info.as_mut().ok_or(Error::<T>::UnknownBucket)?;
        info
          .management
          .propose(&who, new.clone(), now, Zero::zero())
          .map_err(Error::<T>::from)?;
        Ok(())
      })?;
      Self::deposit_event(Event::PendingManagement {
        bucket,
        pending: new,
      });
      Ok(())
    }

    /// Accept a pending management offer for `bucket`
    #[pallet::call_index(15)]
    #[pallet::weight(T::WeightInfo::accept_management())]
    pub fn accept_management(origin: OriginFor<T>, bucket: BucketId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let now = frame_system::Pallet::<T>::block_number();
      Buckets::<T>::try_mutate(bucket, |maybe_info| -> DispatchResult {
        let info = maybe_info.as_mut().ok_or(Error::<T>::UnknownBucket)?;
        info.management.accept(&who, now).map_err(Error::<T>::from)?;
        Ok(())
      })?;
      Self::deposit_event(Event::SetManagement {
        bucket,
        management: who,
      });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Deterministic account for `bucket`. The id is folded into the pallet id so
    /// accounts stay distinct even for narrow account types.
    pub fn sovereign_account_id(bucket: BucketId) -> T::AccountId {
      let seed = frame::hashing::blake2_256(&(b"bucket", bucket).encode());
      let mut id_bytes = T::PalletId::get().0;
      for (i, b) in seed.iter().enumerate() {
        id_bytes[i % 8] ^= b;
      }
      PalletId(id_bytes).into_sub_account_truncating(bucket)
    }

    pub fn bucket(bucket: BucketId) -> Option<BucketInfoOf<T>> {
      Buckets::<T>::get(bucket)
    }

    pub fn tokens(bucket: BucketId) -> Vec<AssetKind> {
      Tokens::<T>::get(bucket).targets()
    }

    pub fn children(bucket: BucketId) -> Vec<BucketId> {
      Children::<T>::get(bucket).targets()
    }

    /// Unit value of the accepted tokens held in custody.
    pub fn reserves(bucket: BucketId) -> Result<Balance, DispatchError> {
      let info = Buckets::<T>::get(bucket).ok_or(Error::<T>::UnknownBucket)?;
      let BucketKind::Generic { provider, .. } = info.kind else {
        return Err(Error::<T>::WrongVariant.into());
      };
      Self::generic_reserves(bucket, provider)
    }

    /// Token a conversion into `bucket` should buy, `None` when it accepts nothing.
    pub fn want(bucket: BucketId) -> Result<Option<AssetKind>, DispatchError> {
      let info = Buckets::<T>::get(bucket).ok_or(Error::<T>::UnknownBucket)?;
      match info.kind {
        BucketKind::Generic { provider, .. } => Self::generic_want(bucket, provider),
        BucketKind::Buyback { token } => Ok(Some(token)),
        BucketKind::Split => Ok(None),
      }
    }

    /// Only generic buckets carry a floor; the other variants always take inflow.
    pub fn above_floor(bucket: BucketId) -> Result<bool, DispatchError> {
      let info = Buckets::<T>::get(bucket).ok_or(Error::<T>::UnknownBucket)?;
      match info.kind {
        BucketKind::Generic {
          provider,
          reserves_floor,
        } => Ok(Self::generic_reserves(bucket, provider)? >= reserves_floor),
        BucketKind::Buyback { .. } | BucketKind::Split => Ok(false),
      }
    }

    pub fn accepts(bucket: BucketId, token: AssetKind) -> bool {
      match Buckets::<T>::get(bucket).map(|info| info.kind) {
        Some(BucketKind::Generic { .. }) => Tokens::<T>::get(bucket).contains(&token),
        Some(BucketKind::Buyback { token: target }) => target == token,
        Some(BucketKind::Split) | None => false,
      }
    }

    fn rate(provider: ProviderId, token: AssetKind) -> Result<Balance, DispatchError> {
      T::Oracle::rate(provider, token).ok_or_else(|| Error::<T>::NoRate.into())
    }

    fn generic_reserves(bucket: BucketId, provider: ProviderId) -> Result<Balance, DispatchError> {
      Tokens::<T>::get(bucket)
        .iter()
        .try_fold(Balance::zero(), |total, entry| {
          let rate = Self::rate(provider, entry.target)?;
          let balance = T::Custody::balance_of(entry.target);
          let value = multiply_by_rational_with_rounding(rate, balance, UNIT, Rounding::Down)
            .unwrap_or(Balance::MAX);
          Ok(total.saturating_add(value))
        })
    }

    fn generic_want(
      bucket: BucketId,
      provider: ProviderId,
    ) -> Result<Option<AssetKind>, DispatchError> {
      Tokens::<T>::get(bucket).select_min(|token, points| {
        let rate = Self::rate(provider, *token)?;
        let balance = T::Custody::balance_of(*token);
        Ok(
          multiply_by_rational_with_rounding(rate, balance, points, Rounding::Down)
            .unwrap_or(Balance::MAX),
        )
      })
    }

    fn do_create(who: T::AccountId, kind: BucketKind) -> Result<BucketId, DispatchError> {
      let bucket = LastBucketId::<T>::get()
        .checked_add(1)
        .ok_or(Error::<T>::BucketIdOverflow)?;
      let account = Self::sovereign_account_id(bucket);
      ensure!(
        !BucketAccounts::<T>::contains_key(&account),
        Error::<T>::SovereignAccountCollision
      );
      LastBucketId::<T>::put(bucket);
      frame_system::Pallet::<T>::inc_providers(&account);
      Buckets::<T>::insert(
        bucket,
        BucketInfo {
          kind,
          account: account.clone(),
          management: ManagementState::new(who.clone()),
          parent: None,
        },
      );
      BucketAccounts::<T>::insert(&account, bucket);
      Self::deposit_event(Event::BucketCreated {
        bucket,
        kind,
        management: who,
        account,
      });
      Ok(bucket)
    }

    fn ensure_management(
      bucket: BucketId,
      who: &T::AccountId,
    ) -> Result<BucketInfoOf<T>, DispatchError> {
      let info = Buckets::<T>::get(bucket).ok_or(Error::<T>::UnknownBucket)?;
      info.management.ensure_management(who).map_err(Error::<T>::from)?;
      Ok(info)
    }

    fn ensure_generic_management(
      bucket: BucketId,
      who: &T::AccountId,
    ) -> Result<BucketInfoOf<T>, DispatchError> {
      let info = Self::ensure_management(bucket, who)?;
      ensure!(
        matches!(info.kind, BucketKind::Generic { .. }),
        Error::<T>::WrongVariant
      );
      Ok(info)
    }

    fn ensure_split_management(
      bucket: BucketId,
      who: &T::AccountId,
    ) -> Result<BucketInfoOf<T>, DispatchError> {
      let info = Self::ensure_management(bucket, who)?;
      ensure!(info.kind.is_split(), Error::<T>::WrongVariant);
      Ok(info)
    }

    /// Split buckets answer only to the router; the others only to their parent.
    pub(crate) fn do_convert(
      caller: &T::AccountId,
      bucket: BucketId,
      token: AssetKind,
      amount: Balance,
    ) -> DispatchResult {
      let info = Buckets::<T>::get(bucket).ok_or(Error::<T>::UnknownBucket)?;
      match info.kind {
        BucketKind::Split => {
          ensure!(caller == &T::Router::account(), Error::<T>::PermissionDenied);
          Self::distribute(bucket, &info.account, token, amount)
        }
        BucketKind::Generic { provider, .. } => {
          ensure!(info.parent.as_ref() == Some(caller), Error::<T>::PermissionDenied);
          if Tokens::<T>::get(bucket).contains(&token) {
            return Self::retain(bucket, token, amount);
          }
          let want = Self::generic_want(bucket, provider)?.ok_or(Error::<T>::NoTokens)?;
          Self::request_conversion(bucket, &info.account, token, amount, want)
        }
        BucketKind::Buyback { token: target } => {
          ensure!(info.parent.as_ref() == Some(caller), Error::<T>::PermissionDenied);
          if token == target {
            return Self::retain(bucket, token, amount);
          }
          Self::request_conversion(bucket, &info.account, token, amount, target)
        }
      }
    }

    fn retain(bucket: BucketId, token: AssetKind, amount: Balance) -> DispatchResult {
      log::debug!(
        target: LOG_TARGET,
        "bucket {} retains {} of {:?} in custody",
        bucket,
        amount,
        token
      );
      Self::deposit_event(Event::Retained {
        bucket,
        token,
        amount,
      });
      Ok(())
    }

    fn distribute(
      bucket: BucketId,
      account: &T::AccountId,
      token: AssetKind,
      amount: Balance,
    ) -> DispatchResult {
      let children = Children::<T>::get(bucket);
      ensure!(!children.is_empty(), Error::<T>::NoTargets);
      for (child, share) in children.split(amount) {
        if share.is_zero() {
          continue;
        }
        Self::do_convert(account, child, token, share)?;
        Self::deposit_event(Event::Distributed {
          bucket,
          child,
          token,
          amount: share,
        });
      }
      Ok(())
    }

    fn request_conversion(
      bucket: BucketId,
      account: &T::AccountId,
      from: AssetKind,
      amount: Balance,
      to: AssetKind,
    ) -> DispatchResult {
      let converter = T::Router::deploy_converter(account, from, to)?;
      let converter_account = T::Converters::account(converter).ok_or(Error::<T>::UnknownConverter)?;
      T::Custody::release(from, amount, &converter_account)?;
      T::Converters::convert(converter, account, from, amount, to)?;
      log::debug!(
        target: LOG_TARGET,
        "bucket {} sent {} of {:?} to converter {} for {:?}",
        bucket,
        amount,
        from,
        converter,
        to
      );
      Self::deposit_event(Event::ConversionRequested {
        bucket,
        from,
        to,
        amount,
        converter,
      });
      Ok(())
    }
  }

  impl<T: Config> AllocationUnit<T::AccountId> for Pallet<T> {
    fn exists(bucket: BucketId) -> bool {
      Buckets::<T>::contains_key(bucket)
    }

    fn bucket_of(who: &T::AccountId) -> Option<BucketId> {
      BucketAccounts::<T>::get(who)
    }

    fn account(bucket: BucketId) -> Option<T::AccountId> {
      Buckets::<T>::get(bucket).map(|info| info.account)
    }

    fn distributes(bucket: BucketId) -> bool {
      Buckets::<T>::get(bucket).is_some_and(|info| info.kind.is_split())
    }

    fn above_floor(bucket: BucketId) -> Result<bool, DispatchError> {
      Self::above_floor(bucket)
    }

    fn accepts(bucket: BucketId, token: AssetKind) -> bool {
      Self::accepts(bucket, token)
    }

    fn want(bucket: BucketId) -> Result<Option<AssetKind>, DispatchError> {
      Self::want(bucket)
    }

    fn convert(
      bucket: BucketId,
      caller: &T::AccountId,
      token: AssetKind,
      amount: Balance,
    ) -> DispatchResult {
      Self::do_convert(caller, bucket, token, amount)
    }
  }
}
