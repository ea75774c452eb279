//! Prioritized bucket registry.
//!
//! A singly linked list threaded through `LinkedBuckets`, anchored at
//! `SENTINEL_BUCKET` which is both head and tail. Pulls walk it front to back.

use crate::{Config, Error, LinkedBuckets, NumBuckets, Pallet};
use alloc::vec::Vec;
use frame::prelude::*;
use primitives::{AllocationUnit, BucketId, params::SENTINEL_BUCKET};

impl<T: Config> Pallet<T> {
  /// Successor of `bucket`, `None` when it is not linked.
  pub fn next_bucket(bucket: BucketId) -> Option<BucketId> {
    match LinkedBuckets::<T>::get(bucket) {
      Some(next) => Some(next),
      None if bucket == SENTINEL_BUCKET => Some(SENTINEL_BUCKET),
      None => None,
    }
  }

  pub fn num_buckets() -> u32 {
    NumBuckets::<T>::get()
  }

  pub fn is_bucket(bucket: BucketId) -> bool {
    bucket != SENTINEL_BUCKET && LinkedBuckets::<T>::contains_key(bucket)
  }

  /// Registered buckets in priority order.
  pub fn buckets() -> Vec<BucketId> {
    let count = NumBuckets::<T>::get() as usize;
    let mut buckets = Vec::with_capacity(count);
    let mut cursor = Self::next_bucket(SENTINEL_BUCKET).unwrap_or(SENTINEL_BUCKET);
    while cursor != SENTINEL_BUCKET && buckets.len() < count {
      buckets.push(cursor);
      cursor = LinkedBuckets::<T>::get(cursor).unwrap_or(SENTINEL_BUCKET);
    }
    buckets
  }

  /// Insert `bucket` right after `predecessor`.
  pub(crate) fn link(bucket: BucketId, predecessor: BucketId) -> DispatchResult {
    ensure!(
      bucket != SENTINEL_BUCKET && !LinkedBuckets::<T>::contains_key(bucket),
      Error::<T>::AlreadyPresent
    );
    ensure!(T::Buckets::exists(bucket), Error::<T>::UnknownBucket);
    ensure!(
      predecessor == SENTINEL_BUCKET || Self::is_bucket(predecessor),
      Error::<T>::UnknownPredecessor
    );
    let next = Self::next_bucket(predecessor).unwrap_or(SENTINEL_BUCKET);
    LinkedBuckets::<T>::insert(predecessor, bucket);
    LinkedBuckets::<T>::insert(bucket, next);
    NumBuckets::<T>::mutate(|count| *count = count.saturating_add(1));
    Ok(())
  }

  pub(crate) fn unlink(bucket: BucketId, predecessor: BucketId) -> DispatchResult {
    ensure!(bucket != SENTINEL_BUCKET, Error::<T>::NotPresent);
    ensure!(
      LinkedBuckets::<T>::get(predecessor) == Some(bucket),
      Error::<T>::WrongPredecessor
    );
    let next = LinkedBuckets::<T>::take(bucket).unwrap_or(SENTINEL_BUCKET);
    LinkedBuckets::<T>::insert(predecessor, next);
    NumBuckets::<T>::mutate(|count| *count = count.saturating_sub(1));
    Ok(())
  }

  /// Swap `old` for `new` in place.
  pub(crate) fn relink(old: BucketId, new: BucketId, predecessor: BucketId) -> DispatchResult {
    ensure!(old != SENTINEL_BUCKET, Error::<T>::NotPresent);
    ensure!(
      LinkedBuckets::<T>::get(predecessor) == Some(old),
      Error::<T>::WrongPredecessor
    );
    ensure!(
      new != SENTINEL_BUCKET && !LinkedBuckets::<T>::contains_key(new),
      Error::<T>::AlreadyPresent
    );
    ensure!(T::Buckets::exists(new), Error::<T>::UnknownBucket);
    let next = LinkedBuckets::<T>::take(old).unwrap_or(SENTINEL_BUCKET);
    LinkedBuckets::<T>::insert(predecessor, new);
    LinkedBuckets::<T>::insert(new, next);
    Ok(())
  }
}
