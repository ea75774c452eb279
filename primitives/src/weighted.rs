//! Points-weighted target sets.
//!
//! Shared by the generic bucket's token set and the split bucket's child set. Every
//! entry carries `points` in `(0, UNIT]`, targets are unique, and `total_points`
//! always equals the live sum. Removal swaps the last entry into the freed slot, so
//! callers address removals by the target's current index.

use crate::{params::UNIT, Balance};
use codec::{Decode, Encode, MaxEncodedLen};
use polkadot_sdk::sp_runtime::{traits::Get, BoundedVec};
use scale_info::TypeInfo;
use sp_arithmetic::{helpers_128bit::multiply_by_rational_with_rounding, Rounding};

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightedSetError {
  /// Points are zero or exceed `UNIT`
  PointsOutOfRange,
  AlreadyPresent,
  NotPresent,
  /// The supplied index does not hold the supplied target
  IndexMismatch,
  /// Capacity bound reached
  Full,
}

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen)]
pub struct WeightedTarget<T> {
  pub target: T,
  pub points: Balance,
}

#[derive(Decode, Encode, TypeInfo, MaxEncodedLen)]
#[scale_info(skip_type_params(S))]
pub struct WeightedSet<T, S: Get<u32>> {
  entries: BoundedVec<WeightedTarget<T>, S>,
  total_points: Balance,
}

impl<T, S: Get<u32>> Default for WeightedSet<T, S> {
  fn default() -> Self {
    Self {
      entries: BoundedVec::default(),
      total_points: 0,
    }
  }
}

impl<T: Clone, S: Get<u32>> Clone for WeightedSet<T, S> {
  fn clone(&self) -> Self {
    Self {
      entries: self.entries.clone(),
      total_points: self.total_points,
    }
  }
}

impl<T: PartialEq, S: Get<u32>> PartialEq for WeightedSet<T, S> {
  fn eq(&self, other: &Self) -> bool {
    self.entries == other.entries && self.total_points == other.total_points
  }
}

impl<T: Eq, S: Get<u32>> Eq for WeightedSet<T, S> {}

impl<T: core::fmt::Debug, S: Get<u32>> core::fmt::Debug for WeightedSet<T, S> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("WeightedSet")
      .field("entries", &self.entries)
      .field("total_points", &self.total_points)
      .finish()
  }
}

fn ensure_points(points: Balance) -> Result<(), WeightedSetError> {
  if points == 0 || points > UNIT {
    return Err(WeightedSetError::PointsOutOfRange);
  }
  Ok(())
}

impl<T: Clone + PartialEq, S: Get<u32>> WeightedSet<T, S> {
  pub fn len(&self) -> u32 {
    self.entries.len() as u32
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn total_points(&self) -> Balance {
    self.total_points
  }

  pub fn position(&self, target: &T) -> Option<u32> {
    self
      .entries
      .iter()
      .position(|entry| &entry.target == target)
      .map(|index| index as u32)
  }

  pub fn contains(&self, target: &T) -> bool {
    self.position(target).is_some()
  }

  /// Points assigned to `target`, zero when absent.
  pub fn points(&self, target: &T) -> Balance {
    self
      .entries
      .iter()
      .find(|entry| &entry.target == target)
      .map_or(0, |entry| entry.points)
  }

  pub fn get(&self, index: u32) -> Option<&WeightedTarget<T>> {
    self.entries.get(index as usize)
  }

  pub fn iter(&self) -> impl Iterator<Item = &WeightedTarget<T>> {
    self.entries.iter()
  }

  pub fn targets(&self) -> Vec<T> {
    self.entries.iter().map(|entry| entry.target.clone()).collect()
  }

  /// Appends `target` and returns its index.
  pub fn add(&mut self, target: T, points: Balance) -> Result<u32, WeightedSetError> {
    ensure_points(points)?;
    if self.contains(&target) {
      return Err(WeightedSetError::AlreadyPresent);
    }
    let index = self.len();
    self
      .entries
      .try_push(WeightedTarget { target, points })
      .map_err(|_| WeightedSetError::Full)?;
    self.total_points = self.total_points.saturating_add(points);
    Ok(index)
  }

  /// Removes `target`, which must currently sit at `index`. The last entry moves
  /// into the vacated slot.
  pub fn remove(&mut self, target: &T, index: u32) -> Result<Balance, WeightedSetError> {
    if !self.contains(target) {
      return Err(WeightedSetError::NotPresent);
    }
    match self.entries.get(index as usize) {
      Some(entry) if &entry.target == target => {}
      _ => return Err(WeightedSetError::IndexMismatch),
    }
    let removed = self.entries.swap_remove(index as usize);
    self.total_points = self.total_points.saturating_sub(removed.points);
    Ok(removed.points)
  }

  /// Replaces the points of `target` and returns the previous value.
  pub fn set_points(&mut self, target: &T, points: Balance) -> Result<Balance, WeightedSetError> {
    ensure_points(points)?;
    let entry = self
      .entries
      .iter_mut()
      .find(|entry| &entry.target == target)
      .ok_or(WeightedSetError::NotPresent)?;
    let previous = core::mem::replace(&mut entry.points, points);
    self.total_points = self.total_points.saturating_sub(previous).saturating_add(points);
    Ok(previous)
  }

  /// Splits `amount` proportionally to points. Every entry but the last receives
  /// `floor(amount * points / total_points)`; the last receives the remainder, so
  /// the shares always sum to `amount`.
  pub fn split(&self, amount: Balance) -> Vec<(T, Balance)> {
    let last = self.entries.len().saturating_sub(1);
    let mut distributed: Balance = 0;
    self
      .entries
      .iter()
      .enumerate()
      .map(|(index, entry)| {
        let share = if index == last {
          amount.saturating_sub(distributed)
        } else {
          multiply_by_rational_with_rounding(amount, entry.points, self.total_points, Rounding::Down)
            .unwrap_or_default()
        };
        distributed = distributed.saturating_add(share);
        (entry.target.clone(), share)
      })
      .collect()
  }

  /// Returns the target with the lowest `value_of(target, points)`. Earlier entries
  /// win ties. Errors from `value_of` abort the selection.
  pub fn select_min<E>(
    &self,
    mut value_of: impl FnMut(&T, Balance) -> Result<Balance, E>,
  ) -> Result<Option<T>, E> {
    let mut best: Option<(&T, Balance)> = None;
    for entry in self.entries.iter() {
      let value = value_of(&entry.target, entry.points)?;
      if best.map_or(true, |(_, lowest)| value < lowest) {
        best = Some((&entry.target, value));
      }
    }
    Ok(best.map(|(target, _)| target.clone()))
  }
}
