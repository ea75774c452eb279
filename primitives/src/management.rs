//! Two-phase management transfer.
//!
//! `Stable` is `pending == None`; `PendingTransfer` carries the proposed account and
//! the first block at which it may accept. A preset offer (`not_before == None`) is
//! accepted without waiting and is consumed by that acceptance.

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_arithmetic::traits::Saturating;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManagementError {
  /// Caller is not the current management
  NotManagement,
  NoPendingManagement,
  /// Caller is not the pending management
  NotPendingManagement,
  /// The transfer delay has not elapsed yet
  TooEarly,
}

#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen)]
pub struct PendingManagement<AccountId, BlockNumber> {
  pub account: AccountId,
  pub not_before: Option<BlockNumber>,
}

#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen)]
pub struct ManagementState<AccountId, BlockNumber> {
  pub management: AccountId,
  pub pending: Option<PendingManagement<AccountId, BlockNumber>>,
}

impl<AccountId, BlockNumber> ManagementState<AccountId, BlockNumber>
where
  AccountId: Clone + PartialEq,
  BlockNumber: Copy + PartialOrd + Saturating,
{
  pub fn new(management: AccountId) -> Self {
    Self {
      management,
      pending: None,
    }
  }

  /// Starts with `pending` already offered; its first acceptance skips the delay.
  pub fn with_preset(management: AccountId, pending: AccountId) -> Self {
    Self {
      management,
      pending: Some(PendingManagement {
        account: pending,
        not_before: None,
      }),
    }
  }

  pub fn is_management(&self, who: &AccountId) -> bool {
    &self.management == who
  }

  pub fn ensure_management(&self, who: &AccountId) -> Result<(), ManagementError> {
    if !self.is_management(who) {
      return Err(ManagementError::NotManagement);
    }
    Ok(())
  }

  pub fn pending_management(&self) -> Option<&AccountId> {
    self.pending.as_ref().map(|pending| &pending.account)
  }

  /// Records `new` as pending, replacing any earlier offer. Returns the first block
  /// at which `new` may accept.
  pub fn propose(
    &mut self,
    caller: &AccountId,
    new: AccountId,
    now: BlockNumber,
    delay: BlockNumber,
  ) -> Result<BlockNumber, ManagementError> {
    self.ensure_management(caller)?;
    let not_before = now.saturating_add(delay);
    self.pending = Some(PendingManagement {
      account: new,
      not_before: Some(not_before),
    });
    Ok(not_before)
  }

  /// Completes the transfer and returns the previous management.
  pub fn accept(&mut self, caller: &AccountId, now: BlockNumber) -> Result<AccountId, ManagementError> {
    let pending = self.pending.as_ref().ok_or(ManagementError::NoPendingManagement)?;
    if &pending.account != caller {
      return Err(ManagementError::NotPendingManagement);
    }
    if let Some(not_before) = pending.not_before {
      if now < not_before {
        return Err(ManagementError::TooEarly);
      }
    }
    self.pending = None;
    Ok(core::mem::replace(&mut self.management, caller.clone()))
  }
}
