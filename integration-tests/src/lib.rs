//! Integration tests for the treasury router.
//!
//! Every router pallet is wired into one test runtime against a fake oracle and a
//! fake auction mechanism that settles proceeds into custody on demand.

#![cfg(test)]

mod runtime;
