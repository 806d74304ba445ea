// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod identity;
pub mod ledger;

pub use identity::{IdentityAssertion, IdentityClient};
pub use ledger::LocationLedger;
