//! Shared utilities and error types for the staking contract suite.
//!
//! This crate provides:
//! - [`CommonError`] — error codes shared across contracts.
//! - [`reentrancy`] — the contract-wide call guard held across outbound
//!   token transfers.
//! - Storage TTL constants shared by every contract.
//!
//! Contract-specific errors can extend the range starting at code **100** and
//! above, ensuring no collisions with the common set.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod reentrancy;

// ── TTL convention ───────────────────────────────────────────────────────────

/// Remaining ledgers below which a storage entry's TTL is bumped.
pub const TTL_THRESHOLD: u32 = 5_184_000;
/// Ledgers an entry's TTL is extended to when bumped.
pub const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by every contract in the workspace.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 40 – 49 | Contract state                 |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Contract state (40–49) ───────────────────────────────
    /// A guarded entry point was invoked while another guarded call on the
    /// same contract had not yet returned.
    ReentrantCall = 41,
}
