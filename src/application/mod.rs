//! Application layer orchestrating the ledger.
//!
//! This module defines `CharityFund`, the entry point for creating, editing and removing
//! projects and donations. It validates requests, runs the allocation engine and persists
//! the results through the storage ports.

pub mod command;
pub mod fund;
pub mod validators;
