//! Command-line client for the leave-management API: signs employees in,
//! shows balances and requests, validates and submits new requests, and lets
//! managers decide on pending ones. Business-day arithmetic lives in
//! `leavedesk_core`.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;
