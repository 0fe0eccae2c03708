//! Core domain logic for tablegate.
//!
//! Everything in this crate is pure: event/request models, the filter
//! expression compiler, the read planner, and the store abstraction the
//! backends implement. Nothing here talks to AWS directly.

pub mod api;
pub mod filter;
pub mod item;
pub mod plan;
pub mod storage;
