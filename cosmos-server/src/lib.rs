//! Interplanetary route planner server.
//!
//! Fetches priced legs between planets, finds multi-leg routes between two
//! planets, and books them against the price list they were quoted from.

pub mod cache;
pub mod config;
pub mod domain;
pub mod feed;
pub mod planner;
pub mod service;
pub mod store;
pub mod web;
