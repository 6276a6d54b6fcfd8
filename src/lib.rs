//! Backend for the AlgoPrep code analyzer: accepts source code, runs it
//! through an AI gateway for analysis and interview prep material, and
//! persists the structured result for later browsing.

pub mod ai;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod persist;
pub mod routes;
pub mod state;
