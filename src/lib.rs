//! Skyview Library
//!
//! Unit conversion, condition classification and advisory text for weather
//! observations, plus the clients and local stores the CLI is built from.

pub mod advice;
pub mod app;
pub mod auth;
pub mod cli;
pub mod conditions;
pub mod data;
pub mod describe;
pub mod preferences;
pub mod report;
pub mod storage;
pub mod units;
