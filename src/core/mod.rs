//! Gateway-facing data shapes and adapter configuration

pub mod config;
pub mod event;
pub mod models;
