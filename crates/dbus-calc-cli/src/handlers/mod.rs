//! Command handlers

pub mod call;
pub mod config;
pub mod request;
