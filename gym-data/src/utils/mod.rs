//! Utility Module

pub mod logger;
pub mod time;
pub mod validation;
