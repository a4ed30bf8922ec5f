//! Utilities shared by the Buzzline packages.

pub mod logger;
pub mod time;
