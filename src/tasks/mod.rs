//! Background Tasks Module
//!
//! Contains tasks that drive periodic store maintenance.
//!
//! # Tasks
//! - Expiration sweep: calls `Store::expire_cache` at a fixed interval

mod expire;

pub use expire::spawn_expire_task;
