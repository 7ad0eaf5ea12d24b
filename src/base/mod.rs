//! Core components and types for feishu-notify.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Mention resolution for assignees.
//! - Common types, wire payloads and result handling.

pub mod config;
pub mod mention;
pub mod types;
