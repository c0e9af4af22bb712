// ABOUTME: Library module for mysql-admin-tools
// ABOUTME: Exports all core functionality for use in binary and tests

pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod maintenance;
pub mod migration;
pub mod mysql;
pub mod process;
pub mod utils;
