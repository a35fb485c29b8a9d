//! Shared fixtures and a spawnable test server.

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
