// src/lib.rs

//! leettrack: data access for company-tagged interview question tracking

pub mod cache;
pub mod config;
pub mod error;
pub mod fallback;
pub mod models;
pub mod services;
pub mod storage;
pub mod transport;
pub mod utils;
