//! API client module

pub mod client;
pub mod products;
pub mod response;
pub mod services;

pub use client::{FastlyClient, HttpError};
pub use response::{DdosProtectionOutput, EnableOutput};
