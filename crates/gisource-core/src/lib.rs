//! # GISource Core
//! Shared foundation for the GISource automation workspace: configuration,
//! error type, domain types, static lexicons, the group-member directory,
//! and the collaborator trait contracts.

pub mod config;
pub mod error;
pub mod lexicon;
pub mod members;
pub mod traits;
pub mod types;

pub use config::GisourceConfig;
pub use error::{GisourceError, Result};
