//! Error handling utilities
//!
//! A single closed error enum plus the kind taxonomy used to classify it.

pub mod error;
pub mod kind;


pub use error::*;
pub use kind::ErrorKind;
