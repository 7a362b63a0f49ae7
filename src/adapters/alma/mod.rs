//! Alma Bibs API integration
//!
//! [`BibSource`] is the seam the export coordinator depends on;
//! [`AlmaClient`] is its HTTP implementation.

pub mod client;
pub mod source;

pub use client::{record_from_response, AlmaClient};
pub use source::{BibSource, FetchReport, ProgressFn};
