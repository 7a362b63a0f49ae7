//! External system integrations for bibexport.
//!
//! - [`alma`] - Alma Bibs API client behind the [`alma::BibSource`] trait
//! - [`idlist`] - MMS ID list reader (CSV)
//!
//! The export coordinator only depends on `BibSource`, so tests can feed it
//! records without a server:
//!
//! ```rust,no_run
//! use bibexport::adapters::alma::AlmaClient;
//! use bibexport::adapters::idlist::read_mms_ids;
//! use bibexport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("bibexport.toml")?;
//! let client = AlmaClient::new(&config.alma)?;
//! let ids = read_mms_ids("mms_ids.csv")?;
//! # Ok(())
//! # }
//! ```

pub mod alma;
pub mod idlist;
