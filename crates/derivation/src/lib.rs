//! Derivation Stage
//!
//! Turns raw patient records into the enriched table: parses the raw date
//! columns and computes ages and survival time in years. Also offers an
//! audit of categorical values against the data model.

mod dates;
mod derive;
mod error;
mod validator;

pub use dates::{parse_date, years_between, DATE_FORMAT, DAYS_PER_YEAR};
pub use derive::{derive, derive_record};
pub use error::DerivationError;
pub use validator::{DomainReport, DomainValidator, DomainViolation};
