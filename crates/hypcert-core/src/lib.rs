#![deny(missing_docs)]
#![doc = "Core error and provenance types shared by the hypcert crates."]

pub mod errors;
pub mod provenance;

pub use errors::{ErrorInfo, HvError};
pub use provenance::{CertificateProvenance, SchemaVersion};
