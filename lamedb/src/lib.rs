//! Parser and lookup catalog for enigma2 `lamedb` files.
//!
//! A lamedb file lists the transponders (tunable carriers) and services
//! (channels) known to a DVB receiver. This crate parses it into a
//! [`Catalog`] and resolves channel references found elsewhere, such as
//! bouquet entries, against it.
//!
//! # Format
//!
//! ```text
//! eDVB services /4/
//! transponders
//! 00c00000:0437:0001
//!     s 11778000:27500000:1:3:192:2:0
//! /
//! end
//! services
//! 6d66:00c00000:0437:0001:1:0
//! Das Erste HD
//! p:ARD,c:000065
//! end
//! ```
//!
//! # Example
//!
//! ```rust
//! use lamedb::{Catalog, ServiceReference};
//!
//! let text = "eDVB services /4/\n\
//!             transponders\n\
//!             00c00000:0437:0001\n\
//!             s11778000:27500000:1:3:192:2:0\n\
//!             /\n\
//!             end\n\
//!             services\n\
//!             6d66:00c00000:0437:0001:1:0\n\
//!             Das Erste HD\n\
//!             p:ARD\n\
//!             end\n";
//! let catalog = Catalog::load(text.as_bytes()).unwrap();
//!
//! let key = catalog.get_key_by_package_service_name("ard", "das erste hd").unwrap();
//! assert_eq!(key, "00C00000#6D66#0437");
//!
//! let reference = ServiceReference::parse("#SERVICE 1:0:1:6D66:437:1:C00000:0:0:0:").unwrap();
//! let (service, transponder) = catalog.resolve_reference(&reference).unwrap();
//! assert_eq!(service.name, "Das Erste HD");
//! assert_eq!(transponder.unwrap().signature().as_deref(), Some("192,11778000,V,3/4"));
//! ```

pub mod catalog;
pub mod error;
pub mod header;
pub mod line_source;
pub mod name_index;
pub mod reference;
pub mod service;
pub mod soundex;
pub mod transponder;
pub mod types;
pub mod version;

pub use catalog::{Catalog, ExportRow};
pub use error::{ParseError, ReferenceError, Result};
pub use line_source::LineSource;
pub use name_index::{NameIndex, ProviderEntry};
pub use reference::{Bouquet, ServiceReference, SkippedEntry};
pub use service::{Service, NO_PACKAGE, NO_PROVIDER};
pub use transponder::Transponder;
pub use types::{DeliverySystem, Fec, Polarization, ServiceType};
pub use version::FormatVersion;
