//! XML Import/Export für Zonen-Splines.
//!
//! `element` stellt einen kleinen Elementbaum bereit, `marshaller` die
//! Punkt-Konvertierung. `parser`/`writer` arbeiten auf XML-Text.

pub mod element;
pub mod marshaller;
pub mod parser;
pub mod writer;

pub use element::{XmlElement, XmlNode};
pub use marshaller::{XmlMarshaller, XmlUnmarshaller};
pub use parser::{parse_zone_spline, parse_zone_splines};
pub use writer::write_zone_spline;
