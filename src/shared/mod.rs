//! Geteilte Typen: Konfiguration und layer-neutrale Geometrie-Helfer.

pub mod options;
pub mod spline_geometry;

pub use options::{PointDecodePolicy, SplineXmlOptions, CONFIG_FILE_NAME, XML_INDENT_WIDTH};
pub use spline_geometry::{closed_length, signed_area, Winding};
