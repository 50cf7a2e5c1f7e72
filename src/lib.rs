//! Zone Spline Library.
//! Editierbare und serialisierbare Spline-Geometrie für Zonen-Grenzen.

pub mod core;
pub mod shared;
pub mod xml;

pub use core::{
    EditableSpline, SerializableSpline, SplineVertex, TraversalMode, VertexId, VertexIter,
};
pub use shared::{PointDecodePolicy, SplineXmlOptions, Winding};
pub use xml::{parse_zone_spline, parse_zone_splines, write_zone_spline};
pub use xml::{XmlElement, XmlMarshaller, XmlNode, XmlUnmarshaller};
