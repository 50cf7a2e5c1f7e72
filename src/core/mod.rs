//! Core-Domänentypen: Vertex-Ring, editierbare Spline, serialisierbarer Snapshot.

pub mod editable_spline;
pub mod serializable_spline;
pub mod spline_vertex;

pub use editable_spline::{EditableSpline, VertexIter};
pub use serializable_spline::{SerializableSpline, POINT_TAG};
pub use spline_vertex::{SplineVertex, TraversalMode, VertexId};
