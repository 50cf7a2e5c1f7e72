//! Vertex-Ring: Knoten einer editierbaren Spline und Traversierungs-Modus.

use glam::DVec2;

/// Stabiler Verweis auf einen Vertex in der Arena einer `EditableSpline`.
///
/// Bleibt gültig, bis der Vertex entfernt wird. Der Slot kann danach neu
/// belegt werden; die Generation unterscheidet den neuen Vertex vom alten,
/// sodass veraltete IDs ins Leere zeigen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl VertexId {
    /// Roher Arena-Index
    pub fn index(self) -> usize {
        self.index
    }

    /// Belegungs-Generation des Slots
    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Verhalten beim Erreichen der Ring-Grenze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMode {
    /// Endlos um den Ring laufen (Aufrufer muss selbst begrenzen)
    Loop,
    /// Am Startpunkt anhalten: jeder Vertex genau einmal
    #[default]
    NoLoop,
}

/// Ein Vertex im doppelt verketteten Ring
#[derive(Debug, Clone, PartialEq)]
pub struct SplineVertex {
    /// Position des Vertex
    pub point: DVec2,
    /// Nachfolger im Ring
    pub(crate) next: VertexId,
    /// Vorgänger im Ring
    pub(crate) prev: VertexId,
}

impl SplineVertex {
    /// Erstellt einen Vertex, der auf sich selbst zeigt (Ring der Länge 1)
    pub(crate) fn detached(id: VertexId, point: DVec2) -> Self {
        Self {
            point,
            next: id,
            prev: id,
        }
    }

    /// Nachfolger-ID (ohne Ring-Grenze)
    pub fn next_id(&self) -> VertexId {
        self.next
    }

    /// Vorgänger-ID (ohne Ring-Grenze)
    pub fn prev_id(&self) -> VertexId {
        self.prev
    }
}
