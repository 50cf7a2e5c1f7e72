//! Die editierbare Spline: ein Ring aus Vertices in einer Arena.
//!
//! Vertices werden über stabile `VertexId`s (Index + Generation) adressiert,
//! `next`/`prev` sind Verweise in dieselbe Arena. Der Ring ist immer geschlossen: für jeden
//! Vertex `v` gilt `v.next.prev == v` und `v.prev.next == v`.

use super::{SerializableSpline, SplineVertex, TraversalMode, VertexId};
use glam::DVec2;

/// Slot der Arena; die Generation steigt bei jedem Entfernen
#[derive(Debug, Clone, Default)]
struct VertexSlot {
    generation: u32,
    vertex: Option<SplineVertex>,
}

/// Live-Repräsentation einer Zonen-Grenze, die vom Editor verändert wird
#[derive(Debug, Clone, Default)]
pub struct EditableSpline {
    /// Arena aller Vertices (`vertex == None` = freier Slot)
    slots: Vec<VertexSlot>,
    /// Wiederverwendbare Slots entfernter Vertices
    free_slots: Vec<usize>,
    /// Einstiegspunkt der Traversierung (Ring-Grenze für `NoLoop`)
    first: Option<VertexId>,
    /// Anzahl belegter Slots
    len: usize,
}

impl EditableSpline {
    /// Erstellt eine leere Spline
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut einen Ring aus einem Snapshot auf (Punkte in gespeicherter Reihenfolge)
    pub fn from_serializable(spline: &SerializableSpline) -> Self {
        let mut editable = Self::new();
        for &point in spline.points() {
            editable.append_vertex(point);
        }
        editable
    }

    /// Gibt die Anzahl der Vertices zurück
    pub fn vertex_count(&self) -> usize {
        self.len
    }

    /// Prüft ob der Ring leer ist
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Erster Vertex des Rings (Einstiegspunkt der Traversierung)
    pub fn first_vertex(&self) -> Option<VertexId> {
        self.first
    }

    /// Letzter Vertex des Rings (Vorgänger des ersten)
    pub fn last_vertex(&self) -> Option<VertexId> {
        let first = self.first?;
        self.vertex(first).map(|v| v.prev)
    }

    /// Liest einen Vertex. Veraltete IDs liefern `None`.
    pub fn vertex(&self, id: VertexId) -> Option<&SplineVertex> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.vertex.as_ref())
    }

    /// Position eines Vertex
    pub fn point(&self, id: VertexId) -> Option<DVec2> {
        self.vertex(id).map(|v| v.point)
    }

    /// Verschiebt einen Vertex. Gibt `false` zurück, wenn die ID veraltet ist.
    pub fn set_point(&mut self, id: VertexId, point: DVec2) -> bool {
        let vertex = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.vertex.as_mut());
        match vertex {
            Some(vertex) => {
                vertex.point = point;
                true
            }
            None => false,
        }
    }

    /// Einzelschritt vorwärts.
    ///
    /// Mit `NoLoop` endet der Schritt vom letzten Vertex an der Ring-Grenze (`None`).
    pub fn next_vertex(&self, id: VertexId, mode: TraversalMode) -> Option<VertexId> {
        let next = self.vertex(id)?.next;
        if mode == TraversalMode::NoLoop && Some(next) == self.first {
            return None;
        }
        Some(next)
    }

    /// Einzelschritt rückwärts.
    ///
    /// Mit `NoLoop` endet der Schritt vom ersten Vertex an der Ring-Grenze (`None`).
    pub fn prev_vertex(&self, id: VertexId, mode: TraversalMode) -> Option<VertexId> {
        let vertex = self.vertex(id)?;
        if mode == TraversalMode::NoLoop && Some(id) == self.first {
            return None;
        }
        Some(vertex.prev)
    }

    /// Iterator ab dem ersten Vertex
    pub fn vertices(&self, mode: TraversalMode) -> VertexIter<'_> {
        self.vertices_from(self.first, mode)
    }

    /// Iterator ab einem beliebigen Vertex.
    ///
    /// Mit `NoLoop` endet die Traversierung, bevor `start` erneut erreicht wird.
    /// Ein fehlender oder veralteter Startpunkt ergibt eine leere Folge.
    pub fn vertices_from(&self, start: Option<VertexId>, mode: TraversalMode) -> VertexIter<'_> {
        VertexIter {
            spline: self,
            start,
            current: start,
            mode,
        }
    }

    /// Alle Segmente des geschlossenen Rings als (Start, Ende)-Paare.
    ///
    /// Weniger als zwei Vertices ergeben keine Segmente.
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let has_segments = self.len >= 2;
        self.vertices(TraversalMode::NoLoop)
            .filter(move |_| has_segments)
            .filter_map(move |(_, vertex)| {
                let next = self.vertex(vertex.next)?;
                Some((vertex.point, next.point))
            })
    }

    /// Prüft ob der Ring mindestens `count` Segmente hat
    pub fn has_at_least_segments(&self, count: usize) -> bool {
        self.segments().take(count).count() == count
    }

    /// Punkte in Ring-Reihenfolge (ohne Umkehrung)
    pub fn to_polygon(&self) -> Vec<DVec2> {
        self.vertices(TraversalMode::NoLoop)
            .map(|(_, vertex)| vertex.point)
            .collect()
    }

    /// Hängt einen Vertex am Ende des Rings an (vor dem ersten Vertex)
    pub fn append_vertex(&mut self, point: DVec2) -> VertexId {
        match self.first {
            Some(first) => {
                let last = self.slot(first).prev;
                self.link_after(last, point)
            }
            None => {
                let id = self.allocate(point);
                self.first = Some(id);
                id
            }
        }
    }

    /// Fügt einen Vertex hinter `id` ein
    pub fn insert_after(&mut self, id: VertexId, point: DVec2) -> Option<VertexId> {
        self.vertex(id)?;
        Some(self.link_after(id, point))
    }

    /// Fügt einen Vertex vor `id` ein.
    ///
    /// Der erste Vertex bleibt erster: vor ihm einzufügen hängt am Ende an.
    pub fn insert_before(&mut self, id: VertexId, point: DVec2) -> Option<VertexId> {
        let prev = self.vertex(id)?.prev;
        Some(self.link_after(prev, point))
    }

    /// Entfernt einen Vertex und schließt den Ring wieder.
    ///
    /// Wird der erste Vertex entfernt, rückt sein Nachfolger nach.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<DVec2> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let removed = slot.vertex.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_slots.push(id.index);
        self.len -= 1;

        if removed.next == id {
            self.first = None;
        } else {
            self.slot_mut(removed.prev).next = removed.next;
            self.slot_mut(removed.next).prev = removed.prev;
            if self.first == Some(id) {
                self.first = Some(removed.next);
            }
        }

        debug_assert!(self.ring_is_consistent());
        Some(removed.point)
    }

    /// Prüft die Ring-Invariante (doppelt verkettet, zyklisch, alle Vertices erreichbar)
    pub fn ring_is_consistent(&self) -> bool {
        let Some(first) = self.first else {
            return self.len == 0;
        };

        let mut visited = 0usize;
        let mut current = first;
        loop {
            let Some(vertex) = self.vertex(current) else {
                return false;
            };
            match self.vertex(vertex.next) {
                Some(next) if next.prev == current => {}
                _ => return false,
            }
            visited += 1;
            if visited > self.len {
                return false;
            }
            current = vertex.next;
            if current == first {
                break;
            }
        }

        visited == self.len
    }

    fn link_after(&mut self, prev: VertexId, point: DVec2) -> VertexId {
        let next = self.slot(prev).next;
        let id = self.allocate(point);

        {
            let vertex = self.slot_mut(id);
            vertex.prev = prev;
            vertex.next = next;
        }
        self.slot_mut(prev).next = id;
        self.slot_mut(next).prev = id;

        debug_assert!(self.ring_is_consistent());
        id
    }

    fn allocate(&mut self, point: DVec2) -> VertexId {
        self.len += 1;
        match self.free_slots.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                let id = VertexId {
                    index,
                    generation: slot.generation,
                };
                slot.vertex = Some(SplineVertex::detached(id, point));
                id
            }
            None => {
                let id = VertexId {
                    index: self.slots.len(),
                    generation: 0,
                };
                self.slots.push(VertexSlot {
                    generation: 0,
                    vertex: Some(SplineVertex::detached(id, point)),
                });
                id
            }
        }
    }

    // Nur mit IDs aus dem Ring selbst aufrufen (Invariante garantiert belegte Slots)
    fn slot(&self, id: VertexId) -> &SplineVertex {
        match &self.slots[id.index].vertex {
            Some(vertex) => vertex,
            None => unreachable!("Ring verweist auf freien Slot {}", id.index),
        }
    }

    fn slot_mut(&mut self, id: VertexId) -> &mut SplineVertex {
        match &mut self.slots[id.index].vertex {
            Some(vertex) => vertex,
            None => unreachable!("Ring verweist auf freien Slot {}", id.index),
        }
    }
}

/// Lazy Traversierung entlang der `next`-Verweise
#[derive(Debug, Clone)]
pub struct VertexIter<'a> {
    spline: &'a EditableSpline,
    start: Option<VertexId>,
    current: Option<VertexId>,
    mode: TraversalMode,
}

impl<'a> Iterator for VertexIter<'a> {
    type Item = (VertexId, &'a SplineVertex);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let Some(vertex) = self.spline.vertex(id) else {
            self.current = None;
            return None;
        };

        self.current = match self.mode {
            TraversalMode::NoLoop if Some(vertex.next) == self.start => None,
            _ => Some(vertex.next),
        };

        Some((id, vertex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (EditableSpline, [VertexId; 3]) {
        let mut spline = EditableSpline::new();
        let a = spline.append_vertex(DVec2::new(0.0, 0.0));
        let b = spline.append_vertex(DVec2::new(1.0, 0.0));
        let c = spline.append_vertex(DVec2::new(1.0, 1.0));
        (spline, [a, b, c])
    }

    #[test]
    fn test_empty_spline_yields_nothing() {
        let spline = EditableSpline::new();
        assert!(spline.is_empty());
        assert_eq!(spline.first_vertex(), None);
        assert_eq!(spline.last_vertex(), None);
        assert_eq!(spline.vertices(TraversalMode::NoLoop).count(), 0);
        assert_eq!(spline.vertices(TraversalMode::Loop).count(), 0);
        assert!(spline.ring_is_consistent());
    }

    #[test]
    fn test_single_vertex_links_to_itself() {
        let mut spline = EditableSpline::new();
        let id = spline.append_vertex(DVec2::new(3.0, 4.0));

        let vertex = spline.vertex(id).expect("Vertex erwartet");
        assert_eq!(vertex.next_id(), id);
        assert_eq!(vertex.prev_id(), id);
        assert_eq!(spline.vertices(TraversalMode::NoLoop).count(), 1);
        assert_eq!(spline.next_vertex(id, TraversalMode::NoLoop), None);
        assert_eq!(spline.next_vertex(id, TraversalMode::Loop), Some(id));
    }

    #[test]
    fn test_noloop_visits_each_vertex_once_in_ring_order() {
        let (spline, [a, b, c]) = triangle();
        let ids: Vec<VertexId> = spline
            .vertices(TraversalMode::NoLoop)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_noloop_from_middle_wraps_once() {
        let (spline, [a, b, c]) = triangle();
        let ids: Vec<VertexId> = spline
            .vertices_from(Some(b), TraversalMode::NoLoop)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![b, c, a]);
    }

    #[test]
    fn test_loop_cycles_until_caller_stops() {
        let (spline, [a, b, c]) = triangle();
        let ids: Vec<VertexId> = spline
            .vertices(TraversalMode::Loop)
            .take(7)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![a, b, c, a, b, c, a]);
    }

    #[test]
    fn test_single_steps_respect_ring_boundary() {
        let (spline, [a, b, c]) = triangle();

        assert_eq!(spline.next_vertex(a, TraversalMode::NoLoop), Some(b));
        assert_eq!(spline.next_vertex(c, TraversalMode::NoLoop), None);
        assert_eq!(spline.next_vertex(c, TraversalMode::Loop), Some(a));

        assert_eq!(spline.prev_vertex(b, TraversalMode::NoLoop), Some(a));
        assert_eq!(spline.prev_vertex(a, TraversalMode::NoLoop), None);
        assert_eq!(spline.prev_vertex(a, TraversalMode::Loop), Some(c));
        assert_eq!(spline.last_vertex(), Some(c));
    }

    #[test]
    fn test_insert_keeps_ring_consistent() {
        let (mut spline, [a, b, c]) = triangle();

        let ab = spline
            .insert_after(a, DVec2::new(0.5, 0.0))
            .expect("Einfügen erwartet");
        let before_first = spline
            .insert_before(a, DVec2::new(0.0, 0.5))
            .expect("Einfügen erwartet");

        assert!(spline.ring_is_consistent());
        assert_eq!(spline.first_vertex(), Some(a));
        let ids: Vec<VertexId> = spline
            .vertices(TraversalMode::NoLoop)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![a, ab, b, c, before_first]);
    }

    #[test]
    fn test_remove_first_promotes_successor() {
        let (mut spline, [a, b, c]) = triangle();

        assert_eq!(spline.remove_vertex(a), Some(DVec2::new(0.0, 0.0)));
        assert_eq!(spline.first_vertex(), Some(b));
        assert_eq!(spline.vertex_count(), 2);
        assert_eq!(spline.to_polygon(), vec![DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0)]);
        assert_eq!(spline.next_vertex(c, TraversalMode::Loop), Some(b));
        assert!(spline.ring_is_consistent());
    }

    #[test]
    fn test_remove_all_empties_ring_and_recycles_slots() {
        let (mut spline, [a, b, c]) = triangle();
        spline.remove_vertex(b);
        spline.remove_vertex(a);
        spline.remove_vertex(c);

        assert!(spline.is_empty());
        assert_eq!(spline.first_vertex(), None);
        assert!(spline.ring_is_consistent());

        let reused = spline.append_vertex(DVec2::new(9.0, 9.0));
        assert!(![a, b, c].contains(&reused));
        assert!(reused.index() < 3);
        assert_eq!(spline.vertex(a), None);
        assert_eq!(spline.to_polygon(), vec![DVec2::new(9.0, 9.0)]);
    }

    #[test]
    fn test_stale_id_is_harmless() {
        let (mut spline, [a, b, _]) = triangle();
        spline.remove_vertex(b);

        assert_eq!(spline.remove_vertex(b), None);
        assert_eq!(spline.insert_after(b, DVec2::ZERO), None);
        assert!(!spline.set_point(b, DVec2::ONE));
        assert_eq!(
            spline
                .vertices_from(Some(b), TraversalMode::NoLoop)
                .count(),
            0
        );
        assert_eq!(
            spline
                .vertices_from(Some(VertexId {
                    index: 99,
                    generation: 0,
                }), TraversalMode::Loop)
                .count(),
            0
        );
        assert!(spline.set_point(a, DVec2::ONE));
        assert_eq!(spline.point(a), Some(DVec2::ONE));
    }

    #[test]
    fn test_recycled_slot_does_not_revive_stale_id() {
        let (mut spline, [a, b, c]) = triangle();
        spline.remove_vertex(b);
        let d = spline.append_vertex(DVec2::new(5.0, 5.0));

        assert_eq!(d.index(), b.index());
        assert_ne!(d, b);
        assert_eq!(spline.vertex(b), None);
        assert_eq!(spline.point(b), None);
        assert_eq!(
            spline.vertices_from(Some(b), TraversalMode::NoLoop).count(),
            0
        );
        assert_eq!(spline.next_vertex(b, TraversalMode::Loop), None);
        assert!(!spline.set_point(b, DVec2::ONE));
        assert_eq!(spline.insert_after(b, DVec2::ZERO), None);
        assert_eq!(spline.insert_before(b, DVec2::ZERO), None);
        assert_eq!(spline.remove_vertex(b), None);

        assert_eq!(spline.vertex_count(), 3);
        assert_eq!(spline.point(d), Some(DVec2::new(5.0, 5.0)));
        let ids: Vec<VertexId> = spline
            .vertices(TraversalMode::NoLoop)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![a, c, d]);
        assert!(spline.ring_is_consistent());
    }

    #[test]
    fn test_segment_count_of_closed_ring() {
        let (spline, _) = triangle();
        let segments: Vec<(DVec2, DVec2)> = spline.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2], (DVec2::new(1.0, 1.0), DVec2::new(0.0, 0.0)));
        assert!(spline.has_at_least_segments(3));
        assert!(!spline.has_at_least_segments(4));

        let mut single = EditableSpline::new();
        single.append_vertex(DVec2::ZERO);
        assert!(single.has_at_least_segments(0));
        assert!(!single.has_at_least_segments(1));
    }
}
