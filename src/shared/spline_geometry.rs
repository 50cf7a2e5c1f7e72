//! Reine Geometrie-Funktionen für geschlossene Punktfolgen.
//!
//! Layer-neutral: wird von `core` und den Tests genutzt, um die
//! Umlaufrichtung von Splines und Polygonen zu prüfen.

use glam::DVec2;

/// Umlaufrichtung einer geschlossenen Punktfolge (y-Achse nach oben)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Im Uhrzeigersinn (negative Fläche)
    Clockwise,
    /// Gegen den Uhrzeigersinn (positive Fläche)
    CounterClockwise,
    /// Fläche null (weniger als drei Punkte oder kollinear)
    Degenerate,
}

impl Winding {
    /// Bestimmt die Umlaufrichtung über das Vorzeichen der Fläche
    pub fn of(points: &[DVec2]) -> Self {
        let area = signed_area(points);
        if area > 0.0 {
            Winding::CounterClockwise
        } else if area < 0.0 {
            Winding::Clockwise
        } else {
            Winding::Degenerate
        }
    }

    /// Gegenrichtung
    pub fn reversed(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::CounterClockwise => Winding::Clockwise,
            Winding::Degenerate => Winding::Degenerate,
        }
    }
}

/// Vorzeichenbehaftete Fläche (Gauß'sche Trapezformel), Ring implizit geschlossen
pub fn signed_area(points: &[DVec2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let n = points.len();
    let twice_area: f64 = (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum();
    twice_area * 0.5
}

/// Umfang des geschlossenen Rings
pub fn closed_length(points: &[DVec2]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            let open: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
            open + last.distance(*first)
        }
        _ => 0.0,
    }
}
