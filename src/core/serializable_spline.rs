//! Unveränderlicher Snapshot einer Spline für Persistenz und Geometrie-Übergabe.

use super::{EditableSpline, TraversalMode};
use crate::xml::{XmlElement, XmlMarshaller, XmlNode, XmlUnmarshaller};
use anyhow::{Context, Result};
use glam::{DAffine2, DMat3, DVec2};
use serde::{Deserialize, Serialize};

/// Tag-Name der Punkt-Elemente im XML-Fragment
pub const POINT_TAG: &str = "point";

/// Geordnete Punktfolge einer Zonen-Grenze.
///
/// Die Reihenfolge kodiert die Umlaufrichtung. Nach der Konstruktion wird der
/// Snapshot nicht mehr verändert; Transformationen liefern neue Instanzen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerializableSpline {
    points: Vec<DVec2>,
}

impl SerializableSpline {
    /// Flacht eine editierbare Spline in Ring-Reihenfolge ab
    pub fn from_editable(spline: &EditableSpline) -> Self {
        let points: Vec<DVec2> = spline
            .vertices(TraversalMode::NoLoop)
            .map(|(_, vertex)| vertex.point)
            .collect();

        log::debug!("Spline abgeflacht: {} Punkte", points.len());
        Self { points }
    }

    /// Liest alle `<point>`-Kinder eines Elements in Dokument-Reihenfolge.
    ///
    /// Text, Kommentare und Elemente mit anderem Namen werden übersprungen.
    /// Fehler beim Dekodieren eines Punkts brechen das Parsen ab.
    pub fn from_xml(element: &XmlElement, unmarshaller: &XmlUnmarshaller) -> Result<Self> {
        let mut points = Vec::new();

        for (index, child) in element.children.iter().enumerate() {
            let XmlNode::Element(child) = child else {
                continue;
            };
            if child.name != POINT_TAG {
                continue;
            }

            let point = unmarshaller.point(child).with_context(|| {
                format!(
                    "Ungueltiger Punkt (Kind {}) in <{}>",
                    index + 1,
                    element.name
                )
            })?;
            points.push(point);
        }

        log::debug!("Spline aus <{}> gelesen: {} Punkte", element.name, points.len());
        Ok(Self { points })
    }

    /// Übernimmt ein geschlossenes Polygon in umgekehrter Reihenfolge.
    ///
    /// Polygone und Splines haben entgegengesetzte Umlaufrichtungen; die
    /// Umkehrung hält alle Snapshots in derselben Konvention.
    pub fn from_polygon(polygon: &[DVec2]) -> Self {
        Self {
            points: polygon.iter().rev().copied().collect(),
        }
    }

    /// Erzeugt ein neues, nicht eingehängtes Element `name` mit einem
    /// `<point>`-Kind pro Punkt
    pub fn to_xml(&self, marshaller: &XmlMarshaller, name: &str) -> XmlElement {
        let mut element = XmlElement::new(name);
        element.children.extend(
            self.points
                .iter()
                .map(|&point| XmlNode::Element(marshaller.point(point, POINT_TAG))),
        );
        element
    }

    /// Wendet eine affine Transformation auf jeden Punkt an
    pub fn transformed(&self, xform: &DAffine2) -> Self {
        self.transformed_with(|point| xform.transform_point2(point))
    }

    /// Wendet eine projektive 3x3-Transformation an (homogene Division durch `w`)
    pub fn transformed_projective(&self, xform: &DMat3) -> Self {
        self.transformed_with(|point| {
            let mapped = *xform * point.extend(1.0);
            mapped.truncate() / mapped.z
        })
    }

    /// Wendet eine beliebige Punkt-Abbildung an
    pub fn transformed_with<F>(&self, xform: F) -> Self
    where
        F: Fn(DVec2) -> DVec2,
    {
        Self {
            points: self.points.iter().map(|&point| xform(point)).collect(),
        }
    }

    /// Punkte in gespeicherter Reihenfolge
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Anzahl der Punkte
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Prüft ob der Snapshot leer ist
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Gibt die Punktfolge frei
    pub fn into_points(self) -> Vec<DVec2> {
        self.points
    }
}

impl From<&EditableSpline> for SerializableSpline {
    fn from(spline: &EditableSpline) -> Self {
        Self::from_editable(spline)
    }
}
