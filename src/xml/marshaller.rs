//! Konvertierung Punkt <-> XML-Element (`<tag x=".." y=".."/>`).

use super::XmlElement;
use crate::shared::{PointDecodePolicy, SplineXmlOptions};
use anyhow::{bail, Context, Result};
use glam::DVec2;

/// Erzeugt Punkt-Elemente
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlMarshaller {
    /// Feste Nachkommastellen; `None` = kürzeste verlustfreie Darstellung
    precision: Option<usize>,
}

impl XmlMarshaller {
    /// Erstellt einen Marshaller mit den Format-Einstellungen aus `options`
    pub fn new(options: &SplineXmlOptions) -> Self {
        Self {
            precision: options.coordinate_precision,
        }
    }

    /// Erzeugt ein neues, nicht eingehängtes Element `tag` mit `x`/`y`-Attributen
    pub fn point(&self, point: DVec2, tag: &str) -> XmlElement {
        XmlElement::new(tag)
            .with_attribute("x", format_coordinate(point.x, self.precision))
            .with_attribute("y", format_coordinate(point.y, self.precision))
    }
}

/// Liest Punkt-Elemente
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlUnmarshaller {
    policy: PointDecodePolicy,
}

impl XmlUnmarshaller {
    /// Erstellt einen Unmarshaller mit der Dekodier-Policy aus `options`
    pub fn new(options: &SplineXmlOptions) -> Self {
        Self {
            policy: options.decode_policy,
        }
    }

    /// Dekodiert die `x`/`y`-Attribute eines Elements.
    ///
    /// `Strict`: fehlende, nicht-numerische oder nicht-endliche Werte sind ein Fehler.
    /// `Lenient`: solche Werte werden mit Warnung als `0.0` gelesen.
    pub fn point(&self, element: &XmlElement) -> Result<DVec2> {
        let x = self.coordinate(element, "x")?;
        let y = self.coordinate(element, "y")?;
        Ok(DVec2::new(x, y))
    }

    fn coordinate(&self, element: &XmlElement, name: &str) -> Result<f64> {
        match (parse_coordinate(element, name), self.policy) {
            (Ok(value), _) => Ok(value),
            (Err(err), PointDecodePolicy::Strict) => Err(err),
            (Err(err), PointDecodePolicy::Lenient) => {
                log::warn!("{:#}, verwende 0.0", err);
                Ok(0.0)
            }
        }
    }
}

fn parse_coordinate(element: &XmlElement, name: &str) -> Result<f64> {
    let raw = element
        .attribute(name)
        .with_context(|| format!("Attribut '{}' fehlt an <{}>", name, element.name))?;

    let value = raw.trim().parse::<f64>().with_context(|| {
        format!(
            "Attribut '{}' ist keine gueltige Zahl: '{}'",
            name,
            truncate_for_error(raw)
        )
    })?;

    if !value.is_finite() {
        bail!("Attribut '{}' muss endlich sein", name);
    }

    Ok(value)
}

fn format_coordinate(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{:.*}", digits, value),
        None => value.to_string(),
    }
}

/// Kürzt einen String für Fehlermeldungen auf max. 40 Zeichen
fn truncate_for_error(s: &str) -> &str {
    match s.char_indices().nth(40) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
