//! Parser für Zonen-Splines aus XML-Text.

use super::{XmlElement, XmlUnmarshaller};
use crate::core::SerializableSpline;
use crate::shared::SplineXmlOptions;
use anyhow::{Context, Result};

/// Parst ein XML-Dokument, dessen Wurzel-Element die Spline ist
/// (`<name><point x=".." y=".."/>...</name>`)
pub fn parse_zone_spline(xml_content: &str, options: &SplineXmlOptions) -> Result<SerializableSpline> {
    let root = XmlElement::parse_str(xml_content).context("Zonen-XML konnte nicht gelesen werden")?;
    SerializableSpline::from_xml(&root, &XmlUnmarshaller::new(options))
}

/// Parst alle Splines unterhalb eines Container-Elements.
///
/// Erwartet `<zones><zone><spline>...</spline></zone>...</zones>`: pro Kind-Element
/// des Wurzel-Elements wird das Unterelement `spline_tag` gelesen. Zonen ohne
/// Spline werden übersprungen.
pub fn parse_zone_splines(
    xml_content: &str,
    spline_tag: &str,
    options: &SplineXmlOptions,
) -> Result<Vec<SerializableSpline>> {
    let root = XmlElement::parse_str(xml_content).context("Zonen-XML konnte nicht gelesen werden")?;
    let unmarshaller = XmlUnmarshaller::new(options);

    let mut splines = Vec::new();
    for (index, zone) in root.child_elements().enumerate() {
        let Some(spline) = zone.find_child(spline_tag) else {
            log::warn!("Zone {} (<{}>) ohne <{}>", index + 1, zone.name, spline_tag);
            continue;
        };
        let spline = SerializableSpline::from_xml(spline, &unmarshaller)
            .with_context(|| format!("Zone {} konnte nicht gelesen werden", index + 1))?;
        splines.push(spline);
    }

    log::info!("{} Zonen-Splines gelesen", splines.len());
    Ok(splines)
}
