//! Writer für Zonen-Splines als XML-Text.

use super::XmlMarshaller;
use crate::core::SerializableSpline;
use crate::shared::SplineXmlOptions;
use anyhow::Result;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>\n";

/// Schreibt eine Spline als eigenständiges XML-Dokument
///
/// # Parameter
/// - `spline`: Die zu exportierende Spline
/// - `name`: Name des Wurzel-Elements (z.B. `"spline"` oder der Zonen-Name)
/// - `options`: Format-Einstellungen (Nachkommastellen, Einrückung)
pub fn write_zone_spline(
    spline: &SerializableSpline,
    name: &str,
    options: &SplineXmlOptions,
) -> Result<String> {
    let element = spline.to_xml(&XmlMarshaller::new(options), name);
    let body = element.to_xml_string(options.indent_width)?;

    let mut output = String::with_capacity(XML_DECLARATION.len() + body.len() + 1);
    output.push_str(XML_DECLARATION);
    output.push_str(&body);
    output.push('\n');

    log::debug!("Spline <{}> exportiert: {} Punkte", name, spline.len());
    Ok(output)
}
