//! Konfiguration für das Lesen und Schreiben von Spline-XML.
//!
//! `SplineXmlOptions` wird als `zone_spline.toml` neben der Binary gespeichert.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dateiname der Optionen-Datei
pub const CONFIG_FILE_NAME: &str = "zone_spline.toml";

/// Standard-Einrückung der XML-Ausgabe (Leerzeichen pro Ebene).
pub const XML_INDENT_WIDTH: usize = 4;

/// Umgang mit fehlenden oder ungültigen Koordinaten-Attributen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointDecodePolicy {
    /// Fehler abbrechen das gesamte Parsen
    #[default]
    Strict,
    /// Ungültige Koordinaten werden als 0.0 gelesen (mit Warnung)
    Lenient,
}

/// Alle Einstellungen für Spline-XML-Import/Export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineXmlOptions {
    /// Policy beim Dekodieren von `<point>`-Elementen
    #[serde(default)]
    pub decode_policy: PointDecodePolicy,
    /// Feste Nachkommastellen für Koordinaten (`None` = verlustfrei)
    #[serde(default)]
    pub coordinate_precision: Option<usize>,
    /// Einrückung der XML-Ausgabe (0 = einzeilig)
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

impl Default for SplineXmlOptions {
    fn default() -> Self {
        Self {
            decode_policy: PointDecodePolicy::default(),
            coordinate_precision: None,
            indent_width: XML_INDENT_WIDTH,
        }
    }
}

/// Serde-Default für `indent_width` (fehlender Schlüssel in bestehenden TOML-Dateien).
fn default_indent_width() -> usize {
    XML_INDENT_WIDTH
}

impl SplineXmlOptions {
    /// Lädt Optionen aus einer TOML-Datei.
    ///
    /// Fehlt die Datei oder ist sie nicht lesbar/fehlerhaft, werden die
    /// Standardwerte verwendet; die Spline-Verarbeitung soll daran nicht scheitern.
    pub fn load_from_file(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::info!("Keine Optionen unter {} ({}), verwende Standardwerte", path.display(), e);
                return Self::default();
            }
        };

        toml::from_str(&content).map_or_else(
            |e| {
                log::warn!("{} fehlerhaft, verwende Standardwerte: {}", path.display(), e);
                Self::default()
            },
            |opts| {
                log::info!("Spline-Optionen geladen aus: {}", path.display());
                opts
            },
        )
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("Optionen konnten nicht nach {} geschrieben werden", path.display()))?;
        log::info!("Spline-Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// `zone_spline.toml` im Verzeichnis der laufenden Binary
    /// (Fallback: aktuelles Verzeichnis).
    pub fn config_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        exe_dir.unwrap_or_else(|| PathBuf::from(".")).join(CONFIG_FILE_NAME)
    }
}
