//! Zone Spline CLI.
//!
//! Liest eine Zonen-Spline aus XML, wendet optional eine affine
//! Transformation an und schreibt das Ergebnis auf stdout.

use anyhow::{Context, Result};
use clap::Parser;
use glam::{DAffine2, DVec2};
use std::path::PathBuf;
use zone_spline::shared::{closed_length, Winding};
use zone_spline::{
    write_zone_spline, SerializableSpline, SplineXmlOptions, XmlElement, XmlUnmarshaller,
};

/// Kommandozeilen-Argumente
#[derive(Parser, Debug)]
#[command(name = "zone-spline", version, about = "Zonen-Splines lesen, transformieren und schreiben")]
struct Cli {
    /// XML-Datei mit der Spline als Wurzel-Element
    input: PathBuf,

    /// Name des Wurzel-Elements in der Ausgabe (Standard: Name der Eingabe)
    #[arg(long)]
    name: Option<String>,

    /// Verschiebung in X und Y
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    translate: Option<Vec<f64>>,

    /// Gleichmäßige Skalierung
    #[arg(long)]
    scale: Option<f64>,

    /// Rotation in Grad (gegen den Uhrzeigersinn)
    #[arg(long, allow_negative_numbers = true)]
    rotate: Option<f64>,

    /// Punktfolge als Polygon übernehmen (Umlaufrichtung umkehren)
    #[arg(long)]
    reverse: bool,

    /// Optionen-Datei (TOML); Standard: neben der Binary
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Baut die Transformation: erst skalieren, dann rotieren, dann verschieben
    fn transform(&self) -> Option<DAffine2> {
        if self.translate.is_none() && self.scale.is_none() && self.rotate.is_none() {
            return None;
        }

        let scale = DVec2::splat(self.scale.unwrap_or(1.0));
        let angle = self.rotate.unwrap_or(0.0).to_radians();
        let translation = match self.translate.as_deref() {
            Some([x, y]) => DVec2::new(*x, *y),
            _ => DVec2::ZERO,
        };

        Some(DAffine2::from_scale_angle_translation(scale, angle, translation))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Zone Spline v{} startet...", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(SplineXmlOptions::config_path);
    let options = SplineXmlOptions::load_from_file(&config_path);

    let xml_content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Datei konnte nicht gelesen werden: {}", cli.input.display()))?;
    let root = XmlElement::parse_str(&xml_content)
        .with_context(|| format!("XML in {} ungueltig", cli.input.display()))?;

    let mut spline = SerializableSpline::from_xml(&root, &XmlUnmarshaller::new(&options))
        .with_context(|| format!("Spline in {} ungueltig", cli.input.display()))?;
    let root_name = cli.name.clone().unwrap_or(root.name);

    if cli.reverse {
        spline = SerializableSpline::from_polygon(spline.points());
    }
    if let Some(xform) = cli.transform() {
        spline = spline.transformed(&xform);
    }

    log::info!(
        "{} Punkte, Umfang {:.3}, Umlauf {:?}",
        spline.len(),
        closed_length(spline.points()),
        Winding::of(spline.points())
    );

    print!("{}", write_zone_spline(&spline, &root_name, &options)?);
    Ok(())
}
