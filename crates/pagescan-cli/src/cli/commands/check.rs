//! OCR engine availability check command.

use console::style;

use pagescan::Config;
use pagescan_analysis::ocr::{create_engine, OcrEngine, OcrEngineType};

/// Whether `engine_type` is the engine named in the config.
fn is_configured(engine_type: OcrEngineType, config: &Config) -> bool {
    OcrEngineType::parse(&config.ocr.engine) == Some(engine_type)
}

/// Check OCR engine availability.
pub fn cmd_check(config: &Config) -> anyhow::Result<()> {
    println!("\n{}", style("OCR Engine Status").bold());
    println!("{}", "-".repeat(50));

    let mut configured_available = false;
    for engine_type in OcrEngineType::all() {
        let engine_config = pagescan::OcrConfig {
            engine: engine_type.as_str().to_string(),
            ..config.ocr.clone()
        };
        let engine = create_engine(&engine_config)?;
        let available = engine.is_available();
        let status = if available {
            style("✓ available").green()
        } else {
            style("✗ not available").red()
        };
        println!("  {:<15} {}", engine_type.as_str(), status);
        if !available {
            println!("                  {}", style(engine.availability_hint()).dim());
        }
        if is_configured(*engine_type, config) {
            configured_available = available;
        }
    }

    println!("\n{}", style("Configured Engine:").cyan());
    if configured_available {
        println!(
            "  {} {} (language: {}, level: {}, workers: {})",
            style("→").green(),
            config.ocr.engine,
            config.ocr.language,
            config.ocr.recognition_level,
            config.ocr.effective_workers()
        );
    } else {
        println!(
            "  {} {} is not available - install tesseract-ocr",
            style("!").yellow(),
            config.ocr.engine
        );
    }
    println!();
    Ok(())
}
