//! Configuration display command.

use console::style;

use pagescan::Config;

/// Print the effective configuration (file + environment) as TOML.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    let source = config
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    eprintln!("{} Source: {}", style("→").dim(), source);
    if let Some(path) = Config::default_path() {
        eprintln!("{} Default location: {}", style("→").dim(), path.display());
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
