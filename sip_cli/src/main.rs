//! # SIP Quote CLI
//!
//! Loads a saved configurator state, runs the quoting pipeline and prints
//! a summary followed by the budget as JSON.
//!
//! ```text
//! sip_cli [STATE_PATH] [--export OUT]
//! ```
//!
//! `STATE_PATH` is the state file or the directory holding
//! `sip-configurator-state.json`; without a saved state a default 6 x 8 m
//! house is quoted. Logging goes to stderr and is filtered by `RUST_LOG`.

mod config;

use std::process::ExitCode;

use sip_core::building::Side;
use sip_core::export::write_export;
use sip_core::file_io::{JsonFileRepository, StateRepository};
use sip_core::project::{Project, Quote};
use sip_core::CalcError;
use tracing::{info, warn};

use config::Config;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("Usage: sip_cli [STATE_PATH] [--export OUT]");
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), CalcError> {
    let repo = if config.state_path.is_dir() {
        JsonFileRepository::in_dir(&config.state_path)
    } else {
        JsonFileRepository::new(&config.state_path)
    };
    info!(state = %repo.path().display(), "loading configurator state");

    let project = match repo.load()? {
        Some(project) => project,
        None => {
            warn!("no saved state, quoting the default house");
            Project::default()
        }
    };
    if let Err(e) = project.validate() {
        warn!(error = %e, "state failed validation, quoting anyway");
    }

    let quote = project.quote();
    print_summary(&project, &quote);

    println!();
    println!("JSON Output:");
    if let Ok(json) = serde_json::to_string_pretty(&quote.budget) {
        println!("{}", json);
    }

    if let Some(path) = &config.export_path {
        let bundle = write_export(&project, path)?;
        println!();
        println!("Export written to {} (final total {:.0})", path.display(), bundle.budget.final_total);
    }
    Ok(())
}

fn print_summary(project: &Project, quote: &Quote) {
    let dims = &project.dimensions;
    let g = &quote.geometry;

    println!("═══════════════════════════════════════");
    println!("  SIP QUOTE{}", client_suffix(project));
    println!("═══════════════════════════════════════");
    println!();
    println!("Building:");
    println!("  Footprint: {:.2} x {:.2} m", dims.width, dims.length);
    println!("  Height:    {:.2} m (ridge {:.2} m)", dims.height, dims.ridge_height);
    println!("  Floor:     {:.2} m²   Roof: {:.2} m²", g.floor_area, g.roof_area);
    println!("  Perimeter: {:.2} ML", g.exterior_perimeter);
    println!();
    println!("Facades:");
    for side in Side::ALL {
        let stats = g.facades.get(side);
        if stats.is_visible {
            println!(
                "  {:<6} {:<10} {:>7.2} m²  {:>3} panels  {:>6.2} ML openings",
                side.name(),
                project.facade_configs.get(side).facade_type.display_name(),
                stats.area,
                stats.panels,
                stats.opening_ml
            );
        } else {
            println!("  {:<6} (hidden)", side.name());
        }
    }
    println!();
    println!("Panels:");
    println!("  Exterior walls: {}", g.exterior_wall_panels);
    println!("  Interior walls: {}", g.interior_wall_panels);
    println!("  Floor:          {}", g.floor_panels);
    println!("  Roof:           {}", g.roof_panels);
    println!("  Total:          {}", g.total_panels);
    println!();
    println!("Budget:");
    let mut category = "";
    for line in &quote.budget.items {
        if line.category != category {
            category = line.category.as_str();
            println!("  {}", category);
        }
        println!(
            "    {:<48} {:>8.0} {:<5} x {:>10.0} = {:>12.0}{}",
            line.name,
            line.qty,
            line.unit,
            line.price,
            line.total,
            if line.is_overridden { " *" } else { "" }
        );
    }
    println!();
    println!("═══════════════════════════════════════");
    println!("  SUBTOTAL: {:>14.0}", quote.budget.subtotal);
    println!("  TOTAL:    {:>14.0}", quote.budget.total);
    println!("═══════════════════════════════════════");
}

fn client_suffix(project: &Project) -> String {
    if project.meta.client.is_empty() {
        String::new()
    } else {
        format!(" - {}", project.meta.client)
    }
}
