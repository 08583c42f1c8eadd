use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use orbitfall::config::load_descent_scenario;
use orbitfall::export::{self, summary};
use orbitfall::scenario::descent;
use orbitfall::scenario::timestamp_utc;

#[derive(Parser)]
#[command(author, version, about = "Run the powered-descent scenario")]
struct Cli {
    /// Scenario manifest (YAML or TOML)
    #[arg(long, default_value = "configs/scenarios/mars_descent.yaml")]
    scenario: PathBuf,

    /// Telemetry CSV output path (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON summary sidecar path
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = load_descent_scenario(&cli.scenario)?;

    let run = descent::run(&config)?;

    match run.touchdown {
        Some(td) => println!(
            "{}: touchdown after {:.1}s, impact velocity {:.2} m/s, fuel left {:.1} kg",
            config.name, run.elapsed_s, td.impact_velocity_m_s, run.fuel_remaining_kg
        ),
        None => println!(
            "{}: still airborne at the {:.1}s cap, altitude {:.1} m",
            config.name,
            run.elapsed_s,
            run.samples.last().map(|s| s.altitude_m).unwrap_or_default()
        ),
    }

    if let Some(path) = &cli.output {
        let mut writer = export::writer_for_path(path)?;
        export::descent::write_header(writer.as_mut())?;
        for s in &run.samples {
            export::descent::Record {
                time_s: s.time_s,
                altitude_m: s.altitude_m,
                velocity_m_s: s.velocity_m_s,
                thrust_n: s.thrust_n,
                fuel_kg: s.fuel_kg,
            }
            .write_to(writer.as_mut())?;
        }
        writer.flush()?;
    }

    if let Some(path) = &cli.summary {
        let generated = timestamp_utc();
        let report = summary::DescentSummary {
            scenario: &config.name,
            generated_utc: &generated,
            landed: run.landed(),
            elapsed_s: run.elapsed_s,
            impact_velocity_m_s: run.touchdown.map(|td| td.impact_velocity_m_s),
            fuel_remaining_kg: run.fuel_remaining_kg,
        };
        summary::write_json(path, &report)?;
    }

    Ok(())
}
