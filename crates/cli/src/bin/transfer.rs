use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use orbitfall::config::load_transfer_scenario;
use orbitfall::export::{self, summary};
use orbitfall::orbital::ApsisDetector;
use orbitfall::scenario::transfer::{self, TransferOptions};
use orbitfall::scenario::timestamp_utc;

#[derive(Parser)]
#[command(author, version, about = "Run the autonomous two-impulse transfer scenario")]
struct Cli {
    /// Scenario manifest (YAML or TOML)
    #[arg(long, default_value = "configs/scenarios/hohmann_demo.yaml")]
    scenario: PathBuf,

    /// Apoapsis-crossing detector for the circularization burn
    #[arg(long, value_enum, default_value_t = DetectorArg::HalfPlane)]
    detector: DetectorArg,

    /// Target-orbit periods to coast after circularization
    #[arg(long, default_value_t = 1.0)]
    settle_orbits: f64,

    /// Telemetry CSV output path (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON summary sidecar path
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum DetectorArg {
    /// Half-plane flip plus shrinking radius (the legacy heuristic)
    HalfPlane,
    /// Sign change of the radial rate (true local radius maximum)
    RadialRate,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = load_transfer_scenario(&cli.scenario)?;

    let options = TransferOptions {
        detector: match cli.detector {
            DetectorArg::HalfPlane => ApsisDetector::HalfPlane,
            DetectorArg::RadialRate => ApsisDetector::RadialRate,
        },
        settle_orbits: cli.settle_orbits,
        max_duration_s: None,
    };
    let run = transfer::run(&config, &options)?;

    println!(
        "{}: dv1={:.3} dv2={:.3} dv_total={:.3} tof={:.1}",
        config.name, run.plan.dv1, run.plan.dv2, run.plan.dv_total, run.plan.time_of_flight
    );
    for burn in &run.burns {
        println!(
            "  burn at t={:.2}: dv={:.3} r={:.2} -> {}",
            burn.time_s, burn.dv, burn.radius, burn.stage
        );
    }
    let last = run.final_sample();
    println!(
        "final stage {} after {:.1}s: r={:.2} v={:.3}",
        run.final_stage, run.elapsed_s, last.radius, last.speed
    );

    if let Some(path) = &cli.output {
        let mut writer = export::writer_for_path(path)?;
        export::transfer::write_header(writer.as_mut())?;
        for s in &run.samples {
            export::transfer::Record {
                time_s: s.time_s,
                x: s.position[0],
                y: s.position[1],
                radius: s.radius,
                speed: s.speed,
                stage: s.stage.label(),
            }
            .write_to(writer.as_mut())?;
        }
        writer.flush()?;
    }

    if let Some(path) = &cli.summary {
        let generated = timestamp_utc();
        let report = summary::TransferSummary {
            scenario: &config.name,
            generated_utc: &generated,
            mu: config.mu,
            parking_radius: config.parking_radius,
            target_radius: config.target_radius,
            dv1: run.plan.dv1,
            dv2: run.plan.dv2,
            dv_total: run.plan.dv_total,
            final_stage: run.final_stage.to_string(),
            final_radius: last.radius,
            final_speed: last.speed,
            elapsed_s: run.elapsed_s,
            burns: run
                .burns
                .iter()
                .map(|b| summary::BurnRecord {
                    time_s: b.time_s,
                    dv: b.dv,
                    radius: b.radius,
                    stage: b.stage.to_string(),
                })
                .collect(),
        };
        summary::write_json(path, &report)?;
    }

    Ok(())
}
