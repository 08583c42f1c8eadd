use clap::Parser;
use csv::ReaderBuilder;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render altitude/velocity/thrust charts from descent telemetry CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/descent.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    time_s: f64,
    altitude_m: f64,
    velocity_m_s: f64,
    thrust_n: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let samples = read_samples(&cli.input)?;
    if samples.is_empty() {
        return Err(anyhow::anyhow!("No telemetry rows in the provided CSV"));
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let panels = root.split_evenly((3, 1));
    draw_panel(
        &panels[0],
        "Altitude (m)",
        &label_font,
        samples.iter().map(|s| (s.time_s, s.altitude_m)).collect(),
        &BLUE,
    )?;
    draw_panel(
        &panels[1],
        "Velocity (m/s)",
        &label_font,
        samples.iter().map(|s| (s.time_s, s.velocity_m_s)).collect(),
        &RED,
    )?;
    draw_panel(
        &panels[2],
        "Thrust (N)",
        &label_font,
        samples.iter().map(|s| (s.time_s, s.thrust_n)).collect(),
        &GREEN,
    )?;

    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    label: &str,
    font: &FontDesc<'static>,
    points: Vec<(f64, f64)>,
    color: &RGBColor,
) -> anyhow::Result<()> {
    let t_min = points.first().map(|p| p.0).unwrap_or(0.0);
    let t_max = points.last().map(|p| p.0).unwrap_or(1.0).max(t_min + 1e-9);
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(_, y) in &points {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    // Pad degenerate ranges so plotters always gets a usable axis.
    let pad = ((y_max - y_min) * 0.05).max(1e-6);
    let (y_min, y_max) = (y_min - pad, y_max + pad);

    let mut chart = ChartBuilder::on(area)
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(t_min..t_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc(label)
        .label_style(font.clone())
        .x_labels(8)
        .y_labels(5)
        .draw()?;

    chart.draw_series(LineSeries::new(points, color))?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_samples(path: &str) -> anyhow::Result<Vec<Sample>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let time_idx = col("time_s")?;
    let altitude_idx = col("altitude_m")?;
    let velocity_idx = col("velocity_m_s")?;
    let thrust_idx = col("thrust_n")?;

    let mut samples = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let field = |idx: usize| -> f64 { r.get(idx).unwrap_or("").parse().unwrap_or(f64::NAN) };
        let sample = Sample {
            time_s: field(time_idx),
            altitude_m: field(altitude_idx),
            velocity_m_s: field(velocity_idx),
            thrust_n: field(thrust_idx),
        };
        if sample.time_s.is_finite() {
            samples.push(sample);
        }
    }
    Ok(samples)
}
