//! Export helpers for CSV telemetry and JSON summary sidecars.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod transfer {
    use std::io::{self, Write};

    const HEADER: &str = "time_s,x,y,radius,speed,stage";

    /// Write the standard transfer telemetry CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Per-tick CSV row emitted by the transfer exporter.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub time_s: f64,
        pub x: f64,
        pub y: f64,
        pub radius: f64,
        pub speed: f64,
        pub stage: &'a str,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.3},{:.6},{:.6},{:.6},{:.6},{}",
                self.time_s, self.x, self.y, self.radius, self.speed, self.stage,
            )
        }
    }
}

pub mod descent {
    use std::io::{self, Write};

    const HEADER: &str = "time_s,altitude_m,velocity_m_s,thrust_n,fuel_kg";

    /// Write the standard descent telemetry CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Per-tick CSV row emitted by the descent exporter.
    #[derive(Debug, Clone)]
    pub struct Record {
        pub time_s: f64,
        pub altitude_m: f64,
        pub velocity_m_s: f64,
        pub thrust_n: f64,
        pub fuel_kg: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.3},{:.3},{:.4},{:.2},{:.3}",
                self.time_s, self.altitude_m, self.velocity_m_s, self.thrust_n, self.fuel_kg,
            )
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// Burn record included in transfer summaries.
    #[derive(Debug, Clone, Serialize)]
    pub struct BurnRecord {
        pub time_s: f64,
        pub dv: f64,
        pub radius: f64,
        pub stage: String,
    }

    /// Envelope of a completed transfer run.
    #[derive(Debug, Serialize)]
    pub struct TransferSummary<'a> {
        pub scenario: &'a str,
        pub generated_utc: &'a str,
        pub mu: f64,
        pub parking_radius: f64,
        pub target_radius: f64,
        pub dv1: f64,
        pub dv2: f64,
        pub dv_total: f64,
        pub final_stage: String,
        pub final_radius: f64,
        pub final_speed: f64,
        pub elapsed_s: f64,
        pub burns: Vec<BurnRecord>,
    }

    /// Envelope of a completed descent run.
    #[derive(Debug, Serialize)]
    pub struct DescentSummary<'a> {
        pub scenario: &'a str,
        pub generated_utc: &'a str,
        pub landed: bool,
        pub elapsed_s: f64,
        pub impact_velocity_m_s: Option<f64>,
        pub fuel_remaining_kg: f64,
    }

    /// Write a JSON summary sidecar next to the exported telemetry.
    pub fn write_json<T: Serialize>(path: &Path, summary: &T) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        to_writer_pretty(file, summary)?;
        Ok(())
    }
}
