//! Recorded GPS trace loader.
//!
//! One fix per line:
//!
//! ```text
//! timestamp_ms,latitude,longitude,speed_mps,accuracy_m
//! ```
//!
//! Blank lines and lines starting with `#` are skipped, as is a header line
//! starting with `timestamp`. An empty `speed_mps` column means the receiver
//! reported no speed.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use speedo_common::GpsFix;

const COLUMNS: usize = 5;

/// Read and parse a trace file.
pub fn load(path: &Path) -> Result<Vec<GpsFix>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading trace {}", path.display()))?;
    let fixes = parse(&text).with_context(|| format!("parsing trace {}", path.display()))?;
    log::info!("trace: loaded {} fixes from {}", fixes.len(), path.display());
    Ok(fixes)
}

/// Parse trace text into fixes.
pub fn parse(text: &str) -> Result<Vec<GpsFix>> {
    let mut fixes = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("timestamp") {
            continue;
        }
        let fix = parse_line(line).with_context(|| format!("line {}", idx + 1))?;
        fixes.push(fix);
    }
    Ok(fixes)
}

fn parse_line(line: &str) -> Result<GpsFix> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != COLUMNS {
        bail!("expected {COLUMNS} columns, found {}", fields.len());
    }

    let speed_mps = match fields[3] {
        "" => None,
        s => Some(s.parse::<f32>().with_context(|| format!("invalid speed {s:?}"))?),
    };

    Ok(GpsFix {
        timestamp_ms: fields[0]
            .parse::<u64>()
            .with_context(|| format!("invalid timestamp {:?}", fields[0]))?,
        latitude: fields[1]
            .parse::<f64>()
            .with_context(|| format!("invalid latitude {:?}", fields[1]))?,
        longitude: fields[2]
            .parse::<f64>()
            .with_context(|| format!("invalid longitude {:?}", fields[2]))?,
        speed_mps,
        accuracy_m: fields[4]
            .parse::<f32>()
            .with_context(|| format!("invalid accuracy {:?}", fields[4]))?,
    })
}
