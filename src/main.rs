use std::{
    io::{self, Write},
    path::PathBuf,
};

use altfix::{
    error::FixError,
    logging::init_logging,
    pipeline::process_srt_file,
    shift::{resolve_shift, ResolvedShift},
};
use anyhow::Result;
use clap::Parser;

const EPILOG: &str = "\
DJI FPV Altitude Telemetry Fix

The DJI FPV goggles display the altitude correctly, but the telemetry
files (SRT) written next to the videos carry wrong values:

1) The starting altitude is often off. When the recording starts with
   the drone sitting on the ground, the SRT file still shows a non-zero
   altitude.
2) The values are 1/10 of the real altitude of the drone.

To fix #1, give the amount to shift the altitude readings with --shift.
Every reading of every file is moved up or down by that amount. Without
--shift, the starting altitude of the first file is detected and the
whole flight is shifted so that it starts at 0.00.

To fix #2, the shifted values are multiplied by 10.

Example:

A single flight recorded in two video files, with the telemetry in the
matching SRT files:

    DJI_0015.MP4  DJI_0015.SRT
    DJI_0016.MP4  DJI_0016.SRT

The first record of DJI_0015.SRT reads 'altitude: -8.398028'.

    altfix DJI_0015.SRT DJI_0016.SRT

detects that starting altitude, shifts both files so the flight starts
at 0.00 and writes DJI_0015_CORRECTED.SRT and DJI_0016_CORRECTED.SRT.
The same result, with the shift given by hand:

    altfix --shift 8.398028 DJI_0015.SRT DJI_0016.SRT
";

#[derive(Parser)]
#[command(name = "altfix", version)]
#[command(about = "Utility for fixing DJI FPV telemetry files")]
#[command(after_long_help = EPILOG)]
struct Cli {
    /// Altitude shift amount
    #[arg(long, allow_hyphen_values = true)]
    shift: Option<f64>,

    /// Print one JSON report per file instead of the progress lines
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (RUST_LOG overrides)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// One or more SRT files to process
    files: Vec<PathBuf>,
}

/// Reports the shift before any file is touched. In JSON mode stdout only
/// carries the reports, so the announcement goes to stderr instead.
fn announce_shift(
    resolved: &ResolvedShift,
    json: bool,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> io::Result<()> {
    if json {
        writeln!(stderr, "{}", resolved)
    } else {
        writeln!(stdout, "{}", resolved)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.files.is_empty() {
        return Err(FixError::MissingInput.into());
    }

    let resolved = resolve_shift(cli.shift, &cli.files)?;
    announce_shift(&resolved, cli.json, &mut io::stdout(), &mut io::stderr())?;

    let correction = resolved.correction();
    for filename in &cli.files {
        if !cli.json {
            println!("Analyzing {}", filename.display());
        }

        let corrected = process_srt_file(filename, &correction)?;

        if cli.json {
            println!("{}", serde_json::to_string(&corrected.report(&correction))?);
        } else {
            println!("Wrote output file to {}", corrected.output.display());
        }
    }

    Ok(())
}
