//! Generate sample telemetry records and write them in carryrow format.

use clap::Parser;
use carryrow::{Mode, Record, StreamEncoder};
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crw-gen")]
#[command(about = "Generate sample carryrow telemetry data")]
#[command(after_help = "RECORDS:\n  \
    By default only `m` and `v` vary between records (random m, elapsed=1,\n  \
    v uniform in [0, 1)). Use --random-keys to also randomise p, l and t,\n  \
    and --hold to keep each generated record for several rows.")]
struct Args {
    /// Output file path
    output: PathBuf,

    /// Number of records to generate
    #[arg(short, long, default_value = "80")]
    records: usize,

    /// Randomise p, l and t as well
    #[arg(long)]
    random_keys: bool,

    /// Repeat each generated record this many times (simulates slow-changing data)
    #[arg(long, default_value = "1")]
    hold: usize,

    /// Write every cell of every row instead of carrying values forward
    #[arg(long)]
    full: bool,
}

/// Generate random records based on args
fn generate_records(args: &Args) -> Vec<Record> {
    let mut rng = rand::rng();
    let hold = args.hold.max(1);
    let mut records = Vec::with_capacity(args.records);
    let mut current = Record::SENTINEL;

    for i in 0..args.records {
        if i % hold == 0 {
            current = Record {
                p: if args.random_keys { rng.random() } else { 0 },
                l: if args.random_keys { rng.random() } else { 0 },
                t: if args.random_keys { rng.random() } else { 0 },
                m: rng.random(),
                elapsed: true,
                changed: false,
                v: rng.random_range(0.0..1.0),
            };
        }
        records.push(current);
    }

    records
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let records = generate_records(args);
    let mode = if args.full { Mode::Full } else { Mode::CarryForward };

    let mut encoder = StreamEncoder::new().with_mode(mode);
    let mut out = BufWriter::new(File::create(&args.output)?);
    let rows = encoder.encode_to(&records, &mut out)?;
    out.flush()?;
    drop(out);

    let written = std::fs::metadata(&args.output)?.len();
    let full_len = StreamEncoder::new().with_mode(Mode::Full).encode(&records)?.len();

    println!("Generated {rows} records");
    println!("Output: {} ({written} bytes, {:?})", args.output.display(), encoder.mode());
    println!("Full-row size: {full_len} bytes");
    println!("Ratio: {:.2}x", full_len as f64 / written as f64);
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
