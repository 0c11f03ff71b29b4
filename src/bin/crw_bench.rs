//! Wall-clock throughput of carry-forward encoding against full rows and a
//! `format!`-per-row baseline.

use clap::{Parser, ValueEnum};
use carryrow::{BufferPool, Mode, Record, StreamEncoder};
use rand::Rng;
use std::fmt::Write;
use std::hint::black_box;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    CarryForward,
    Full,
    Naive,
    All,
}

#[derive(Parser)]
#[command(name = "crw-bench")]
#[command(about = "Benchmark carryrow encoding throughput")]
struct Args {
    /// Records per encoding pass
    #[arg(short, long, default_value = "100000")]
    records: usize,

    /// Encoding passes per method
    #[arg(short, long, default_value = "20")]
    iterations: usize,

    /// Method to run
    #[arg(short, long, value_enum, default_value = "all")]
    method: Method,
}

fn generate_records(count: usize) -> Vec<Record> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| Record {
            p: 0,
            l: 0,
            t: 0,
            m: rng.random(),
            elapsed: true,
            changed: false,
            v: rng.random_range(0.0..1.0),
        })
        .collect()
}

/// One `format!` per row, every cell written
fn encode_naive(records: &[Record]) -> Vec<u8> {
    let mut out = String::from(carryrow::HEADER);
    for r in records {
        let line = format!(
            "{},{},{},{},{},{},{:.2}\n",
            r.p,
            r.l,
            r.t,
            r.m,
            u8::from(r.elapsed),
            u8::from(r.changed),
            r.v
        );
        let _ = out.write_str(&line);
    }
    out.into_bytes()
}

fn time_passes<F: FnMut() -> usize>(iterations: usize, mut pass: F) -> (Duration, usize) {
    let mut bytes = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        bytes = black_box(pass());
    }
    (start.elapsed(), bytes)
}

fn report(name: &str, records: usize, iterations: usize, elapsed: Duration, bytes: usize) {
    let rows = (records * iterations) as f64;
    let secs = elapsed.as_secs_f64();
    println!(
        "{name:<14} {:>8.1} ns/row  {:>8.1} MB/s  {:>10} bytes/pass",
        secs * 1e9 / rows,
        (bytes * iterations) as f64 / secs / 1e6,
        bytes
    );
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let records = generate_records(args.records);
    let pool = BufferPool::global();

    println!(
        "{} records x {} passes",
        args.records, args.iterations
    );

    let run = |m: Method| args.method == Method::All || args.method == m;

    if run(Method::CarryForward) {
        let mut enc = StreamEncoder::with_pool(pool);
        match enc.encode(&records) {
            Ok(_) => {
                let (elapsed, bytes) = time_passes(args.iterations, || {
                    enc.encode(&records).map(|b| b.len()).unwrap_or(0)
                });
                report("carry-forward", args.records, args.iterations, elapsed, bytes);
            }
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    if run(Method::Full) {
        let mut enc = StreamEncoder::with_pool(pool).with_mode(Mode::Full);
        let (elapsed, bytes) = time_passes(args.iterations, || {
            enc.encode(&records).map(|b| b.len()).unwrap_or(0)
        });
        report("full", args.records, args.iterations, elapsed, bytes);
    }

    if run(Method::Naive) {
        let (elapsed, bytes) = time_passes(args.iterations, || encode_naive(&records).len());
        report("naive", args.records, args.iterations, elapsed, bytes);
    }

    let m = pool.metrics();
    println!(
        "pool: {} hits, {} misses, {} returned, {} discarded",
        m.hits, m.misses, m.returned, m.discarded
    );
}
