//! Hard-wired benchmark driver.
//!
//! Iterates n over powers of two, α over a fixed ladder, and the three
//! workload families, driving every candidate structure through each
//! stream: validate first, then best-of-k timing, then one CSV row and
//! one progress line. There is no command-line surface; everything about
//! the run is pinned below.

use std::process;
use std::thread;
use std::time::Duration;

use console::style;
use itertools::iterate;

use loadgen::{measure, validate, Generator, Stream};
use succ::{Structure, SuccessorDelete};

use crate::progress::{Progress, RunBar};
use crate::sink::CsvSink;

mod progress;
mod sink;

const MIN_N: usize = 2;
const MAX_N: usize = 1 << 22;
const ALPHAS: [f64; 7] = [0.125, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0];
const CSV_PATH: &str = "../data/data.csv";
/// query_one is quadratic for the naive walk and recursion-depth-bound
/// for the recursive one; both sit that family out past this n.
const SLOW_SCAN_CAP: usize = 65536;
const RANDOM_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// The n grid: MIN_N, doubling, up to and including MAX_N.
fn sizes() -> impl Iterator<Item = usize> {
    iterate(MIN_N, |&n| n * 2).take_while(|&n| n <= MAX_N)
}

fn skip_for_query_one(s: &Structure, n: usize) -> bool {
    n > SLOW_SCAN_CAP && matches!(s, Structure::Naive(_) | Structure::Recursive(_))
}

fn total_rows(roster_len: usize) -> u64 {
    sizes()
        .map(|n| {
            let query_one = roster_len - if n > SLOW_SCAN_CAP { 2 } else { 0 };
            (query_one + roster_len * 2 * ALPHAS.len()) as u64
        })
        .sum()
}

fn random_seed(n: usize, alpha_index: usize) -> u64 {
    RANDOM_SEED ^ ((n as u64) << 8) ^ alpha_index as u64
}

/// Validate, time, record. Any failure is terminal: a mismatch means the
/// candidate is wrong, a sink failure means results are being lost.
fn run_cell(
    s: &mut Structure,
    stream: &Stream<'_>,
    sink: &CsvSink,
    bar: &RunBar,
    checksum: &mut i64,
) {
    if let Err(e) = validate(s, stream) {
        bar.println(&format!("{} {}", style("mismatch").red().bold(), e));
        process::exit(1);
    }
    let m = measure(s, stream);
    *checksum ^= m.check;
    if let Err(e) = sink.append(s.name(), &stream.label, stream.n, m.secs_per_replay) {
        bar.println(&format!("{} {}", style("sink failure").red().bold(), e));
        process::exit(1);
    }
    bar.println(&format!(
        "{} {:<16} {:<18} n = {:>8}  {:.3e} s/replay",
        style("timed").green(),
        s.name(),
        stream.label,
        stream.n,
        m.secs_per_replay
    ));
    bar.inc(1);
}

fn main() {
    let progress = Progress::new();
    let mut roster = Structure::all(MAX_N);
    let mut gen = Generator::new(MAX_N);
    let sink = CsvSink::new(CSV_PATH).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    let bar = progress.new_run_bar(total_rows(roster.len()));
    {
        // the arena only draws while a thread is joined on it
        let arena = progress.clone();
        thread::spawn(move || arena.join());
    }

    let mut checksum = 0i64;
    for n in sizes() {
        bar.set_message(&format!("n = {}", n));
        {
            let stream = gen.query_one(n, &bar);
            for s in roster.iter_mut() {
                if skip_for_query_one(s, n) {
                    continue;
                }
                run_cell(s, &stream, &sink, &bar, &mut checksum);
            }
        }
        for (k, &alpha) in ALPHAS.iter().enumerate() {
            {
                let stream = gen.worst_case(n, alpha, &bar);
                for s in roster.iter_mut() {
                    run_cell(s, &stream, &sink, &bar, &mut checksum);
                }
            }
            {
                let stream = gen.random(n, alpha, random_seed(n, k), &bar);
                for s in roster.iter_mut() {
                    run_cell(s, &stream, &sink, &bar, &mut checksum);
                }
            }
        }
    }
    bar.finish_with_message("all measurements done");
    // let the progress arena shut down before the final printout
    thread::sleep(Duration::from_secs(1));
    println!("checksum: {}", checksum);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn the_n_grid_doubles_to_the_cap() {
        let ns: Vec<usize> = sizes().collect();
        assert_eq!(ns.first(), Some(&2));
        assert_eq!(ns.last(), Some(&(1 << 22)));
        assert!(ns.windows(2).all(|w| w[1] == 2 * w[0]));
        assert_eq!(ns.len(), 22);
    }

    #[test]
    fn slow_scanners_sit_out_large_query_one() {
        let roster = Structure::all(2);
        let naive = &roster[0];
        let two_pass = &roster[2];
        assert!(!skip_for_query_one(naive, 65536));
        assert!(skip_for_query_one(naive, 131072));
        assert!(!skip_for_query_one(two_pass, 1 << 22));
    }

    #[test]
    fn row_budget_counts_the_skips() {
        let len = Structure::all(2).len();
        // per n: one query_one round plus two families per alpha; the two
        // slow scanners drop out of query_one for the six largest sizes
        let expect: u64 = sizes()
            .map(|n| (len * 15 - if n > 65536 { 2 } else { 0 }) as u64)
            .sum();
        assert_eq!(total_rows(len), expect);
        assert_eq!(sizes().filter(|&n| n > 65536).count(), 6);
    }
}
