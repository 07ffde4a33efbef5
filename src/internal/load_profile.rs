#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]

//! Inserts random keys into both maps and charts how load factor, empty buckets and
//! capacity evolve.
//!
//! Usage: `load_profile [hash-function] [key-count]`
//! (`char-sum`, `positional-char-sum` or `std`; defaults to `std` and 10000 keys).
//! Set `RUST_LOG=debug` to see every resize.

use std::{env, error::Error, num::ParseIntError};

use log::info;
use plotters::prelude::*;
use primehash::{
    ChainingMap, HashTable, OpenAddressingMap,
    hash_functions::{HashFunctionKind, UnknownHashFunction},
};
use rand::Rng;
use thiserror::Error;

const DEFAULT_KEY_COUNT: usize = 10_000;
// Both maps start small so the profile shows several resizes
const INITIAL_CAPACITY: usize = 11;
const SAMPLES: usize = 200;

const STRATEGIES: [&str; 2] = ["Open Addressing", "Separate Chaining"];

#[derive(Debug, Error)]
enum ArgsError {
    #[error(transparent)]
    HashFunction(#[from] UnknownHashFunction),
    #[error("invalid key count: {0}")]
    KeyCount(#[from] ParseIntError),
    #[error("key count must be at least 1")]
    NoKeys,
    #[error("unexpected argument `{0}`")]
    Unexpected(String),
}

#[derive(Debug)]
struct Args {
    hash_function: HashFunctionKind,
    key_count: usize,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let hash_function =
            args.next().map(|s| s.parse::<HashFunctionKind>()).transpose()?.unwrap_or_default();
        let key_count =
            args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(DEFAULT_KEY_COUNT);
        if key_count == 0 {
            return Err(ArgsError::NoKeys);
        }
        if let Some(extra) = args.next() {
            return Err(ArgsError::Unexpected(extra));
        }
        Ok(Self { hash_function, key_count })
    }
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    keys_inserted: usize,
    load_factor: f64,
    empty_ratio: f64,
    capacity: usize,
}

/// Inserts every key, sampling the table's shape at regular intervals
fn profile<M: HashTable<usize>>(map: &mut M, keys: &[String]) -> Vec<Sample> {
    let every = (keys.len() / SAMPLES).max(1);
    let mut samples = Vec::with_capacity(SAMPLES + 1);

    for (i, key) in keys.iter().enumerate() {
        map.put(key.clone(), i);
        let inserted = i + 1;
        if inserted % every == 0 || inserted == keys.len() {
            samples.push(Sample {
                keys_inserted: inserted,
                load_factor: map.table_load(),
                empty_ratio: map.empty_buckets() as f64 / map.capacity() as f64,
                capacity: map.capacity(),
            });
        }
    }

    samples
}

fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    max_x: usize,
    max_y: f64,
    series: &[Vec<(usize, f64)>],
) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let colors = [RGBColor(220, 50, 50), RGBColor(50, 90, 220)];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_x, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (strategy_idx, points) in series.iter().enumerate() {
        let line_style = ShapeStyle::from(&colors[strategy_idx % colors.len()]).stroke_width(2);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(STRATEGIES[strategy_idx])
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let args = Args::parse(env::args().skip(1))?;
    info!("profiling {} keys hashed with {}", args.key_count, args.hash_function);

    let mut rng = rand::rng();
    let keys: Vec<String> =
        (0..args.key_count).map(|_| format!("key{}", rng.random_range(0..u64::MAX))).collect();

    let hash = args.hash_function.function();
    let mut open = OpenAddressingMap::new(INITIAL_CAPACITY, hash);
    let mut chained = ChainingMap::new(INITIAL_CAPACITY, hash);
    let results = [profile(&mut open, &keys), profile(&mut chained, &keys)];

    for (strategy, samples) in STRATEGIES.iter().zip(&results) {
        if let Some(last) = samples.last() {
            println!(
                "  {}: {} entries, capacity = {}, load = {:.3}, empty buckets = {:.1}%",
                strategy,
                last.keys_inserted,
                last.capacity,
                last.load_factor,
                last.empty_ratio * 100.0
            );
        }
    }

    let series = |f: fn(&Sample) -> f64| -> Vec<Vec<(usize, f64)>> {
        results
            .iter()
            .map(|samples| samples.iter().map(|s| (s.keys_inserted, f(s))).collect())
            .collect()
    };

    plot(
        "load_factor.png",
        "Load Factor While Inserting",
        "Load Factor",
        args.key_count,
        1.1,
        &series(|s| s.load_factor),
    )?;
    plot(
        "empty_buckets.png",
        "Share of Empty Buckets While Inserting",
        "Empty Buckets (fraction of capacity)",
        args.key_count,
        1.0,
        &series(|s| s.empty_ratio),
    )?;
    let max_capacity = results.iter().flatten().map(|s| s.capacity).max().unwrap_or(1) as f64;
    plot(
        "capacity.png",
        "Capacity While Inserting",
        "Capacity (slots)",
        args.key_count,
        max_capacity * 1.1,
        &series(|s| s.capacity as f64),
    )?;

    println!("Generated plot images: load_factor.png, empty_buckets.png, capacity.png");

    Ok(())
}
