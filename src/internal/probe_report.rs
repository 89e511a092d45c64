#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

//! Fills both maps with random keys at increasing sizes and reports how their buckets are used.
//!
//! The figures are printed as one line per fill level and drawn into `load_factor.svg` and
//! `bucket_usage.svg` inside the directory given as the first argument (default: the current
//! directory).

use std::path::{Path, PathBuf};

use log::info;
use plotters::prelude::*;
use rand::{
    Rng,
    distr::{Alphanumeric, SampleString},
};
use strmap::{ChainedMap, OpenAddressingMap, fill, weighted_char_codes};

const FILL_LEVELS: usize = 12;
const KEYS_PER_LEVEL: usize = 250;
const OPEN_START_CAPACITY: usize = 16;
const CHAINED_BUCKETS: usize = 512;

#[derive(Debug, Clone, Copy)]
struct Sample {
    keys: usize,
    open_capacity: usize,
    open_load: f64,
    open_empty: usize,
    open_rejected: usize,
    chained_load: f64,
    chained_empty: usize,
    longest_chain: usize,
}

fn random_keys(amount: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..amount)
        .map(|_| {
            let len = rng.random_range(4..=12);
            Alphanumeric.sample_string(&mut rng, len)
        })
        .collect()
}

fn measure(keys: &[String]) -> Result<Sample, Box<dyn std::error::Error>> {
    let mut open = OpenAddressingMap::new(OPEN_START_CAPACITY, weighted_char_codes)?;
    let mut open_rejected = 0;
    for (value, key) in keys.iter().enumerate() {
        if open.put(key, value).is_err() {
            open_rejected += 1;
        }
    }

    let mut chained = ChainedMap::new(CHAINED_BUCKETS, weighted_char_codes)?;
    fill(&mut chained, keys.iter().enumerate().map(|(value, key)| (key, value)))?;

    Ok(Sample {
        keys: keys.len(),
        open_capacity: open.capacity(),
        open_load: open.table_load(),
        open_empty: open.empty_buckets(),
        open_rejected,
        chained_load: chained.table_load(),
        chained_empty: chained.empty_buckets(),
        longest_chain: chained.longest_chain(),
    })
}

/// Draws one line per series, without captions or axis labels
fn draw_lines(
    path: &Path,
    series: &[(Vec<(f64, f64)>, RGBColor)],
) -> Result<(), Box<dyn std::error::Error>> {
    let points = || series.iter().flat_map(|(line, _)| line.iter());
    let max_x = points().map(|&(x, _)| x).fold(1.0, f64::max);
    let max_y = points().map(|&(_, y)| y).fold(1.0, f64::max) * 1.1;

    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root).margin(20).build_cartesian_2d(0.0..max_x, 0.0..max_y)?;

    for (line, color) in series {
        let style = ShapeStyle::from(color).stroke_width(2);
        chart.draw_series(LineSeries::new(line.iter().copied(), style))?;
    }
    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out_dir = std::env::args().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);
    let keys = random_keys(FILL_LEVELS * KEYS_PER_LEVEL);

    println!(
        "keys open_capacity open_load open_empty open_rejected chained_load chained_empty longest_chain"
    );
    let mut samples = Vec::with_capacity(FILL_LEVELS);
    for level in 1..=FILL_LEVELS {
        let sample = measure(keys.get(..level * KEYS_PER_LEVEL).unwrap_or(&keys))?;
        println!(
            "{} {} {:.3} {} {} {:.3} {} {}",
            sample.keys,
            sample.open_capacity,
            sample.open_load,
            sample.open_empty,
            sample.open_rejected,
            sample.chained_load,
            sample.chained_empty,
            sample.longest_chain
        );
        samples.push(sample);
    }

    let line = |value: fn(&Sample) -> f64| -> Vec<(f64, f64)> {
        samples.iter().map(|sample| (sample.keys as f64, value(sample))).collect()
    };

    let load_path = out_dir.join("load_factor.svg");
    draw_lines(
        &load_path,
        &[(line(|s| s.open_load), RED), (line(|s| s.chained_load), BLUE)],
    )?;

    let usage_path = out_dir.join("bucket_usage.svg");
    draw_lines(
        &usage_path,
        &[
            (line(|s| s.open_empty as f64 / s.open_capacity as f64), RED),
            (line(|s| s.chained_empty as f64 / CHAINED_BUCKETS as f64), BLUE),
            (line(|s| s.longest_chain as f64 / 10.0), GREEN),
        ],
    )?;

    info!("wrote {} and {}", load_path.display(), usage_path.display());
    Ok(())
}
