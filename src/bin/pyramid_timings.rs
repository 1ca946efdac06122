//! Lays out a lazy multiscale pyramid of synthetic tiles, realizes it level by level, and
//! reports how long each step took.
//!
//! ```text
//! pyramid_timings [T C Z Y X [TILE_W TILE_H [LEVELS]]] [--json PATH]
//! ```
//!
//! With no arguments this reproduces the classic viewer demo configuration: a
//! `(10, 2, 5, 3000, 5000)` volume covered by 256x256 tiles, 4 levels deep. Realized levels are
//! all held in memory for the viewer handoff, which for the default shape is a few GiB; pass a
//! smaller shape for a quick run. Set `RUST_LOG=debug` to watch the per-plane layout.

use tile_mosaic::prelude::*;

use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Serialize)]
struct TimingReport {
    spec: PyramidSpec,
    build_secs: f64,
    realize_secs_per_level: Vec<f64>,
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let (spec, json_path) = parse_args()?;

    println!(
        "shape {:?}, tile shape {:?}, {} level(s)",
        spec.shape, spec.tile_shape, spec.levels
    );

    let start = Instant::now();
    let pyramid = spec.build().map_err(|e| e.to_string())?;
    let build_secs = start.elapsed().as_secs_f64();
    println!(
        "laid out {} plane(s) and {} tile(s) in {:.6} s",
        pyramid.num_planes(),
        pyramid.num_tiles(),
        build_secs
    );

    // Realize from the cheapest level up, the order a viewer would ask for them while zooming
    // in from the overview.
    let source = SyntheticTiles;
    let mut realize_secs = vec![0.0f64; pyramid.num_levels() as usize];
    let mut realized: Vec<(u8, Volume)> = Vec::with_capacity(realize_secs.len());
    for level in (0..pyramid.num_levels()).rev() {
        let start = Instant::now();
        let volume = pyramid.level(level).realize(&source).map_err(|e| e.to_string())?;
        let secs = start.elapsed().as_secs_f64();

        println!(
            "realized level {} with shape {:?} in {:.6} s",
            level,
            volume.shape(),
            secs
        );
        realize_secs[level as usize] = secs;
        realized.push((level, volume));
    }

    realized.sort_by_key(|&(level, _)| level);
    let levels: Vec<Volume> = realized.into_iter().map(|(_, volume)| volume).collect();

    let image = MultiscaleImage::new(levels, Axis5::C).map_err(|e| e.to_string())?;
    LogViewer.view_multiscale(&image);

    if let Some(path) = json_path {
        let report = TimingReport {
            spec,
            build_secs,
            realize_secs_per_level: realize_secs,
        };
        let encoded = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        std::fs::write(&path, encoded).map_err(|e| format!("failed to write {}: {}", path, e))?;
        println!("wrote timing report to {}", path);
    }

    Ok(())
}

fn parse_args() -> Result<(PyramidSpec, Option<String>), String> {
    let mut positional: Vec<i32> = Vec::new();
    let mut json_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--json" {
            json_path = Some(args.next().ok_or("--json requires a path")?);
        } else {
            positional.push(
                arg.parse()
                    .map_err(|_| format!("not an integer: {}", arg))?,
            );
        }
    }

    let defaults = PyramidSpec {
        shape: VolumeShape::new(10, 2, 5, 3000, 5000),
        tile_shape: Point2i([256, 256]),
        levels: 4,
    };
    let spec = match positional.len() {
        0 => defaults,
        5 | 7 | 8 => {
            let p = &positional;

            PyramidSpec {
                shape: VolumeShape::new(p[0], p[1], p[2], p[3], p[4]),
                tile_shape: if p.len() >= 7 {
                    Point2i([p[5], p[6]])
                } else {
                    defaults.tile_shape
                },
                levels: if p.len() == 8 {
                    p[7] as u8
                } else {
                    defaults.levels
                },
            }
        }
        n => {
            return Err(format!(
                "expected 0, 5 (shape), 7 (+ tile shape), or 8 (+ levels) positional integers, \
                 got {}",
                n
            ))
        }
    };

    Ok((spec, json_path))
}
