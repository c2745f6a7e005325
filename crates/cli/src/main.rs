use anyhow::{Context, Result};
use clap::Parser;
use grazeland_core::config::SimConfig;
use grazeland_core::field::ResourceField;
use grazeland_core::world::{RunSummary, World};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Predator-prey agent-based model over a toroidal resource field.
#[derive(Parser, Debug)]
#[command(name = "grazeland", version, about)]
struct Cli {
    /// Grazers in the herd at simulation start.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    grazers: u32,

    /// Hunters in the pack at simulation start.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    hunters: u32,

    /// Inner iterations per observed frame.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// Neighbourhood radius within which grazers share their stores.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    radius: u32,

    /// Stop unconditionally after this many frames.
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    max_frames: u32,

    /// Seed for the simulation's random generator.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Comma-delimited integer raster to load the resource field from.
    #[arg(long, default_value = "in.txt")]
    field: PathBuf,

    /// Where to write the final resource raster.
    #[arg(long, default_value = "environment_out.txt")]
    out: PathBuf,

    /// Where to write the per-row sums of the final raster.
    #[arg(long, default_value = "environment_row_sum.txt")]
    row_sums: PathBuf,

    /// Optional JSON dump of the per-frame run summary.
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn load_raster(path: &Path) -> Result<Vec<Vec<u32>>> {
    let text = std::fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split(',')
            .map(|value| {
                value
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("line {}: bad cell value {value:?}", line_no + 1))
            })
            .collect::<Result<Vec<u32>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

fn write_raster(path: &Path, field: &ResourceField) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for row in field.rows() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", line.join(","))?;
    }
    Ok(())
}

fn write_row_sums(path: &Path, field: &ResourceField) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for sum in field.row_sums() {
        writeln!(out, "{sum}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rows = load_raster(&cli.field)
        .with_context(|| format!("reading resource field from {}", cli.field.display()))?;
    let field = ResourceField::from_rows(&rows);

    let config = SimConfig {
        initial_grazers: cli.grazers as usize,
        initial_hunters: cli.hunters as usize,
        iterations_per_frame: cli.iterations as usize,
        share_radius: cli.radius as f64,
        max_frames: cli.max_frames as usize,
        seed: cli.seed,
    };
    let mut world = World::try_new(field, config)?;

    let mut samples = Vec::new();
    while world.carry_on() {
        let metrics = world.frame();
        log::info!(
            "frame {}: grazers={} hunters={} resource={} births={} caught={} starved={}",
            metrics.frame,
            metrics.grazer_count,
            metrics.hunter_count,
            metrics.resource_total,
            metrics.births,
            metrics.grazers_caught,
            metrics.hunters_starved,
        );
        samples.push(metrics);
    }

    write_raster(&cli.out, world.field())
        .with_context(|| format!("writing raster to {}", cli.out.display()))?;
    write_row_sums(&cli.row_sums, world.field())
        .with_context(|| format!("writing row sums to {}", cli.row_sums.display()))?;

    let summary = RunSummary {
        schema_version: 1,
        frames_run: world.frame_index(),
        final_grazer_count: world.herd().len(),
        final_hunter_count: world.pack().len(),
        final_resource_total: world.field().total(),
        samples,
    };
    if let Some(path) = &cli.summary {
        let out = BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        );
        serde_json::to_writer_pretty(out, &summary)
            .with_context(|| format!("writing summary to {}", path.display()))?;
    }

    let stats = world.population_stats();
    println!(
        "{} frames: {} grazers and {} hunters remain, {} resource left \
         ({} born, {} caught, {} starved, {} disease deaths, {} hunters spawned)",
        summary.frames_run,
        stats.grazer_count,
        stats.hunter_count,
        summary.final_resource_total,
        stats.total_births,
        stats.total_caught,
        stats.total_starved,
        stats.total_disease_deaths,
        stats.total_hunters_spawned,
    );
    Ok(())
}
