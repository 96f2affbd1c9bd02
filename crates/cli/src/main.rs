use anyhow::{anyhow, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use saltmap::{timed, Seed, World, WorldConfig};
use simple_logger::SimpleLogger;
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for generating worlds via the Saltmap generation kit.
#[derive(Debug, StructOpt)]
#[structopt(name = "saltmap")]
struct Opt {
    /// Path to a config file that defines the world to be generated. Supported
    /// formats: JSON, TOML. Any field left out uses its default value. If not
    /// given, the default config is used.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Seed for the world. Integers are used as-is, any other text is hashed.
    /// Overrides the seed from the config file.
    #[structopt(short, long)]
    seed: Option<String>,

    /// Sea level, in [0,1]. Overrides the value from the config file.
    #[structopt(long)]
    sea_level: Option<f64>,

    /// Global temperature, in [0,1]. Overrides the value from the config
    /// file.
    #[structopt(long)]
    temperature: Option<f64>,

    /// If given, the full config used for the world (including overrides) is
    /// written to this path, in TOML format. Feed it back in with `--config`
    /// to get the same world again.
    #[structopt(long)]
    save_config: Option<PathBuf>,

    /// The report(s) to print after generation. Supported reports:
    ///
    /// summary - Grid size, seeds, and land/water totals
    ///
    /// continents - Every continent, largest first
    ///
    /// biomes - Number of tiles in each biome
    #[structopt(short, long, default_value = "summary")]
    report: Vec<Report>,

    /// The logging level to use during world generation. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different reports that can be printed about a world.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum Report {
    // If you change this, make sure to update the help text for `--report`!
    Summary,
    Continents,
    Biomes,
}

fn load_config(config_path: &Path) -> anyhow::Result<WorldConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Load the config file (or the default config), then apply overrides from
/// the command line. Everything is validated later, when the world is built.
fn build_config(opt: &Opt) -> anyhow::Result<WorldConfig> {
    let mut config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = &opt.seed {
        config.seed = Seed::from(seed.as_str());
    }
    if let Some(sea_level) = opt.sea_level {
        config.sea_level = sea_level;
    }
    if let Some(temperature) = opt.temperature {
        config.global_temperature = temperature;
    }
    Ok(config)
}

/// Fraction of the whole world, as a percentage
fn percent(count: usize, world: &World) -> f64 {
    count as f64 / world.tiles().len() as f64 * 100.0
}

fn print_report(report: Report, world: &World) {
    match report {
        Report::Summary => {
            let land = world.land_tile_count();
            println!("World {}x{}", world.width(), world.height());
            println!("  seed:               {}", world.config().seed);
            println!("  noise seed:         {}", world.noise_seed());
            println!("  sea level:          {}", world.sea_level());
            println!("  global temperature: {}", world.global_temperature());
            println!(
                "  land:               {} tiles ({:.1}%)",
                land,
                percent(land, world)
            );
            println!("  continents:         {}", world.continents().len());
        }
        Report::Continents => {
            println!("Continents");
            for continent in world.continents() {
                println!(
                    "  {:<16} {:>8} tiles ({:.1}%)",
                    continent.name(),
                    continent.len(),
                    percent(continent.len(), world)
                );
            }
        }
        Report::Biomes => {
            println!("Biomes");
            for (id, count) in world.biome_counts() {
                let biome = &world.biomes()[id];
                println!(
                    "  {:<16} {:<6} {:>8} tiles ({:.1}%)",
                    biome.name,
                    if biome.is_water { "water" } else { "land" },
                    count,
                    percent(count, world)
                );
            }
        }
    }
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let world = World::new(build_config(&opt)?)?;

    if let Some(path) = &opt.save_config {
        let contents = toml::to_string_pretty(world.config())
            .context("error serializing config")?;
        timed!(
            format!("Writing config to {:?}", path),
            log::Level::Info,
            fs::write(path, contents)
                .with_context(|| format!("error writing to file {:?}", path))?
        );
        info!("Saved config to {:?}", path);
    }

    for &report in &opt.report {
        print_report(report, &world);
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_config_reproduces_world() {
        let opt = Opt::from_iter(&[
            "saltmap",
            "--seed",
            "42",
            "--sea-level",
            "0.6",
            "--temperature",
            "0.3",
        ]);
        let config = WorldConfig {
            width: 24,
            height: 24,
            ..build_config(&opt).unwrap()
        };
        let world = World::new(config).unwrap();
        assert_eq!(world.sea_level(), 0.6);
        assert_eq!(world.global_temperature(), 0.3);

        // Same path as --save-config, then back in through --config
        let saved = toml::to_string_pretty(world.config()).unwrap();
        let reloaded: WorldConfig = toml::from_str(&saved).unwrap();
        assert_eq!(&reloaded, world.config());
        let replayed = World::new(reloaded).unwrap();
        assert_eq!(replayed.noise_seed(), world.noise_seed());
        assert_eq!(replayed.tiles(), world.tiles());
    }
}
