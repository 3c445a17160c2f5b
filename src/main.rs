use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use orbitals::render::{
    render_cloud, render_radial_plot, save_png, write_slice_animation, Colormap,
};
use orbitals::{generate_electron_cloud, QuantumNumbers, RadialPlotConfig, SamplerConfig, SliceConfig};

/// Hydrogen orbital plots, electron clouds and slice animations.
#[derive(Parser, Debug)]
#[command(version, about = "Hydrogen Quantum Orbital Visualizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Radial probability density P(r) for 1s, 2s, 2p and 3d
    Radial {
        #[arg(long, default_value_t = 25.0)]
        r_max: f64,
        #[arg(long, default_value_t = 1000)]
        points: usize,
        #[arg(short, long, default_value = "radial_density.png")]
        output: PathBuf,
    },
    /// Monte Carlo electron cloud projected to an image
    Cloud {
        #[command(flatten)]
        state: StateArgs,
        /// Requested number of accepted points
        #[arg(short, long, default_value_t = 50_000)]
        points: usize,
        /// Attempt budget as a multiple of the requested points
        #[arg(long, default_value_t = 200)]
        attempts: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        quiet: bool,
        #[arg(long, default_value_t = 800)]
        size: u32,
        #[arg(short, long, default_value = "electron_cloud.png")]
        output: PathBuf,
    },
    /// Animated cross-sections of |ψ|² swept along z
    Slice {
        #[command(flatten)]
        state: StateArgs,
        #[arg(long, default_value_t = 18.0)]
        grid_limit: f64,
        #[arg(long, default_value_t = 250)]
        resolution: usize,
        #[arg(long, default_value_t = 60)]
        frames: usize,
        #[arg(long, default_value_t = 15)]
        fps: u32,
        #[arg(long, default_value = "magma")]
        cmap: String,
        #[arg(short, long, default_value = "orbital_slicing.gif")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct StateArgs {
    /// Principal quantum number
    #[arg(short, default_value_t = 3, allow_negative_numbers = true)]
    n: i32,
    /// Azimuthal quantum number
    #[arg(short, default_value_t = 2, allow_negative_numbers = true)]
    l: i32,
    /// Magnetic quantum number
    #[arg(short, default_value_t = 0, allow_negative_numbers = true)]
    m: i32,
}

impl StateArgs {
    fn quantum_numbers(&self) -> Result<QuantumNumbers, String> {
        QuantumNumbers::new(self.n, self.l, self.m).map_err(|e| e.to_string())
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Radial { r_max, points, output } => {
            let config = RadialPlotConfig {
                r_max,
                num_points: points,
                ..RadialPlotConfig::default()
            };
            let img = render_radial_plot(&config, 1000, 600)?;
            save_png(&img, &output)?;
            println!("Figure saved to: {}", output.display());
        }
        Command::Cloud {
            state,
            points,
            attempts,
            seed,
            quiet,
            size,
            output,
        } => {
            let mut config = SamplerConfig::default().with_attempts_multiplier(attempts);
            config.seed = seed;
            config.verbose = !quiet;

            let cloud = generate_electron_cloud(state.n, state.l, state.m, points, &config)
                .map_err(|e| e.to_string())?;
            if cloud.is_empty() {
                return Err(format!("no points were accepted for {}", cloud.qn.label()));
            }
            let img = render_cloud(&cloud, size, Colormap::Inferno);
            save_png(&img, &output)?;
            println!("Figure saved to: {}", output.display());
        }
        Command::Slice {
            state,
            grid_limit,
            resolution,
            frames,
            fps,
            cmap,
            output,
        } => {
            let qn = state.quantum_numbers()?;
            let config = SliceConfig {
                grid_limit,
                resolution,
                frames,
                fps,
                ..SliceConfig::default()
            };
            println!(
                "Rendering {} frames of orbital {}. This can take a minute...",
                config.frames,
                qn.label()
            );
            write_slice_animation(qn, &config, Colormap::from_name(&cmap), &output)?;
            println!("Done! Animation saved as: {}", output.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    println!("Hydrogen Quantum Orbital Visualizer - Rust");
    println!("==========================================");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
