use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;
use timespace_sim::Timeline;

#[derive(Parser)]
#[command(name = "timespace-cli", about = "CLI demos for the timespace temporal core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and timeline defaults
    Info,
    /// Step a timeline, writing a value each step, then read history back
    History {
        /// Number of steps to simulate
        #[arg(short, long, default_value = "10")]
        ticks: u32,
        /// Retention capacity for the clock and its slots
        #[arg(short, long, default_value = "8")]
        capacity: usize,
    },
    /// Demonstrate rewinding: write, leap backward, fork, and re-read
    Rewind {
        /// Number of steps before the rewind
        #[arg(short, long, default_value = "6")]
        ticks: u32,
        /// Tick to rewind to
        #[arg(long, default_value = "2")]
        to: u32,
        /// Retention capacity for the clock and its slots
        #[arg(short, long, default_value = "8")]
        capacity: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("timespace-cli v{}", env!("CARGO_PKG_VERSION"));
            let timeline = Timeline::new(8);
            println!("{}", timeline.summary());
        }
        Commands::History { ticks, capacity } => {
            println!("History demo: capacity={capacity}, ticks={ticks}");

            let mut timeline = Timeline::new(capacity);
            let mut position = timeline.track::<Vec3>();
            let mut stamps = Vec::new();

            for i in 0..ticks {
                stamps.push(timeline.step());
                position.write(timeline.clock(), Vec3::new(i as f32, 0.0, 0.0));
            }
            println!("{}", timeline.summary());

            for stamp in &stamps {
                match position.read_as_of(timeline.clock(), *stamp) {
                    Some(p) => println!("  tick {:>3}: position {:?}", stamp.tick, p),
                    None => println!("  tick {:>3}: evicted", stamp.tick),
                }
            }
        }
        Commands::Rewind { ticks, to, capacity } => {
            anyhow::ensure!(to < ticks, "rewind target must lie before the last step");
            println!("Rewind demo: capacity={capacity}, ticks={ticks}, rewind to tick {to}");

            let mut timeline = Timeline::new(capacity);
            let mut position = timeline.track::<Vec3>();
            let mut stamps = Vec::new();

            for i in 0..ticks {
                stamps.push(timeline.step());
                position.write(timeline.clock(), Vec3::new(i as f32, 0.0, 0.0));
            }
            let last_before = *stamps.last().expect("ticks > 0");
            println!("Before rewind: {}", timeline.summary());
            println!(
                "  position as of tick {}: {:?}",
                last_before.tick,
                position.read_as_of(timeline.clock(), last_before)
            );

            timeline.rewind(to);
            position.write(timeline.clock(), Vec3::new(-1.0, 0.0, 0.0));
            println!("After rewind + forked write: {}", timeline.summary());
            println!(
                "  position now: {:?}",
                position.read(timeline.clock())
            );
            println!(
                "  position as of pre-rewind tick {} (clamped to fork point): {:?}",
                last_before.tick,
                position.read_as_of(timeline.clock(), last_before)
            );
        }
    }

    Ok(())
}
