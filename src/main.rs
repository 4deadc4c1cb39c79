use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use limited_infection::{
    save_infected, Amount, GeneratorConfig, Graph, KernighanLinConfig, LimitedInfectionConfig,
    UserId,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time;

#[derive(Parser, Debug)]
#[command(name = "infect")]
#[command(about = "Split users for A/B testing, minimizing connections between groups")]
#[command(version)]
struct Cli {
    /// Print more diagnostics (repeat for debug output)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Infect the whole connected component of one user
    Total {
        /// CSV file: a user ID followed by the IDs of its students, one user per line
        #[arg(short, long)]
        input: PathBuf,

        /// First infected user
        #[arg(short, long)]
        user: UserId,

        /// File the infected user IDs are saved to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Infect a given number of users, breaking as few relationships as possible
    Limited {
        #[arg(short, long)]
        input: PathBuf,

        /// Number of users to infect, or a proportion between 0 and 1 (e.g. 0.7)
        #[arg(short = 'n', long)]
        count: Amount,

        /// Allowed distance from the target, as a number or a proportion
        #[arg(short = 'e', long, default_value = "0")]
        tolerance: Amount,

        /// Rounds of Kernighan-Lin before settling on the current split
        #[arg(long, default_value_t = KernighanLinConfig::default().max_rounds)]
        max_rounds: u32,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a random graph to test with
    Generate {
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value_t = 1000)]
        users: usize,

        #[arg(long, default_value_t = 50)]
        max_component_size: usize,

        #[arg(long, default_value_t = 0.1)]
        student_probability: f64,

        #[arg(long, default_value_t = 20)]
        max_students: usize,

        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Total {
            input,
            user,
            output,
        } => {
            let graph = load(&input)?;
            let infected = graph.total_infection(user)?;
            println!("A total of {} users were infected.", infected.len());
            save(output.as_deref(), &infected)
        }
        Commands::Limited {
            input,
            count,
            tolerance,
            max_rounds,
            output,
        } => {
            let graph = load(&input)?;
            let config = LimitedInfectionConfig {
                tolerance,
                verbose: cli.verbose > 0,
                refinement: KernighanLinConfig { max_rounds },
            };
            let t1 = time::Instant::now();
            let result = graph
                .limited_infection(count, &config)
                .with_context(|| format!("could not infect {count} users"))?;
            log::info!("limited infection took {}ms", t1.elapsed().as_millis());

            println!(
                "Infected {} of {} users, {} conflicting relationships.",
                result.infected.len(),
                graph.len(),
                result.conflicts()
            );
            save(output.as_deref(), &result.infected)
        }
        Commands::Generate {
            output,
            users,
            max_component_size,
            student_probability,
            max_students,
            seed,
        } => {
            let graph = Graph::generate(&GeneratorConfig {
                rng_seed: seed,
                num_users: users,
                max_component_size,
                student_probability,
                max_students,
            })?;
            graph
                .save_csv(&output)
                .with_context(|| format!("could not write {}", output.display()))?;
            println!("Saved {} users to {}", graph.len(), output.display());
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load(input: &Path) -> Result<Graph> {
    log::info!("loading users from {}", input.display());
    Graph::load_csv(input).with_context(|| format!("could not load users from {}", input.display()))
}

fn save(output: Option<&Path>, infected: &BTreeSet<UserId>) -> Result<()> {
    match output {
        Some(path) => {
            println!("Saving infected users to: {}", path.display());
            save_infected(path, infected)
                .with_context(|| format!("could not write {}", path.display()))
        }
        None => {
            println!("No output file specified, so results won't be saved");
            Ok(())
        }
    }
}
