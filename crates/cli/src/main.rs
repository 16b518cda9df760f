use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vidrec_cli::commands::{self, DataPaths};
use vidrec_core::config;
use vidrec_core::similarity::SimilarityKernel;
use vidrec_core::{EvalConfig, ScorerConfig};

#[derive(Parser)]
#[command(name = "vidrec", about = "Hybrid collaborative + content short-video recommender")]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, env = "VIDREC_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DataArgs {
    /// Interaction CSV (user_id, video_id, watch_ratio)
    #[arg(long, env = "VIDREC_INTERACTIONS")]
    interactions: PathBuf,

    /// Item feature CSV (video_id, feat)
    #[arg(long, env = "VIDREC_FEATURES")]
    features: PathBuf,
}

#[derive(Args)]
struct TuningArgs {
    /// Number of similar users averaged by the collaborative component
    #[arg(long, env = "VIDREC_SIMILAR_USERS", default_value_t = config::DEFAULT_SIMILAR_USERS)]
    similar_users: usize,

    /// Number of most-engaged history items used as content sources
    #[arg(long, env = "VIDREC_SOURCE_ITEMS", default_value_t = config::DEFAULT_SOURCE_ITEMS)]
    source_items: usize,

    /// Number of content neighbours per source item
    #[arg(long, env = "VIDREC_SIMILAR_ITEMS", default_value_t = config::DEFAULT_SIMILAR_ITEMS)]
    similar_items: usize,

    /// Similarity kernel: cosine or linear
    #[arg(long, env = "VIDREC_KERNEL", default_value_t = SimilarityKernel::Cosine)]
    kernel: SimilarityKernel,
}

impl From<&TuningArgs> for ScorerConfig {
    fn from(args: &TuningArgs) -> Self {
        ScorerConfig {
            similar_users: args.similar_users,
            source_items: args.source_items,
            similar_items: args.similar_items,
            kernel: args.kernel,
        }
    }
}

impl From<&DataArgs> for DataPaths {
    fn from(args: &DataArgs) -> Self {
        DataPaths {
            interactions: args.interactions.clone(),
            features: args.features.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Rank unseen items for one user
    Recommend {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        tuning: TuningArgs,

        /// User to recommend for
        #[arg(long)]
        user: u32,

        /// Content weight in [0, 1]; collaborative weight is 1 - w
        #[arg(long, default_value_t = config::DEFAULT_CONTENT_WEIGHT)]
        content_weight: f32,

        /// Number of items to return
        #[arg(long, default_value_t = config::DEFAULT_RESULT_LENGTH)]
        top: usize,
    },
    /// Hold out part of each user's log and report ranking metrics
    Evaluate {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        tuning: TuningArgs,

        /// Ranking cutoff
        #[arg(long, default_value_t = config::DEFAULT_EVAL_K)]
        k: usize,

        /// Content weights to compare (repeat or comma-separate)
        #[arg(
            long,
            value_delimiter = ',',
            num_args = 1..,
            default_values_t = [config::DEFAULT_CONTENT_WEIGHT]
        )]
        content_weight: Vec<f32>,

        /// Fraction of each user's interactions held out
        #[arg(long, default_value_t = config::DEFAULT_TEST_FRACTION)]
        test_fraction: f64,

        /// Shuffle seed for the split
        #[arg(long, default_value_t = config::DEFAULT_SPLIT_SEED)]
        seed: u64,

        /// Held-out rows at or above this watch ratio are relevant
        #[arg(long, default_value_t = config::DEFAULT_RELEVANCE_THRESHOLD)]
        relevance_threshold: f32,
    },
}

fn init_logging(json: bool) {
    let filter = EnvFilter::from_default_env()
        .add_directive("vidrec_core=info".parse().expect("valid directive literal"))
        .add_directive("vidrec_cli=info".parse().expect("valid directive literal"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    match &cli.command {
        Command::Recommend {
            data,
            tuning,
            user,
            content_weight,
            top,
        } => {
            let recs = commands::recommend(
                &data.into(),
                tuning.into(),
                *user,
                *content_weight,
                *top,
            )?;
            println!("{}", serde_json::to_string_pretty(&recs)?);
        }
        Command::Evaluate {
            data,
            tuning,
            k,
            content_weight,
            test_fraction,
            seed,
            relevance_threshold,
        } => {
            let eval = EvalConfig {
                k: *k,
                test_fraction: *test_fraction,
                relevance_threshold: *relevance_threshold,
                seed: *seed,
            };
            let reports = commands::evaluate(&data.into(), tuning.into(), eval, content_weight)?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}
