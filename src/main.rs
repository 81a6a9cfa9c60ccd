use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use olist_dashboard::{common, config, generate_commands, plan_execution};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the analytical tables and render the configured exports
    Run {
        #[clap(short, long)]
        plan: String,
        /// Re-run the pipeline whenever a data file changes
        #[clap(short, long)]
        watch: bool,
    },
    /// Write a default plan file
    Init {
        #[clap(short, long)]
        plan: String,
    },
    /// Serve the read-only dashboard API
    #[cfg(feature = "server")]
    Serve {
        #[clap(short, long, default_value = "3000")]
        port: u16,
        #[clap(long, default_value = "dashboard.yaml")]
        plan: String,
        #[clap(long)]
        cors_origin: Option<String>,
    },
    Generate {
        #[clap(subcommand)]
        command: GenerateCommands,
    },
}

#[derive(Subcommand, Debug)]
enum GenerateCommands {
    Sample { dir: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Run { plan, watch } => {
            info!("Running plan: {}", plan);
            plan_execution::execute_plan(plan, watch)?;
        }
        Commands::Init { plan } => {
            info!("Initializing plan: {}", plan);
            let plan_file_path = plan;
            let plan = config::DashboardPlan::sample();
            let serialized_plan = serde_yaml::to_string(&plan)?;
            common::write_string_to_file(&plan_file_path, &serialized_plan)?;
        }
        #[cfg(feature = "server")]
        Commands::Serve {
            port,
            plan,
            cors_origin,
        } => {
            let plan_file_path = std::path::Path::new(&plan);
            let plan = config::DashboardPlan::from_file(plan_file_path)?;
            let data_dir = plan_file_path
                .parent()
                .map(|parent| parent.join(&plan.data.dir))
                .unwrap_or_else(|| std::path::PathBuf::from(&plan.data.dir));

            let cache = olist_dashboard::pipeline::PipelineCache::new();
            let data = cache.get_or_build(&data_dir, &plan.data)?;

            info!("Starting server on port {}", port);
            olist_dashboard::server::start_server(port, data, cors_origin.as_deref()).await?;
        }
        Commands::Generate { command } => match command {
            GenerateCommands::Sample { dir } => {
                info!("Generating sample: {}", dir);
                generate_commands::generate_sample(dir);
            }
        },
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("handlebars=off,{}", log_level)))
        .without_time()
        .init();
}
