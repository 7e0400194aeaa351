use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::util::BrokenPipeGuard;
use tracing::Level;

mod commands;
mod telemetry;

#[cfg(all(
	target_os = "linux",
	feature = "mimalloc",
	not(feature = "system-alloc")
))]
#[global_allocator]
static GLOBAL: mimallocator::Mimalloc = mimallocator::Mimalloc;

#[derive(Parser)]
#[command(name = "kforge")]
#[command(about = "Generate Kubernetes manifests from configuration records", long_about = None)]
#[command(version)]
struct Cli {
	/// Log level (error, warn, info, debug, trace). Falls back to RUST_LOG
	#[arg(long, global = true)]
	log_level: Option<Level>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Generate the manifest described by a request file
	Generate(commands::generate::GenerateArgs),

	/// List the resource kinds with a fixed apiVersion
	Kinds(commands::kinds::KindsArgs),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	telemetry::init(cli.log_level)?;

	let stdout = BrokenPipeGuard::new(std::io::stdout());

	match cli.command {
		Commands::Generate(args) => commands::generate::run(args, std::io::stdin().lock(), stdout),
		Commands::Kinds(args) => commands::kinds::run(args, stdout),
	}
}
