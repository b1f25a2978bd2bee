use clap::Parser;

use gp2gp_cli::{init_tracing, resolve_generator_config};
use nhs_numbers::{generate_file, SEED_ENV_VAR};

#[derive(Parser)]
#[command(name = "nhs-number-file-generator")]
#[command(about = "Write a shuffled NHS number source file for GP2GP test runs")]
struct Cli {
    /// Destination file path
    file_name: Option<String>,
    /// Literal mapping of NHS number to repeat count, e.g. "{'9000000009': 2, '9000000017': 1}"
    input_data: Option<String>,
    /// Seed for the shuffle (falls back to NHS_NUMBER_SEED)
    #[arg(long)]
    seed: Option<u64>,
    /// Do not write a newline after the last NHS number
    #[arg(long)]
    no_trailing_newline: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("nhs_numbers=info")?;

    let cli = Cli::parse();
    let config = resolve_generator_config(
        cli.seed,
        std::env::var(SEED_ENV_VAR).ok(),
        cli.no_trailing_newline,
    )?;

    let generated = generate_file(
        cli.file_name.as_deref().unwrap_or_default(),
        cli.input_data.as_deref().unwrap_or_default(),
        &config,
    )?;

    println!(
        "Successfully generated source file at '{}'",
        generated.path.display()
    );

    Ok(())
}
