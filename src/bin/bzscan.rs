//! bzscan command-line binary

fn main() -> anyhow::Result<()> {
    bzscan::cli::run_cli()
}
