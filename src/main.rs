use clap::Parser;
use seir_scenario::runner::{run, Cli};

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
