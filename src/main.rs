mod cli;
mod runner;

fn main() -> anyhow::Result<()> {
    let cli = cli::parse_cli();
    runner::run_from_cli(cli)
}
