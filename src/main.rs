use anyhow::{Context, Result};
use clap::Parser;
use novi::app::App;
use novi::config::{Cli, Config};
use novi::logging;

fn main() {
	if let Err(err) = run() {
		eprintln!("{:#}", err);
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let cli = Cli::parse();
	let config = Config::from_cli(&cli).context("load config failed")?;
	let logging = logging::init_logging(&config.log).context("initialize logging failed")?;
	App::new(config, cli.file).run(Some(logging)).context("run app failed")
}
