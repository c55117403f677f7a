use anyhow::Result;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::env;
use tickport::cli::{self, ConvertArgs};
use tickport::config::Config;
use tickport::context::StandardContext;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || matches!(args[1].as_str(), "--help" | "-h" | "help") {
        cli::print_help("tickport");
        return Ok(());
    }

    if args[1] != "convert" {
        cli::print_help("tickport");
        anyhow::bail!("Unknown command: {}", args[1]);
    }

    let convert_args = ConvertArgs::parse(&args[2..])?;
    if convert_args.help {
        cli::print_help("tickport");
        return Ok(());
    }

    let _ = TermLogger::init(
        log::LevelFilter::Trace,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    log::set_max_level(cli::log_filter(convert_args.verbose, None));

    let ctx = StandardContext::new(convert_args.root.clone());
    let config = Config::load_or_default(&ctx)?;
    log::set_max_level(cli::log_filter(
        convert_args.verbose,
        Some(config.log_level),
    ));

    let outcome = cli::run_convert(&ctx, &config, &convert_args)?;
    println!(
        "Imported {} tasks into {} lists -> {}",
        outcome.tasks,
        outcome.lists,
        outcome.output.display()
    );
    Ok(())
}
