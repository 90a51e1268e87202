use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::{error, warn};
use osintaam::cli::{Args, Command};
use osintaam::types::ExportFormat;
use osintaam::{config, output, LogFacade, Logger, OsintEngine};
use std::process;
use std::sync::Arc;

const BANNER: &str = r#"
   ____  _____ _____   ____________    ___    __  ___
  / __ \/ ___//  _/ | / /_  __/   |  /   |  /  |/  /
 / / / /\__ \ / //  |/ / / / / /| | / /| | / /|_/ /
/ /_/ /___/ // // /|  / / / / ___ |/ ___ |/ /  / /
\____//____/___/_/ |_/ /_/ /_/  |_/_/  |_/_/  /_/

  Open Source Intelligence Analysis & Analytics Machine
"#;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let Some(command) = args.command.clone() else {
        Args::command().print_help()?;
        return Ok(());
    };

    if !args.silent {
        println!("{}", BANNER);
    }

    tokio::select! {
        outcome = run(&args, &command) => {
            if let Err(e) = outcome {
                error!("Error during search: {}", e);
                process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Search interrupted by user");
            process::exit(1);
        }
    }

    Ok(())
}

async fn run(args: &Args, command: &Command) -> Result<()> {
    let mut config = config::load_config(args.config_path.as_deref())?;
    args.apply_overrides(&mut config, command)?;
    config::validate_config(&config)?;

    let logger: Arc<dyn Logger> = Arc::new(LogFacade::default());
    let mut engine = OsintEngine::new(&config, logger)?;
    engine.run(&command.query()).await;

    println!("\n{}", output::rule());
    println!("Search Results:");
    println!("{}", output::rule());
    println!("{}", engine.export_results(ExportFormat::Txt)?);

    let output_args = command.output();
    if let Some(path) = &output_args.output {
        engine.save_results(path, output_args.export_format());
    }

    Ok(())
}
