use clap::Parser;
use logstat_cli::cli::Cli;
use logstat_cli::exit_codes::ExitCode;
use logstat_cli::{logging, output};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::InvalidConfig,
            };
            std::process::exit(code.as_i32());
        }
    };

    std::process::exit(run(&cli).as_i32());
}

fn run(cli: &Cli) -> ExitCode {
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from_error(&err);
        }
    };

    if let Err(err) = logging::init_logging(cli.verbose, config.logging_file.as_deref()) {
        eprintln!("Error: {err:#}");
        return ExitCode::InvalidConfig;
    }

    tracing::debug!(
        "Config: log_dir={}, report_dir={}, report_size={}, min_success_ratio={}, format={}",
        config.log_dir.display(),
        config.report_dir.display(),
        config.report_size,
        config.min_success_ratio,
        cli.format.as_str()
    );

    match logstat_core::run(&config) {
        Ok(outcome) => match output::print_outcome(&outcome, cli.format) {
            Ok(()) => ExitCode::Success,
            Err(err) => {
                tracing::error!("Cannot print run summary: {err:#}");
                ExitCode::IoError
            }
        },
        Err(err) => {
            tracing::error!("{err}");
            // With a logging file the error would otherwise be invisible on the terminal
            if config.logging_file.is_some() {
                eprintln!("Error: {err}");
            }
            ExitCode::from_error(&err)
        }
    }
}
