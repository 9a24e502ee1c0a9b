use std::process::ExitCode;

use pos_infra::PosConfig;
use pos_terminal::Terminal;

fn main() -> ExitCode {
    let config = match PosConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::from(2);
        }
    };

    pos_observability::init(config.log_format);
    tracing::info!(
        catalog = %config.catalog_path.display(),
        ledger = %config.ledger_path.display(),
        receipts = %config.receipt_dir.display(),
        "starting point-of-sale terminal"
    );

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut terminal = Terminal::new(&config, stdin, stdout);

    match terminal.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "terminal stopped");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
