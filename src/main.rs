use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use subprep::{parse_env_args, usage};

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cmd = match parse_env_args() {
        Ok(cmd) => cmd,
        Err(err) => {
            let program = std::env::args().next().unwrap_or_else(|| "subprep".to_owned());
            eprintln!("{program}: {err}");
            eprintln!();
            eprint!("{}", usage(&program));
            return Ok(ExitCode::FAILURE);
        }
    };

    debug!(program = %cmd.program, "command line accepted");
    print!("{}", cmd.show_option_values());
    Ok(ExitCode::SUCCESS)
}
