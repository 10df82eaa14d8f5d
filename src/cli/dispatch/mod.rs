//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the appropriate
//! action, such as starting the API server with its full configuration state.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::http;
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let http_opts = http::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        frontend_base_url: http_opts.frontend_base_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_action_from_matches() {
        temp_env::with_vars(
            [
                ("REZERVI_PORT", None::<&str>),
                ("REZERVI_FRONTEND_BASE_URL", Some("https://app.rezervi.dev")),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec![
                    "rezervi",
                    "--dsn",
                    "postgres://user@localhost:5432/rezervi",
                ]);
                let result = handler(&matches);
                assert!(result.is_ok());
                if let Ok(Action::Server(args)) = result {
                    assert_eq!(args.port, 8080);
                    assert_eq!(args.dsn, "postgres://user@localhost:5432/rezervi");
                    assert_eq!(args.frontend_base_url, "https://app.rezervi.dev");
                }
            },
        );
    }
}
