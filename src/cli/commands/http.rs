use clap::{Arg, Command};

pub const ARG_FRONTEND_BASE_URL: &str = "frontend-base-url";

/// Options resolved from the HTTP argument group.
#[derive(Debug)]
pub struct Options {
    pub frontend_base_url: String,
}

impl Options {
    /// Extract HTTP options from parsed matches.
    ///
    /// # Errors
    /// Returns an error if a defaulted argument is somehow missing.
    pub fn parse(matches: &clap::ArgMatches) -> anyhow::Result<Self> {
        let frontend_base_url = matches
            .get_one::<String>(ARG_FRONTEND_BASE_URL)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --frontend-base-url"))?;
        Ok(Self { frontend_base_url })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_FRONTEND_BASE_URL)
            .long(ARG_FRONTEND_BASE_URL)
            .help("Frontend origin allowed by CORS; https origins imply secure cookies")
            .env("REZERVI_FRONTEND_BASE_URL")
            .default_value("http://localhost:5173"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_frontend_base_url() {
        temp_env::with_vars([("REZERVI_FRONTEND_BASE_URL", None::<String>)], || {
            let command = crate::cli::commands::new();
            let matches = command.get_matches_from(vec!["rezervi", "--dsn", "postgres://"]);
            let options = Options::parse(&matches);
            assert!(options.is_ok());
            if let Ok(options) = options {
                assert_eq!(options.frontend_base_url, "http://localhost:5173");
            }
        });
    }
}
