//! Command-line Configuration

use std::path::PathBuf;

use clap::{Args, Parser};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Price a basket against a catalog
#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Price a basket of items", long_about = None)]
pub struct CheckoutArgs {
    /// Item codes, one character per item (e.g. "AAABBD")
    #[arg(default_value = "")]
    pub skus: String,

    /// Catalog YAML file
    #[arg(
        short,
        long,
        env = "CHECKOUT_CATALOG",
        default_value = "fixtures/catalogs/standard.yml"
    )]
    pub catalog: PathBuf,

    /// Print an itemised receipt instead of just the total
    #[arg(short, long)]
    pub receipt: bool,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        CheckoutArgs::command().debug_assert();
    }

    #[test]
    fn parses_basket_and_flags() -> TestResult {
        let args = CheckoutArgs::try_parse_from([
            "checkout",
            "AABSTX",
            "--catalog",
            "tables/shop.yml",
            "--receipt",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])?;

        assert_eq!(args.skus, "AABSTX");
        assert_eq!(args.catalog, PathBuf::from("tables/shop.yml"));
        assert!(args.receipt);
        assert_eq!(args.logging.log_format, LogFormat::Json);
        assert_eq!(args.logging.log_level, "debug");

        Ok(())
    }

    #[test]
    fn basket_may_be_omitted() -> TestResult {
        let args = CheckoutArgs::try_parse_from(["checkout"])?;

        assert!(args.skus.is_empty());
        assert!(!args.receipt);

        Ok(())
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = CheckoutArgs::try_parse_from(["checkout", "--log-format", "xml"]);

        assert!(result.is_err());
    }
}
