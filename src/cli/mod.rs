//! CLI implementation using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::output::Format;

/// offer-search - Find the offers most related to a retailer, brand, or category.
#[derive(Parser, Debug)]
#[command(name = "offer-search")]
#[command(author, version, about, long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Retailer, brand, or product category to search for (prompts when omitted)
    pub term: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Brand-to-category table
    #[arg(long, value_name = "CSV")]
    pub brands: Option<PathBuf>,

    /// Category-to-parent table
    #[arg(long, value_name = "CSV")]
    pub categories: Option<PathBuf>,

    /// Offer table
    #[arg(long, value_name = "CSV")]
    pub offers: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::try_parse_from(["offer-search"]).unwrap();
        assert!(cli.term.is_none());
        assert!(cli.format.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_term() {
        let cli = Cli::try_parse_from(["offer-search", "walmart"]).unwrap();
        assert_eq!(cli.term.as_deref(), Some("walmart"));
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::try_parse_from(["offer-search", "-f", "json", "beer"]).unwrap();
        assert_eq!(cli.format, Some(Format::Json));
    }

    #[test]
    fn test_cli_format_markdown() {
        let cli = Cli::try_parse_from(["offer-search", "--format", "markdown"]).unwrap();
        assert_eq!(cli.format, Some(Format::Markdown));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["offer-search", "-f", "yaml"]).is_err());
    }

    #[test]
    fn test_cli_config_flag() {
        let cli = Cli::try_parse_from(["offer-search", "-c", "search.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("search.toml")));
    }

    #[test]
    fn test_cli_last_table_path_wins() {
        let cli =
            Cli::try_parse_from(["offer-search", "--offers", "a.csv", "--offers", "b.csv"]).unwrap();
        assert_eq!(cli.offers, Some(PathBuf::from("b.csv")));
    }

    #[test]
    fn test_cli_print_config_flag() {
        let cli = Cli::try_parse_from(["offer-search", "--print-config"]).unwrap();
        assert!(cli.print_config);
        assert!(!Cli::try_parse_from(["offer-search"]).unwrap().print_config);
    }

    #[test]
    fn test_cli_table_paths() {
        let cli = Cli::try_parse_from([
            "offer-search",
            "--brands",
            "b.csv",
            "--categories",
            "c.csv",
            "--offers",
            "o.csv",
        ])
        .unwrap();
        assert_eq!(cli.brands, Some(PathBuf::from("b.csv")));
        assert_eq!(cli.categories, Some(PathBuf::from("c.csv")));
        assert_eq!(cli.offers, Some(PathBuf::from("o.csv")));
    }
}
