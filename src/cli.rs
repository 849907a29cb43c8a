use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zcalc", version, about = "Keypad calculator and static dev server")]
pub struct Cli {
    /// Path to a config file (defaults to $XDG_CONFIG_HOME/zcalc/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive calculator (default)
    Repl,
    /// Evaluate a single expression and print the result
    Eval {
        /// Expression to evaluate, e.g. `2+2*3`
        #[arg(required = true, allow_hyphen_values = true, allow_negative_numbers = true)]
        expression: Vec<String>,
    },
    /// Serve static files for local development
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<IpAddr>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory to serve
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["zcalc"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_eval_joins_negative_expression() {
        let cli = Cli::try_parse_from(["zcalc", "eval", "-3", "*", "2"]).unwrap();
        match cli.command {
            Some(Commands::Eval { expression }) => assert_eq!(expression, ["-3", "*", "2"]),
            _ => panic!("expected eval"),
        }
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from(["zcalc", "-v", "serve", "--port", "9000", "-r", "site"])
            .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Some(Commands::Serve { host, port, root }) => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
                assert_eq!(root, Some(PathBuf::from("site")));
            }
            _ => panic!("expected serve"),
        }
    }
}
