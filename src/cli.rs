use crate::error::Result;
use crate::platforms;
use crate::types::{Category, Config, ExportFormat, Query};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

#[derive(Parser, Debug, Clone)]
#[command(
    name = "osintaam",
    version,
    long_version = LONG_VERSION,
    about = "OSINTAAM - Open Source Intelligence Analysis & Analytics Machine",
    after_help = "Examples:
  osintaam email --target user@example.com
  osintaam username --target john_doe
  osintaam domain --target example.com
  osintaam phone --target +1234567890
  osintaam tor --query \"leaked data\""
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification
    #[arg(long = "insecure", global = true)]
    pub insecure: bool,

    /// Verbose mode
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Silent mode (no banner)
    #[arg(long = "silent", global = true)]
    pub silent: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search email in breaches
    Email(TargetArgs),
    /// Search username on platforms
    Username(UsernameArgs),
    /// Search domain information
    Domain(TargetArgs),
    /// Search phone in breaches
    Phone(TargetArgs),
    /// Monitor Tor/Dark Web sources
    Tor(QueryArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TargetArgs {
    /// Target to search
    #[arg(long = "target", value_name = "TARGET")]
    pub target: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct UsernameArgs {
    /// Username to search
    #[arg(long = "target", value_name = "USERNAME")]
    pub target: String,

    /// Only check these platforms
    #[arg(short = 'p', long = "platform", value_name = "NAME")]
    pub platforms: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct QueryArgs {
    /// Search query for Tor monitoring
    #[arg(long = "query", value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct OutputArgs {
    /// Output file path
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output file format (json or txt; anything else is written as json)
    #[arg(long = "format", value_name = "FORMAT", default_value = "json")]
    pub format: String,
}

impl OutputArgs {
    pub fn export_format(&self) -> ExportFormat {
        ExportFormat::from_name(&self.format)
    }
}

impl Args {
    /// Command line flags win over the config file and the environment.
    pub fn apply_overrides(&self, config: &mut Config, command: &Command) -> Result<()> {
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.insecure {
            config.verify_tls = false;
        }
        if let Command::Username(username_args) = command {
            if !username_args.platforms.is_empty() {
                config.platforms = platforms::select_platforms(config, &username_args.platforms)?;
            }
        }
        Ok(())
    }
}

impl Command {
    pub fn query(&self) -> Query {
        match self {
            Command::Email(args) => Query::new(Category::Email, args.target.as_str()),
            Command::Username(args) => Query::new(Category::Username, args.target.as_str()),
            Command::Domain(args) => Query::new(Category::Domain, args.target.as_str()),
            Command::Phone(args) => Query::new(Category::Phone, args.target.as_str()),
            Command::Tor(args) => Query::new(Category::Tor, args.query.as_str()),
        }
    }

    pub fn output(&self) -> &OutputArgs {
        match self {
            Command::Email(args) | Command::Domain(args) | Command::Phone(args) => &args.output,
            Command::Username(args) => &args.output,
            Command::Tor(args) => &args.output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_username_with_output() {
        let args = Args::try_parse_from([
            "osintaam", "username", "--target", "octocat", "-p", "github", "--output", "out.txt", "--format", "txt",
        ])
        .unwrap();
        let command = args.command.unwrap();
        assert_eq!(command.query(), Query::new(Category::Username, "octocat"));
        assert_eq!(command.output().output, Some(PathBuf::from("out.txt")));
        assert_eq!(command.output().export_format(), ExportFormat::Txt);
        match command {
            Command::Username(u) => assert_eq!(u.platforms, vec!["github".to_string()]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_tor_requires_query() {
        assert!(Args::try_parse_from(["osintaam", "tor", "--target", "x"]).is_err());
        let args = Args::try_parse_from(["osintaam", "tor", "--query", "leaked data"]).unwrap();
        assert_eq!(args.command.unwrap().query(), Query::new(Category::Tor, "leaked data"));
    }

    #[test]
    fn test_target_required() {
        assert!(Args::try_parse_from(["osintaam", "email"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["osintaam", "domain", "--target", "example.com", "--timeout", "5", "--insecure"]).unwrap();
        assert_eq!(args.timeout, Some(5));
        assert!(args.insecure);
        assert_eq!(args.command.unwrap().output().export_format(), ExportFormat::Json);
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["osintaam"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "osintaam", "username", "--target", "octocat", "--insecure", "--timeout", "3", "-p", "linkedin",
        ])
        .unwrap();
        let command = args.command.clone().unwrap();

        let mut config = Config::default();
        args.apply_overrides(&mut config, &command).unwrap();
        assert!(!config.verify_tls);
        assert_eq!(config.timeout_secs, 3);
        let names: Vec<&str> = config.platforms.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["linkedin"]);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::try_parse_from(["osintaam", "email", "--target", "a@b.c"]).unwrap();
        let command = args.command.clone().unwrap();

        let mut config = Config::default();
        args.apply_overrides(&mut config, &command).unwrap();
        assert!(config.verify_tls);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.platforms, Config::default().platforms);
    }

    #[test]
    fn test_unknown_platform_flag_rejected() {
        let args = Args::try_parse_from(["osintaam", "username", "--target", "x", "-p", "myspace"]).unwrap();
        let command = args.command.clone().unwrap();
        assert!(args.apply_overrides(&mut Config::default(), &command).is_err());
    }
}
