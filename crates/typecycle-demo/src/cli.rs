#![forbid(unsafe_code)]

//! Command-line argument parsing for the `typecycle` binary.
//!
//! Parses args by hand to keep the binary lean. Environment variables with
//! the `TYPECYCLE_` prefix supply defaults; explicit flags win.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
typecycle: a typewriter effect for your terminal

USAGE:
    typecycle [OPTIONS]

OPTIONS:
    --text=STR           Type STR instead of the preset (repeat for more strings)
    --instances=N        Run N independent copies on N stacked lines (default: 1)
    --exit-after-ms=N    Quit after N milliseconds (default: 0, run until Ctrl+C)
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    TYPECYCLE_INSTANCES       Override --instances default
    TYPECYCLE_EXIT_AFTER_MS   Override --exit-after-ms default
    TYPECYCLE_LOG             tracing filter directive, logs go to stderr
    TYPECYCLE_DEBUG_TRACE     Set to 1 for timestamped runtime trace on stderr";

/// Upper bound on stacked instances.
pub const MAX_INSTANCES: u16 = 64;

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Custom cycle strings, in order. Empty means the preset.
    pub texts: Vec<String>,
    /// Number of stacked instances.
    pub instances: u16,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            texts: Vec::new(),
            instances: 1,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse process arguments and environment; prints and exits on
    /// `--help`, `--version`, or invalid input.
    pub fn parse() -> Self {
        let args = env::args().skip(1);
        match Self::parse_from(args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("typecycle {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from explicit arguments and an environment lookup.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending argument.
    pub fn parse_from<I, F>(args: I, env_var: F) -> Result<Command, String>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment defaults first; malformed values are ignored.
        if let Some(val) = env_var("TYPECYCLE_INSTANCES")
            && let Ok(n) = val.parse()
        {
            opts.instances = n;
        }
        if let Some(val) = env_var("TYPECYCLE_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--text=") {
                        opts.texts.push(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--instances=") {
                        opts.instances = val
                            .parse()
                            .map_err(|_| format!("Invalid --instances value: {val}"))?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        if opts.instances == 0 || opts.instances > MAX_INSTANCES {
            return Err(format!(
                "--instances must be between 1 and {MAX_INSTANCES}, got {}",
                opts.instances
            ));
        }
        Ok(Command::Run(opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        Opts::parse_from(args.iter().map(|s| s.to_string()), |_| None)
    }

    fn parse_env(args: &[&str], vars: &[(&str, &str)]) -> Result<Command, String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Opts::parse_from(args.iter().map(|s| s.to_string()), move |key| {
            vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert!(opts.texts.is_empty());
        assert_eq!(opts.instances, 1);
        assert_eq!(opts.exit_after_ms, 0);
        assert_eq!(parse(&[]), Ok(Command::Run(opts)));
    }

    #[test]
    fn texts_keep_order() {
        let Ok(Command::Run(opts)) = parse(&["--text=Hi", "--text=Yo"]) else {
            panic!("expected run");
        };
        assert_eq!(opts.texts, vec!["Hi", "Yo"]);
    }

    #[test]
    fn text_may_contain_equals_and_be_empty() {
        let Ok(Command::Run(opts)) = parse(&["--text=a=b", "--text="]) else {
            panic!("expected run");
        };
        assert_eq!(opts.texts, vec!["a=b", ""]);
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["--help"]), Ok(Command::Help));
        assert_eq!(parse(&["-V"]), Ok(Command::Version));
    }

    #[test]
    fn flags_override_env() {
        let Ok(Command::Run(opts)) = parse_env(
            &["--instances=3"],
            &[("TYPECYCLE_INSTANCES", "5"), ("TYPECYCLE_EXIT_AFTER_MS", "900")],
        ) else {
            panic!("expected run");
        };
        assert_eq!(opts.instances, 3);
        assert_eq!(opts.exit_after_ms, 900);
    }

    #[test]
    fn malformed_env_is_ignored() {
        let Ok(Command::Run(opts)) = parse_env(&[], &[("TYPECYCLE_INSTANCES", "many")]) else {
            panic!("expected run");
        };
        assert_eq!(opts.instances, 1);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(parse(&["--instances=x"]).unwrap_err().contains("--instances"));
        assert!(parse(&["--exit-after-ms=-1"]).is_err());
        assert!(parse(&["--instances=0"]).is_err());
        assert!(parse(&["--instances=65"]).is_err());
        assert_eq!(
            parse(&["--bogus"]),
            Err("Unknown argument: --bogus".to_string())
        );
    }

    #[test]
    fn help_text_lists_env_vars() {
        assert!(HELP_TEXT.contains("TYPECYCLE_INSTANCES"));
        assert!(HELP_TEXT.contains("TYPECYCLE_EXIT_AFTER_MS"));
        assert!(HELP_TEXT.contains("TYPECYCLE_LOG"));
        assert!(!VERSION.is_empty());
    }

    proptest::proptest! {
        #[test]
        fn any_texts_round_trip_through_flags(texts in proptest::collection::vec("[^\\x00]{0,12}", 1..5)) {
            let args: Vec<String> = texts.iter().map(|t| format!("--text={t}")).collect();
            let parsed = Opts::parse_from(args, |_| None);
            let Ok(Command::Run(opts)) = parsed else {
                panic!("expected run, got {parsed:?}");
            };
            proptest::prop_assert_eq!(opts.texts, texts);
        }
    }
}
