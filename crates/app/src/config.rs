use std::fmt;
use std::path::PathBuf;

use quiz_core::model::{QuizSettings, SettingsError};
use storage::SourceLocation;

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    EmptyValue { flag: &'static str },
    ConflictingSources,
    Settings(SettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::EmptyValue { flag } => write!(f, "{flag} must not be empty"),
            ArgsError::ConflictingSources => f.write_str("use either --data or --base-url, not both"),
            ArgsError::Settings(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<SettingsError> for ArgsError {
    fn from(err: SettingsError) -> Self {
        ArgsError::Settings(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, raw: &str) -> Result<T, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidNumber {
        flag,
        raw: raw.to_string(),
    })
}

fn truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [options]   # desktop window (default)");
    eprintln!("  cargo run -p app -- play [options]   # terminal quiz");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data <dir>         directory with chapters.json and data/ (default: .)");
    eprintln!("  --base-url <url>     fetch the same layout over HTTP instead");
    eprintln!("  --duration <secs>    countdown length (default: 1200)");
    eprintln!("  --sample <n>         questions drawn in all-chapters mode (default: 50)");
    eprintln!("  --shuffle-options    also shuffle answer options");
    eprintln!("  --seed <u64>         fixed shuffle seed");
    eprintln!("  --verbose            debug logging");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_DIR, QUIZ_BASE_URL, QUIZ_DURATION_SECS, QUIZ_SAMPLE_SIZE,");
    eprintln!("  QUIZ_SHUFFLE_OPTIONS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ui,
    Play,
}

impl Command {
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "play" => Some(Self::Play),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub source: SourceLocation,
    pub settings: QuizSettings,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl Args {
    /// Parse flags, falling back to `env` for anything not given.
    pub fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut data_dir: Option<String> = None;
        let mut base_url: Option<String> = None;
        let mut duration: Option<u32> = None;
        let mut sample: Option<usize> = None;
        let mut shuffle_options = false;
        let mut seed = None;
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => data_dir = Some(require_value(args, "--data")?),
                "--base-url" => base_url = Some(require_value(args, "--base-url")?),
                "--duration" => {
                    let value = require_value(args, "--duration")?;
                    duration = Some(parse_number("--duration", &value)?);
                }
                "--sample" => {
                    let value = require_value(args, "--sample")?;
                    sample = Some(parse_number("--sample", &value)?);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    seed = Some(parse_number("--seed", &value)?);
                }
                "--shuffle-options" => shuffle_options = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let source = match (data_dir, base_url) {
            (Some(_), Some(_)) => return Err(ArgsError::ConflictingSources),
            (Some(dir), None) => SourceLocation::Directory(PathBuf::from(dir)),
            (None, Some(url)) => SourceLocation::Remote(url),
            (None, None) => match (env("QUIZ_BASE_URL"), env("QUIZ_DATA_DIR")) {
                (Some(url), _) if !url.trim().is_empty() => SourceLocation::Remote(url),
                (_, Some(dir)) if !dir.trim().is_empty() => {
                    SourceLocation::Directory(PathBuf::from(dir))
                }
                _ => SourceLocation::Directory(PathBuf::from(".")),
            },
        };

        let duration = match duration {
            Some(value) => value,
            None => env("QUIZ_DURATION_SECS")
                .map(|raw| parse_number("QUIZ_DURATION_SECS", &raw))
                .transpose()?
                .unwrap_or(QuizSettings::DEFAULT_DURATION_SECS),
        };
        let sample = match sample {
            Some(value) => value,
            None => env("QUIZ_SAMPLE_SIZE")
                .map(|raw| parse_number("QUIZ_SAMPLE_SIZE", &raw))
                .transpose()?
                .unwrap_or(QuizSettings::DEFAULT_ALL_CHAPTERS_SAMPLE),
        };
        let shuffle_options =
            shuffle_options || env("QUIZ_SHUFFLE_OPTIONS").is_some_and(|raw| truthy(&raw));

        Ok(Self {
            source,
            settings: QuizSettings::new(duration, sample, shuffle_options)?,
            seed,
            verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Args::parse(&mut iter, |key| {
            env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn defaults_to_current_directory_and_classroom_settings() {
        let args = parse(&[], &[]).unwrap();
        assert_eq!(args.source, SourceLocation::Directory(PathBuf::from(".")));
        assert_eq!(args.settings, QuizSettings::default());
        assert_eq!(args.seed, None);
        assert!(!args.verbose);
    }

    #[test]
    fn flags_override_environment() {
        let args = parse(
            &["--data", "quiz", "--duration", "300", "--seed", "9"],
            &[("QUIZ_BASE_URL", "https://example.org"), ("QUIZ_DURATION_SECS", "60")],
        )
        .unwrap();
        assert_eq!(args.source, SourceLocation::Directory(PathBuf::from("quiz")));
        assert_eq!(args.settings.duration_secs(), 300);
        assert_eq!(args.seed, Some(9));
    }

    #[test]
    fn environment_fills_missing_flags() {
        let args = parse(
            &[],
            &[
                ("QUIZ_BASE_URL", "https://example.org/quiz"),
                ("QUIZ_SAMPLE_SIZE", "20"),
                ("QUIZ_SHUFFLE_OPTIONS", "true"),
            ],
        )
        .unwrap();
        assert_eq!(
            args.source,
            SourceLocation::Remote("https://example.org/quiz".into())
        );
        assert_eq!(args.settings.all_chapters_sample(), 20);
        assert!(args.settings.shuffle_options());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse(&["--duration"], &[]),
            Err(ArgsError::MissingValue { flag: "--duration" })
        ));
        assert!(matches!(
            parse(&["--sample", "lots"], &[]),
            Err(ArgsError::InvalidNumber { flag: "--sample", .. })
        ));
        assert!(matches!(
            parse(&["--duration", "0"], &[]),
            Err(ArgsError::Settings(SettingsError::InvalidDuration))
        ));
        assert!(matches!(
            parse(&["--data", "a", "--base-url", "http://b"], &[]),
            Err(ArgsError::ConflictingSources)
        ));
        assert!(matches!(
            parse(&["--frobnicate"], &[]),
            Err(ArgsError::UnknownArg(_))
        ));
    }
}
