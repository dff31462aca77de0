use std::path::PathBuf;

use clap::Parser;

/// Compose a survey in the terminal and export it as `survey-form.json`.
#[derive(Debug, Parser)]
#[command(name = "survey-builder", version, about)]
pub struct Config {
    /// Directory the exported `survey-form.json` is written to.
    #[arg(short, long, env = "SURVEY_OUTPUT_DIR", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Print submitted surveys to stdout after the editor closes instead of writing a file.
    #[arg(long)]
    pub console: bool,

    /// Re-open a previously exported survey.
    #[arg(long, value_name = "FILE")]
    pub open: Option<PathBuf>,

    /// Directory for log files. Defaults to the system temp directory.
    #[arg(long, env = "SURVEY_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("survey-builder"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["survey-builder"]).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(!config.console);
        assert!(config.open.is_none());
    }

    #[test]
    fn flags() {
        let config = Config::try_parse_from([
            "survey-builder",
            "--output-dir",
            "/tmp/out",
            "--console",
            "--open",
            "old.json",
            "--log-dir",
            "/tmp/logs",
        ])
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert!(config.console);
        assert_eq!(config.open, Some(PathBuf::from("old.json")));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/logs"));
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
