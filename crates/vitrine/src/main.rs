use std::io::stdout;
use std::path::PathBuf;

use color_eyre::eyre::{WrapErr, bail};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use tracing::info;
use vitrine_config::Config;

mod app;
mod contact;
mod header;
mod logging;
mod nav;
mod page;
mod sections;
mod theme;

use app::App;

const USAGE: &str = "\
Usage: vitrine [--config PATH]

Options:
  -c, --config PATH  Read preferences and profile from PATH
  -h, --help         Print help
  -V, --version      Print version

Keys: 1-5 jump to section, arrows/PgUp/PgDn scroll, t theme, s speed, q quit";

/// What the command line asked for.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    help: bool,
    version: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> color_eyre::Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "-V" | "--version" => parsed.version = true,
                "-c" | "--config" => match args.next() {
                    Some(path) => parsed.config = Some(PathBuf::from(path)),
                    None => bail!("{arg} needs a path"),
                },
                other => match other.strip_prefix("--config=") {
                    Some(path) => parsed.config = Some(PathBuf::from(path)),
                    None => bail!("unexpected argument '{other}'\n\n{USAGE}"),
                },
            }
        }
        Ok(parsed)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }
    if args.version {
        println!("vitrine {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let log_file = logging::init();
    let path = args.config.or_else(vitrine_config::default_path);
    let config = match &path {
        Some(path) => Config::load(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => Config::default(),
    };
    info!(config = ?path, log = ?log_file, "configuration loaded");

    let terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;
    let result = App::new(config, path).run(terminal);
    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> color_eyre::Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_config_path_forms() {
        let expected = Some(PathBuf::from("/tmp/v.toml"));
        assert_eq!(parse(&["--config", "/tmp/v.toml"]).unwrap().config, expected);
        assert_eq!(parse(&["-c", "/tmp/v.toml"]).unwrap().config, expected);
        assert_eq!(parse(&["--config=/tmp/v.toml"]).unwrap().config, expected);
    }

    #[test]
    fn test_flags() {
        let args = parse(&["-h", "--version"]).unwrap();
        assert!(args.help);
        assert!(args.version);
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }
}
