mod app;
mod chain;
mod command;
mod commentary;
mod config;
mod consts;
mod game;
mod gameover;
mod leaderboard;
mod menu;
mod profile;
mod session;
mod shop;
mod skins;
mod store;
mod util;
mod warning;
use crate::app::App;
use crate::chain::SimulatedLedger;
use crate::commentary::Phrasebook;
use crate::config::Config;
use crate::store::{DiskStore, KvStore, MemoryStore};
use crate::util::Globals;
use anyhow::Context;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use lexopt::{Arg, Parser, ValueExt};
use std::cell::RefCell;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

fn main() -> ExitCode {
    let opts = match Options::from_env() {
        Ok(Parsed::Run(opts)) => opts,
        Ok(Parsed::Help) => {
            println!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Ok(Parsed::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("rathunter: {e}");
            eprintln!("{HELP}");
            return ExitCode::from(2);
        }
    };
    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|ioe| ioe.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("rathunter: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(opts: Options) -> anyhow::Result<()> {
    let (config_path, allow_missing) = if let Some(path) = opts.config {
        (path, false)
    } else {
        (Config::default_path()?, true)
    };
    let mut config = Config::load(&config_path, allow_missing)
        .with_context(|| format!("failed to load configuration from {}", config_path.display()))?;
    if opts.wallet.is_some() {
        config.wallet.address = opts.wallet;
    }
    if opts.guest {
        config.wallet.address = None;
    }

    let store: Rc<dyn KvStore> = if config.files.save_profile {
        let data_dir = config.data_dir().context("failed to locate data directory")?;
        Rc::new(DiskStore::new(data_dir))
    } else {
        Rc::new(MemoryStore::new())
    };
    let ledger = Rc::new(RefCell::new(SimulatedLedger::new()));
    let commentary = Rc::new(Phrasebook::from_config(&config.commentary));
    let (globals, warnings) = Globals::load(config, store, ledger, commentary);

    let terminal = ratatui::init();
    let _ = crossterm::execute!(io::stdout(), EnableMouseCapture);
    let r = App::new(globals, warnings).run(terminal);
    let _ = crossterm::execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    r.map_err(Into::into)
}

static HELP: &str = "\
Usage: rathunter [options]

Hunt mice, dodge poison, buy skins.

Options:
  -c, --config <PATH>   Read configuration from <PATH>
  -w, --wallet <ADDR>   Connect with the given wallet address
      --guest           Ignore any configured wallet address
  -h, --help            Show this help and exit
  -V, --version         Show the version and exit";

#[derive(Clone, Debug, Eq, PartialEq)]
struct Options {
    config: Option<PathBuf>,
    wallet: Option<String>,
    guest: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Parsed {
    Run(Options),
    Help,
    Version,
}

impl Options {
    fn from_env() -> Result<Parsed, lexopt::Error> {
        Options::from_parser(Parser::from_env())
    }

    fn from_parser(mut parser: Parser) -> Result<Parsed, lexopt::Error> {
        let mut opts = Options {
            config: None,
            wallet: None,
            guest: false,
        };
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    opts.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('w') | Arg::Long("wallet") => {
                    opts.wallet = Some(parser.value()?.string()?);
                }
                Arg::Long("guest") => opts.guest = true,
                Arg::Short('h') | Arg::Long("help") => return Ok(Parsed::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Parsed::Version),
                other => return Err(other.unexpected()),
            }
        }
        Ok(Parsed::Run(opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Parsed, lexopt::Error> {
        Options::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn no_args() {
        assert_eq!(
            parse(&[]).expect("parse should succeed"),
            Parsed::Run(Options {
                config: None,
                wallet: None,
                guest: false,
            })
        );
    }

    #[test]
    fn all_the_options() {
        assert_eq!(
            parse(&["-c", "conf.toml", "--wallet", "0xabc", "--guest"])
                .expect("parse should succeed"),
            Parsed::Run(Options {
                config: Some(PathBuf::from("conf.toml")),
                wallet: Some(String::from("0xabc")),
                guest: true,
            })
        );
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["--help"]).expect("parse should succeed"), Parsed::Help);
        assert_eq!(
            parse(&["-V"]).expect("parse should succeed"),
            Parsed::Version
        );
    }

    #[test]
    fn unexpected_argument() {
        assert!(parse(&["--bogus"]).is_err());
    }
}
