mod app;
mod calendar;
mod clock;
mod config;
mod fetch;
mod help;
mod promo;
mod selection;
mod share;
mod source;
mod strings;
mod theme;
use crate::app::App;
use crate::calendar::CalendarView;
use crate::clock::Clock;
use crate::config::Config;
use crate::fetch::Fetcher;
use crate::promo::YMD_FMT;
use anyhow::Context;
use crossterm::{execute, terminal::SetTitle};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use log::info;
use ratatui::DefaultTerminal;
use std::io;
use std::path::{Path, PathBuf};
use time::Date;

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        config: Option<PathBuf>,
        data: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = None;
        let mut data = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("data") => data = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            config,
            data,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                config,
                data,
                log_file,
            } => {
                let config = Config::discover(config)?;
                let _logger = log_file
                    .as_deref()
                    .or(config.log_file.as_deref())
                    .map(init_logging)
                    .transpose()?;
                let clock = Clock::system(config.zone()?);
                let today = clock.today();
                info!("Starting up; today is {today} in {}", clock.zone().name());
                let source = config.open_source(data.as_deref())?;
                let view = CalendarView::new(today, date.unwrap_or(today));
                let app = App::new(view, Fetcher::new(source), config.share_fallback_url);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    // Not every terminal supports titles
                    let _ = execute!(io::stdout(), SetTitle(strings::APP_TITLE));
                    app.run(&mut terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!(
                    "Usage: promocal [-c|--config PATH] [--data FILE] [--log-file PATH] [YYYY-MM-DD]"
                );
                println!();
                println!("Terminal calendar highlighting days with active promotions");
                println!();
                println!("Options:");
                println!("  -c PATH, --config PATH");
                println!("                    Read configuration from the given file");
                println!();
                println!("  --data FILE       Read promotions from a JSON file instead of the");
                println!("                    configured source");
                println!();
                println!("  --log-file PATH   Write log messages to the given file");
                println!();
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

/// Logs to `path` at the level given by `$RUST_LOG` or a build-dependent
/// default.  Logging stops when the returned handle is dropped.
fn init_logging(path: &Path) -> anyhow::Result<LoggerHandle> {
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
        .log_to_file(FileSpec::try_from(path)?)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
