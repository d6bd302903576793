// src/cli.rs
use std::{env, path::PathBuf, time::Duration};

use crate::{
    config::AppOptions,
    core::{Fetcher, HttpFetcher},
    error::Error,
    model::{BusNetwork, DayClass, DepartureTime, Direction, Route},
    progress::Progress,
    scrape::{self, CancelToken},
    source::{self, DEFAULT_STRATEGIES, SourceContext},
    specs,
    store::{JsonFileStore, Store},
    update::{self, UpdateOutcome},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Update,
    Scrape,
    Marker,
    News,
    Show(Option<String>),
    Help,
}

pub fn run() -> Result<(), Error> {
    let (command, opts) = parse_args(env::args().skip(1))?;
    crate::log::init(Some(&opts.store.log_file));
    execute(command, &opts)
}

pub fn execute(command: Command, opts: &AppOptions) -> Result<(), Error> {
    let fetcher = HttpFetcher::new(&opts.scrape).map_err(|source| Error::PageUnavailable {
        reference: opts.scrape.base_url.clone(),
        source,
    })?;
    let store = JsonFileStore::new(&opts.store.path);
    let cancel = CancelToken::new();
    let mut progress = CliProgress::default();

    match command {
        Command::Update => {
            let outcome = update::check_for_updates(&fetcher, &store, &opts.scrape, &cancel, Some(&mut progress))?;
            match outcome {
                UpdateOutcome::UpToDate => println!("Up to date."),
                UpdateOutcome::Updated { marker, routes, warnings } => {
                    println!("Updated: {routes} routes ({marker})");
                    for w in &warnings {
                        eprintln!("warning: {w}");
                    }
                }
                UpdateOutcome::Skipped(reason) => println!("Skipped: {reason:?}"),
            }
        }
        Command::Scrape => {
            let assembly = scrape::assemble(&fetcher, &opts.scrape, &cancel, Some(&mut progress))?;
            for w in &assembly.warnings {
                eprintln!("warning: {w}");
            }
            if assembly.network.is_empty() {
                return Err(Error::EmptyNetwork);
            }
            store.save(&assembly.network)?;
            println!(
                "Saved {} routes to {}",
                assembly.network.routes().len(),
                store.path().display()
            );
        }
        Command::Marker => {
            let index = fetch_page(&fetcher, crate::config::consts::INDEX_REF)?;
            println!("{}", specs::update_marker::extract(&index));
        }
        Command::News => {
            let digest = scrape::collect_news(&fetcher, &opts.scrape, &cancel, Some(&mut progress))?;
            for item in digest.items.iter().filter(|i| !i.is_empty()) {
                println!("[{}]", item.publish_date.as_deref().unwrap_or("?"));
                println!("{}\n", item.content.as_deref().unwrap_or(""));
            }
            for w in &digest.warnings {
                eprintln!("warning: {w}");
            }
        }
        Command::Show(route) => {
            let mut ctx = SourceContext {
                fetcher: &fetcher,
                store: &store,
                opts: &opts.scrape,
                cancel: &cancel,
                progress: Some(&mut progress),
            };
            let network = source::load_network(DEFAULT_STRATEGIES, &mut ctx)?;
            match route {
                None => print_network(&network),
                Some(number) => {
                    let route = network
                        .route(&number)
                        .ok_or_else(|| Error::Usage(format!("No route {number:?}")))?;
                    print_route(route);
                }
            }
        }
        Command::Help => eprintln!(include_str!("cli_help.txt")),
    }
    Ok(())
}

fn fetch_page(fetcher: &dyn Fetcher, reference: &str) -> Result<String, Error> {
    fetcher.fetch(reference).map_err(|source| Error::PageUnavailable { reference: s!(reference), source })
}

pub fn parse_args<I>(args: I) -> Result<(Command, AppOptions), Error>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = AppOptions::default();
    let mut command: Option<Command> = None;
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--base-url" => opts.scrape.base_url = value(&mut args, "--base-url")?,
            "--workers" => {
                let v: usize = number(&mut args, "--workers")?;
                if v == 0 {
                    return Err(usage("--workers must be at least 1"));
                }
                opts.scrape.workers = v;
            }
            "--timeout" => opts.scrape.timeout = Duration::from_secs(number(&mut args, "--timeout")?),
            "--store" => opts.store.path = PathBuf::from(value(&mut args, "--store")?),
            "-h" | "--help" => return Ok((Command::Help, opts)),
            flag if flag.starts_with('-') => return Err(usage(format!("Unknown arg: {flag}"))),
            word => {
                let next = match (command.take(), word) {
                    (None, "update") => Command::Update,
                    (None, "scrape") => Command::Scrape,
                    (None, "marker") => Command::Marker,
                    (None, "news") => Command::News,
                    (None, "show") => Command::Show(None),
                    (Some(Command::Show(None)), route) => Command::Show(Some(s!(route))),
                    (None, other) => return Err(usage(format!("Unknown command: {other}"))),
                    (Some(_), extra) => return Err(usage(format!("Unexpected argument: {extra}"))),
                };
                command = Some(next);
            }
        }
    }

    Ok((command.unwrap_or(Command::Help), opts))
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, Error> {
    args.next().ok_or_else(|| usage(format!("Missing value for {flag}")))
}

fn number<T: std::str::FromStr>(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<T, Error> {
    let v = value(args, flag)?;
    v.parse().map_err(|_| usage(format!("Invalid number for {flag}: {v}")))
}

fn usage(msg: impl Into<String>) -> Error {
    Error::Usage(msg.into())
}

/* ---------------- Output ---------------- */

fn print_network(network: &BusNetwork) {
    println!("{}", network.update_marker());
    for route in network.routes() {
        println!(
            "{:>4}  {}  ({} / {} stations)",
            route.number,
            route.name,
            route.direct_stations.len(),
            route.reverse_stations.len()
        );
    }
}

fn print_route(route: &Route) {
    println!("{}  {}", route.number, route.name);
    for direction in Direction::BOTH {
        println!("\n== {direction:?} ==");
        for station in route.stations(direction) {
            println!("{}", station.name);
            for day in [DayClass::Weekdays, DayClass::Saturday, DayClass::Sunday] {
                let times = station.timetable.day(day);
                if !times.is_empty() {
                    println!("  {:<9} {}", format!("{day:?}"), join_times(times));
                }
            }
            if let Some(comment) = &station.timetable.comment {
                println!("  {comment}");
            }
        }
    }
}

fn join_times(times: &[DepartureTime]) -> String {
    times
        .iter()
        .map(|t| match t.routing_class() {
            Some(class) => format!("{}/{class}", t.time()),
            None => s!(t.time()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Progress lines on stderr, stdout stays clean for output.
#[derive(Default)]
struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, label: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {label}", self.done, self.total);
    }

    fn item_failed(&mut self, label: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {label} FAILED", self.done, self.total);
    }
}
