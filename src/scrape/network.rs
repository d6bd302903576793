// src/scrape/network.rs
//! Route → station → timetable fan-out.
//!
//! The index page is the barrier: everything else hangs off its route catalog.
//! Route detail pages and then station schedule pages go through the worker
//! pool. A failed fetch drops only its own route or station and is recorded as
//! a warning; the run never aborts because of one bad page.

use std::collections::HashSet;

use crate::{
    config::{ScrapeOptions, consts::INDEX_REF},
    core::Fetcher,
    error::{Error, FetchError},
    model::{BusNetwork, Direction, Route, RouteStub, Station, StationLists, StationStub, Timetable},
    progress::Progress,
    specs,
};

use super::pool;
use super::types::*;

/// Fetch the index page and build a full network snapshot.
pub fn assemble(
    fetcher: &dyn Fetcher,
    opts: &ScrapeOptions,
    cancel: &CancelToken,
    progress: Option<&mut dyn Progress>,
) -> Result<Assembly, Error> {
    let index = fetcher.fetch(INDEX_REF).map_err(|source| Error::PageUnavailable {
        reference: s!(INDEX_REF),
        source,
    })?;
    assemble_from_index(&index, fetcher, opts, cancel, progress)
}

/// Build a full network snapshot from an already fetched index page.
pub fn assemble_from_index(
    index: &str,
    fetcher: &dyn Fetcher,
    opts: &ScrapeOptions,
    cancel: &CancelToken,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Assembly, Error> {
    let mut warnings = Vec::new();

    let update_marker = specs::update_marker::extract(index);
    let stubs = unique_routes(specs::routes::extract(index), &mut warnings);
    logf!("Scrape: {} routes, marker {:?}", stubs.len(), update_marker);

    // Phase 1: route detail pages → station lists
    if let Some(p) = progress.as_deref_mut() {
        p.begin(stubs.len());
        p.log("Fetching routes…");
    }
    let route_pages = pool::run(
        &stubs,
        opts,
        cancel,
        |stub| fetcher.fetch(&stub.source_ref).map(|page| specs::stations::extract(&page)),
        |i, res| report(&mut progress, &format!("route {}", stubs[i].number), res.is_ok()),
    );
    check_cancelled(cancel, &mut progress)?;

    let mut routes: Vec<(&RouteStub, StationLists)> = Vec::with_capacity(stubs.len());
    for (stub, res) in stubs.iter().zip(route_pages) {
        match res {
            Some(Ok(lists)) => {
                if lists.is_empty() {
                    warn(&mut warnings, WarningTarget::Route { number: stub.number.clone() }, WarningKind::NoStations);
                }
                routes.push((stub, lists));
            }
            Some(Err(e)) => transport_failure(&mut warnings, WarningTarget::Route { number: stub.number.clone() }, &e),
            None => return Err(Error::Cancelled),
        }
    }

    // Phase 2: station schedule pages → timetables
    let jobs = station_jobs(&routes);
    if let Some(p) = progress.as_deref_mut() {
        p.begin(jobs.len());
        p.log("Fetching timetables…");
    }
    let timetables = pool::run(
        &jobs,
        opts,
        cancel,
        |job| fetcher.fetch(&job.station.source_ref).map(|page| specs::timetable::extract(&page)),
        |i, res| report(&mut progress, &jobs[i].label(&routes), res.is_ok()),
    );
    check_cancelled(cancel, &mut progress)?;

    // Assemble in catalog order, stations in page order
    let mut built: Vec<Route> = routes
        .iter()
        .map(|(stub, _)| Route {
            number: stub.number.clone(),
            name: stub.name.clone(),
            source_ref: stub.source_ref.clone(),
            direct_stations: Vec::new(),
            reverse_stations: Vec::new(),
        })
        .collect();

    for (job, res) in jobs.iter().zip(timetables) {
        let target = || WarningTarget::Station {
            route: routes[job.route].0.number.clone(),
            direction: job.direction,
            name: job.station.name.clone(),
        };
        match res {
            Some(Ok(timetable)) => {
                if timetable.is_empty() {
                    logd!("Scrape: empty timetable for {}", target());
                }
                let station = to_station(job.station, timetable);
                let route = &mut built[job.route];
                match job.direction {
                    Direction::Direct => route.direct_stations.push(station),
                    Direction::Reverse => route.reverse_stations.push(station),
                }
            }
            Some(Err(e)) => transport_failure(&mut warnings, target(), &e),
            None => return Err(Error::Cancelled),
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let network = BusNetwork::new(built, update_marker)?;
    logf!(
        "Scrape: done, {} routes, {} warnings",
        network.routes().len(),
        warnings.len()
    );
    Ok(Assembly { network, warnings })
}

/// One station page to fetch. `route` indexes the surviving routes.
struct StationJob<'a> {
    route: usize,
    direction: Direction,
    station: &'a StationStub,
}

impl StationJob<'_> {
    fn label(&self, routes: &[(&RouteStub, StationLists)]) -> String {
        format!("route {} {}", routes[self.route].0.number, self.station.name)
    }
}

fn station_jobs<'a>(routes: &'a [(&RouteStub, StationLists)]) -> Vec<StationJob<'a>> {
    let mut jobs = Vec::new();
    for (route, (_, lists)) in routes.iter().enumerate() {
        for direction in Direction::BOTH {
            for station in lists.get(direction) {
                jobs.push(StationJob { route, direction, station });
            }
        }
    }
    jobs
}

fn to_station(stub: &StationStub, timetable: Timetable) -> Station {
    Station { name: stub.name.clone(), source_ref: stub.source_ref.clone(), timetable }
}

/// First catalog row wins for a repeated route number.
fn unique_routes(stubs: Vec<RouteStub>, warnings: &mut Vec<ScrapeWarning>) -> Vec<RouteStub> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(stubs.len());
    for stub in stubs {
        if seen.insert(stub.number.clone()) {
            out.push(stub);
        } else {
            warn(warnings, WarningTarget::Route { number: stub.number }, WarningKind::DuplicateRoute);
        }
    }
    out
}

fn transport_failure(warnings: &mut Vec<ScrapeWarning>, target: WarningTarget, err: &FetchError) {
    warn(warnings, target, WarningKind::Transport(err.to_string()));
}

fn warn(warnings: &mut Vec<ScrapeWarning>, target: WarningTarget, kind: WarningKind) {
    let w = ScrapeWarning::new(target, kind);
    logw!("Scrape: {w}");
    warnings.push(w);
}

fn report(progress: &mut Option<&mut dyn Progress>, label: &str, ok: bool) {
    if let Some(p) = progress.as_deref_mut() {
        if ok { p.item_done(label) } else { p.item_failed(label) }
    }
}

fn check_cancelled(cancel: &CancelToken, progress: &mut Option<&mut dyn Progress>) -> Result<(), Error> {
    if cancel.is_cancelled() {
        logf!("Scrape: cancelled");
        if let Some(p) = progress.as_deref_mut() {
            p.log("Cancelled");
            p.finish();
        }
        return Err(Error::Cancelled);
    }
    Ok(())
}
