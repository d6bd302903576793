// tests/assemble_network.rs
//
// Assembler and news collection driven by an in-memory fetcher.
//
mod common;

use common::*;
use tsb_scrape::error::Error;
use tsb_scrape::model::Direction;
use tsb_scrape::progress::Progress;
use tsb_scrape::scrape::{self, CancelToken, WarningKind, WarningTarget};

const MARKER: &str = "Program de circulatie incepand cu data de 23 martie 2015";

fn two_route_site() -> MapFetcher {
    MapFetcher::new()
        .page("trasee", index_page(MARKER, &[("14", "Valea Aurie - Hotel Libra"), ("3", "Valea Aurie - Gara")]))
        .page(&route_ref("14"), route_page("14", &["Valea Aurie", "Piata Cibin", "Hotel Libra"], &["Hotel Libra"]))
        .page(&station_ref("14", "dus", 0), schedule_page(&["06:00", "07:00"]))
        // statie=1 deliberately missing
        .page(&station_ref("14", "dus", 2), schedule_page(&["06:20"]))
        .page(&station_ref("14", "intors", 0), schedule_page(&["08:00"]))
        .page(&route_ref("3"), route_page("3", &["Gara"], &["Valea Aurie"]))
        .page(&station_ref("3", "dus", 0), schedule_page(&["05:00"]))
        .page(&station_ref("3", "intors", 0), schedule_page(&["05:30"]))
}

#[test]
fn failed_station_is_dropped_and_warned() {
    let site = two_route_site();
    let assembly = scrape::assemble(&site, &opts(3), &CancelToken::new(), None).unwrap();
    let network = &assembly.network;

    assert_eq!(network.update_marker(), MARKER);
    let numbers: Vec<_> = network.routes().iter().map(|r| r.number.as_str()).collect();
    assert_eq!(numbers, ["14", "3"]);

    let r14 = network.route("14").unwrap();
    let names: Vec<_> = r14.direct_stations.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Valea Aurie", "Hotel Libra"]);
    assert_eq!(r14.direct_stations[1].timetable.weekdays[0].time(), "06:20");
    assert_eq!(r14.stations(Direction::Reverse).len(), 1);

    let r3 = network.route("3").unwrap();
    assert_eq!(r3.direct_stations.len(), 1);
    assert_eq!(r3.reverse_stations.len(), 1);

    assert_eq!(assembly.warnings.len(), 1);
    let w = &assembly.warnings[0];
    assert_eq!(
        w.target,
        WarningTarget::Station { route: "14".into(), direction: Direction::Direct, name: "Piata Cibin".into() }
    );
    assert!(matches!(w.kind, WarningKind::Transport(_)));
    assert!(w.dropped_item());
}

#[test]
fn failed_route_page_drops_only_that_route() {
    let site = MapFetcher::new()
        .page("trasee", index_page(MARKER, &[("1", "Gara - Piata Cluj"), ("2", "Gara - Cimitir")]))
        .page(&route_ref("2"), route_page("2", &["Gara"], &[]))
        .page(&station_ref("2", "dus", 0), schedule_page(&["06:00"]));

    let assembly = scrape::assemble(&site, &opts(2), &CancelToken::new(), None).unwrap();
    assert_eq!(assembly.network.routes().len(), 1);
    assert_eq!(assembly.network.routes()[0].number, "2");
    assert_eq!(assembly.warnings[0].target, WarningTarget::Route { number: "1".into() });
}

#[test]
fn route_without_stations_is_kept() {
    let site = MapFetcher::new()
        .page("trasee", index_page(MARKER, &[("22", "Piata Cibin - Cisnadioara")]))
        .page(&route_ref("22"), "<html><body><p>Traseu suspendat</p></body></html>");

    let assembly = scrape::assemble(&site, &opts(1), &CancelToken::new(), None).unwrap();
    let route = assembly.network.route("22").unwrap();
    assert!(route.direct_stations.is_empty() && route.reverse_stations.is_empty());
    assert_eq!(assembly.warnings[0].kind, WarningKind::NoStations);
    assert!(!assembly.warnings[0].dropped_item());
}

#[test]
fn duplicate_catalog_rows_are_dropped() {
    let site = MapFetcher::new()
        .page("trasee", index_page(MARKER, &[("5", "Piata Cibin - Turnisor"), ("5", "Duplicat")]))
        .page(&route_ref("5"), route_page("5", &[], &[]));

    let assembly = scrape::assemble(&site, &opts(2), &CancelToken::new(), None).unwrap();
    assert_eq!(assembly.network.routes().len(), 1);
    assert_eq!(assembly.network.routes()[0].name, "Piata Cibin - Turnisor");
    assert!(assembly.warnings.iter().any(|w| w.kind == WarningKind::DuplicateRoute));
}

#[test]
fn unreachable_index_is_an_error() {
    let err = scrape::assemble(&MapFetcher::new(), &opts(2), &CancelToken::new(), None).unwrap_err();
    assert!(matches!(err, Error::PageUnavailable { .. }));
}

#[test]
fn cancelled_run_yields_no_snapshot() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let err = scrape::assemble(&two_route_site(), &opts(2), &cancel, None).unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}

#[derive(Default)]
struct Counting {
    begun: Vec<usize>,
    done: usize,
    failed: usize,
    finished: bool,
}

impl Progress for Counting {
    fn begin(&mut self, total: usize) {
        self.begun.push(total);
    }
    fn item_done(&mut self, _label: &str) {
        self.done += 1;
    }
    fn item_failed(&mut self, _label: &str) {
        self.failed += 1;
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn progress_sees_both_phases() {
    let mut progress = Counting::default();
    scrape::assemble(&two_route_site(), &opts(2), &CancelToken::new(), Some(&mut progress)).unwrap();

    // 2 route pages, then 4 + 2 station pages
    assert_eq!(progress.begun, [2, 6]);
    assert_eq!(progress.done, 7);
    assert_eq!(progress.failed, 1);
    assert!(progress.finished);
}

#[test]
fn news_digest_from_front_page() {
    let site = MapFetcher::new()
        .page("", fixture("tursib_ro.htm"))
        .page("http://tursib.ro/news/show/161", fixture("news_160_missing_publishdate_header.htm"))
        .page("http://tursib.ro/news/show/160", fixture("news_160.htm"));

    let digest = scrape::collect_news(&site, &opts(2), &CancelToken::new(), None).unwrap();
    assert_eq!(digest.items.len(), 2);
    assert_eq!(digest.items[0].publish_date, None);
    assert_eq!(digest.items[1].publish_date.as_deref(), Some("12 Feb 2015"));

    assert_eq!(digest.warnings.len(), 1);
    assert_eq!(
        digest.warnings[0].target,
        WarningTarget::News { reference: "http://tursib.ro/news/show/159".into() }
    );
}
