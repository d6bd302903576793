// src/model.rs
//! Typed bus-network entities and the normalization rules shared by the
//! extractors.
//!
//! The JSON shape (camelCase keys) is the persisted format: see `store`.
//! Departures serialize as a bare `"HH:MM"` string when they carry no routing
//! class and as `{ "time", "routingClass" }` otherwise.

use std::collections::HashSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::config::consts::DEFAULT_ROUTING_CLASS;
use crate::error::ModelError;

/// One complete scrape. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NetworkDoc")]
pub struct BusNetwork {
    routes: Vec<Route>,
    update_marker: String,
}

impl BusNetwork {
    /// Fails on a repeated route number.
    pub fn new(routes: Vec<Route>, update_marker: impl Into<String>) -> Result<Self, ModelError> {
        let mut seen = HashSet::new();
        for route in &routes {
            if !seen.insert(route.number.as_str()) {
                return Err(ModelError::DuplicateRoute(route.number.clone()));
            }
        }
        Ok(Self { routes, update_marker: update_marker.into() })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn update_marker(&self) -> &str {
        &self.update_marker
    }

    pub fn route(&self, number: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.number == number)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// Deserialization goes through `BusNetwork::new` so stored documents obey the
// same invariants as fresh scrapes.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkDoc {
    routes: Vec<Route>,
    update_marker: String,
}

impl TryFrom<NetworkDoc> for BusNetwork {
    type Error = ModelError;

    fn try_from(doc: NetworkDoc) -> Result<Self, Self::Error> {
        BusNetwork::new(doc.routes, doc.update_marker)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub number: String,
    pub name: String,
    pub source_ref: String,
    pub direct_stations: Vec<Station>,
    pub reverse_stations: Vec<Station>,
}

impl Route {
    pub fn stations(&self, direction: Direction) -> &[Station] {
        match direction {
            Direction::Direct => &self.direct_stations,
            Direction::Reverse => &self.reverse_stations,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: String,
    pub source_ref: String,
    pub timetable: Timetable,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimetableDoc")]
pub struct Timetable {
    pub weekdays: Vec<DepartureTime>,
    pub saturday: Vec<DepartureTime>,
    pub sunday: Vec<DepartureTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Timetable {
    pub fn day(&self, day: DayClass) -> &[DepartureTime] {
        match day {
            DayClass::Weekdays => &self.weekdays,
            DayClass::Saturday => &self.saturday,
            DayClass::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: DayClass) -> &mut Vec<DepartureTime> {
        match day {
            DayClass::Weekdays => &mut self.weekdays,
            DayClass::Saturday => &mut self.saturday,
            DayClass::Sunday => &mut self.sunday,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weekdays.is_empty() && self.saturday.is_empty() && self.sunday.is_empty()
    }
}

// Stored days must already obey the collapse rule.
#[derive(Deserialize)]
struct TimetableDoc {
    weekdays: Vec<DepartureTime>,
    saturday: Vec<DepartureTime>,
    sunday: Vec<DepartureTime>,
    #[serde(default)]
    comment: Option<String>,
}

impl TryFrom<TimetableDoc> for Timetable {
    type Error = ModelError;

    fn try_from(doc: TimetableDoc) -> Result<Self, Self::Error> {
        let timetable = Timetable {
            weekdays: doc.weekdays,
            saturday: doc.saturday,
            sunday: doc.sunday,
            comment: doc.comment,
        };
        for day in [DayClass::Weekdays, DayClass::Saturday, DayClass::Sunday] {
            if !is_collapsed(timetable.day(day)) {
                return Err(ModelError::MixedRoutingClasses(format!("{day:?}")));
            }
        }
        Ok(timetable)
    }
}

/// All bare, or all tagged with at least two distinct classes.
fn is_collapsed(departures: &[DepartureTime]) -> bool {
    let Some(first) = departures.first() else { return true };
    match &first.routing_class {
        None => departures.iter().all(|d| d.routing_class.is_none()),
        Some(class) => {
            departures.iter().all(|d| d.routing_class.is_some())
                && departures.iter().any(|d| d.routing_class.as_ref() != Some(class))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DepartureRepr", into = "DepartureRepr")]
pub struct DepartureTime {
    time: String,
    routing_class: Option<String>,
}

impl DepartureTime {
    /// Validate `text` as a 24-hour time and normalize it to `HH:MM`.
    pub fn parse(text: &str, routing_class: Option<&str>) -> Result<Self, ModelError> {
        let invalid = || ModelError::InvalidTime(s!(text));
        let trimmed = text.trim();
        // chrono takes a single minute digit; "7:5" is not a time
        match trimmed.split_once(':') {
            Some((_, minutes)) if minutes.len() == 2 => {}
            _ => return Err(invalid()),
        }
        let t = NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| invalid())?;
        Ok(Self {
            time: t.format("%H:%M").to_string(),
            routing_class: routing_class.map(str::to_string),
        })
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn routing_class(&self) -> Option<&str> {
        self.routing_class.as_deref()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DepartureRepr {
    Bare(String),
    Tagged {
        time: String,
        #[serde(rename = "routingClass")]
        routing_class: String,
    },
}

impl TryFrom<DepartureRepr> for DepartureTime {
    type Error = ModelError;

    fn try_from(repr: DepartureRepr) -> Result<Self, Self::Error> {
        match repr {
            DepartureRepr::Bare(time) => DepartureTime::parse(&time, None),
            DepartureRepr::Tagged { time, routing_class } => {
                DepartureTime::parse(&time, Some(&routing_class))
            }
        }
    }
}

impl From<DepartureTime> for DepartureRepr {
    fn from(d: DepartureTime) -> Self {
        match d.routing_class {
            None => DepartureRepr::Bare(d.time),
            Some(routing_class) => DepartureRepr::Tagged { time: d.time, routing_class },
        }
    }
}

/// Apply the collapse rule to one day's departures.
///
/// Untagged entries first take the default class. If every entry then shares
/// one class, the class is dropped everywhere; otherwise every entry keeps its
/// own. A sequence never ends up part tagged, part bare. Order is preserved.
pub fn collapse_routing_classes(mut departures: Vec<DepartureTime>) -> Vec<DepartureTime> {
    for d in &mut departures {
        d.routing_class.get_or_insert_with(|| s!(DEFAULT_ROUTING_CLASS));
    }
    let uniform = departures.windows(2).all(|w| w[0].routing_class == w[1].routing_class);
    if uniform {
        for d in &mut departures {
            d.routing_class = None;
        }
    }
    departures
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub publish_date: Option<String>,
    pub content: Option<String>,
}

impl NewsItem {
    pub fn is_empty(&self) -> bool {
        self.publish_date.is_none() && self.content.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DayClass {
    Weekdays,
    Saturday,
    Sunday,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Direct,
    Reverse,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Direct, Direction::Reverse];
}

/* ---------------- Extractor outputs ---------------- */

/// A route row from the catalog, before its stations are known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteStub {
    pub number: String,
    pub name: String,
    pub source_ref: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationStub {
    pub name: String,
    pub source_ref: String,
}

/// Both directions of one route, in page order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StationLists {
    pub direct: Vec<StationStub>,
    pub reverse: Vec<StationStub>,
}

impl StationLists {
    pub fn get(&self, direction: Direction) -> &[StationStub] {
        match direction {
            Direction::Direct => &self.direct,
            Direction::Reverse => &self.reverse,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.reverse.is_empty()
    }
}
