// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "http://tursib.ro/";
pub const INDEX_REF: &str = "trasee"; // route catalog + update marker
pub const HOME_REF: &str = ""; // front page with the news teasers
pub const USER_AGENT: &str = "tsb_scrape/0.3";
pub const FETCH_TIMEOUT_SECS: u64 = 15;

// Page markers
pub const ROUTE_SECTION_MARKER: &str = "Trasee";
pub const UPDATE_MARKER_STYLE: &str = "color:#900";
pub const NEWS_DETAILS_LABEL: &str = "Detalii";
pub const NEWS_PAGE_MARKER: &str = "Anunturi";

// Routing class given to untagged departures in a mixed sequence
pub const DEFAULT_ROUTING_CLASS: &str = "p0";

// Local store
pub const STORE_DIR: &str = ".store";
pub const NETWORK_FILE: &str = "bus_network.json";
pub const LOG_FILE: &str = "debug.log";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
