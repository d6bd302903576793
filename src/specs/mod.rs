// src/specs/mod.rs
//! # Page "specs" module
//!
//! This module hosts the **page-specific extraction specifications** for
//! tursib.ro. Each spec targets a single page kind and encodes *where the data
//! lives in the HTML* and *how to read it robustly*.
//!
//! ## What lives here
//! - **Pure HTML extraction**: every function takes the raw page text and
//!   returns a typed value from `model`. No fetching, no I/O, no shared state.
//! - **Page-shape tolerance**: the timetable page comes in 1–4 block layouts,
//!   routes carry optional routing-class tags, headings may be missing.
//! - **Empty results for foreign input**: an unrelated, truncated or non-HTML
//!   page yields the documented empty value (`""`, `[]`, `None`), never an error.
//!
//! ## What does **not** live here
//! - **Fetching** (`core::net`) and **fan-out over routes/stations** (`scrape`).
//! - **Persistence** (`store`) and **update decisions** (`update`).
//!
//! ## Typical call chain
//! ```text
//! update / source → scrape::network::assemble → Fetcher::fetch(ref)
//!                                          ↘  specs::<page>::extract(&page)
//!                    store::Store::save (outside of specs)
//! ```
//!
//! ## Current specs
//! - `update_marker` – "program valid from …" heading on `/trasee`.
//! - `routes` – route catalog tables on `/trasee`.
//! - `stations` – direct/reverse station tables on `/traseu/<n>`.
//! - `timetable` – departure blocks on `/traseu/<n>/program?statie=…`.
//! - `news` – teaser links on `/` and article body on `/news/show/<id>`.
//!
//! ## Testing notes
//! Specs are tested offline against captured fixtures in `tests/fixtures/`.
pub mod news;
pub mod routes;
pub mod stations;
pub mod timetable;
pub mod update_marker;
