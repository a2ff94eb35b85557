//! CSS selectors for scoreboard HTML parsing.
//!
//! The scoreboard table itself is matched by its `id` attribute (configurable),
//! the selectors here cover its inner structure. Update this file when the
//! scoreboard site changes its markup.

use scraper::Selector;
use std::sync::LazyLock;

/// Any table element; candidates are then matched by `id`.
pub static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());

/// Header cells.
pub static HEADER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("thead th").unwrap());

/// Data rows.
pub static BODY_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody tr").unwrap());

/// Cells within a data row.
pub static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
