//! Runs every search type over one scenario and prints a comparison.
//!
//! Run: cargo run --bin gridsearch -- [SCENARIO_FILE] [WEIGHT]
//!
//! Without a file a built-in scenario is used.

use std::error::Error;

use pathgrid_core::{CellId, Grid, Scenario};
use pathgrid_search::{Search, SearchOutcome, SearchResult, SearchType};

const DEFAULT_WEIGHT: f64 = 2.0;

const BUILTIN: &str = "\
(0, 0)\r
(11, 7)\r
(5, 3)\r
111111111111\r
111000011111\r
1112222011aa\r
1112b22011a1\r
1112222011a1\r
111000011a11\r
11111111a111\r
1111111a1111\r
";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let scenario = match args.next() {
        Some(path) => Scenario::parse(&std::fs::read_to_string(&path)?)?,
        None => Scenario::parse(BUILTIN)?,
    };
    let weight = match args.next() {
        Some(w) => w.parse::<f64>()?,
        None => DEFAULT_WEIGHT,
    };

    let grid = &scenario.grid;
    println!(
        "{}x{} grid, start {} goal {}, weight {weight}",
        grid.length(),
        grid.width(),
        describe(grid, scenario.start),
        describe(grid, scenario.goal),
    );

    let search = Search::new(grid, scenario.start, scenario.goal)?;
    println!(
        "{:<20} {:>10} {:>6} {:>9}",
        "type", "cost", "steps", "expanded"
    );
    let mut best: Option<SearchResult<'_>> = None;
    for kind in SearchType::ALL {
        match search.initiate_search(kind, weight) {
            SearchOutcome::Found(r) => {
                println!(
                    "{:<20} {:>10.3} {:>6} {:>9}",
                    kind.name(),
                    r.path_length(),
                    r.step_count(),
                    r.expanded()
                );
                if best.as_ref().is_none_or(|b| r.path_length() < b.path_length()) {
                    best = Some(r);
                }
            }
            SearchOutcome::NoPathFound(e) => {
                println!("{:<20} {:>10} {:>6} {:>9}", kind.name(), "-", "-", e.expanded);
            }
        }
    }

    if let Some(r) = best {
        println!("\ncheapest path ({}):", r.search_type());
        print!("{}", render(&r));
    }
    Ok(())
}

fn describe(grid: &Grid, id: CellId) -> String {
    grid.coordinate(id)
        .map_or_else(|| id.to_string(), |c| format!("{id} {}", c.to_xy_string()))
}

/// The grid in its text alphabet with path cells drawn as `*`.
fn render(result: &SearchResult<'_>) -> String {
    let grid = result.grid();
    let mut out = String::new();
    for (i, cell) in grid.cells().enumerate() {
        out.push(if result.is_in_path(cell.id()) {
            '*'
        } else {
            cell.serialize()
        });
        if (i + 1) % grid.width() == 0 {
            out.push('\n');
        }
    }
    out
}
