// ===== crossforge/src/reports/mod.rs =====
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use crossforge::grid::{CharTable, EMPTY_CELL};
use crossforge::optimizer::FinishedLayout;
use crossforge::scorer::LayoutMetrics;
use crossforge::solution::PhraseOverlay;

pub fn print_layout_grid(name: &str, grid: &CharTable) {
    println!("\n{}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in grid.rows() {
        let cells: Vec<Cell> = row
            .iter()
            .map(|&ch| {
                let s = if ch == EMPTY_CELL {
                    " ".to_string()
                } else {
                    ch.to_string()
                };
                Cell::new(s).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_ranking(layouts: &[&FinishedLayout]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Attempt"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Words"),
        Cell::new("Size"),
        Cell::new("Density %"),
        Cell::new("Cross"),
        Cell::new("Compact"),
        Cell::new("Filled"),
        Cell::new("Outliers").fg(Color::Red),
    ]);

    for i in 1..=9 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (rank, l) in layouts.iter().enumerate() {
        let m = &l.metrics;
        table.add_row(vec![
            Cell::new(rank + 1).add_attribute(Attribute::Bold),
            Cell::new(l.id),
            Cell::new(format!("{:.2}", m.score)).fg(Color::Cyan),
            Cell::new(format!("{}/{}", m.placed_words, m.total_words)),
            Cell::new(format!("{}x{}", m.width, m.height)),
            Cell::new(format!("{:.1}", m.density_pct)),
            Cell::new(m.intersections),
            Cell::new(format!("{:.3}", m.compactness)),
            Cell::new(m.enclosed_cells),
            Cell::new(m.outliers).fg(Color::Red),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_metrics(m: &LayoutMetrics, leftover: &[String]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);

    let rows = [
        ("Score", format!("{:.4}", m.score)),
        ("Beam score", format!("{:.4}", m.beam_score)),
        ("Words placed", format!("{} of {}", m.placed_words, m.total_words)),
        ("Size", format!("{} x {}", m.width, m.height)),
        ("Density", format!("{:.1}%", m.density_pct)),
        ("Intersections", m.intersections.to_string()),
        ("Avg per word", format!("{:.2}", m.avg_intersections)),
        ("Compactness", format!("{:.3}", m.compactness)),
        ("Enclosed cells", m.enclosed_cells.to_string()),
        ("Outliers", m.outliers.to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value).set_alignment(CellAlignment::Right)]);
    }
    if !leftover.is_empty() {
        table.add_row(vec![
            Cell::new("Not placed").fg(Color::Red),
            Cell::new(leftover.join(", ")).fg(Color::Red),
        ]);
    }
    println!("\n{}", table);
}

/// One column per phrase character: the letter, its number and whether it
/// has to be given.
pub fn print_phrase(overlay: &PhraseOverlay) {
    if overlay.slots.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let letters: Vec<Cell> = overlay
        .slots
        .iter()
        .map(|s| {
            let mut c = Cell::new(s.ch).set_alignment(CellAlignment::Center);
            if s.starts_word {
                c = c.add_attribute(Attribute::Bold);
            }
            if s.is_given() {
                c = c.fg(Color::Yellow);
            }
            c
        })
        .collect();
    let numbers: Vec<Cell> = overlay
        .slots
        .iter()
        .map(|s| match s.cell {
            Some((x, y)) => Cell::new(format!("{} ({},{})", s.number, x, y)),
            None => Cell::new(format!("{} given", s.number)),
        })
        .collect();

    table.add_row(letters);
    table.add_row(numbers);
    println!("\nSolution phrase");
    println!("{}", table);
}
