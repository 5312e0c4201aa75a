use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use lexiscan::pipeline::PipelineSummary;
use lexiscan::types::RankedSubstring;

fn new_table(headers: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let columns = headers.len();
    table.set_header(headers);

    // Everything but the text column is numeric.
    for i in (0..columns).filter(|&i| i != 1) {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

pub fn print_ranking(source: &str, summary: &PipelineSummary) {
    let total = summary.aggregates.total_substrings;
    let mut table = new_table(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Combination").add_attribute(Attribute::Bold),
        Cell::new("Count").fg(Color::Cyan),
        Cell::new("Share %").fg(Color::Green),
    ]);

    for (rank, entry) in summary.ranking.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&entry.text).add_attribute(Attribute::Bold),
            Cell::new(entry.count).fg(Color::Cyan),
            Cell::new(format!("{:.3}", entry.percentage(total))).fg(Color::Green),
        ]);
    }

    println!("\n=== 🔠 LETTER COMBINATIONS: {} ===", source);
    println!("{}", table);
    println!(
        "Words processed: {} | Letter combinations: {}",
        summary.aggregates.words_processed, total
    );
}

pub fn print_words(top: &[RankedSubstring], distinct: usize, total: u64) {
    let mut table = new_table(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Word").add_attribute(Attribute::Bold),
        Cell::new("Count").fg(Color::Cyan),
        Cell::new("Share %").fg(Color::Green),
    ]);

    for (rank, entry) in top.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&entry.text),
            Cell::new(entry.count).fg(Color::Cyan),
            Cell::new(format!("{:.3}", entry.percentage(total))).fg(Color::Green),
        ]);
    }

    println!("{}", table);
    println!("Distinct words: {} | Total words: {}", distinct, total);
}
