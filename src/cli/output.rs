use crate::cli::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Banned Addresses In List Format
--------------------------------------------------------------------------------------*/

pub fn banned_list(banned: &[String]) {
    for address in banned {
        println!("{address}");
    }
}

/*--------------------------------------------------------------------------------------
  Banned Addresses Table
--------------------------------------------------------------------------------------*/

pub fn banned_table(banned: &[String]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold).fg(Color::Green),
        Cell::new("IP Address")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);

    for (index, address) in banned.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(address).add_attribute(Attribute::Bold),
        ]);
    }

    // Right-align the row-number column
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{table}");

    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);
    summary_table.add_row(vec![
        Cell::new(banned.len()),
        Cell::new("Banned IP Addresses"),
    ]);

    println!("{summary_table}");
}

/*--------------------------------------------------------------------------------------
  Banned Addresses In JSON Format
--------------------------------------------------------------------------------------*/

pub fn banned_json(banned: &[String]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(banned)?);
    Ok(())
}

/*--------------------------------------------------------------------------------------
  Check Result
--------------------------------------------------------------------------------------*/

pub fn check_result(address: &str, banned: bool) {
    if banned {
        println!("{address}: banned");
    } else {
        println!("{address}: not banned");
    }
}
