//! ASCII rendering of inventory grids.

use inventory_core::{GridPosition, Inventory};

/// One character per cell: `.` for free, a letter per record otherwise.
///
/// Letters cycle `A..Z` then `a..z` in record-id order; the legend maps them
/// back to records.
pub fn grid(inventory: &Inventory) -> (Vec<String>, Vec<(char, String)>) {
    let glyph = |index: usize| -> char {
        let index = (index % 52) as u8;
        if index < 26 {
            (b'A' + index) as char
        } else {
            (b'a' + index - 26) as char
        }
    };

    let records: Vec<_> = inventory.records().map(|r| r.id()).collect();
    let size = inventory.size();
    let rows = (0..size.height as i32)
        .map(|y| {
            (0..size.width as i32)
                .map(|x| {
                    inventory
                        .grid()
                        .occupied_at(GridPosition::new(x, y))
                        .and_then(|record| records.iter().position(|id| *id == record.id()))
                        .map(glyph)
                        .unwrap_or('.')
                })
                .collect()
        })
        .collect();

    let legend = inventory
        .records()
        .enumerate()
        .map(|(index, record)| {
            (
                glyph(index),
                format!(
                    "{} {} at {} rot {}",
                    record.id(),
                    record.instance().template_id(),
                    record.position(),
                    record.rotation()
                ),
            )
        })
        .collect();

    (rows, legend)
}
