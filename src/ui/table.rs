use budget_dashboard::present::DetailTable;
use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 18.0;

/// Filtered rows, one line per record.
pub fn detail_table(ui: &mut Ui, table: &DetailTable) {
    if table.rows.is_empty() {
        ui.label("Aucune ligne ne correspond aux filtres.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(320.0)
        .columns(Column::auto().at_least(80.0).clip(true), table.headers.len())
        .header(22.0, |mut header| {
            for name in table.headers {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.rows.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
