use budget_dashboard::data::filter::{apply, options, Dimension};
use budget_dashboard::state::{AppState, StatusMessage};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one multi-select per dimension.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔎 Filtres interactifs");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("Aucune donnée chargée.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                let values = options(&dataset, dim);
                let header_text = format!(
                    "{}  ({}/{})",
                    dim.label(),
                    state.filters.selected_count(dim),
                    values.len()
                );

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("Tout").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("Aucun").clicked() {
                                state.select_none(dim);
                            }
                        });

                        for val in &values {
                            let mut checked = state.filters.is_selected(dim, val);
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(dim, val);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – KPIs, charts, detail table, export
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(err) = &state.load_error {
        ui.centered_and_justified(|ui: &mut Ui| {
            let text = format!("Impossible de charger les données : {err}");
            ui.heading(RichText::new(text).color(Color32::RED));
        });
        return;
    }

    let mut export_clicked = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("📘 {}", state.config.title));
            ui.label(&state.config.description);
            ui.separator();

            let Some(dashboard) = state.dashboard() else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Ouvrez un fichier  (Fichier → Ouvrir…)");
                });
                return;
            };

            // ---- KPI row ----
            ui.columns(3, |cols| {
                for (col, card) in cols.iter_mut().zip(dashboard.kpis.iter()) {
                    col.vertical_centered(|ui: &mut Ui| {
                        ui.label(card.label);
                        ui.heading(RichText::new(&card.value).strong());
                    });
                }
            });
            ui.separator();

            // ---- Pie + grouped bars side by side ----
            ui.columns(2, |cols| {
                plot::category_pie(&mut cols[0], &dashboard.pie);
                plot::subcategory_bars(&mut cols[1], &dashboard.bars);
            });

            // ---- Yearly trend, only across several years ----
            if let Some(lines) = &dashboard.trend {
                ui.add_space(8.0);
                plot::trend_lines(ui, lines);
            }

            ui.add_space(8.0);
            ui.heading("🧾 Données détaillées");
            table::detail_table(ui, &dashboard.table());

            ui.add_space(6.0);
            export_clicked = ui.button("📥 Télécharger les données filtrées").clicked();

            ui.separator();
            ui.label(RichText::new(format!("Source : {}", state.config.source_note)).strong());
        });

    if export_clicked {
        save_file_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Fichier", |ui: &mut Ui| {
            if ui.button("Ouvrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Recharger").clicked() {
                if state.reload().is_ok() {
                    log::info!("Reloaded {}", state.source.path.display());
                }
                ui.close_menu();
            }
            if ui
                .add_enabled(state.dataset.is_some(), egui::Button::new("Exporter CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} lignes chargées, {} affichées",
                ds.len(),
                apply(ds, &state.filters).len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.is_error {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(&msg.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Ouvrir un budget")
        .add_filter(
            "Fichiers pris en charge",
            &["xlsx", "xlsm", "xls", "ods", "csv", "parquet", "pq"],
        )
        .add_filter("Excel / ODS", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(path) {
            state.status_message =
                Some(StatusMessage::error(format!("Échec de l'ouverture : {e}")));
        }
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Télécharger les données filtrées")
        .set_file_name(&state.config.export_file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        // The state already put the failure in the status line.
        if let Err(e) = state.export_csv(&path) {
            log::debug!("Export to {} not written: {e}", path.display());
        }
    }
}
