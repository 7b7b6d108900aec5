use egui::{Color32, ColorImage, Context, RichText, TextureOptions};
use image::ImageReader;
use log::error;
use std::path::Path;

use super::controller::{PanelBody, TabContent};
use super::App;
use crate::plotting::render_chart;
use crate::types::Tab;

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context) {
    if app.update_needed {
        load_textures(app, ctx);
        app.update_needed = false;
    }

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("My Spotify Streaming Data Journey");
        });
        ui.separator();

        ui.horizontal(|ui| {
            let hint = app.date_hint();
            ui.label("Start date:");
            ui.text_edit_singleline(&mut app.start_input).on_hover_text(&hint);
            ui.label("End date:");
            ui.text_edit_singleline(&mut app.end_input).on_hover_text(&hint);

            if ui.button("Apply").clicked() {
                app.apply_dates();
            }
            if ui.button("Clear").clicked() {
                app.clear_dates();
            }
        });
        if let Some(message) = &app.date_error {
            ui.colored_label(Color32::RED, message);
        }

        ui.separator();
        ui.columns(4, |columns| {
            let metrics = &app.view.metrics;
            metric(&mut columns[0], "Total Minutes", &metrics.total_minutes);
            metric(&mut columns[1], "Average Minutes", &metrics.average_minutes);
            metric(&mut columns[2], "Total Tracks", &metrics.total_tracks);
            metric(&mut columns[3], "Total Artist", &metrics.total_artists);
        });

        ui.separator();
        ui.horizontal_wrapped(|ui| {
            let mut selected = app.active_tab;
            for tab in Tab::ALL {
                ui.selectable_value(&mut selected, tab, tab.label());
            }
            app.select_tab(selected);
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| match &app.view.content {
            TabContent::Intro(intro) => {
                ui.vertical_centered(|ui| {
                    ui.heading(&intro.heading);
                    ui.label(&intro.text);
                    ui.horizontal(|ui| {
                        for texture in &app.intro_textures {
                            ui.add(egui::Image::new(texture).max_width(ui.available_width() / 2.0));
                        }
                    });
                });
            }
            TabContent::Panels { panels } => {
                for (panel, texture) in panels.iter().zip(&app.chart_textures) {
                    ui.heading(&panel.title);
                    match (&panel.body, texture) {
                        (PanelBody::Failed { message }, _) => {
                            ui.colored_label(Color32::RED, message);
                        }
                        (PanelBody::Chart(_), Some(texture)) => {
                            ui.image(texture);
                        }
                        (PanelBody::Chart(_), None) => {
                            ui.label("Chart unavailable");
                        }
                    }
                    ui.separator();
                }
            }
        });
    });
}

fn metric(ui: &mut egui::Ui, title: &str, value: &str) {
    ui.vertical_centered(|ui| {
        ui.label(title);
        ui.label(RichText::new(value).heading().strong());
    });
}

fn load_textures(app: &mut App, ctx: &Context) {
    app.chart_textures.clear();
    app.intro_textures.clear();

    match &app.view.content {
        TabContent::Intro(intro) => {
            for (i, path) in intro.images.iter().enumerate() {
                match load_image(path) {
                    Ok(image) => app.intro_textures.push(ctx.load_texture(
                        format!("intro_{}", i),
                        image,
                        TextureOptions::LINEAR,
                    )),
                    Err(e) => error!("Failed to load {}: {}", path.display(), e),
                }
            }
        }
        TabContent::Panels { panels } => {
            let config = app.dashboard.config();
            for (i, panel) in panels.iter().enumerate() {
                let texture = panel.chart_spec().and_then(|spec| {
                    match render_chart(spec, config.chart_width, config.chart_height) {
                        Ok(chart) => Some(ctx.load_texture(
                            format!("chart_{}", i),
                            ColorImage::from_rgb(
                                [chart.width as usize, chart.height as usize],
                                &chart.pixels,
                            ),
                            TextureOptions::LINEAR,
                        )),
                        Err(e) => {
                            error!("Plotting error for '{}': {}", panel.title, e);
                            None
                        }
                    }
                });
                app.chart_textures.push(texture);
            }
        }
    }
}

fn load_image(path: &Path) -> Result<ColorImage, image::ImageError> {
    let image = ImageReader::open(path)?.decode()?;
    let size = [image.width() as usize, image.height() as usize];
    let pixels = image.to_rgba8();
    let pixels = pixels.as_flat_samples();
    Ok(ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()))
}
