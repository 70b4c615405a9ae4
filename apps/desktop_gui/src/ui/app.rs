use std::{collections::HashMap, time::Duration};

use client_core::{card::category_slug, PractitionerCard, SortKey};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use eframe::egui;
use egui::TextureHandle;
use shared::domain::PractitionerId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::state::{DirectoryState, ListingView};
use crate::ui::cards::{show_card, Avatar};

const SEARCH_HINT: &str = "Search Symptoms, Doctors, Specialists, Clinics";
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
const HEADER_FILL: egui::Color32 = egui::Color32::from_rgb(191, 219, 254);

enum PhotoState {
    Requested,
    Ready(TextureHandle),
    Failed,
}

pub struct DirectoryApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    state: DirectoryState,
    search_text: String,
    photos_enabled: bool,
    photos: HashMap<PractitionerId, PhotoState>,

    status: String,
    last_error: Option<UiError>,
}

impl DirectoryApp {
    /// Creates the view and issues the single directory load.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        photos_enabled: bool,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: DirectoryState::new(),
            search_text: String::new(),
            photos_enabled,
            photos: HashMap::new(),
            status: "Loading doctors...".to_string(),
            last_error: None,
        };
        dispatch_backend_command(&app.cmd_tx, BackendCommand::LoadDirectory, &mut app.status);
        app
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::DirectoryLoaded(data) => {
                    self.status = format!("Loaded {} doctors", data.records().len());
                    self.state.apply_loaded(data);
                }
                UiEvent::Error(err) => {
                    // Both contexts leave the directory with no data to show.
                    tracing::error!(context = ?err.context(), "directory error: {}", err.message());
                    self.state.apply_load_error(err.message());
                    self.status = format!("Error: {}", err.message());
                    self.last_error = Some(err);
                }
                UiEvent::PhotoLoaded {
                    practitioner_id,
                    image,
                } => {
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
                    let texture = ctx.load_texture(
                        format!("practitioner_photo_{}", practitioner_id.0),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.photos.insert(practitioner_id, PhotoState::Ready(texture));
                }
                UiEvent::PhotoFailed {
                    practitioner_id, ..
                } => {
                    self.photos.insert(practitioner_id, PhotoState::Failed);
                }
            }
        }
    }

    fn show_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_bar")
            .frame(egui::Frame::new().fill(HEADER_FILL).inner_margin(egui::Margin::same(14)))
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.search_text)
                        .hint_text(SEARCH_HINT)
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    self.state.set_query(self.search_text.clone());
                }
            });
    }

    fn show_filters_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("filters_panel")
            .resizable(false)
            .exact_width(260.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Sort by");
                let mut sort = self.state.filters().sort();
                ui.radio_value(&mut sort, SortKey::FeeAscending, SortKey::FeeAscending.label());
                ui.radio_value(
                    &mut sort,
                    SortKey::ExperienceDescending,
                    SortKey::ExperienceDescending.label(),
                );
                if sort != self.state.filters().sort() {
                    self.state.set_sort(sort);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    ui.heading("Filters");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.link("Clear All").clicked() {
                            self.state.clear_all();
                            self.search_text.clear();
                        }
                    });
                });

                ui.label(egui::RichText::new("Specialities").strong());
                let categories: Vec<String> = self
                    .state
                    .categories()
                    .map(|set| set.iter().cloned().collect())
                    .unwrap_or_default();
                if categories.is_empty() {
                    ui.weak("No specialities available");
                    return;
                }
                egui::ScrollArea::vertical()
                    .id_salt("speciality_filters")
                    .show(ui, |ui| {
                        for category in &categories {
                            let mut checked = self.state.filters().is_selected(category);
                            let changed = ui
                                .push_id(category_slug(category), |ui| {
                                    ui.checkbox(&mut checked, category.as_str()).changed()
                                })
                                .inner;
                            if changed {
                                self.state.toggle_category(category);
                            }
                        }
                    });
            });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(&self.status);
                if self.last_error.is_some() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Dismiss").clicked() {
                            self.last_error = None;
                            self.status = "Ready".to_string();
                        }
                    });
                }
            });
        });
    }

    fn show_listing(&mut self, ctx: &egui::Context) {
        let mut photo_requests: Vec<(PractitionerId, String)> = Vec::new();
        let Self {
            state,
            photos,
            photos_enabled,
            ..
        } = &mut *self;
        let total = state.record_count();

        egui::CentralPanel::default().show(ctx, |ui| match state.view() {
            ListingView::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.spinner();
                    ui.label("Loading doctors...");
                });
            }
            ListingView::Error(message) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.colored_label(ERROR_TEXT, format!("Error: {message}"));
                });
            }
            ListingView::Empty => {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label("No doctors match your search criteria");
                });
            }
            ListingView::Populated(listing) => {
                ui.label(format!("{} of {total} doctors", listing.len()));
                ui.add_space(4.0);
                egui::ScrollArea::vertical()
                    .id_salt("practitioner_listing")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for practitioner in listing {
                            let card = PractitionerCard::from_practitioner(practitioner);
                            let avatar = match (&practitioner.photo, photos.get(&practitioner.id)) {
                                (_, Some(PhotoState::Ready(texture))) => Avatar::Photo(texture),
                                (Some(url), None) if *photos_enabled => {
                                    photo_requests.push((practitioner.id.clone(), url.clone()));
                                    Avatar::Initials
                                }
                                _ => Avatar::Initials,
                            };
                            show_card(ui, &card, avatar);
                            ui.add_space(10.0);
                        }
                    });
            }
        });

        self.request_photos(photo_requests);
    }

    /// Queues photo fetches until the command queue refuses one. Unqueued
    /// photos stay untracked so a later frame asks for them again.
    fn request_photos(&mut self, requests: Vec<(PractitionerId, String)>) {
        for (practitioner_id, url) in requests {
            let queued = dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::FetchPhoto {
                    practitioner_id: practitioner_id.clone(),
                    url,
                },
                &mut self.status,
            );
            if !queued {
                break;
            }
            self.photos.insert(practitioner_id, PhotoState::Requested);
        }
    }

    fn has_pending_work(&self) -> bool {
        self.state.is_loading()
            || self
                .photos
                .values()
                .any(|photo| matches!(photo, PhotoState::Requested))
    }
}

impl eframe::App for DirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);

        self.show_search_bar(ctx);
        self.show_status_bar(ctx);
        self.show_filters_panel(ctx);
        self.show_listing(ctx);

        if self.has_pending_work() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl Drop for DirectoryApp {
    fn drop(&mut self) {
        match self.cmd_tx.try_send(BackendCommand::Shutdown) {
            Ok(()) => tracing::debug!("requested backend shutdown"),
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("backend already gone or busy; dropping command queue");
            }
        }
    }
}
