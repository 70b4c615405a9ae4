//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{DirectoryLoader, HttpDirectoryClient, LoadHandle};
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::media::decode_photo;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    dataset_url: String,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(run_worker(cmd_rx, ui_tx, dataset_url));
    })
}

async fn run_worker(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, dataset_url: String) {
    let client = Arc::new(HttpDirectoryClient::new(dataset_url));
    let loader = DirectoryLoader::new(client.clone());
    let mut load_handle: Option<LoadHandle> = None;
    let mut photo_tasks: Vec<JoinHandle<()>> = Vec::new();

    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::LoadDirectory => {
                tracing::info!(url = client.dataset_url(), "backend: load_directory");
                let ui_tx = ui_tx.clone();
                let started = loader.start(move |outcome| {
                    let event = match outcome {
                        Ok(data) => UiEvent::DirectoryLoaded(data),
                        Err(err) => UiEvent::Error(UiError::from_message(
                            UiErrorContext::DirectoryLoad,
                            err.to_string(),
                        )),
                    };
                    let _ = ui_tx.try_send(event);
                });
                if let Some(handle) = started {
                    load_handle = Some(handle);
                }
            }
            BackendCommand::FetchPhoto {
                practitioner_id,
                url,
            } => {
                tracing::debug!(practitioner_id = %practitioner_id.0, "backend: fetch_photo");
                photo_tasks.retain(|task| !task.is_finished());
                let client = client.clone();
                let ui_tx = ui_tx.clone();
                photo_tasks.push(tokio::spawn(async move {
                    let event = match client.fetch_photo(&url).await {
                        Ok(bytes) => match decode_photo(&bytes) {
                            Ok(image) => UiEvent::PhotoLoaded {
                                practitioner_id,
                                image,
                            },
                            Err(reason) => UiEvent::PhotoFailed {
                                practitioner_id,
                                reason,
                            },
                        },
                        Err(err) => UiEvent::PhotoFailed {
                            practitioner_id,
                            reason: err.to_string(),
                        },
                    };
                    if let UiEvent::PhotoFailed {
                        practitioner_id,
                        reason,
                    } = &event
                    {
                        tracing::warn!(practitioner_id = %practitioner_id.0, "photo preview failed: {reason}");
                    }
                    let _ = ui_tx.try_send(event);
                }));
            }
            BackendCommand::Shutdown => break,
        }
    }

    if let Some(handle) = load_handle.take() {
        handle.cancel();
    }
    for task in photo_tasks {
        task.abort();
    }
    tracing::info!("backend worker stopped");
}
