//! File operations for importing tables and opening/saving networks.
//!
//! Native builds show `rfd` dialogs on the tokio runtime; web builds read
//! picked files through `rfd` as well and save by triggering a download.
//! Results come back over the [`FileOperationResult`] channel and are turned
//! into commands.

use super::commands::AppCommand;
use super::state::{FileOperationResult, NetworkApp, PendingLoadOperation, PendingSaveOperation};
use crate::constants::{
    DEFAULT_NETWORK_FILE_NAME, NETWORK_FILE_DESCRIPTION, NETWORK_FILE_EXTENSION, TABULAR_EXTENSIONS,
};
use eframe::egui;
use std::sync::mpsc::Sender;

impl NetworkApp {
    /// Processes completed file operations and starts newly requested ones.
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        let mut completed = Vec::new();
        if let Some(receiver) = &self.file.file_operation_receiver {
            while let Ok(result) = receiver.try_recv() {
                completed.push(result);
            }
        }
        for result in completed {
            let command = match result {
                FileOperationResult::SaveCompleted(path) => AppCommand::SaveCompleted(path),
                FileOperationResult::TabularLoaded { mode, file_name, bytes } => {
                    AppCommand::TabularFileLoaded { mode, file_name, bytes }
                }
                FileOperationResult::NetworkLoaded { path, content } => {
                    AppCommand::NetworkFileLoaded { path, content }
                }
                FileOperationResult::OperationFailed(error) => AppCommand::FileOperationFailed(error),
            };
            self.push_command(command);
        }

        if let Some(save_op) = self.file.pending_save_operation.take() {
            self.start_save(ctx, save_op);
        }

        if let Some(load_op) = self.file.pending_load_operation.take() {
            self.start_load(ctx, load_op);
        }
    }

    fn start_save(&mut self, ctx: &egui::Context, save_op: PendingSaveOperation) {
        let Some(network) = &self.network else {
            return;
        };
        let json = match network.export_to_json() {
            Ok(json) => json,
            Err(err) => {
                self.push_command(AppCommand::FileOperationFailed(format!(
                    "Failed to serialize network: {}",
                    err
                )));
                return;
            }
        };
        let sender = self.file.file_operation_sender.clone();
        let ctx = ctx.clone();

        match (save_op, self.file.current_path.clone()) {
            #[cfg(not(target_arch = "wasm32"))]
            (PendingSaveOperation::Save, Some(path)) => {
                tokio::spawn(async move {
                    let result = match std::fs::write(&path, json) {
                        Ok(()) => FileOperationResult::SaveCompleted(Some(path)),
                        Err(e) => FileOperationResult::OperationFailed(format!("Failed to save file: {}", e)),
                    };
                    send(&sender, result);
                    ctx.request_repaint();
                });
            }
            #[cfg(not(target_arch = "wasm32"))]
            _ => {
                tokio::spawn(async move {
                    if let Some(handle) = rfd::AsyncFileDialog::new()
                        .add_filter(NETWORK_FILE_DESCRIPTION, &[NETWORK_FILE_EXTENSION])
                        .set_file_name(DEFAULT_NETWORK_FILE_NAME)
                        .save_file()
                        .await
                    {
                        let path = handle.path();
                        let result = match std::fs::write(path, json) {
                            Ok(()) => FileOperationResult::SaveCompleted(Some(path.display().to_string())),
                            Err(e) => {
                                FileOperationResult::OperationFailed(format!("Failed to save file: {}", e))
                            }
                        };
                        send(&sender, result);
                    }
                    ctx.request_repaint();
                });
            }
            #[cfg(target_arch = "wasm32")]
            _ => {
                // No writable handle in the browser: every save is a download.
                let result = match Self::trigger_download(DEFAULT_NETWORK_FILE_NAME, &json) {
                    Ok(()) => FileOperationResult::SaveCompleted(None),
                    Err(e) => FileOperationResult::OperationFailed(e.to_string()),
                };
                send(&sender, result);
                ctx.request_repaint();
            }
        }
    }

    fn start_load(&mut self, ctx: &egui::Context, load_op: PendingLoadOperation) {
        let sender = self.file.file_operation_sender.clone();
        let ctx = ctx.clone();
        let dialog = match load_op {
            PendingLoadOperation::Tabular(_) => {
                rfd::AsyncFileDialog::new().add_filter("Delimited text", TABULAR_EXTENSIONS)
            }
            PendingLoadOperation::Network => rfd::AsyncFileDialog::new()
                .add_filter(NETWORK_FILE_DESCRIPTION, &[NETWORK_FILE_EXTENSION]),
        };
        let task = async move {
            // A cancelled picker is a silent no-op.
            if let Some(handle) = dialog.pick_file().await {
                let file_name = handle.file_name();
                let bytes = handle.read().await;
                let result = match load_op {
                    PendingLoadOperation::Tabular(mode) => {
                        FileOperationResult::TabularLoaded { mode, file_name, bytes }
                    }
                    PendingLoadOperation::Network => match String::from_utf8(bytes) {
                        Ok(content) => FileOperationResult::NetworkLoaded {
                            path: writable_path(&handle),
                            content,
                        },
                        Err(e) => FileOperationResult::OperationFailed(format!(
                            "Failed to open the file.\n{} is not valid UTF-8: {}",
                            file_name, e
                        )),
                    },
                };
                send(&sender, result);
            }
            ctx.request_repaint();
        };

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(task);

        #[cfg(not(target_arch = "wasm32"))]
        tokio::spawn(task);
    }

    /// Triggers a file download in the browser.
    ///
    /// Creates a temporary anchor element with a blob URL and clicks it.
    #[cfg(target_arch = "wasm32")]
    fn trigger_download(filename: &str, content: &str) -> Result<(), &'static str> {
        use eframe::wasm_bindgen::{JsCast, JsValue};

        let window = web_sys::window().ok_or("No window found")?;
        let document = window.document().ok_or("No document found")?;

        let blob_parts = js_sys::Array::new();
        blob_parts.push(&JsValue::from_str(content));

        let blob_options = web_sys::BlobPropertyBag::new();
        blob_options.set_type("application/json");

        let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &blob_options)
            .map_err(|_| "Failed to create blob")?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|_| "Failed to create object URL")?;

        let anchor = document
            .create_element("a")
            .map_err(|_| "Failed to create anchor element")?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Failed to cast to anchor element")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        let body = document.body().ok_or("No body found")?;
        body.append_child(&anchor).map_err(|_| "Failed to append anchor")?;
        anchor.click();
        body.remove_child(&anchor).map_err(|_| "Failed to remove anchor")?;

        web_sys::Url::revoke_object_url(&url).map_err(|_| "Failed to revoke object URL")?;
        Ok(())
    }
}

fn send(sender: &Option<Sender<FileOperationResult>>, result: FileOperationResult) {
    if let Some(tx) = sender {
        if tx.send(result).is_err() {
            log::warn!("File operation finished after the app stopped listening");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn writable_path(handle: &rfd::FileHandle) -> Option<String> {
    Some(handle.path().display().to_string())
}

#[cfg(target_arch = "wasm32")]
fn writable_path(_handle: &rfd::FileHandle) -> Option<String> {
    None
}
