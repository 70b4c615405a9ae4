//! UI/backend events and error modeling for the directory view.

use client_core::DirectoryData;
use shared::domain::PractitionerId;

use crate::media::PreviewImage;

pub enum UiEvent {
    Info(String),
    DirectoryLoaded(DirectoryData),
    Error(UiError),
    PhotoLoaded {
        practitioner_id: PractitionerId,
        image: PreviewImage,
    },
    PhotoFailed {
        practitioner_id: PractitionerId,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    DirectoryLoad,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
