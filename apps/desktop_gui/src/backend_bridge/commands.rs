//! Backend commands queued from UI to backend worker.

use shared::domain::PractitionerId;

pub enum BackendCommand {
    LoadDirectory,
    FetchPhoto {
        practitioner_id: PractitionerId,
        url: String,
    },
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadDirectory => "load_directory",
            Self::FetchPhoto { .. } => "fetch_photo",
            Self::Shutdown => "shutdown",
        }
    }
}
