use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use geomemo::capture::PhotoSource;
use geomemo::config::GeomemoConfig;
use geomemo::services;
use geomemo::session::Session;
use serde::Serialize;

/// Reads the photo from disk. A missing or unreadable file counts as a cancelled pick.
pub struct FilePhotoSource {
    path: PathBuf,
}

impl FilePhotoSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl PhotoSource for FilePhotoSource {
    async fn pick_image(&self) -> Option<Vec<u8>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read photo");
                None
            }
        }
    }
}

#[derive(Serialize)]
struct CaptureOutput<'a> {
    memory: &'a geomemo::memory::Memory,
    region: geomemo::geo::Region,
}

pub async fn run(
    config: &GeomemoConfig,
    image: PathBuf,
    city: &str,
    voice: Option<PathBuf>,
) -> Result<()> {
    let services = services::create_services(&config.services)?;
    let session = Session::new(services, &config.viewport);

    let source = FilePhotoSource::new(image);
    let mut draft = session.begin_capture(&source).await?;
    draft.set_location_name(city);
    draft.attach_voice_note(voice);

    let memory = session.save_capture(&mut draft).await?;
    super::print_json(&CaptureOutput {
        memory: &memory,
        region: session.current_region(),
    })
}
