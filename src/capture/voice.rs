//! Voice-note recording on top of an [`AudioDevice`].
//!
//! A denied microphone permission or a device failure never errors out: the
//! recorder stays idle, logs the reason, and the capture carries on without a
//! voice note.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{info, warn};

/// The audio hardware. Implementations write the recording to a file of their choosing.
#[async_trait]
pub trait AudioDevice: Send {
    /// Ask for microphone access. Suspends until the user answers.
    async fn request_permission(&mut self) -> bool;

    /// Begin recording.
    fn start(&mut self) -> std::io::Result<()>;

    /// Finish recording. Suspends until the device has flushed the file;
    /// `None` if the recording failed.
    async fn stop(&mut self) -> Option<PathBuf>;
}

pub struct VoiceRecorder {
    device: Box<dyn AudioDevice>,
    recording: bool,
}

impl VoiceRecorder {
    pub fn new(device: Box<dyn AudioDevice>) -> Self {
        Self {
            device,
            recording: false,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Start a new recording. Returns `true` once the device is recording.
    ///
    /// A take already in progress is stopped first; its file is kept on disk
    /// but not returned.
    pub async fn start(&mut self) -> bool {
        if self.recording {
            if let Some(previous) = self.stop().await {
                info!(path = %previous.display(), "previous voice note superseded");
            }
        }

        if !self.device.request_permission().await {
            warn!("microphone permission denied");
            return false;
        }

        match self.device.start() {
            Ok(()) => {
                self.recording = true;
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to start recording");
                false
            }
        }
    }

    /// Stop recording and return the file, or `None` if nothing was being
    /// recorded or the recording failed.
    pub async fn stop(&mut self) -> Option<PathBuf> {
        if !self.recording {
            return None;
        }
        self.recording = false;

        let path = self.device.stop().await;
        if path.is_none() {
            warn!("recording failed");
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Log {
        starts: usize,
        stops: usize,
    }

    struct FakeDevice {
        granted: bool,
        fail_start: bool,
        fail_stop: bool,
        log: Arc<Mutex<Log>>,
    }

    impl FakeDevice {
        fn new(granted: bool) -> (Self, Arc<Mutex<Log>>) {
            let log = Arc::new(Mutex::new(Log::default()));
            let device = Self {
                granted,
                fail_start: false,
                fail_stop: false,
                log: Arc::clone(&log),
            };
            (device, log)
        }
    }

    #[async_trait]
    impl AudioDevice for FakeDevice {
        async fn request_permission(&mut self) -> bool {
            self.granted
        }

        fn start(&mut self) -> std::io::Result<()> {
            if self.fail_start {
                return Err(std::io::Error::other("no input device"));
            }
            self.log.lock().unwrap().starts += 1;
            Ok(())
        }

        async fn stop(&mut self) -> Option<PathBuf> {
            let mut log = self.log.lock().unwrap();
            log.stops += 1;
            if self.fail_stop {
                None
            } else {
                Some(PathBuf::from(format!("/tmp/note-{}.m4a", log.stops)))
            }
        }
    }

    #[tokio::test]
    async fn record_and_stop() {
        let (device, log) = FakeDevice::new(true);
        let mut recorder = VoiceRecorder::new(Box::new(device));

        assert!(recorder.start().await);
        assert!(recorder.is_recording());
        assert_eq!(recorder.stop().await, Some(PathBuf::from("/tmp/note-1.m4a")));
        assert!(!recorder.is_recording());
        assert_eq!(log.lock().unwrap().starts, 1);
    }

    #[tokio::test]
    async fn permission_denied_stays_idle() {
        let (device, log) = FakeDevice::new(false);
        let mut recorder = VoiceRecorder::new(Box::new(device));

        assert!(!recorder.start().await);
        assert!(!recorder.is_recording());
        assert_eq!(recorder.stop().await, None);
        assert_eq!(log.lock().unwrap().starts, 0);
        assert_eq!(log.lock().unwrap().stops, 0);
    }

    #[tokio::test]
    async fn stop_without_recording_is_none() {
        let (device, log) = FakeDevice::new(true);
        let mut recorder = VoiceRecorder::new(Box::new(device));
        assert_eq!(recorder.stop().await, None);
        assert_eq!(log.lock().unwrap().stops, 0);
    }

    #[tokio::test]
    async fn restart_stops_previous_take() {
        let (device, log) = FakeDevice::new(true);
        let mut recorder = VoiceRecorder::new(Box::new(device));

        assert!(recorder.start().await);
        assert!(recorder.start().await);
        assert_eq!(log.lock().unwrap().stops, 1);
        assert_eq!(recorder.stop().await, Some(PathBuf::from("/tmp/note-2.m4a")));
    }

    #[tokio::test]
    async fn device_failures_resolve_to_none() {
        let (mut device, _log) = FakeDevice::new(true);
        device.fail_start = true;
        let mut recorder = VoiceRecorder::new(Box::new(device));
        assert!(!recorder.start().await);
        assert!(!recorder.is_recording());

        let (mut device, _log) = FakeDevice::new(true);
        device.fail_stop = true;
        let mut recorder = VoiceRecorder::new(Box::new(device));
        assert!(recorder.start().await);
        assert_eq!(recorder.stop().await, None);
        assert!(!recorder.is_recording());
    }
}
