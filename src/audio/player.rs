use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, warn};

use crate::bridge::MediaSource;
use crate::config::AudioSettings;

use super::element::{MediaElement, seek_offset};
use super::events::{EventHub, Subscription};
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, MediaError};

/// `MediaElement` backed by a dedicated `rodio` audio thread.
pub struct RodioElement {
    tx: Sender<AudioCmd>,
    hub: EventHub,
    duration: Option<f64>,
    has_source: bool,
    quit_fade_out: Duration,
    join: Option<JoinHandle<()>>,
}

impl RodioElement {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let hub = EventHub::new();
        let quit_fade_out = Duration::from_millis(audio_settings.quit_fade_out_ms);

        let audio_handle = spawn_audio_thread(rx, hub.clone(), audio_settings);

        Self {
            tx,
            hub,
            duration: None,
            has_source: false,
            quit_fade_out,
            join: Some(audio_handle),
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), MediaError> {
        self.tx.send(cmd).map_err(|_| MediaError::Disconnected)
    }
}

impl MediaElement for RodioElement {
    fn load(&mut self, source: MediaSource) -> Result<(), MediaError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(AudioCmd::Load {
            source,
            reply: reply_tx,
        })?;

        let duration = reply_rx.recv().map_err(|_| MediaError::Disconnected)??;
        self.duration = duration.map(|d| d.as_secs_f64());
        self.has_source = true;
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if !self.has_source {
            return Err(MediaError::NoSource);
        }
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) {
        if self.send(AudioCmd::Pause).is_err() {
            warn!("pause ignored: audio thread is not running");
        }
    }

    fn seek(&mut self, secs: f64) -> f64 {
        let (to, offset) = seek_offset(secs, self.duration);
        if self.has_source {
            if let Err(e) = self.send(AudioCmd::Seek(offset)) {
                warn!("seek ignored: {e}");
            }
        }
        to
    }

    fn has_source(&self) -> bool {
        self.has_source
    }

    fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }

    fn shutdown(&mut self) {
        let Some(handle) = self.join.take() else {
            return;
        };
        debug!("stopping audio thread");
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: self.quit_fade_out.as_millis() as u64,
        });
        let _ = handle.join();
        self.has_source = false;
    }
}

impl Drop for RodioElement {
    fn drop(&mut self) {
        self.shutdown();
    }
}
