use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, error, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::bridge::MediaSource;
use crate::config::AudioSettings;

use super::events::EventHub;
use super::sink::create_sink_at;
use super::types::{AudioCmd, MediaError, MediaEvent};

/// Everything the audio thread knows about the loaded source.
struct Loaded {
    source: MediaSource,
    sink: Sink,
    duration: Option<Duration>,
    paused: bool,
    ended: bool,
    // Start time of the current run and elapsed time accumulated before it.
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Loaded {
    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn position_secs(&self) -> f64 {
        let pos = self.elapsed();
        match self.duration {
            Some(d) => pos.min(d).as_secs_f64(),
            None => pos.as_secs_f64(),
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

/// Replace the current sink with one positioned at `at`, keeping the
/// paused/playing state.
fn restart_at(stream: &OutputStream, loaded: &mut Loaded, at: Duration, hub: &EventHub) {
    match create_sink_at(stream, &loaded.source, at) {
        Ok((new_sink, _)) => {
            loaded.sink.stop();
            if !loaded.paused {
                new_sink.play();
                loaded.started_at = Some(Instant::now());
            } else {
                loaded.started_at = None;
            }
            loaded.sink = new_sink;
            loaded.accumulated = at;
            loaded.ended = false;
            hub.publish(MediaEvent::TimeUpdate(loaded.position_secs()));
        }
        Err(e) => error!("seek failed: {e}"),
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    hub: EventHub,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                s.log_on_drop(false);
                Some(s)
            }
            Err(e) => {
                error!("no audio output device: {e}");
                None
            }
        };
        let output_error = stream
            .is_none()
            .then(|| MediaError::NoOutput("default output stream unavailable".to_string()));

        let mut loaded: Option<Loaded> = None;
        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { source, reply } => {
                        let Some(ref stream) = stream else {
                            let err = output_error
                                .clone()
                                .unwrap_or(MediaError::Disconnected);
                            let _ = reply.send(Err(err));
                            continue;
                        };

                        // Decode first so a bad source leaves the current one playing.
                        match create_sink_at(stream, &source, Duration::ZERO) {
                            Ok((sink, duration)) => {
                                if let Some(old) = loaded.take() {
                                    old.sink.stop();
                                }
                                debug!(
                                    "loaded {} bytes of {} (duration {:?})",
                                    source.bytes.len(),
                                    source.mime,
                                    duration
                                );
                                loaded = Some(Loaded {
                                    source,
                                    sink,
                                    duration,
                                    paused: true,
                                    ended: false,
                                    started_at: None,
                                    accumulated: Duration::ZERO,
                                });
                                // Publish before replying so listeners see these after
                                // anything the previous source emitted.
                                hub.publish(MediaEvent::TimeUpdate(0.0));
                                if let Some(d) = duration {
                                    hub.publish(MediaEvent::DurationKnown(d.as_secs_f64()));
                                }
                                let _ = reply.send(Ok(duration));
                            }
                            Err(e) => {
                                let _ = reply.send(Err(e));
                            }
                        }
                    }

                    AudioCmd::Play => {
                        let (Some(stream), Some(l)) = (stream.as_ref(), loaded.as_mut()) else {
                            continue;
                        };
                        if l.ended {
                            // Playing again after the end starts over.
                            l.paused = false;
                            restart_at(stream, l, Duration::ZERO, &hub);
                        } else if l.paused {
                            l.sink.play();
                            l.paused = false;
                            l.started_at = Some(Instant::now());
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(ref mut l) = loaded {
                            if !l.paused {
                                l.sink.pause();
                                if let Some(st) = l.started_at.take() {
                                    l.accumulated += st.elapsed();
                                }
                                l.paused = true;
                                hub.publish(MediaEvent::TimeUpdate(l.position_secs()));
                            }
                        }
                    }

                    AudioCmd::Seek(to) => {
                        // Scrubbing: rebuild the sink and skip into the source.
                        let (Some(stream), Some(l)) = (stream.as_ref(), loaded.as_mut()) else {
                            continue;
                        };
                        restart_at(stream, l, to, &hub);
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref l) = loaded {
                            if !l.paused {
                                // Fade out gently before stopping.
                                fade_out_sink(&l.sink, fade_out_ms);
                            }
                            l.sink.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    let Some(ref mut l) = loaded else {
                        continue;
                    };
                    if l.paused || l.ended {
                        continue;
                    }
                    if l.sink.empty() {
                        if let Some(st) = l.started_at.take() {
                            l.accumulated += st.elapsed();
                        }
                        if let Some(d) = l.duration {
                            l.accumulated = d;
                        }
                        l.ended = true;
                        l.paused = true;
                        hub.publish(MediaEvent::TimeUpdate(l.position_secs()));
                        hub.publish(MediaEvent::Ended);
                    } else {
                        hub.publish(MediaEvent::TimeUpdate(l.position_secs()));
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("audio command channel closed; stopping audio thread");
                    break;
                }
            }
        }
    })
}
