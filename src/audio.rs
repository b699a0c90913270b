//! Impact sounds via rodio
//!
//! The simulation never touches the output device. Cues go through a bounded
//! queue to a dedicated thread that owns the rodio stream; a full queue or a
//! missing device just drops the cue.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{Receiver, SyncSender, TrySendError, sync_channel};

use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, Source};

use crate::error::{AppError, AppResult};
use crate::settings::Settings;
use crate::sim::SimEvent;

/// Sample rate of the built-in thump
pub const SYNTH_SAMPLE_RATE: u32 = 44_100;
/// Length of the built-in thump
const THUMP_DURATION_MS: u32 = 120;

/// Volume for an impact: linear in speed, capped at 1.0
#[inline]
pub fn impact_volume(speed: f32, speed_scale: f32) -> f32 {
    (speed.abs() / speed_scale).min(1.0)
}

/// Playback speed for an impact of the given volume
#[inline]
pub fn impact_pitch(volume: f32, pitch_range: f32) -> f32 {
    1.0 + pitch_range * volume
}

/// One request to play the impact sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactCue {
    /// Final gain (impact volume x master x sfx)
    pub volume: f32,
    /// Playback speed multiplier
    pub pitch: f32,
}

/// Decoded, interleaved impact sample
#[derive(Debug, Clone)]
pub struct ImpactSample {
    pub channels: u16,
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl ImpactSample {
    /// Built-in thump: a sine dropping from 150 Hz to 60 Hz with a fast decay
    pub fn synth_thump() -> Self {
        let len = (SYNTH_SAMPLE_RATE * THUMP_DURATION_MS / 1000) as usize;
        let rate = SYNTH_SAMPLE_RATE as f32;
        let duration = THUMP_DURATION_MS as f32 / 1000.0;

        let mut phase = 0.0f32;
        let samples = (0..len)
            .map(|i| {
                let t = i as f32 / rate;
                let freq = 150.0 * (60.0f32 / 150.0).powf(t / duration);
                phase += std::f32::consts::TAU * freq / rate;
                let envelope = (-t * 35.0).exp();
                phase.sin() * envelope * 0.6
            })
            .collect();

        Self {
            channels: 1,
            sample_rate: SYNTH_SAMPLE_RATE,
            samples,
        }
    }

    /// Decode a sound file once, up front
    pub fn load(path: &Path) -> AppResult<Self> {
        let file = File::open(path).map_err(|source| AppError::AudioSampleIo {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|source| AppError::AudioSampleDecode {
                path: path.to_path_buf(),
                source,
            })?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<f32> = decoder.convert_samples().collect();
        if samples.is_empty() {
            return Err(AppError::EmptyAudioSample(path.to_path_buf()));
        }

        log::info!(
            "Loaded impact sample {} ({} ch, {} Hz, {} samples)",
            path.display(),
            channels,
            sample_rate,
            samples.len()
        );
        Ok(Self {
            channels,
            sample_rate,
            samples,
        })
    }

    /// Configured sample, or the built-in thump
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        match &settings.audio.sample_path {
            Some(path) => Self::load(path),
            None => Ok(Self::synth_thump()),
        }
    }

    fn into_source(self) -> SamplesBuffer<f32> {
        SamplesBuffer::new(self.channels, self.sample_rate, self.samples)
    }
}

/// Audio manager: turns simulation events into queued cues
pub struct AudioManager {
    tx: Option<SyncSender<ImpactCue>>,
    gain: f32,
    speed_scale: f32,
    pitch_range: f32,
    min_volume: f32,
}

impl AudioManager {
    /// Spawn the audio thread and hand it the sample
    pub fn start(sample: ImpactSample, settings: &Settings) -> AppResult<Self> {
        let (tx, rx) = sync_channel(settings.audio.queue_depth);
        std::thread::Builder::new()
            .name("audio".into())
            .spawn(move || run_output(sample, rx))
            .map_err(AppError::AudioThread)?;

        Ok(Self::with_sender(Some(tx), settings))
    }

    /// A manager that plays nothing
    pub fn disabled(settings: &Settings) -> Self {
        Self::with_sender(None, settings)
    }

    fn with_sender(tx: Option<SyncSender<ImpactCue>>, settings: &Settings) -> Self {
        let audio = &settings.audio;
        Self {
            tx,
            gain: settings.effective_volume(),
            speed_scale: audio.speed_scale,
            min_volume: audio.min_volume,
            pitch_range: if audio.pitch_by_speed {
                audio.pitch_range
            } else {
                0.0
            },
        }
    }

    /// Cue for an impact at `speed`
    pub fn cue_for(&self, speed: f32) -> ImpactCue {
        let volume = impact_volume(speed, self.speed_scale);
        ImpactCue {
            volume: volume * self.gain,
            pitch: impact_pitch(volume, self.pitch_range),
        }
    }

    /// Queue a cue for an impact; never blocks
    ///
    /// Balls settling on the floor bounce every tick at tiny speeds; those
    /// cues are inaudible and would crowd real impacts out of the queue.
    pub fn play_impact(&self, speed: f32) {
        if impact_volume(speed, self.speed_scale) < self.min_volume {
            return;
        }
        let cue = self.cue_for(speed);
        if cue.volume <= 0.0 {
            return;
        }
        let Some(tx) = &self.tx else { return };

        match tx.try_send(cue) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => log::trace!("Audio queue full, dropped cue"),
            Err(TrySendError::Disconnected(_)) => log::trace!("Audio thread gone, dropped cue"),
        }
    }

    /// Play a cue for every impact in `events`
    pub fn handle_events(&self, events: &[SimEvent]) {
        for event in events {
            match *event {
                SimEvent::Impact { speed, .. } => self.play_impact(speed),
            }
        }
    }
}

/// Audio thread body: open the device, then play cues until the sender drops
fn run_output(sample: ImpactSample, rx: Receiver<ImpactCue>) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            log::warn!("No audio output device ({e}) - audio disabled");
            return;
        }
    };
    log::info!("Audio output ready");

    let source = sample.into_source().buffered();
    for cue in rx {
        let voice = source
            .clone()
            .speed(cue.pitch)
            .amplify(cue.volume)
            .convert_samples();
        if let Err(e) = handle.play_raw(voice) {
            log::trace!("Impact cue dropped: {e}");
        }
    }
    log::debug!("Audio thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Surface;

    fn manager_with_queue(depth: usize) -> (AudioManager, Receiver<ImpactCue>) {
        let (tx, rx) = sync_channel(depth);
        (AudioManager::with_sender(Some(tx), &Settings::default()), rx)
    }

    #[test]
    fn test_impact_volume() {
        assert!((impact_volume(5.0, 10.0) - 0.5).abs() < 1e-6);
        assert_eq!(impact_volume(15.0, 10.0), 1.0);
        assert_eq!(impact_volume(0.0, 10.0), 0.0);
        assert!((impact_volume(-5.0, 10.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_impact_pitch() {
        assert_eq!(impact_pitch(0.0, 0.25), 1.0);
        assert!((impact_pitch(1.0, 0.25) - 1.25).abs() < 1e-6);
        assert_eq!(impact_pitch(1.0, 0.0), 1.0);
    }

    #[test]
    fn test_cue_applies_settings_gain() {
        let manager = AudioManager::disabled(&Settings::default());
        let cue = manager.cue_for(5.0);
        assert!((cue.volume - 0.5 * 0.8).abs() < 1e-6);
        assert!((cue.pitch - 1.125).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_scaling_off() {
        let mut settings = Settings::default();
        settings.audio.pitch_by_speed = false;
        let manager = AudioManager::disabled(&settings);
        assert_eq!(manager.cue_for(20.0).pitch, 1.0);
    }

    #[test]
    fn test_play_impact_queues_cue() {
        let (manager, rx) = manager_with_queue(4);
        manager.handle_events(&[SimEvent::Impact {
            surface: Surface::Floor,
            speed: 8.0,
        }]);
        let cue = rx.try_recv().unwrap();
        assert!((cue.volume - 0.8 * 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_full_queue_drops_without_blocking() {
        let (manager, rx) = manager_with_queue(2);
        for _ in 0..10 {
            manager.play_impact(6.0);
        }
        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn test_resting_balls_do_not_crowd_out_impacts() {
        let (manager, rx) = manager_with_queue(32);
        let mut events: Vec<SimEvent> = (0..100)
            .map(|i| SimEvent::Impact {
                surface: Surface::Floor,
                speed: 0.02 + 0.0006 * i as f32,
            })
            .collect();
        events.push(SimEvent::Impact {
            surface: Surface::Floor,
            speed: 15.0,
        });

        manager.handle_events(&events);

        let cues: Vec<ImpactCue> = rx.try_iter().collect();
        assert_eq!(cues.len(), 1);
        assert!((cues[0].volume - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_min_volume_zero_keeps_faint_cues() {
        let mut settings = Settings::default();
        settings.audio.min_volume = 0.0;
        let (tx, rx) = sync_channel(4);
        let manager = AudioManager::with_sender(Some(tx), &settings);
        manager.play_impact(0.05);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn test_disconnected_queue_is_silent() {
        let (manager, rx) = manager_with_queue(2);
        drop(rx);
        manager.play_impact(6.0);
    }

    #[test]
    fn test_muted_sends_nothing() {
        let mut settings = Settings::default();
        settings.audio.muted = true;
        let (tx, rx) = sync_channel(4);
        let manager = AudioManager::with_sender(Some(tx), &settings);
        manager.play_impact(9.0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_synth_thump_shape() {
        let sample = ImpactSample::synth_thump();
        assert_eq!(sample.channels, 1);
        assert_eq!(sample.samples.len(), (SYNTH_SAMPLE_RATE * 120 / 1000) as usize);
        assert!(sample.samples.iter().all(|s| s.abs() <= 1.0));
        let head: f32 = sample.samples[..500].iter().map(|s| s.abs()).sum();
        let tail: f32 = sample.samples[sample.samples.len() - 500..]
            .iter()
            .map(|s| s.abs())
            .sum();
        assert!(head > tail);
    }

    #[test]
    fn test_missing_sample_file() {
        let err = ImpactSample::load(Path::new("/nonexistent/land_sound.mp3")).unwrap_err();
        assert!(matches!(err, AppError::AudioSampleIo { .. }));
    }
}
