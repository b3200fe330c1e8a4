//! Audio system using Web Audio API

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::music::{self, ATTACK_SECS};
use super::{SoundEffect, Tone, Waveform};
use crate::settings::Settings;

/// Gain floor for exponential ramps (which can't reach zero)
const SILENT: f32 = 0.001;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master: Option<GainNode>,
    settings: Settings,
    muted: bool,
}

impl AudioManager {
    /// Nothing is created until `init`; browsers require a user gesture
    pub fn new(settings: Settings) -> Self {
        let muted = settings.start_muted;
        Self {
            ctx: None,
            master: None,
            settings,
            muted,
        }
    }

    /// Create the audio context and start the music loop (once)
    pub fn init(&mut self) {
        if self.ctx.is_some() {
            return;
        }
        let Some((ctx, master)) = self.create_graph() else {
            log::warn!("Failed to create AudioContext - audio disabled");
            return;
        };
        if self.settings.music {
            start_music(&ctx, &master, self.settings.music_volume);
        }
        self.ctx = Some(ctx);
        self.master = Some(master);
        self.apply_gain();
        log::info!("Audio initialized");
    }

    fn create_graph(&self) -> Option<(AudioContext, GainNode)> {
        let ctx = AudioContext::new().ok()?;
        let master = ctx.create_gain().ok()?;
        master.connect_with_audio_node(&ctx.destination()).ok()?;
        Some((ctx, master))
    }

    /// Mute/unmute all audio (music keeps running silently)
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_gain();
    }

    fn apply_gain(&self) {
        if let Some(master) = &self.master {
            master
                .gain()
                .set_value(self.settings.effective_master(self.muted));
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let (Some(ctx), Some(master)) = (&self.ctx, &self.master) else {
            return;
        };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        play_tone(ctx, master, effect.tone(), self.settings.sfx_volume);
    }
}

/// Create an oscillator with gain envelope routed into `master`
fn create_osc(
    ctx: &AudioContext,
    master: &GainNode,
    freq: f32,
    waveform: Waveform,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(match waveform {
        Waveform::Triangle => OscillatorType::Triangle,
        Waveform::Square => OscillatorType::Square,
    });
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(master).ok()?;

    Some((osc, gain))
}

/// Short blip: fast attack, exponential decay over the tone's duration
fn play_tone(ctx: &AudioContext, master: &GainNode, tone: Tone, peak: f32) {
    let Some((osc, gain)) = create_osc(ctx, master, tone.frequency, tone.waveform) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(SILENT, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(peak, t + ATTACK_SECS)
        .ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(SILENT, t + tone.duration)
        .ok();

    osc.start_with_when(t).ok();
    osc.stop_with_when(t + tone.duration).ok();
}

/// Schedule one bar of the arpeggio starting now
fn schedule_bar(ctx: &AudioContext, master: &GainNode, peak: f32) {
    let t0 = ctx.current_time();
    for note in music::bar() {
        let Some((osc, gain)) = create_osc(ctx, master, note.frequency, Waveform::Square) else {
            continue;
        };
        let start = t0 + note.start;
        gain.gain().set_value_at_time(0.0001, start).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(peak, start + ATTACK_SECS)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(SILENT, t0 + note.release)
            .ok();
        osc.start_with_when(start).ok();
        osc.stop_with_when(t0 + note.stop).ok();
    }
}

/// Play a bar now and re-schedule one every bar length on a browser timer
fn start_music(ctx: &AudioContext, master: &GainNode, peak: f32) {
    schedule_bar(ctx, master, peak);

    let Some(window) = web_sys::window() else {
        return;
    };
    let ctx = ctx.clone();
    let master = master.clone();
    let closure = Closure::<dyn FnMut()>::new(move || schedule_bar(&ctx, &master, peak));
    let interval_ms = (music::bar_secs() * 1000.0) as i32;
    if window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms,
        )
        .is_err()
    {
        log::warn!("Could not start music timer");
    }
    closure.forget();
}
