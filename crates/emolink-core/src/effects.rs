//! Countdown and reveal sequencing for one viewing session.
//!
//! The controller owns no timers and no audio handles. The host drives it with
//! explicit millisecond timestamps and renders whatever [`Effect`]s come back,
//! so a session can be stopped, replayed or run under a fake clock.

use serde::Serialize;

use crate::catalog::{self, MusicStyle};

pub const COUNTDOWN_FROM: u32 = 10;
pub const COUNTDOWN_STEP_MS: u64 = 1000;
pub const CELEBRATION_MS: u64 = 5000;
pub const CONFETTI_INTERVAL_MS: u64 = 250;
pub const HEART_INTERVAL_MS: u64 = 300;
pub const CONFETTI_MAX_PARTICLES: f32 = 50.0;

pub const TONE_START_GAIN: f32 = 0.3;
pub const TONE_END_GAIN: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// A single oscillator note. Gain ramps exponentially from `start_gain` to
/// `end_gain` over `duration_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f32,
    pub waveform: Waveform,
    pub start_gain: f32,
    pub end_gain: f32,
}

impl Tone {
    pub fn new(frequency_hz: f32, duration_secs: f32, waveform: Waveform) -> Self {
        Self {
            frequency_hz,
            duration_secs,
            waveform,
            start_gain: TONE_START_GAIN,
            end_gain: TONE_END_GAIN,
        }
    }

    /// Short beep played on every countdown step.
    pub fn tick() -> Self {
        Self::new(800.0, 0.1, Waveform::Square)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Melody {
    pub notes: &'static [f32],
    pub note_secs: f32,
    pub spacing_ms: u64,
    pub waveform: Waveform,
}

const HAPPY_NOTES: &[f32] = &[
    264.0, 264.0, 297.0, 264.0, 352.0, 330.0, 264.0, 264.0, 297.0, 264.0, 396.0, 352.0,
];
const ROMANTIC_NOTES: &[f32] = &[330.0, 392.0, 494.0, 392.0, 330.0, 392.0, 494.0, 523.0];
const SOFT_NOTES: &[f32] = &[262.0, 330.0, 392.0, 330.0, 262.0, 196.0];

pub fn melody(style: MusicStyle) -> Melody {
    match style {
        MusicStyle::Happy => Melody {
            notes: HAPPY_NOTES,
            note_secs: 0.4,
            spacing_ms: 400,
            waveform: Waveform::Sine,
        },
        MusicStyle::Romantic => Melody {
            notes: ROMANTIC_NOTES,
            note_secs: 0.8,
            spacing_ms: 600,
            waveform: Waveform::Triangle,
        },
        MusicStyle::Soft => Melody {
            notes: SOFT_NOTES,
            note_secs: 1.2,
            spacing_ms: 800,
            waveform: Waveform::Sine,
        },
    }
}

impl Melody {
    /// Notes paired with their offset from the start of the melody.
    pub fn schedule(&self) -> impl Iterator<Item = (u64, Tone)> + '_ {
        self.notes.iter().enumerate().map(move |(i, &hz)| {
            (
                i as u64 * self.spacing_ms,
                Tone::new(hz, self.note_secs, self.waveform),
            )
        })
    }
}

/// One confetti emission. The renderer picks the origin x at random inside
/// `origin_x` and y in `-0.2..0.8`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfettiBurst {
    pub particle_count: f32,
    pub origin_x: (f32, f32),
    pub start_velocity: u32,
    pub spread: u32,
    pub ticks: u32,
}

const CONFETTI_ORIGINS: [(f32, f32); 2] = [(0.1, 0.3), (0.7, 0.9)];

impl ConfettiBurst {
    fn new(particle_count: f32, origin_x: (f32, f32)) -> Self {
        Self {
            particle_count,
            origin_x,
            start_velocity: 30,
            spread: 360,
            ticks: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Number currently shown by the countdown.
    Count { value: u32 },
    Tone { tone: Tone },
    Reveal,
    Confetti { burst: ConfettiBurst },
    /// One floating heart, rendered at a random horizontal position.
    Heart,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Countdown,
    Reveal,
    Done,
    Stopped,
}

/// Session-scoped driver for the countdown/reveal sequence.
#[derive(Debug, Clone)]
pub struct EffectsController {
    melody: Melody,
    hearts: bool,
    phase: Phase,
    count: u32,
    next_step_at: u64,
    reveal_at: u64,
    melody_cursor: usize,
    next_confetti_at: u64,
    next_heart_at: u64,
}

impl EffectsController {
    /// Build a controller for a card's raw template id. Unknown ids get the
    /// default template's music and no hearts.
    pub fn for_template(template_id: &str) -> Self {
        let hearts = catalog::find(template_id).is_some_and(|t| t.hearts);
        Self::new(melody(catalog::lookup(template_id).music), hearts)
    }

    pub fn new(melody: Melody, hearts: bool) -> Self {
        Self {
            melody,
            hearts,
            phase: Phase::Idle,
            count: COUNTDOWN_FROM,
            next_step_at: 0,
            reveal_at: 0,
            melody_cursor: 0,
            next_confetti_at: 0,
            next_heart_at: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Begin the countdown at `now_ms`. Restarts from the top if already
    /// running.
    pub fn start(&mut self, now_ms: u64) -> Vec<Effect> {
        self.phase = Phase::Countdown;
        self.count = COUNTDOWN_FROM;
        self.next_step_at = now_ms + COUNTDOWN_STEP_MS;
        self.melody_cursor = 0;
        vec![Effect::Count { value: self.count }]
    }

    pub fn replay(&mut self, now_ms: u64) -> Vec<Effect> {
        self.start(now_ms)
    }

    /// End the session. Later polls emit nothing.
    pub fn stop(&mut self) {
        self.phase = Phase::Stopped;
    }

    fn celebration_end(&self) -> u64 {
        self.reveal_at + CELEBRATION_MS
    }

    /// Everything due up to and including `now_ms`, in time order.
    pub fn poll(&mut self, now_ms: u64) -> Vec<Effect> {
        let mut due: Vec<(u64, Effect)> = Vec::new();

        while self.phase == Phase::Countdown && self.next_step_at <= now_ms {
            let at = self.next_step_at;
            due.push((at, Effect::Tone { tone: Tone::tick() }));
            self.count -= 1;
            due.push((at, Effect::Count { value: self.count }));
            self.next_step_at += COUNTDOWN_STEP_MS;
            if self.count == 0 {
                self.enter_reveal(at);
                due.push((at, Effect::Reveal));
            }
        }

        if self.phase == Phase::Reveal {
            self.poll_reveal(now_ms, &mut due);
        }

        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, effect)| effect).collect()
    }

    fn enter_reveal(&mut self, at: u64) {
        self.phase = Phase::Reveal;
        self.reveal_at = at;
        self.melody_cursor = 0;
        self.next_confetti_at = at + CONFETTI_INTERVAL_MS;
        self.next_heart_at = at + HEART_INTERVAL_MS;
    }

    fn poll_reveal(&mut self, now_ms: u64, due: &mut Vec<(u64, Effect)>) {
        let end = self.celebration_end();

        while let Some(&hz) = self.melody.notes.get(self.melody_cursor) {
            let at = self.reveal_at + self.melody_cursor as u64 * self.melody.spacing_ms;
            if at > now_ms {
                break;
            }
            let tone = Tone::new(hz, self.melody.note_secs, self.melody.waveform);
            due.push((at, Effect::Tone { tone }));
            self.melody_cursor += 1;
        }

        while self.next_confetti_at < end && self.next_confetti_at <= now_ms {
            let at = self.next_confetti_at;
            let left = (end - at) as f32;
            let particles = CONFETTI_MAX_PARTICLES * (left / CELEBRATION_MS as f32);
            for origin in CONFETTI_ORIGINS {
                due.push((
                    at,
                    Effect::Confetti {
                        burst: ConfettiBurst::new(particles, origin),
                    },
                ));
            }
            self.next_confetti_at += CONFETTI_INTERVAL_MS;
        }

        if self.hearts {
            while self.next_heart_at <= end && self.next_heart_at <= now_ms {
                due.push((self.next_heart_at, Effect::Heart));
                self.next_heart_at += HEART_INTERVAL_MS;
            }
        }

        let melody_done = self.melody_cursor >= self.melody.notes.len();
        if melody_done && now_ms >= end {
            self.phase = Phase::Done;
            due.push((now_ms.max(end), Effect::Finished));
        }
    }
}
