//! Text-to-speech bridge.
//!
//! The engine never talks to a speech engine directly.  A [`SpeechSink`]
//! is the platform collaborator; [`SpeechObserver`] adapts it to the
//! observer callbacks so that every alert raised while voice is enabled
//! interrupts whatever is being spoken and speaks the alert message.

use tracing::info;

use crate::{Alert, GuidanceObserver};

/// One request to speak.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// 1.0 is the engine's normal rate.
    pub rate: f32,
}

pub trait SpeechSink {
    /// Stop anything currently being spoken.
    fn cancel(&mut self);

    fn speak(&mut self, utterance: Utterance);
}

/// Speaks alert messages through `S`.
#[derive(Debug)]
pub struct SpeechObserver<S> {
    sink: S,
    rate: f32,
}

impl<S: SpeechSink> SpeechObserver<S> {
    pub fn new(sink: S, rate: f32) -> Self {
        Self { sink, rate }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: SpeechSink> GuidanceObserver for SpeechObserver<S> {
    fn on_alert(&mut self, alert: &Alert, voice_enabled: bool) {
        if !voice_enabled {
            return;
        }
        self.sink.cancel();
        self.sink.speak(Utterance { text: alert.message.clone(), rate: self.rate });
    }
}

/// A sink that logs utterances instead of speaking them.  Used by headless
/// replays.
#[derive(Debug, Default)]
pub struct TracingSpeech {
    spoken: u64,
}

impl TracingSpeech {
    pub fn spoken(&self) -> u64 {
        self.spoken
    }
}

impl SpeechSink for TracingSpeech {
    fn cancel(&mut self) {}

    fn speak(&mut self, utterance: Utterance) {
        self.spoken += 1;
        info!(rate = utterance.rate, "speak: {}", utterance.text);
    }
}
