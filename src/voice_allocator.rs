//! Fixed pool of voices with oldest-voice stealing.

use crate::voice::Voice;
use crate::MAX_VOICES;

/// Result of a note-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Index of the voice playing the new note.
    pub index: usize,

    /// Note that was cut off to make room, if a voice had to be stolen.
    pub stolen_note: Option<u8>,
}

#[derive(Debug, Default, Clone)]
pub struct VoiceAllocator {
    voices: [Voice; MAX_VOICES],
    next_age: u64,
    steal_count: u32,
}

impl VoiceAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        for voice in self.voices.iter_mut() {
            voice.init();
        }
        self.next_age = 0;
        self.steal_count = 0;
    }

    /// Claims the first free voice for `note`, or steals the voice that was
    /// triggered longest ago when all are busy.
    pub fn note_on(&mut self, note: u8, velocity: u8) -> Allocation {
        let (index, stolen_note) = match self.voices.iter().position(|voice| !voice.is_active()) {
            Some(index) => (index, None),
            None => {
                let index = self.oldest_voice();
                self.steal_count = self.steal_count.wrapping_add(1);
                (index, Some(self.voices[index].note()))
            }
        };

        let age = self.next_age;
        self.next_age += 1;
        self.voices[index].clear().activate(note, velocity, age);

        Allocation { index, stolen_note }
    }

    /// Releases every active voice playing `note`.
    pub fn note_off(&mut self, note: u8) {
        for voice in self
            .voices
            .iter_mut()
            .filter(|voice| voice.is_active() && voice.note() == note)
        {
            voice.release();
        }
    }

    /// Silences all voices immediately.
    pub fn all_notes_off(&mut self) {
        for voice in self.voices.iter_mut() {
            voice.kill();
        }
    }

    pub fn reset_phases(&mut self) {
        for voice in self.voices.iter_mut() {
            voice.reset_phases();
        }
    }

    fn oldest_voice(&self) -> usize {
        self.voices
            .iter()
            .enumerate()
            .min_by_key(|(_, voice)| voice.age())
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    #[inline]
    pub fn voices(&self) -> &[Voice; MAX_VOICES] {
        &self.voices
    }

    #[inline]
    pub fn voices_mut(&mut self) -> &mut [Voice; MAX_VOICES] {
        &mut self.voices
    }

    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|voice| voice.is_active()).count()
    }

    /// Number of voices stolen since initialization.
    #[inline]
    pub fn steal_count(&self) -> u32 {
        self.steal_count
    }
}
