//! Polyphonic engine played from a MIDI keyboard.

use audio_midi_shell::{AudioGenerator, AudioMidiShell};
use simple_logger::SimpleLogger;

use supersaw_dsp::params::PARAM_COUNT;
use supersaw_dsp::{EngineConfig, ParamId, SynthEngine};

const SAMPLE_RATE: u32 = 48000;
const BLOCK_SIZE: usize = 32;

/// Controller number mapped to parameter id 0.
const FIRST_CC: u8 = 21;

fn main() -> ! {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .unwrap();

    AudioMidiShell::run_forever(SAMPLE_RATE, BLOCK_SIZE, App::new());
}

#[derive(Debug)]
struct App {
    engine: SynthEngine,
}

impl App {
    pub fn new() -> Self {
        let config = EngineConfig {
            sample_rate: SAMPLE_RATE,
            input_channels: 2,
            output_channels: 2,
        };
        Self {
            engine: SynthEngine::new(&config).unwrap(),
        }
    }
}

impl AudioGenerator for App {
    fn init(&mut self, _block_size: usize) {
        self.engine.init();
    }

    fn process(&mut self, samples_left: &mut [f32], samples_right: &mut [f32]) {
        self.engine.render_stereo(samples_left, samples_right);
    }

    fn process_midi(&mut self, message: Vec<u8>) {
        match message[0] & 0xF0 {
            0x80 => {
                self.engine.note_off(message[1]);
                log::info!("Note off: {}", message[1]);
            }
            0x90 if message[2] == 0 => {
                self.engine.note_off(message[1]);
                log::info!("Note off: {}", message[1]);
            }
            0x90 => {
                let allocation = self.engine.note_on(message[1], message[2]);
                log::info!("Note on: {} (voice {})", message[1], allocation.index);
            }
            0xB0 => {
                let cc = message[1];
                if cc == 123 {
                    self.engine.all_notes_off();
                    log::info!("All notes off");
                    return;
                }
                if !(FIRST_CC..FIRST_CC + PARAM_COUNT as u8).contains(&cc) {
                    return;
                }
                let id = cc - FIRST_CC;
                if let Ok(param) = ParamId::try_from(id) {
                    let (min, max) = param.range();
                    let value = min + (message[2] as i32 * (max - min)) / 127;
                    self.engine.set_param(id, value);
                    log::info!("{:?}: {}", param, self.engine.get_param(id));
                }
            }
            0xE0 => {
                let bend = (message[2] as u16) << 7 | message[1] as u16;
                self.engine.pitch_bend(bend);
            }
            _ => {}
        }
    }
}
