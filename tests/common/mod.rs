#![allow(dead_code)]

use nanobasic::host::Host;
use nanobasic::lang::Int;
use nanobasic::mach::Runtime;
use std::collections::VecDeque;

/// A scripted console for driving the REPL: queued input, captured
/// output, a fast deterministic tick, and an in-memory EEPROM image
/// that can be carried between runtimes. When the input runs dry it
/// answers the break byte, so no test can wait forever.
pub struct TestHost {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
    pub eeprom: Vec<u8>,
    tick: Int,
    starved: u32,
    seed: u64,
}

impl TestHost {
    pub fn new(script: &str) -> TestHost {
        TestHost {
            input: script.bytes().collect(),
            output: Vec::new(),
            eeprom: vec![0xff; 1024],
            tick: 0,
            starved: 0,
            seed: 1,
        }
    }

    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Host for TestHost {
    fn put_char(&mut self, byte: u8) {
        self.output.push(byte);
    }

    fn get_char(&mut self) -> Option<u8> {
        if let Some(b) = self.input.pop_front() {
            return Some(b);
        }
        self.starved += 1;
        if self.starved > 10_000 {
            self.starved = 0;
            Some(0x03)
        } else {
            None
        }
    }

    fn tick_ms(&mut self) -> Int {
        self.tick = self.tick.wrapping_add(50);
        self.tick
    }

    fn random_seed(&mut self, seed: Int) {
        self.seed = seed as u64 | 1;
    }

    fn random(&mut self, bound: Int) -> Int {
        self.seed = self
            .seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.seed >> 33) % bound as u64) as Int
    }

    fn gpio_write(&mut self, pin: Int, _value: Int) -> Option<()> {
        if (0..=19).contains(&pin) {
            Some(())
        } else {
            None
        }
    }

    fn gpio_read(&mut self, pin: Int) -> Option<Int> {
        if (0..=19).contains(&pin) {
            Some(0)
        } else {
            None
        }
    }

    fn adc_read(&mut self, channel: Int) -> Option<Int> {
        if (0..=5).contains(&channel) {
            Some(512)
        } else {
            None
        }
    }

    fn pwm_set(&mut self, pin: Int, _value: Int) -> Option<()> {
        if (0..=19).contains(&pin) {
            Some(())
        } else {
            None
        }
    }

    fn eep_erase(&mut self, addr: u16, len: u16) {
        let addr = usize::from(addr);
        let end = (addr + usize::from(len)).min(self.eeprom.len());
        for b in &mut self.eeprom[addr.min(end)..end] {
            *b = 0xff;
        }
    }

    fn eep_write(&mut self, addr: u16, data: &[u8]) {
        let addr = usize::from(addr);
        for (i, b) in data.iter().enumerate() {
            if let Some(slot) = self.eeprom.get_mut(addr + i) {
                *slot = *b;
            }
        }
    }

    fn eep_read(&mut self, addr: u16, data: &mut [u8]) {
        let addr = usize::from(addr);
        for (i, b) in data.iter_mut().enumerate() {
            *b = *self.eeprom.get(addr + i).unwrap_or(&0xff);
        }
    }
}

/// Runs a raw script (CR-terminated lines) and returns the transcript.
pub fn run_script(script: &str) -> String {
    drive(Runtime::new(TestHost::new(script)))
}

/// Steps a runtime until its scripted input is fully consumed.
pub fn drive(mut runtime: Runtime<TestHost>) -> String {
    while !runtime.host().input.is_empty() || runtime.pending_input() {
        runtime.step();
    }
    runtime.into_host().output_string()
}

/// Runs console lines and returns the whole transcript.
pub fn session(lines: &[&str]) -> String {
    let mut script = String::new();
    for line in lines {
        script.push_str(line);
        script.push('\r');
    }
    run_script(&script)
}

/// What the machine printed after echoing the last input line.
pub fn replies(lines: &[&str]) -> String {
    let full = session(lines);
    let last_echo = format!("{}\r\n", lines.last().unwrap());
    match full.rfind(&last_echo) {
        Some(at) => full[at + last_echo.len()..].to_string(),
        None => full,
    }
}
