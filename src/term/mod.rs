/*!
## Terminal module

The PC port of NanoBASIC: a raw-key terminal console, Ctrl-C delivered
in band as the break byte, and a small file standing in for the EEPROM.

*/

use crate::host::Host;
use crate::lang::Int;
use crate::mach::Runtime;
use ansi_term::Style;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const EEPROM_FILE: &str = "eeprom.bin";
const EEPROM_SIZE: usize = 1024;

pub fn main() {
    if std::env::args().count() > 2 {
        println!("Usage: nanobasic [EEPROM-FILE]");
        return;
    }
    let eeprom = std::env::args()
        .nth(1)
        .unwrap_or_else(|| EEPROM_FILE.to_string());

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    let terminal = match mortal::Terminal::new() {
        Ok(terminal) => terminal,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            return;
        }
    };

    let host = TermHost::new(terminal, eeprom.into(), interrupted);
    let mut runtime = Runtime::new(host);
    runtime.init();
    loop {
        runtime.step();
        if runtime.host().reset_requested() {
            // The soft-reset hook: tear the machine down and boot again
            // on the same console.
            let host = runtime.into_host().cleared();
            runtime = Runtime::new(host);
            runtime.init();
        }
    }
}

pub struct TermHost {
    terminal: mortal::Terminal,
    pending: VecDeque<u8>,
    interrupted: Arc<AtomicBool>,
    start: Instant,
    rng: StdRng,
    eeprom_path: PathBuf,
    reset: bool,
}

impl TermHost {
    fn new(
        terminal: mortal::Terminal,
        eeprom_path: PathBuf,
        interrupted: Arc<AtomicBool>,
    ) -> TermHost {
        TermHost {
            terminal,
            pending: VecDeque::new(),
            interrupted,
            start: Instant::now(),
            rng: StdRng::from_entropy(),
            eeprom_path,
            reset: false,
        }
    }

    pub fn reset_requested(&self) -> bool {
        self.reset
    }

    fn cleared(mut self) -> TermHost {
        self.reset = false;
        self.pending.clear();
        self
    }

    fn pump_key(&mut self) {
        let event = match self
            .terminal
            .read_event(Some(Duration::from_millis(1)))
        {
            Ok(Some(mortal::terminal::Event::Key(key))) => key,
            _ => return,
        };
        use mortal::terminal::Key::*;
        match event {
            Backspace => self.pending.push_back(0x08),
            Enter => self.pending.push_back(0x0d),
            Escape => self.pending.push_back(0x1b),
            Tab => self.pending.push_back(0x09),
            Char(c) => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    self.pending.push_back(b);
                }
            }
            Ctrl('c') => self.pending.push_back(0x03),
            Ctrl('d') => std::process::exit(0),
            _ => {}
        }
    }

    fn eeprom_image(&self) -> Vec<u8> {
        match fs::read(&self.eeprom_path) {
            Ok(mut image) => {
                image.resize(EEPROM_SIZE, 0xff);
                image
            }
            Err(_) => vec![0xff; EEPROM_SIZE],
        }
    }

    fn eeprom_commit(&mut self, image: &[u8]) {
        if let Err(error) = fs::write(&self.eeprom_path, image) {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
        }
    }

    fn eeprom_splice(&mut self, addr: u16, data: &[u8]) {
        let addr = usize::from(addr);
        if addr >= EEPROM_SIZE {
            return;
        }
        let len = data.len().min(EEPROM_SIZE - addr);
        let mut image = self.eeprom_image();
        image[addr..addr + len].copy_from_slice(&data[..len]);
        self.eeprom_commit(&image);
    }
}

impl Host for TermHost {
    fn put_char(&mut self, byte: u8) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = out.write_all(&[byte]);
        let _ = out.flush();
    }

    fn get_char(&mut self) -> Option<u8> {
        if self.interrupted.swap(false, Ordering::SeqCst) {
            return Some(0x03);
        }
        if let Some(b) = self.pending.pop_front() {
            return Some(b);
        }
        self.pump_key();
        self.pending.pop_front()
    }

    fn tick_ms(&mut self) -> Int {
        self.start.elapsed().as_millis() as Int
    }

    fn random_seed(&mut self, seed: Int) {
        self.rng = if seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(seed as u64)
        };
    }

    fn random(&mut self, bound: Int) -> Int {
        self.rng.gen_range(0..bound)
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
            Some((self.rng.next_u32() & 0x3ff) as Int)
        } else {
            None
        }
    }

    fn pwm_set(&mut self, pin: Int, _value: Int) -> Option<()> {
        if matches!(pin, 3 | 5 | 6 | 9 | 10 | 11) {
            Some(())
        } else {
            None
        }
    }

    fn eep_erase(&mut self, addr: u16, len: u16) {
        let blank = vec![0xff; usize::from(len)];
        self.eeprom_splice(addr, &blank);
    }

    fn eep_write(&mut self, addr: u16, data: &[u8]) {
        self.eeprom_splice(addr, data);
    }

    fn eep_read(&mut self, addr: u16, data: &mut [u8]) {
        let image = self.eeprom_image();
        let addr = usize::from(addr);
        for (i, b) in data.iter_mut().enumerate() {
            *b = *image.get(addr + i).unwrap_or(&0xff);
        }
    }

    fn reset(&mut self) {
        self.reset = true;
    }
}
