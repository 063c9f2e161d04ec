/*!
## Host module

The seam between the interpreter core and whatever it runs on. A port
supplies character I/O, a millisecond tick, a random source, pin
services, a small block store, and a soft-reset hook; the core never
touches hardware directly.

*/

use crate::lang::Int;

/// Services the machine asks of its platform.
///
/// Pin services default to "not wired", which the core reports as a
/// `Parameter` error. The block store defaults to reading blank (0xFF)
/// and dropping writes, so SAVE and LOAD degrade to `PG empty` on hosts
/// without storage.
pub trait Host {
    /// Writes one byte to the console.
    fn put_char(&mut self, byte: u8);

    /// Polls the console without blocking; `None` means no input ready.
    fn get_char(&mut self) -> Option<u8>;

    /// Monotonic milliseconds; wraps at the integer width.
    fn tick_ms(&mut self) -> Int;

    /// Seeds the random source; zero asks for an arbitrary seed.
    fn random_seed(&mut self, seed: Int);

    /// A value in `0..bound`; the core only calls this with `bound > 0`.
    fn random(&mut self, bound: Int) -> Int;

    fn gpio_write(&mut self, _pin: Int, _value: Int) -> Option<()> {
        None
    }

    fn gpio_read(&mut self, _pin: Int) -> Option<Int> {
        None
    }

    fn adc_read(&mut self, _channel: Int) -> Option<Int> {
        None
    }

    fn pwm_set(&mut self, _pin: Int, _value: Int) -> Option<()> {
        None
    }

    fn eep_erase(&mut self, _addr: u16, _len: u16) {}

    fn eep_write(&mut self, _addr: u16, _data: &[u8]) {}

    fn eep_read(&mut self, _addr: u16, data: &mut [u8]) {
        for b in data {
            *b = 0xff;
        }
    }

    /// Soft reset. A real target never returns from this; a hosted build
    /// may, and the core then winds the program down.
    fn reset(&mut self) {}
}
