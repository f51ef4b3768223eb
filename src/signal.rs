//! Ctrl-C handling
//!
//! While tasks run, SIGINT only raises a flag: the terminal delivers the same
//! signal to the running child, the engine sees the flag once the child
//! returns, and the caller prints the notice and exits. Outside of a run
//! (e.g. at the menu prompt) the handler exits immediately.

use setupkit::Interrupt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exit status after Ctrl-C (128 + SIGINT)
pub const EXIT_INTERRUPTED: i32 = 130;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static BUSY: AtomicBool = AtomicBool::new(false);

const NOTICE: &[u8] = b"\n\nInterrupted by user. Exiting.\n";

extern "C" fn on_sigint(_signum: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);

    if !BUSY.load(Ordering::SeqCst) {
        // Only async-signal-safe calls here
        unsafe {
            libc::write(libc::STDERR_FILENO, NOTICE.as_ptr().cast(), NOTICE.len());
            libc::_exit(EXIT_INTERRUPTED);
        }
    }
}

/// Install the SIGINT handler
pub fn install() {
    let handler: extern "C" fn(libc::c_int) = on_sigint;
    let previous = unsafe { libc::signal(libc::SIGINT, handler as libc::sighandler_t) };
    if previous == libc::SIG_ERR {
        log::warn!("could not install SIGINT handler");
    }
}

/// Engine view of the flag
pub fn interrupt() -> Interrupt {
    Interrupt::new(&INTERRUPTED)
}

/// Raise the flag without a signal (e.g. Ctrl-C read as a key by a prompt)
pub fn raise() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Marks a run in progress; Ctrl-C is deferred until it is dropped
pub struct Busy(());

impl Busy {
    pub fn enter() -> Self {
        BUSY.store(true, Ordering::SeqCst);
        Self(())
    }
}

impl Drop for Busy {
    fn drop(&mut self) {
        BUSY.store(false, Ordering::SeqCst);
    }
}
