//! Background reader thread (polling mode)

use std::io::{self, ErrorKind, Read};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::InputSource;
use super::decoder::{KeyAction, KeyDecoder};
use super::signal::SharedSignal;

/// Decode `reader` into `signal` on a dedicated thread.
///
/// The thread may block in `read` indefinitely. It exits on EOF, on a read
/// error, or at its next read once the quit flag is up. Nobody has to join
/// it.
pub fn spawn_reader<R>(mut reader: R, signal: Arc<SharedSignal>) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("input-reader".into())
        .spawn(move || {
            let mut decoder = KeyDecoder::new();
            let mut buf = [0u8; 32];
            while !signal.quit_requested() {
                let n = match reader.read(&mut buf) {
                    Ok(0) => {
                        log::debug!("input closed");
                        break;
                    }
                    Ok(n) => n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => {
                        log::debug!("input read failed: {e}");
                        break;
                    }
                };
                for action in decoder.feed_all(&buf[..n]) {
                    match action {
                        KeyAction::Move(dir) => signal.set_direction(dir),
                        KeyAction::Quit => signal.request_quit(),
                    }
                }
            }
        })
}
