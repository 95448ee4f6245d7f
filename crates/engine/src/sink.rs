//! Frame sinks - the output side of the engine
//!
//! The engine hands every encoded frame to a [`FrameSink`] together with a
//! read-only view of its state. Delivery is fire-and-forget: a sink may fail
//! however it likes, but nothing it does feeds back into the engine.

use std::io::Write;

use tokio::sync::mpsc;

use crate::board::BoardState;
use crate::frame::WireFrame;

pub trait FrameSink {
    fn send(&mut self, frame: &WireFrame, state: &BoardState);
}

impl<F> FrameSink for F
where
    F: FnMut(&WireFrame, &BoardState),
{
    fn send(&mut self, frame: &WireFrame, state: &BoardState) {
        self(frame, state)
    }
}

/// Writes raw 32-byte frames to any writer (serial device, file, pipe).
///
/// IO errors are logged and counted, never propagated.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    failures: u64,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failures: 0,
        }
    }

    /// Frames that could not be written
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for WriterSink<W> {
    fn send(&mut self, frame: &WireFrame, _state: &BoardState) {
        let result = self
            .writer
            .write_all(frame.as_bytes())
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            self.failures += 1;
            // Only the first failure is loud; a dead port would flood the log.
            if self.failures == 1 {
                log::warn!("frame transport failed: {}", e);
            } else {
                log::trace!("frame transport failed again ({}): {}", self.failures, e);
            }
        }
    }
}

/// Forwards frames to an async transport task over an unbounded channel.
///
/// A closed receiver just means nobody is listening anymore.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<WireFrame>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<WireFrame>) -> Self {
        Self { tx }
    }

    /// Sink plus the receiving end for the transport task
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<WireFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl FrameSink for ChannelSink {
    fn send(&mut self, frame: &WireFrame, _state: &BoardState) {
        if self.tx.send(*frame).is_err() {
            log::trace!("frame channel closed, dropping frame");
        }
    }
}
