// Background soundtrack: decode once, loop forever on the default output device.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink, Source};

/// Decode `path` with whatever codecs rodio was built with.
fn load_source(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open audio file {}", path.display()))?;
    Decoder::new(BufReader::new(file))
        .with_context(|| format!("failed to decode audio file {}", path.display()))
}

/// Playing loop. Keeps the output stream alive; dropping it stops playback.
pub struct AudioLoop {
    _stream: OutputStream,
    sink: Sink,
    path: PathBuf,
}

impl AudioLoop {
    /// Start looping `path`. The file is decoded before the device is opened,
    /// so a bad file fails the same way with or without sound hardware.
    pub fn play(path: &Path) -> Result<Self> {
        let source = load_source(path)?;
        let (stream, handle) =
            OutputStream::try_default().context("no audio output device available")?;
        let sink = Sink::try_new(&handle).context("failed to open audio sink")?;
        sink.append(source.repeat_infinite());
        sink.play();
        tracing::info!(path = %path.display(), "audio loop started");
        Ok(Self {
            _stream: stream,
            sink,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for AudioLoop {
    fn drop(&mut self) {
        tracing::debug!(path = %self.path.display(), "stopping audio loop");
        self.sink.stop();
    }
}

/// Best-effort start: failures are logged and the caller carries on silently.
pub fn start_or_warn(path: &Path) -> Option<AudioLoop> {
    match AudioLoop::play(path) {
        Ok(audio) => Some(audio),
        Err(e) => {
            tracing::warn!("audio disabled: {e:#}");
            None
        }
    }
}
