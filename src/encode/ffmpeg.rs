use crate::encode::output::StagedOutput;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{CarpetError, CarpetResult};
use crate::render::frame::FrameRGBA;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Target video bitrate in kbit/s. `None` leaves rate control to `libx264` defaults.
    pub bitrate_kbps: Option<u32>,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bitrate_kbps: Some(1800),
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw RGBA frames to its stdin.
///
/// The video is written to a staged file and moved onto `out_path` when `ffmpeg` exits cleanly.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    output: Option<StagedOutput>,

    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            output: None,
            cfg: None,
            last_idx: None,
        }
    }

    fn join_stderr(&mut self) -> CarpetResult<Vec<u8>> {
        match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| CarpetError::encoding("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| CarpetError::encoding(format!("ffmpeg stderr read failed: {e}"))),
            None => Ok(Vec::new()),
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> CarpetResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(CarpetError::encoding(
                "ffmpeg sink width/height must be non-zero",
            ));
        }

        if !is_ffmpeg_on_path() {
            return Err(CarpetError::encoding(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let output = StagedOutput::new(&self.opts.out_path, self.opts.overwrite)?;

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        // The staged path is ours, so it is always safe to overwrite.
        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0"]);

        // yuv420p needs even dimensions; pad odd carpets (e.g. 729) by one pixel.
        cmd.args([
            "-an",
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
        ]);
        if let Some(kbps) = self.opts.bitrate_kbps {
            cmd.args(["-b:v", &format!("{kbps}k")]);
        }
        cmd.args(["-movflags", "+faststart", "-f", "mp4"]);
        cmd.arg(output.staging_path());

        let mut child = cmd.spawn().map_err(|e| {
            CarpetError::encoding(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| CarpetError::encoding("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| CarpetError::encoding("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            staging = %output.staging_path().display(),
            "ffmpeg started"
        );
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.output = Some(output);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CarpetResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| CarpetError::encoding("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(CarpetError::encoding(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(CarpetError::encoding(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != FrameRGBA::byte_len_for(cfg.width, cfg.height) {
            return Err(CarpetError::encoding(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(CarpetError::encoding("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&frame.data).map_err(|e| {
            CarpetError::encoding(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> CarpetResult<()> {
        if self.child.is_some() && self.last_idx.is_none() {
            self.abort();
            return Err(CarpetError::encoding("ffmpeg sink received no frames"));
        }
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| CarpetError::encoding("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            CarpetError::encoding(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = self.join_stderr()?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(CarpetError::encoding(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        self.cfg = None;
        let output = self
            .output
            .take()
            .ok_or_else(|| CarpetError::encoding("ffmpeg sink has no staged output"))?;
        output.commit()?;
        Ok(())
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        let _ = self.join_stderr();
        self.cfg = None;
        if let Some(output) = self.output.take() {
            output.discard();
        }
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, `-r` before `-i` sets the input framerate; accept rational `num/den`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_before_begin_is_an_encoding_error() {
        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unit/never.mp4"));
        let frame = FrameRGBA::solid(3, 3, [0, 0, 0, 255]);
        let err = sink.push_frame(FrameIndex(0), &frame).unwrap_err();
        assert!(matches!(err, CarpetError::Encoding(_)));
        assert!(matches!(sink.end(), Err(CarpetError::Encoding(_))));
    }

    #[test]
    fn default_opts_follow_the_classic_bitrate() {
        let opts = FfmpegSinkOpts::new("out.mp4");
        assert!(opts.overwrite);
        assert_eq!(opts.bitrate_kbps, Some(1800));
    }
}
