use crate::encode::output::StagedOutput;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{CarpetError, CarpetResult};
use crate::render::frame::FrameRGBA;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::path::PathBuf;

const GIF_TRAILER: u8 = 0x3B;

/// Options for [`GifSink`] output.
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Quantizer speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl GifSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            speed: 10,
        }
    }
}

/// Looping animated GIF sink built on `image`'s GIF encoder.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<File>>,
    output: Option<StagedOutput>,
    delay: Option<Delay>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            output: None,
            delay: None,
            cfg: None,
            last_idx: None,
        }
    }
}

/// Display time of one frame at `fps`.
pub(crate) fn frame_delay(fps: Fps) -> Delay {
    Delay::from_numer_denom_ms(fps.den.saturating_mul(1000), fps.num)
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> CarpetResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(CarpetError::encoding(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(CarpetError::encoding(format!(
                "gif frames are limited to 65535x65535, got {}x{}",
                cfg.width, cfg.height
            )));
        }

        let output = StagedOutput::new(&self.opts.out_path, self.opts.overwrite)?;
        let file = File::create(output.staging_path()).map_err(|e| {
            CarpetError::encoding(format!(
                "failed to create '{}': {e}",
                output.staging_path().display()
            ))
        })?;
        let mut encoder = GifEncoder::new_with_speed(file, self.opts.speed.clamp(1, 30));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| CarpetError::encoding(format!("failed to set gif repeat: {e}")))?;

        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            staging = %output.staging_path().display(),
            "gif encoder started"
        );
        self.encoder = Some(encoder);
        self.output = Some(output);
        self.delay = Some(frame_delay(cfg.fps));
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CarpetResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| CarpetError::encoding("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(CarpetError::encoding(
                "gif sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(CarpetError::encoding(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let image = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
            .ok_or_else(|| CarpetError::encoding("frame.data size mismatch with width*height*4"))?;
        let delay = self
            .delay
            .ok_or_else(|| CarpetError::encoding("gif sink not started"))?;

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(CarpetError::encoding("gif sink is already finalized"));
        };
        encoder
            .encode_frame(Frame::from_parts(image, 0, 0, delay))
            .map_err(|e| CarpetError::encoding(format!("failed to encode gif frame: {e}")))?;
        Ok(())
    }

    fn end(&mut self) -> CarpetResult<()> {
        if self.last_idx.is_none() {
            self.abort();
            return Err(CarpetError::encoding("gif sink received no frames"));
        }
        // Dropping the encoder writes the GIF trailer.
        drop(
            self.encoder
                .take()
                .ok_or_else(|| CarpetError::encoding("gif sink not started"))?,
        );
        self.cfg = None;
        let output = self
            .output
            .take()
            .ok_or_else(|| CarpetError::encoding("gif sink has no staged output"))?;

        let last = last_byte(output.staging_path()).map_err(|e| {
            CarpetError::encoding(format!(
                "failed to read back '{}': {e}",
                output.staging_path().display()
            ))
        })?;
        if last != GIF_TRAILER {
            return Err(CarpetError::encoding("gif output is missing its trailer"));
        }
        output.commit()?;
        Ok(())
    }

    fn abort(&mut self) {
        drop(self.encoder.take());
        self.cfg = None;
        if let Some(output) = self.output.take() {
            output.discard();
        }
    }
}

fn last_byte(path: &std::path::Path) -> std::io::Result<u8> {
    use std::io::{Read as _, Seek as _, SeekFrom};
    let mut f = File::open(path)?;
    f.seek(SeekFrom::End(-1))?;
    let mut b = [0u8; 1];
    f.read_exact(&mut b)?;
    Ok(b[0])
}
