use crate::carpet::generate::validate;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{CarpetError, CarpetResult};
use crate::render::raster::{CarpetColors, CellScale, RenderOpts};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Container the animation is encoded into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// H.264 MP4 through the system `ffmpeg`.
    #[default]
    #[serde(alias = "mp4")]
    Video,
    /// Looping animated GIF.
    #[serde(alias = "animated-image")]
    Gif,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Video => "mp4",
            Self::Gif => "gif",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CarpetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp4" | "video" => Ok(Self::Video),
            "gif" | "animated-image" => Ok(Self::Gif),
            other => Err(CarpetError::parameter(
                "format",
                format!("unsupported output format \"{other}\" (expected mp4 or gif)"),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Everything one animation run needs. Immutable for the duration of the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationParams {
    /// Carpet edge in cells, a power of 3.
    pub size: u32,
    /// Highest recursion order shown.
    pub depth: u32,
    /// Interpolation frames rendered per order transition.
    pub frames_per_order: u32,
    pub fps: Fps,
    /// Destination file. The format's extension is appended when it has none.
    pub output: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub colors: CarpetColors,
    /// Output pixel size; defaults to one pixel per cell.
    #[serde(default)]
    pub resolution: Option<Canvas>,
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
    #[serde(default)]
    pub render: RenderOpts,
}

fn default_overwrite() -> bool {
    true
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            size: 729,
            depth: 6,
            frames_per_order: 15,
            fps: Fps { num: 10, den: 1 },
            output: PathBuf::from("sierpinski_carpet_animation"),
            format: OutputFormat::Video,
            colors: CarpetColors::default(),
            resolution: None,
            overwrite: true,
            render: RenderOpts::default(),
        }
    }
}

impl AnimationParams {
    /// Load parameters from a JSON file. Missing optional fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> CarpetResult<Self> {
        use anyhow::Context as _;
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read params '{}'", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> CarpetResult<Self> {
        serde_json::from_str(text).map_err(|e| CarpetError::parameter("params", e.to_string()))
    }

    pub fn to_json_pretty(&self) -> CarpetResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CarpetError::Other(e.into()))
    }

    /// Output pixel size.
    pub fn canvas(&self) -> Canvas {
        self.resolution.unwrap_or(Canvas::square(self.size))
    }

    /// Destination path with the format's extension filled in.
    pub fn output_path(&self) -> PathBuf {
        if self.output.extension().is_some() {
            self.output.clone()
        } else {
            self.output.with_extension(self.format.extension())
        }
    }

    /// Check every field before any rendering work starts.
    pub fn validate(&self) -> CarpetResult<()> {
        if self.depth < 1 {
            return Err(CarpetError::parameter("depth", "must be >= 1"));
        }
        if self.frames_per_order < 1 {
            return Err(CarpetError::parameter("frames_per_order", "must be >= 1"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.output.as_os_str().is_empty() {
            return Err(CarpetError::parameter("output", "must not be empty"));
        }
        validate(self.size, self.depth)?;
        CellScale::for_canvas(self.size, self.canvas())?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/params.rs"]
mod tests;
