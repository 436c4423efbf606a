//! Animated construction of the Sierpinski carpet.
//!
//! The crate has two layers:
//!
//! - [`generate`] builds the occupancy [`Grid`] of a carpet at one recursion order.
//! - [`generate_animation`] walks the orders `0..=depth`, renders frames that fade each newly
//!   removed block from the filled colour to the removed colour, and streams them into a
//!   [`FrameSink`] (MP4 through `ffmpeg`, looping GIF, or your own).
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod carpet;

pub mod animation;
pub mod encode;
pub mod render;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgb8};
pub use crate::foundation::error::{CarpetError, CarpetResult};

pub use crate::carpet::generate::{
    expected_filled_count, generate, generate_recursive, is_filled, max_order, removal_order,
};
pub use crate::carpet::grid::Grid;

pub use crate::animation::params::{AnimationParams, OutputFormat};
pub use crate::animation::progress::{
    CancelCheck, CancelToken, Phase, Progress, ProgressObserver, RunHooks,
};
pub use crate::animation::run::{
    RunOutcome, RunStats, create_sink, generate_animation, render_to_file,
};
pub use crate::animation::sequence::{
    FrameSequence, SequencedFrame, render_frame_at, render_order,
};
pub use crate::animation::timeline::{FrameSlot, Timeline};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::output::StagedOutput;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::raster::{
    Blend, CarpetColors, CellScale, RenderOpts, rasterize_grid, rasterize_transition,
};
