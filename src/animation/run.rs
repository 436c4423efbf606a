use crate::animation::params::{AnimationParams, OutputFormat};
use crate::animation::progress::{Phase, Progress, RunHooks};
use crate::animation::sequence::FrameSequence;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::sink::FrameSink;
use crate::foundation::error::{CarpetError, CarpetResult};
use std::path::PathBuf;

/// Per-run statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames the full animation has.
    pub frames_total: u64,
    /// Frames pushed to the sink.
    pub frames_delivered: u64,
    /// Most frame buffers resident at the same time.
    pub peak_frames_resident: usize,
}

/// How a run that did not fail ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunStats),
    /// The cancel check fired at a frame boundary. The sink was still closed with `end`.
    Cancelled(RunStats),
}

impl RunOutcome {
    pub fn stats(&self) -> RunStats {
        match self {
            Self::Completed(s) | Self::Cancelled(s) => *s,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Render the animation described by `params` and stream it into `sink`.
///
/// Parameters are validated before the sink sees any call. Frames reach the sink in strictly
/// increasing index order, one at a time; after each delivery the progress observer runs, then
/// the cancel check is polled. Any error aborts the sink.
///
/// A cancelled run closes the sink with `end`, keeping the frames delivered so far. A run
/// cancelled before its first frame aborts the sink instead and still returns
/// [`RunOutcome::Cancelled`].
///
/// [`Phase::Done`] is reported after the sink has finalized its output. An observer error at that
/// point is returned as [`CarpetError::Callback`], but the output is already in place.
#[tracing::instrument(
    skip_all,
    fields(
        size = params.size,
        depth = params.depth,
        frames_per_order = params.frames_per_order
    )
)]
pub fn generate_animation(
    params: &AnimationParams,
    sink: &mut dyn FrameSink,
    mut hooks: RunHooks<'_>,
) -> CarpetResult<RunOutcome> {
    let mut seq = FrameSequence::new(params)?;
    let cfg = seq.sink_config();

    if let Err(e) = sink.begin(cfg) {
        sink.abort();
        return Err(e);
    }

    let streamed = stream_frames(&mut seq, sink, &mut hooks);
    let outcome = match streamed {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::debug!(error = %e, "run failed; aborting sink");
            sink.abort();
            return Err(e);
        }
    };

    // Nothing was delivered, so there is nothing playable to finalize.
    if outcome.is_cancelled() && outcome.stats().frames_delivered == 0 {
        tracing::debug!("run cancelled before the first frame; discarding output");
        sink.abort();
        return Ok(outcome);
    }

    if !outcome.is_cancelled()
        && let Err(e) = notify_phase(&mut hooks, Phase::Finalizing)
    {
        sink.abort();
        return Err(e);
    }
    if let Err(e) = sink.end() {
        sink.abort();
        return Err(e);
    }
    if !outcome.is_cancelled() {
        notify_phase(&mut hooks, Phase::Done)?;
    }

    let stats = outcome.stats();
    tracing::debug!(
        delivered = stats.frames_delivered,
        total = stats.frames_total,
        cancelled = outcome.is_cancelled(),
        "run finished"
    );
    Ok(outcome)
}

fn stream_frames(
    seq: &mut FrameSequence,
    sink: &mut dyn FrameSink,
    hooks: &mut RunHooks<'_>,
) -> CarpetResult<RunOutcome> {
    let total = seq.total_frames();
    let mut stats = RunStats {
        frames_total: total,
        ..RunStats::default()
    };

    notify_phase(
        hooks,
        Phase::Rendering {
            total_frames: total,
        },
    )?;

    loop {
        if hooks.is_cancelled() {
            stats.peak_frames_resident = seq.peak_frames_resident();
            tracing::debug!(delivered = stats.frames_delivered, "run cancelled");
            return Ok(RunOutcome::Cancelled(stats));
        }
        let Some(next) = seq.next() else {
            break;
        };
        let sequenced = next?;
        let order = sequenced.slot.order();

        let pushed = sink.push_frame(sequenced.index, &sequenced.frame);
        seq.recycle(sequenced.frame);
        pushed?;
        stats.frames_delivered += 1;

        if let Some(observer) = hooks.progress.as_deref_mut() {
            observer
                .on_progress(Progress {
                    completed: stats.frames_delivered,
                    total,
                    order,
                })
                .map_err(CarpetError::callback)?;
        }
    }

    stats.peak_frames_resident = seq.peak_frames_resident();
    Ok(RunOutcome::Completed(stats))
}

fn notify_phase(hooks: &mut RunHooks<'_>, phase: Phase) -> CarpetResult<()> {
    if let Some(observer) = hooks.progress.as_deref_mut() {
        observer.on_phase(phase).map_err(CarpetError::callback)?;
    }
    Ok(())
}

/// Build the file sink for `params.format`, writing to [`AnimationParams::output_path`].
pub fn create_sink(params: &AnimationParams) -> Box<dyn FrameSink> {
    let out_path = params.output_path();
    match params.format {
        OutputFormat::Video => Box::new(FfmpegSink::new(FfmpegSinkOpts {
            overwrite: params.overwrite,
            ..FfmpegSinkOpts::new(out_path)
        })),
        OutputFormat::Gif => Box::new(GifSink::new(GifSinkOpts {
            overwrite: params.overwrite,
            ..GifSinkOpts::new(out_path)
        })),
    }
}

/// Render `params` to its output file. Returns the outcome and the destination path, which is
/// left untouched when the run is cancelled before its first frame.
pub fn render_to_file(
    params: &AnimationParams,
    hooks: RunHooks<'_>,
) -> CarpetResult<(RunOutcome, PathBuf)> {
    params.validate()?;
    let mut sink = create_sink(params);
    let outcome = generate_animation(params, sink.as_mut(), hooks)?;
    Ok((outcome, params.output_path()))
}
