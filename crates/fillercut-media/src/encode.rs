//! Apply a cut plan with a single re-encode.
//!
//! The keep intervals become `select`/`aselect` expressions over the original
//! timeline; `setpts`/`asetpts` close the timestamp gaps the dropped samples
//! leave behind. One filter graph, one encode, no intermediate files.

use std::path::Path;

use tracing::{debug, info};

use fillercut_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::cuts::{build_select_expr, CutPlan};
use crate::error::MediaResult;
use crate::progress::{CutProgress, FfmpegProgress};

/// Build the filter graph that keeps only the plan's keep intervals.
fn build_filter_graph(plan: &CutPlan) -> String {
    let expr = build_select_expr(&plan.keep);
    format!(
        "[0:v]select='{expr}',setpts=N/FRAME_RATE/TB[v];\
         [0:a]aselect='{expr}',asetpts=N/SR/TB[a]"
    )
}

/// Re-encode `input` into `output` with the plan's remove intervals excised.
///
/// `progress_callback` receives the original-timeline position from FFmpeg
/// together with a mapper that translates it into kept output time; the
/// encode itself still consumes the whole original timeline.
pub async fn apply_cut_plan<F>(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    plan: &CutPlan,
    encoding: &EncodingConfig,
    progress_callback: F,
) -> MediaResult<()>
where
    F: Fn(FfmpegProgress, &CutProgress) + Send + 'static,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let filter = build_filter_graph(plan);
    debug!(
        input = %input.display(),
        removals = plan.remove.len(),
        kept_s = format!("{:.3}", plan.kept_duration()),
        "Applying cut plan"
    );

    let cmd = FfmpegCommand::new(input, output)
        .filter_complex(filter)
        .output_args(["-map", "[v]", "-map", "[a]"])
        .output_args(encoding.to_ffmpeg_args());

    let mapper = CutProgress::new(&plan.keep);
    FfmpegRunner::new()
        .run_with_progress(&cmd, move |progress| {
            progress_callback(progress, &mapper);
        })
        .await?;

    info!(
        output = %output.display(),
        removed_s = format!("{:.3}", plan.removed_duration()),
        "Cut encode complete"
    );

    Ok(())
}
