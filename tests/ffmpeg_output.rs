#[cfg(feature = "media-ffmpeg")]
mod ffmpeg_output {
    use std::path::PathBuf;
    use std::process::Command;

    use sierpinski_anim::{
        AnimationParams, Fps, OutputFormat, RunHooks, is_ffmpeg_on_path, render_to_file,
    };

    fn ffprobe_frame_count(path: &std::path::Path) -> Option<u64> {
        let out = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-count_frames",
                "-show_entries",
                "stream=nb_read_frames",
                "-of",
                "default=nokey=1:noprint_wrappers=1",
            ])
            .arg(path)
            .output()
            .ok()?;
        if !out.status.success() {
            return None;
        }
        String::from_utf8_lossy(&out.stdout).trim().parse().ok()
    }

    #[test]
    fn mp4_run_pads_odd_sizes_and_keeps_every_frame() {
        if !is_ffmpeg_on_path() {
            eprintln!("skipping: ffmpeg not on PATH");
            return;
        }
        let dir = PathBuf::from("target").join("ffmpeg_output");
        std::fs::create_dir_all(&dir).unwrap();
        let _ = std::fs::remove_file(dir.join("carpet.mp4"));

        let params = AnimationParams {
            size: 27,
            depth: 2,
            frames_per_order: 4,
            fps: Fps::new(10, 1).unwrap(),
            output: dir.join("carpet"),
            format: OutputFormat::Video,
            ..AnimationParams::default()
        };
        let (outcome, path) = render_to_file(&params, RunHooks::none()).unwrap();
        assert_eq!(path, dir.join("carpet.mp4"));
        assert_eq!(outcome.stats().frames_delivered, 9);
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        assert!(!dir.join(".carpet.mp4.partial").exists());

        if let Some(frames) = ffprobe_frame_count(&path) {
            assert_eq!(frames, 9);
        }
    }
}
