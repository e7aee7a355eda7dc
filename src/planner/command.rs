//! Encoder command construction

use std::path::{Path, PathBuf};

use crate::domain::model::{EncodeCommand, EncodeSettings, OffsetSet};
use crate::planner::filter_graph::OUTPUT_LABEL;
use crate::utils::time::format_seconds_arg;

/// Builder for the composite ffmpeg invocation
pub struct CompositeCommandBuilder<'a> {
    program: String,
    clips: &'a [PathBuf],
    offsets: &'a OffsetSet,
    filter_graph: String,
    settings: EncodeSettings,
    duration: Option<f64>,
}

impl<'a> CompositeCommandBuilder<'a> {
    pub fn new(program: impl Into<String>, clips: &'a [PathBuf], offsets: &'a OffsetSet) -> Self {
        Self {
            program: program.into(),
            clips,
            offsets,
            filter_graph: String::new(),
            settings: EncodeSettings::default(),
            duration: None,
        }
    }

    pub fn with_filter_graph(mut self, graph: impl Into<String>) -> Self {
        self.filter_graph = graph.into();
        self
    }

    pub fn with_settings(mut self, settings: EncodeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Cap the output length in seconds
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn build(self, output: &Path) -> EncodeCommand {
        let mut args = vec!["-y".to_string()];

        // Seek before the input so skipped frames are never decoded
        for (index, clip) in self.clips.iter().enumerate() {
            let offset = self.offsets.get(index).unwrap_or(0.0);
            if offset > 0.0 {
                args.push("-ss".to_string());
                args.push(format_seconds_arg(offset));
            }
            args.push("-i".to_string());
            args.push(clip.to_string_lossy().into_owned());
        }

        args.push("-filter_complex".to_string());
        args.push(self.filter_graph);

        let s = &self.settings;
        let video_map = format!("[{OUTPUT_LABEL}]");
        let crf = s.crf.to_string();
        args.extend(
            [
                "-map",
                video_map.as_str(),
                // audio of the first clip, when it has any
                "-map",
                "0:a?",
                "-c:v",
                s.video_codec,
                "-preset",
                s.preset,
                "-crf",
                crf.as_str(),
                "-c:a",
                s.audio_codec,
                "-b:a",
                s.audio_bitrate,
            ]
            .map(str::to_string),
        );

        if let Some(duration) = self.duration {
            args.push("-t".to_string());
            args.push(format_seconds_arg(duration));
        }

        args.push(output.to_string_lossy().into_owned());

        EncodeCommand {
            program: self.program,
            args,
            output: output.to_path_buf(),
        }
    }
}
