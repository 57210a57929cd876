//! Speech-to-text capability

use crate::error::{TranscriptionError, TranscriptionResult};
use bookfetch_config::ConversionConfig;
use bookfetch_conversion::find_executable;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Turns an audio file into plain text
pub trait Transcriber: Send + Sync {
    fn name(&self) -> &str;

    /// Checked at call time
    fn is_available(&self) -> bool;

    fn transcribe(&self, audio: &Path) -> TranscriptionResult<String>;
}

/// The `whisper` command-line tool
///
/// Output goes to a scratch directory that is removed when transcription ends.
#[derive(Debug, Clone)]
pub struct WhisperCommand {
    command: String,
    model: String,
}

impl WhisperCommand {
    pub fn new(command: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(&config.whisper_command, &config.whisper_model)
    }

    fn command_for(&self, program: &Path, audio: &Path, out_dir: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.arg(audio)
            .arg("--model")
            .arg(&self.model)
            .arg("--output_format")
            .arg("txt")
            .arg("--output_dir")
            .arg(out_dir)
            .stdin(Stdio::null());
        cmd
    }

    fn transcript_path(audio: &Path, out_dir: &Path) -> PathBuf {
        let stem = audio
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        out_dir.join(format!("{}.txt", stem))
    }
}

impl Transcriber for WhisperCommand {
    fn name(&self) -> &str {
        "whisper"
    }

    fn is_available(&self) -> bool {
        find_executable(&self.command).is_some()
    }

    fn transcribe(&self, audio: &Path) -> TranscriptionResult<String> {
        let program = find_executable(&self.command)
            .ok_or_else(|| TranscriptionError::EngineMissing(self.command.clone()))?;
        let scratch = tempfile::TempDir::new()?;

        log::info!("Transcribing {} with whisper model {}", audio.display(), self.model);
        let output = self.command_for(&program, audio, scratch.path()).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscriptionError::Failed(format!(
                "{} {}",
                output.status,
                stderr.lines().last().unwrap_or("").trim()
            )));
        }

        let text = std::fs::read_to_string(Self::transcript_path(audio, scratch.path()))?;
        Ok(text)
    }
}
