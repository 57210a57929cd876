//! Resolves an audiobook request to a single rendered document

use crate::error::TranscriptionError;
use crate::transcriber::Transcriber;
use bookfetch_conversion::{Document, DocumentRenderer};
use bookfetch_core::{safe_filename, AudiobookSpec};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const NO_TRANSCRIPT_NOTE: &str = "No transcript available. To generate a transcript, \
provide --audiobook-transcript or use --use-whisper with whisper and ffmpeg installed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Transcription requested but no engine is installed
    EngineMissing,
    /// The engine ran but produced no text
    EmptyTranscription,
    /// The document could not be written
    RenderFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeState {
    /// Rendered from a transcript or a transcription
    Rendered,
    /// Rendered from metadata only
    RenderedPlaceholder,
    Failed(FailureReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOutcome {
    pub state: NormalizeState,
    pub path: PathBuf,
}

impl NormalizeOutcome {
    pub fn succeeded(&self) -> bool {
        !matches!(self.state, NormalizeState::Failed(_))
    }

    /// The written document, if any
    pub fn output(&self) -> Option<&Path> {
        self.succeeded().then_some(self.path.as_path())
    }
}

/// Audio/transcript normalizer
pub struct AudiobookNormalizer {
    transcriber: Arc<dyn Transcriber>,
    renderer: Arc<dyn DocumentRenderer>,
    scratch_dir: Option<PathBuf>,
}

impl AudiobookNormalizer {
    pub fn new(transcriber: Arc<dyn Transcriber>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            transcriber,
            renderer,
            scratch_dir: None,
        }
    }

    /// Places the intermediate transcript in `dir` instead of the system temp dir
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// `<title or "audiobook">.pdf` inside `out_dir`
    pub fn target_in(spec: &AudiobookSpec, out_dir: &Path) -> PathBuf {
        let title = spec.title.as_deref().unwrap_or("audiobook");
        out_dir.join(format!("{}.pdf", safe_filename(title)))
    }

    pub fn normalize(&self, spec: &AudiobookSpec, target: &Path) -> NormalizeOutcome {
        let state = self.run(spec, target);
        match state {
            NormalizeState::Failed(reason) => {
                log::warn!("Audiobook conversion failed: {:?}", reason)
            }
            _ => log::info!("Audiobook document created: {}", target.display()),
        }
        NormalizeOutcome {
            state,
            path: target.to_path_buf(),
        }
    }

    fn run(&self, spec: &AudiobookSpec, target: &Path) -> NormalizeState {
        if let Some(transcript) = spec.transcript_path.as_deref().filter(|p| p.exists()) {
            log::info!("Creating document from transcript {}", transcript.display());
            return self.render_transcript(transcript, spec, target);
        }

        if spec.transcribe {
            if let Some(audio) = spec.audio_path.as_deref().filter(|p| p.exists()) {
                return self.transcribe_and_render(audio, spec, target);
            }
        }

        self.render_placeholder(spec, target)
    }

    fn transcribe_and_render(
        &self,
        audio: &Path,
        spec: &AudiobookSpec,
        target: &Path,
    ) -> NormalizeState {
        if !self.transcriber.is_available() {
            log::warn!("{} is not installed; cannot transcribe", self.transcriber.name());
            return NormalizeState::Failed(FailureReason::EngineMissing);
        }

        let text = match self.transcriber.transcribe(audio) {
            Ok(text) => text,
            Err(TranscriptionError::EngineMissing(cmd)) => {
                log::warn!("Transcription engine missing: {}", cmd);
                return NormalizeState::Failed(FailureReason::EngineMissing);
            }
            Err(e) => {
                log::warn!("{}", e);
                String::new()
            }
        };
        if text.trim().is_empty() {
            return NormalizeState::Failed(FailureReason::EmptyTranscription);
        }

        // Removed when `scratch` drops, on every path out of this function
        let scratch = match self.write_scratch(&text) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Cannot write intermediate transcript: {}", e);
                return NormalizeState::Failed(FailureReason::RenderFailed);
            }
        };
        self.render_transcript(scratch.path(), spec, target)
    }

    fn write_scratch(&self, text: &str) -> std::io::Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("transcript-").suffix(".txt");
        let mut file = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    fn render_transcript(&self, transcript: &Path, spec: &AudiobookSpec, target: &Path) -> NormalizeState {
        let corpus = match std::fs::read(transcript) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                log::warn!("Cannot read transcript {}: {}", transcript.display(), e);
                return NormalizeState::Failed(FailureReason::RenderFailed);
            }
        };

        let mut doc = Document::new();
        if let Some(title) = &spec.title {
            doc = doc.with_title(title);
        }
        if let Some(author) = &spec.author {
            doc = doc.with_byline(format!("by {}", author));
        }
        doc.push_corpus(&corpus);

        self.render(&doc, target, NormalizeState::Rendered)
    }

    fn render_placeholder(&self, spec: &AudiobookSpec, target: &Path) -> NormalizeState {
        let mut doc = Document::new().with_title(spec.title.as_deref().unwrap_or("Audiobook"));
        if let Some(author) = &spec.author {
            doc = doc.with_byline(format!("Author: {}", author));
        }
        if let Some(audio) = &spec.audio_path {
            doc.push_note(format!("Audio file: {}", audio.display()));
        }
        doc.push_note(NO_TRANSCRIPT_NOTE);

        self.render(&doc, target, NormalizeState::RenderedPlaceholder)
    }

    fn render(&self, doc: &Document, target: &Path, on_success: NormalizeState) -> NormalizeState {
        match self.renderer.render(doc, target) {
            Ok(()) => on_success,
            Err(e) => {
                log::warn!("{}", e);
                NormalizeState::Failed(FailureReason::RenderFailed)
            }
        }
    }
}
