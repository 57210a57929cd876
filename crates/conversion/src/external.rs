//! Converters that shell out to installed document toolchains

use crate::capabilities::find_executable;
use crate::converter::Converter;
use crate::error::{ConversionError, ConversionResult};
use bookfetch_core::DocumentFormat;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toolchain {
    /// Calibre: `ebook-convert <source> <target>`
    Calibre,
    /// Pandoc: `pandoc <source> -o <target>`
    Pandoc,
}

/// An external command-line converter located at call time
#[derive(Debug, Clone)]
pub struct ExternalConverter {
    name: &'static str,
    command: String,
    toolchain: Toolchain,
}

impl ExternalConverter {
    pub fn ebook_convert(command: impl Into<String>) -> Self {
        Self {
            name: "ebook-convert",
            command: command.into(),
            toolchain: Toolchain::Calibre,
        }
    }

    pub fn pandoc(command: impl Into<String>) -> Self {
        Self {
            name: "pandoc",
            command: command.into(),
            toolchain: Toolchain::Pandoc,
        }
    }

    fn executable(&self) -> ConversionResult<PathBuf> {
        find_executable(&self.command).ok_or_else(|| ConversionError::ToolMissing {
            tool: self.name.to_string(),
        })
    }

    fn command_for(&self, program: &Path, source: &Path, target: &Path) -> Command {
        let mut cmd = Command::new(program);
        match self.toolchain {
            Toolchain::Calibre => {
                cmd.arg(source).arg(target);
            }
            Toolchain::Pandoc => {
                cmd.arg(source).arg("-o").arg(target);
            }
        }
        cmd.stdin(Stdio::null());
        cmd
    }
}

impl Converter for ExternalConverter {
    fn name(&self) -> &str {
        self.name
    }

    fn is_available(&self) -> bool {
        find_executable(&self.command).is_some()
    }

    fn supports(&self, format: DocumentFormat) -> bool {
        match self.toolchain {
            Toolchain::Calibre => format != DocumentFormat::Pdf,
            Toolchain::Pandoc => matches!(format, DocumentFormat::Epub | DocumentFormat::Txt),
        }
    }

    fn convert(&self, source: &Path, format: DocumentFormat, target: &Path) -> ConversionResult<()> {
        if !self.supports(format) {
            return Err(ConversionError::Unsupported {
                converter: self.name.to_string(),
                format: format.to_string(),
            });
        }
        let program = self.executable()?;
        let output = self.command_for(&program, source, target).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.lines().last().unwrap_or("").trim();
            return Err(ConversionError::tool_failed(
                self.name,
                format!("{} {}", output.status, detail).trim_end().to_string(),
            ));
        }

        if !target.exists() {
            return Err(ConversionError::MissingOutput {
                path: target.to_path_buf(),
            });
        }
        Ok(())
    }
}
