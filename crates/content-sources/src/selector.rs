//! Picking the single best file out of a catalog item

use bookfetch_core::{DocumentFormat, FileDescriptor};

/// How to choose among several files that match the same rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Largest declared size; absent sizes count as zero, earlier file wins on equal size
    LargestSize,
    /// First matching file in input order
    FirstListed,
}

/// One entry of a format preference list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceRule {
    pub format: DocumentFormat,
    pub tie_break: TieBreak,
}

impl PreferenceRule {
    pub fn new(format: DocumentFormat, tie_break: TieBreak) -> Self {
        Self { format, tie_break }
    }
}

/// A chosen file and the format rule that chose it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    pub format: DocumentFormat,
    pub file: &'a FileDescriptor,
}

/// Ordered format preference, evaluated top to bottom, first match wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPreference {
    rules: Vec<PreferenceRule>,
}

impl FormatPreference {
    pub fn new(rules: Vec<PreferenceRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PreferenceRule] {
        &self.rules
    }

    /// Picks the best file, or `None` when no rule matches anything
    pub fn select<'a>(&self, files: &'a [FileDescriptor]) -> Option<Selection<'a>> {
        self.rules.iter().find_map(|rule| {
            let mut matching = files.iter().filter(|f| rule.format.matches_tag(&f.format));
            let chosen = match rule.tie_break {
                TieBreak::FirstListed => matching.next(),
                TieBreak::LargestSize => matching.fold(None, |best: Option<&FileDescriptor>, f| {
                    match best {
                        Some(b) if b.size_or_zero() >= f.size_or_zero() => Some(b),
                        _ => Some(f),
                    }
                }),
            };
            chosen.map(|file| Selection {
                format: rule.format,
                file,
            })
        })
    }
}

impl Default for FormatPreference {
    fn default() -> Self {
        Self::new(vec![
            PreferenceRule::new(DocumentFormat::Pdf, TieBreak::LargestSize),
            PreferenceRule::new(DocumentFormat::Epub, TieBreak::FirstListed),
            PreferenceRule::new(DocumentFormat::Djvu, TieBreak::FirstListed),
            PreferenceRule::new(DocumentFormat::Txt, TieBreak::FirstListed),
            PreferenceRule::new(DocumentFormat::Kindle, TieBreak::FirstListed),
        ])
    }
}

/// Selects with the default preference: pdf by size, epub, djvu, txt, kindle
pub fn select(files: &[FileDescriptor]) -> Option<Selection<'_>> {
    FormatPreference::default().select(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(format: &str, name: &str, size: Option<u64>) -> FileDescriptor {
        let f = FileDescriptor::new(format, name);
        match size {
            Some(s) => f.with_size(s),
            None => f,
        }
    }

    #[test]
    fn test_pdf_beats_epub() {
        let files = vec![
            file("EPUB", "a.epub", Some(900_000)),
            file("PDF", "a.pdf", Some(500_000)),
        ];
        let chosen = select(&files).unwrap();
        assert_eq!(chosen.format, DocumentFormat::Pdf);
        assert_eq!(chosen.file.locator, "a.pdf");
    }

    #[test]
    fn test_largest_pdf_wins() {
        let files = vec![
            file("Text PDF", "small.pdf", Some(10)),
            file("Image Container PDF", "big.pdf", Some(5_000)),
            file("Additional Text PDF", "none.pdf", None),
        ];
        assert_eq!(select(&files).unwrap().file.locator, "big.pdf");
    }

    #[test]
    fn test_absent_size_counts_as_zero() {
        let files = vec![
            file("PDF", "unsized.pdf", None),
            file("PDF", "tiny.pdf", Some(1)),
        ];
        assert_eq!(select(&files).unwrap().file.locator, "tiny.pdf");
    }

    #[test]
    fn test_equal_size_pdf_keeps_first() {
        let files = vec![
            file("PDF", "first.pdf", Some(100)),
            file("PDF", "second.pdf", Some(100)),
        ];
        assert_eq!(select(&files).unwrap().file.locator, "first.pdf");
    }

    #[test]
    fn test_first_epub_ignores_size() {
        let files = vec![
            file("EPUB (old)", "old.epub", Some(1)),
            file("EPUB", "new.epub", Some(1_000_000)),
        ];
        let chosen = select(&files).unwrap();
        assert_eq!(chosen.format, DocumentFormat::Epub);
        assert_eq!(chosen.file.locator, "old.epub");
    }

    #[test]
    fn test_fallback_tag_order() {
        let files = vec![
            file("Kindle", "a.mobi", None),
            file("DjVuTXT", "a_djvu.txt", None),
            file("DjVu", "a.djvu", None),
        ];
        let chosen = select(&files).unwrap();
        assert_eq!(chosen.format, DocumentFormat::Djvu);
        assert_eq!(chosen.file.locator, "a_djvu.txt");

        let files = vec![file("Kindle", "a.mobi", None), file("Plain txt", "a.txt", None)];
        assert_eq!(select(&files).unwrap().format, DocumentFormat::Txt);
    }

    #[test]
    fn test_no_match_is_none() {
        assert!(select(&[]).is_none());
        let files = vec![file("JPEG", "cover.jpg", Some(10)), file("Metadata", "x.xml", None)];
        assert!(select(&files).is_none());
    }

    #[test]
    fn test_selection_always_from_input() {
        let files = vec![file("MP3", "a.mp3", None), file("EPUB", "a.epub", None)];
        let chosen = select(&files).unwrap();
        assert!(files.iter().any(|f| std::ptr::eq(f, chosen.file)));
    }

    #[test]
    fn test_custom_preference() {
        let pref = FormatPreference::new(vec![PreferenceRule::new(
            DocumentFormat::Epub,
            TieBreak::FirstListed,
        )]);
        let files = vec![file("PDF", "a.pdf", Some(10)), file("EPUB", "a.epub", None)];
        assert_eq!(pref.select(&files).unwrap().format, DocumentFormat::Epub);
        assert_eq!(pref.rules().len(), 1);
    }
}
