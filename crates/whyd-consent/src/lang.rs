//! Supported consent languages and their source documents.

use std::path::{Path, PathBuf};

use whyd_core::ConsentSources;

/// Languages the consent text is available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    En,
    Fr,
}

impl Lang {
    pub fn all() -> &'static [Lang] {
        &[Self::En, Self::Fr]
    }

    /// Two-letter code, as used in file names and `lang-xx` element ids.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }

    /// Alt text of the language flag.
    pub fn flag_label(&self) -> &'static str {
        match self {
            Lang::En => "English / Anglais",
            Lang::Fr => "French / Français",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A consent document: a language and the Markdown file holding its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentDocument {
    pub lang: Lang,
    pub path: PathBuf,
}

impl ConsentDocument {
    pub fn new(lang: Lang, path: impl AsRef<Path>) -> Self {
        Self {
            lang,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// One document per supported language, in [`Lang::all`] order.
    pub fn from_sources(sources: &ConsentSources) -> Vec<ConsentDocument> {
        Lang::all()
            .iter()
            .map(|&lang| {
                let path = match lang {
                    Lang::En => &sources.en,
                    Lang::Fr => &sources.fr,
                };
                ConsentDocument::new(lang, path)
            })
            .collect()
    }
}
