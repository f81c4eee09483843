//! Rendered consent text, one HTML block per language, built once at startup.

use tracing::info;
use whyd_core::{ConsentSources, Error, Result};

use crate::lang::{ConsentDocument, Lang};
use crate::markdown::render_document;

/// Consent text of every supported language, rendered to HTML.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentBlocks {
    en: String,
    fr: String,
}

impl ConsentBlocks {
    /// Read and render both consent documents.
    ///
    /// A missing or unreadable document is a configuration error: the
    /// consent page cannot be served without it.
    pub fn load(sources: &ConsentSources) -> Result<Self> {
        let mut en = None;
        let mut fr = None;

        for doc in ConsentDocument::from_sources(sources) {
            let html = Self::render_file(&doc)?;
            match doc.lang {
                Lang::En => en = Some(html),
                Lang::Fr => fr = Some(html),
            }
        }

        match (en, fr) {
            (Some(en), Some(fr)) => Ok(Self { en, fr }),
            _ => Err(Error::Config("consent documents incomplete".into())),
        }
    }

    /// Build blocks from Markdown held in memory.
    pub fn from_markdown(en: &str, fr: &str) -> Self {
        Self {
            en: render_document(en),
            fr: render_document(fr),
        }
    }

    /// Rendered HTML for `lang`.
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => &self.en,
            Lang::Fr => &self.fr,
        }
    }

    fn render_file(doc: &ConsentDocument) -> Result<String> {
        let markdown =
            std::fs::read_to_string(&doc.path).map_err(|source| Error::ConsentSource {
                lang: doc.lang.code().to_string(),
                path: doc.path.clone(),
                source,
            })?;
        let html = render_document(&markdown);
        info!(
            "Consent text loaded: lang={}, path={}, fragments={}",
            doc.lang,
            doc.path.display(),
            html.lines().count()
        );
        Ok(html)
    }
}
