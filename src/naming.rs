//! Output filename rules for thumbnails.
//!
//! Three ways to name a derivative, picked once per run:
//!
//! - **Default** — text before the first `.`, then `_thumb.`, then the
//!   lower-cased format name: `cat.png` + `JPEG` → `cat_thumb.jpeg`.
//! - **Template** — a pattern with `{name}`, `{stem}` and `{ext}`
//!   placeholders, e.g. `"{stem}-small.{ext}"`. This is how the CLI exposes
//!   custom naming.
//! - **Custom** — any closure from original filename to output filename.
//!   Its return value is used verbatim.
//!
//! The stem is cut at the *first* dot, not the last: `archive.tar.gz` has
//! stem `archive`, and a dotfile like `.hidden.png` has an empty stem. A name
//! without any dot loses its last character (`README` → `READM`), the same
//! cut as if the dot sat just past the end.

use crate::imaging::OutputFormat;
use std::fmt;
use std::sync::Arc;

/// Text before the first `.`; without a dot, everything but the last character.
pub fn filename_stem(filename: &str) -> &str {
    let end = filename
        .find('.')
        .or_else(|| filename.char_indices().last().map(|(pos, _)| pos))
        .unwrap_or(0);
    &filename[..end]
}

/// `stem_thumb.ext` with the lower-cased format name as extension.
pub fn default_thumbnail_name(filename: &str, format: &OutputFormat) -> String {
    format!("{}_thumb.{}", filename_stem(filename), format.extension())
}

/// Expand `{name}`, `{stem}` and `{ext}` in a naming template.
pub fn render_template(template: &str, filename: &str, format: &OutputFormat) -> String {
    template
        .replace("{name}", filename)
        .replace("{stem}", filename_stem(filename))
        .replace("{ext}", &format.extension())
}

type NameFn = dyn Fn(&str) -> String + Send + Sync;

/// How thumbnails are named.
#[derive(Clone, Default)]
pub enum Naming {
    #[default]
    Default,
    Template(String),
    Custom(Arc<NameFn>),
}

impl Naming {
    /// Wrap a closure as a naming strategy.
    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Naming::Custom(Arc::new(f))
    }

    pub fn thumbnail_name(&self, filename: &str, format: &OutputFormat) -> String {
        match self {
            Naming::Default => default_thumbnail_name(filename, format),
            Naming::Template(template) => render_template(template, filename, format),
            Naming::Custom(f) => f(filename),
        }
    }
}

impl fmt::Debug for Naming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Naming::Default => f.write_str("Default"),
            Naming::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Naming::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
