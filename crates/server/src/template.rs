//! Templating for the server, built around handlebars but abstracted away so would be easy to
//! exchange in the future.

use handlebars::Handlebars;
use numerology::{Alphabet, CalculationVariant};

use crate::error::ServerResult;

/// One alphabet as listed on the index page.
#[derive(Debug, serde::Serialize)]
pub struct AlphabetEntry {
    /// Wire code sent as `Alphabet` in requests, e.g. `0`.
    pub code: u8,
    /// Name of the script, e.g. `Arabic`.
    pub language_name: &'static str,
    /// Name of the numbering system, e.g. `Ebced`.
    pub system_name: &'static str,
    /// `rtl` or `ltr`, used for the sample text's `dir` attribute.
    pub direction: &'static str,
}

impl From<Alphabet> for AlphabetEntry {
    fn from(alphabet: Alphabet) -> Self {
        let info = alphabet.info();
        Self {
            code: alphabet.code(),
            language_name: info.language_name,
            system_name: info.system_name,
            direction: info.direction.as_str(),
        }
    }
}

/// One calculation variant as listed on the index page.
#[derive(Debug, serde::Serialize)]
pub struct VariantEntry {
    /// Wire code sent as `Type` in requests.
    pub code: u8,
    /// Lowercase name, e.g. `smallest`.
    pub name: &'static str,
}

impl From<CalculationVariant> for VariantEntry {
    fn from(variant: CalculationVariant) -> Self {
        Self {
            code: variant.code(),
            name: variant.as_str(),
        }
    }
}

/// [`IndexPageFields`] contains all of the fields used in the `templates/index.hbs` template.
#[derive(Debug, serde::Serialize)]
pub struct IndexPageFields {
    /// Every supported alphabet, in wire-code order.
    pub alphabets: Vec<AlphabetEntry>,
    /// Every calculation variant, in wire-code order.
    pub variants: Vec<VariantEntry>,
    /// Longest accepted text, in characters.
    pub max_text_length: usize,
    /// Name of the active variation policy, e.g. `letter-tables`.
    pub variation_policy: &'static str,
    /// Crate version, shown in the footer.
    pub version: &'static str,
}

impl IndexPageFields {
    /// Fields describing every alphabet and variant, with the given limits.
    pub fn new(max_text_length: usize, variation_policy: &'static str) -> Self {
        Self {
            alphabets: Alphabet::ALL.into_iter().map(AlphabetEntry::from).collect(),
            variants: CalculationVariant::ALL
                .into_iter()
                .map(VariantEntry::from)
                .collect(),
            max_text_length,
            variation_policy,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// A wrapper to handle the templating engine.
#[derive(Debug)]
pub struct Templates {
    /// The handlebars handle.
    handlebars: Handlebars<'static>,
}

impl Templates {
    /// Create a new templating engine with every template registered.
    ///
    /// # Errors
    /// Fails if a bundled template does not parse.
    pub fn new() -> ServerResult<Self> {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(true);

        handlebars.register_template_string("index_page", include_str!("../templates/index.hbs"))?;
        Ok(Self { handlebars })
    }

    /// Render the index page.
    ///
    /// # Errors
    /// Fails if a field referenced by the template is missing.
    pub fn render_index_page(&self, fields: &IndexPageFields) -> ServerResult<String> {
        debug_assert!(
            fields.max_text_length > 0,
            "max text length should be non-zero"
        );

        Ok(self.handlebars.render("index_page", fields)?)
    }
}
