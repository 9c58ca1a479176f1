//! Record trait and the per-type field registry.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use markdownizer_core::{HighlightAdapter, MarkdownAdapter, Markdownizer, RenderOptions};

use crate::error::BindingError;

/// Column access for one stored record.
pub trait Record {
    /// Name of the record type, used in error messages.
    fn type_name(&self) -> &str;

    /// Names of all columns of the record type.
    fn column_names(&self) -> Vec<&str>;

    /// Current value of a column, `None` when unset.
    fn read(&self, column: &str) -> Option<&str>;

    /// Assign a column.
    fn write(&mut self, column: &str, value: String);
}

/// Name of the column receiving the rendered HTML of `attribute`.
#[must_use]
pub fn rendered_column(attribute: &str) -> String {
    format!("rendered_{attribute}")
}

/// One registered Markdown field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldTransform {
    attribute: String,
    rendered: String,
    options: RenderOptions,
    hierarchy: usize,
}

impl FieldTransform {
    /// Raw text column.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Rendered HTML column.
    #[must_use]
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Options used for every render of this field.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Heading offset used for every render of this field.
    #[must_use]
    pub fn hierarchy(&self) -> usize {
        self.hierarchy
    }
}

/// Markdown fields registered for one record type.
///
/// Built once when the application is configured, then shared by every save
/// of that type.
#[derive(Debug)]
pub struct Markdownize<R: ?Sized> {
    type_name: String,
    columns: BTreeSet<String>,
    fields: Vec<FieldTransform>,
    record: PhantomData<fn(&mut R)>,
}

impl<R: Record + ?Sized> Markdownize<R> {
    /// Registry for a record type with the given columns.
    #[must_use]
    pub fn new<I, S>(type_name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_name: type_name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            fields: Vec::new(),
            record: PhantomData,
        }
    }

    /// Registry for the type of `record`, using its columns.
    #[must_use]
    pub fn for_record(record: &R) -> Self {
        Self::new(record.type_name(), record.column_names())
    }

    /// Render `attribute` into `rendered_<attribute>` on every save.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::MissingAttributes`] unless both columns exist,
    /// and [`BindingError::AlreadyRegistered`] if `attribute` was registered
    /// before.
    pub fn markdownize(
        &mut self,
        attribute: &str,
        options: RenderOptions,
        hierarchy: usize,
    ) -> Result<&mut Self, BindingError> {
        let rendered = rendered_column(attribute);
        if !self.columns.contains(attribute) || !self.columns.contains(&rendered) {
            return Err(BindingError::MissingAttributes {
                type_name: self.type_name.clone(),
                attribute: attribute.to_owned(),
                rendered,
            });
        }
        if self.fields.iter().any(|field| field.attribute == attribute) {
            return Err(BindingError::AlreadyRegistered {
                type_name: self.type_name.clone(),
                attribute: attribute.to_owned(),
            });
        }

        tracing::debug!(type_name = %self.type_name, attribute, hierarchy, "Registered Markdown field");
        self.fields.push(FieldTransform {
            attribute: attribute.to_owned(),
            rendered,
            options,
            hierarchy,
        });
        Ok(self)
    }

    /// Registered fields, in registration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldTransform] {
        &self.fields
    }

    /// Render every registered field of `record`.
    ///
    /// An unset raw column renders as an empty document. Returns the render
    /// warnings, each prefixed with its attribute.
    pub fn before_save<H, M>(&self, renderer: &Markdownizer<H, M>, record: &mut R) -> Vec<String>
    where
        H: HighlightAdapter,
        M: MarkdownAdapter,
    {
        let mut warnings = Vec::new();
        for field in &self.fields {
            let raw = record.read(&field.attribute).unwrap_or_default();
            let result = renderer.render(raw, field.hierarchy, &field.options);

            for warning in &result.warnings {
                tracing::warn!(attribute = %field.attribute, "{warning}");
            }
            warnings.extend(
                result
                    .warnings
                    .into_iter()
                    .map(|warning| format!("{}: {warning}", field.attribute)),
            );
            record.write(&field.rendered, result.html);
        }
        warnings
    }
}
