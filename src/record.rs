//! Record composer: one field map rendered into one fixed-width line.

use crate::error::{AchError, Result};
use crate::field::{FieldOverrides, FieldSpec, FieldValue};
use crate::layout::RecordLayout;
use log::debug;

/// A live record: a layout plus one value per field.
///
/// Field order on output comes from each spec's `position`, never from the
/// order fields appear in the layout table. The position order is computed
/// once when the record is built.
#[derive(Debug, Clone)]
pub struct Record {
    layout: &'static RecordLayout,
    values: Vec<FieldValue>,
    order: Vec<usize>,
}

impl Record {
    /// Builds a record with every field at its preset value.
    ///
    /// Fails with `InvalidLayout` if the layout's positions are not a dense
    /// `1..=N` set or do not add up to a full line.
    pub fn new(layout: &'static RecordLayout) -> Result<Self> {
        let order = layout.position_order()?;
        let values = layout.fields.iter().map(FieldSpec::initial_value).collect();
        Ok(Record {
            layout,
            values,
            order,
        })
    }

    pub fn name(&self) -> &'static str {
        self.layout.name
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.layout.fields.iter().position(|f| f.name == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn spec(&self, name: &str) -> Option<&'static FieldSpec> {
        self.layout.spec(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.index_of(name).map(|i| &self.values[i])
    }

    /// Text view of a field, empty when the field is missing.
    pub fn text(&self, name: &str) -> String {
        self.index_of(name)
            .map(|i| self.values[i].rendered_as(self.layout.fields[i].kind))
            .unwrap_or_default()
    }

    /// Sets a field's value. Returns `false` (and changes nothing) if this
    /// record has no such field.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        match self.index_of(name) {
            Some(i) => {
                self.values[i] = value.into();
                true
            }
            None => false,
        }
    }

    /// Applies raw overrides; names this layout doesn't know are skipped.
    pub fn apply_overrides(&mut self, overrides: &FieldOverrides) {
        for (name, value) in overrides {
            if !self.set(name, value.clone()) {
                debug!("{}: ignoring override for unknown field `{}`", self.name(), name);
            }
        }
    }

    /// Fields and values in position order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &FieldValue)> + '_ {
        let fields = self.layout.fields;
        self.order.iter().map(move |&i| (&fields[i], &self.values[i]))
    }

    /// Renders the record as a single line without terminator.
    ///
    /// Single linear pass in position order. A value wider than its field is
    /// reported as `InvalidLength` rather than emitted, so every line that
    /// comes out of here is exactly as wide as the layout.
    pub fn render(&self) -> Result<String> {
        let mut line = String::with_capacity(self.layout.width());
        for (spec, value) in self.fields() {
            render_field(self.name(), spec, value, &mut line)?;
        }
        Ok(line)
    }
}

fn render_field(
    record: &'static str,
    spec: &FieldSpec,
    value: &FieldValue,
    out: &mut String,
) -> Result<()> {
    let rendered = value.rendered_as(spec.kind);
    let len = rendered.chars().count();
    if len > spec.width {
        return Err(AchError::InvalidLength {
            record,
            field: spec.name,
            width: spec.width,
            actual: len,
        });
    }

    let fill = spec.width - len;
    if spec.blank || spec.kind.is_left_justified() {
        out.push_str(&rendered);
        out.extend(std::iter::repeat(' ').take(fill));
    } else {
        out.extend(std::iter::repeat(spec.padding).take(fill));
        out.push_str(&rendered);
    }
    Ok(())
}
