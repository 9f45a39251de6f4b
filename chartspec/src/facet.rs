//! Grouping keys derived from a mark's facet-able encodings.

use crate::props::FacetRef;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Facets {
    /// Every field that partitions the data, primary fields first
    pub facets: Vec<String>,
    /// Secondary fields of dual facets
    pub secondary_facets: Vec<String>,
}

/// Collect the fields that the color and line type encodings partition the data by.
///
/// Static values contribute nothing; dual facets contribute both fields.
pub fn facets_from_props<C, L>(color: &FacetRef<C>, line_type: &FacetRef<L>) -> Facets {
    let mut primary: Vec<String> = Vec::new();
    let mut secondary: Vec<String> = Vec::new();

    for (field, secondary_field) in [facet_fields(color), facet_fields(line_type)]
        .into_iter()
        .flatten()
    {
        push_unique(&mut primary, field);
        if let Some(secondary_field) = secondary_field {
            push_unique(&mut secondary, secondary_field);
        }
    }

    let mut facets = primary;
    for field in &secondary {
        push_unique(&mut facets, field);
    }

    Facets {
        facets,
        secondary_facets: secondary,
    }
}

fn push_unique(fields: &mut Vec<String>, field: &str) {
    if !fields.iter().any(|f| f == field) {
        fields.push(field.to_string());
    }
}

fn facet_fields<T>(facet: &FacetRef<T>) -> Option<(&str, Option<&str>)> {
    match facet {
        FacetRef::Field(field) => Some((field.as_str(), None)),
        FacetRef::Dual([primary, secondary]) => Some((primary.as_str(), Some(secondary.as_str()))),
        FacetRef::Static { .. } => None,
    }
}
