//! Renders one [`EntityRecord`] as a self-contained markdown section.

use std::fmt::Write as _;

use crate::extractor::{EntityKind, EntityRecord};
use crate::linker::{anchor_id, local_name, Linker};

/// Text used for entities without labels when placeholders are enabled.
pub const LABEL_PLACEHOLDER: &str = "*No label defined.*";
/// Text used for entities without descriptions when placeholders are enabled.
pub const DESCRIPTION_PLACEHOLDER: &str = "*No description available.*";

/// Section rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Substitute placeholder text for missing labels and descriptions.
    pub placeholders: bool,
}

/// Renders the markdown section for `record`.
///
/// The heading anchor and every cross-reference go through `linker`, so a
/// section always agrees with the links other sections make to it.
pub fn render_section(record: &EntityRecord, linker: &Linker, options: RenderOptions) -> String {
    let kind = record.kind();
    let mut out = format!(
        "## {name} {{#{anchor}}}\n\n**Type:** {kind}\n\n**URI:** `{uri}`\n\n",
        name = record.local_name,
        anchor = linker.anchor_for(&record.local_name),
        kind = kind.display_label(),
        uri = record.uri,
    );

    if !record.labels.is_empty() {
        push_list(&mut out, "Labels", record.labels.iter().cloned());
    } else if options.placeholders {
        push_list(&mut out, "Labels", [LABEL_PLACEHOLDER.to_string()]);
    }

    if !record.descriptions.is_empty() {
        out.push_str("### Description\n\n");
        for desc in &record.descriptions {
            let _ = write!(out, "{desc}\n\n");
        }
    } else if options.placeholders {
        let _ = write!(out, "### Description\n\n{DESCRIPTION_PLACEHOLDER}\n\n");
    }

    if record.is(EntityKind::Class) {
        push_links(&mut out, "Superclasses", &record.superclasses, linker);
        push_links(&mut out, "Subclasses", &record.subclasses, linker);
        push_links(&mut out, "Instances", &record.instances, linker);
    }

    if kind.is_property() {
        push_links(&mut out, "Domains", &record.domains, linker);
        // Ranges often name XSD datatypes, so they stay plain text.
        push_list(&mut out, "Ranges", record.ranges.iter().cloned());
        push_list(
            &mut out,
            "Characteristics",
            record.characteristics.iter().map(|c| c.label().to_string()),
        );
        push_links(&mut out, "Inverse Properties", &record.inverse_properties, linker);
        push_links(&mut out, "Subproperties", &record.subproperties, linker);
        push_links(&mut out, "Superproperties", &record.superproperties, linker);
    }

    if kind == EntityKind::Individual {
        push_links(&mut out, "Instance Of", &record.instance_of, linker);
        push_property_values(&mut out, record, linker);
    }

    push_related(&mut out, record, linker);

    out
}

/// Appends `### {title}` and one bullet per item. Nothing is written for an
/// empty list.
fn push_list(out: &mut String, title: &str, items: impl IntoIterator<Item = String>) {
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return;
    }
    let _ = write!(out, "### {title}\n\n");
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
    out.push('\n');
}

fn push_links(out: &mut String, title: &str, names: &[String], linker: &Linker) {
    push_list(out, title, names.iter().map(|name| linker.link(name)));
}

fn push_property_values(out: &mut String, record: &EntityRecord, linker: &Linker) {
    let lines = record.property_values.iter().map(|pv| {
        let value = if pv.is_uri && linker.is_internal(&pv.value) {
            linker.link(local_name(&pv.value))
        } else if pv.is_uri {
            format!("`{}`", pv.value)
        } else {
            pv.value.clone()
        };
        format!("**{}**: {}", pv.property, value)
    });
    push_list(out, "Property Values", lines);
}

fn push_related(out: &mut String, record: &EntityRecord, linker: &Linker) {
    // `related_entities` is a BTreeSet, so iteration is already alphabetical.
    let links = record
        .related_entities
        .iter()
        .filter(|iri| linker.is_internal(iri))
        .filter(|iri| linker.resolves(&anchor_id(iri)))
        .map(|iri| linker.link(local_name(iri)));
    push_list(out, "Related Entities", links);
}
