//! Classifies ontology entities and extracts everything their documentation
//! section needs.
//!
//! Classification is a closed set of [`EntityKind`]s. Each kind populates
//! its own part of the [`EntityRecord`]; the declaration order of the enum
//! is the priority used when a section has to pick a single display type.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;
use waterframe_graph::{vocab, Term, TripleStore};

use crate::linker::local_name;

/// Errors raised while extracting a single entity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The identifier is empty or whitespace.
    #[error("empty entity identifier")]
    EmptyIdentifier,
    /// The identifier names a literal, which cannot carry statements.
    #[error("{0:?} is a literal, not a resource")]
    NotAResource(String),
}

/// OWL entity kinds, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    /// `owl:Class`, declared or implied by `rdfs:subClassOf`.
    Class,
    /// `owl:ObjectProperty`.
    ObjectProperty,
    /// `owl:DatatypeProperty`.
    DatatypeProperty,
    /// `owl:NamedIndividual`.
    Individual,
    /// None of the above.
    Unclassified,
}

impl EntityKind {
    /// Maps an `rdf:type` object to the kind it declares.
    pub fn from_type_iri(iri: &str) -> Option<Self> {
        match iri {
            vocab::OWL_CLASS => Some(Self::Class),
            vocab::OWL_OBJECT_PROPERTY => Some(Self::ObjectProperty),
            vocab::OWL_DATATYPE_PROPERTY => Some(Self::DatatypeProperty),
            vocab::OWL_NAMED_INDIVIDUAL => Some(Self::Individual),
            _ => None,
        }
    }

    /// The `rdf:type` IRI declaring this kind.
    pub fn type_iri(self) -> Option<&'static str> {
        match self {
            Self::Class => Some(vocab::OWL_CLASS),
            Self::ObjectProperty => Some(vocab::OWL_OBJECT_PROPERTY),
            Self::DatatypeProperty => Some(vocab::OWL_DATATYPE_PROPERTY),
            Self::Individual => Some(vocab::OWL_NAMED_INDIVIDUAL),
            Self::Unclassified => None,
        }
    }

    /// Label shown in the `**Type:**` line of a section.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::ObjectProperty => "Object Property",
            Self::DatatypeProperty => "Datatype Property",
            Self::Individual => "Individual",
            Self::Unclassified => "Entity",
        }
    }

    /// Returns true for object and datatype properties.
    pub fn is_property(self) -> bool {
        matches!(self, Self::ObjectProperty | Self::DatatypeProperty)
    }

    /// Populates the kind-specific fields of `record`.
    fn populate(self, store: &dyn TripleStore, subject: &Term, record: &mut EntityRecord) {
        match self {
            Self::Class => populate_class(store, subject, record),
            Self::ObjectProperty | Self::DatatypeProperty => {
                populate_property(store, subject, record)
            }
            Self::Individual => populate_individual(store, subject, record),
            Self::Unclassified => {}
        }
    }
}

/// OWL property characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Characteristic {
    /// `owl:FunctionalProperty`.
    Functional,
    /// `owl:InverseFunctionalProperty`.
    InverseFunctional,
    /// `owl:TransitiveProperty`.
    Transitive,
    /// `owl:SymmetricProperty`.
    Symmetric,
    /// `owl:AsymmetricProperty`.
    Asymmetric,
    /// `owl:ReflexiveProperty`.
    Reflexive,
    /// `owl:IrreflexiveProperty`.
    Irreflexive,
}

impl Characteristic {
    /// All characteristics, in rendering order.
    pub const ALL: [Characteristic; 7] = [
        Self::Functional,
        Self::InverseFunctional,
        Self::Transitive,
        Self::Symmetric,
        Self::Asymmetric,
        Self::Reflexive,
        Self::Irreflexive,
    ];

    /// The OWL class whose membership declares the characteristic.
    pub fn class_iri(self) -> &'static str {
        match self {
            Self::Functional => vocab::OWL_FUNCTIONAL_PROPERTY,
            Self::InverseFunctional => vocab::OWL_INVERSE_FUNCTIONAL_PROPERTY,
            Self::Transitive => vocab::OWL_TRANSITIVE_PROPERTY,
            Self::Symmetric => vocab::OWL_SYMMETRIC_PROPERTY,
            Self::Asymmetric => vocab::OWL_ASYMMETRIC_PROPERTY,
            Self::Reflexive => vocab::OWL_REFLEXIVE_PROPERTY,
            Self::Irreflexive => vocab::OWL_IRREFLEXIVE_PROPERTY,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Functional => "Functional",
            Self::InverseFunctional => "Inverse Functional",
            Self::Transitive => "Transitive",
            Self::Symmetric => "Symmetric",
            Self::Asymmetric => "Asymmetric",
            Self::Reflexive => "Reflexive",
            Self::Irreflexive => "Irreflexive",
        }
    }
}

/// One outgoing statement of an individual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    /// Local name of the predicate.
    pub property: String,
    /// The full IRI when `is_uri`, otherwise the literal's lexical form.
    pub value: String,
    /// Whether the object is an IRI.
    pub is_uri: bool,
}

/// Everything extracted about one entity.
///
/// Name lists hold local names in store iteration order. Blank nodes are not
/// addressable and never appear in them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRecord {
    /// Full IRI.
    pub uri: String,
    /// Display name derived from the IRI.
    pub local_name: String,
    /// `rdfs:label` and `skos:altLabel` values.
    pub labels: Vec<String>,
    /// `rdfs:comment`, `skos:definition` and `dc:description` values.
    pub descriptions: Vec<String>,
    /// Local names of the `rdf:type` objects.
    pub rdf_types: BTreeSet<String>,
    /// Kinds assigned by primary typing and the implicit-class rule.
    pub kinds: BTreeSet<EntityKind>,
    /// Direct subclasses (Class only).
    pub subclasses: Vec<String>,
    /// Direct superclasses (Class only).
    pub superclasses: Vec<String>,
    /// Individuals typed directly with this class (Class only).
    pub instances: Vec<String>,
    /// `rdfs:domain` classes (Property only).
    pub domains: Vec<String>,
    /// `rdfs:range` classes or datatypes (Property only).
    pub ranges: Vec<String>,
    /// Declared characteristics (Property only).
    pub characteristics: Vec<Characteristic>,
    /// `owl:inverseOf` targets (Property only).
    pub inverse_properties: Vec<String>,
    /// Properties declaring this one as `rdfs:subPropertyOf` (Property only).
    pub subproperties: Vec<String>,
    /// `rdfs:subPropertyOf` targets (Property only).
    pub superproperties: Vec<String>,
    /// Declared classes other than `owl:NamedIndividual` (Individual only).
    pub instance_of: Vec<String>,
    /// Outgoing statements other than `rdf:type` (Individual only).
    pub property_values: Vec<PropertyValue>,
    /// Full IRIs of every resource touched during extraction.
    pub related_entities: BTreeSet<String>,
}

impl EntityRecord {
    /// The highest-priority kind, or [`EntityKind::Unclassified`].
    pub fn kind(&self) -> EntityKind {
        self.kinds
            .iter()
            .next()
            .copied()
            .unwrap_or(EntityKind::Unclassified)
    }

    /// Returns true if the entity was classified as `kind`.
    pub fn is(&self, kind: EntityKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Returns true if the entity has neither labels nor descriptions.
    pub fn is_undocumented(&self) -> bool {
        self.labels.is_empty() && self.descriptions.is_empty()
    }

    /// Records an IRI as related and returns its local name. Blank nodes and
    /// literals are not recorded and yield `None`.
    fn relate(&mut self, term: &Term) -> Option<String> {
        let iri = term.as_iri()?;
        self.related_entities.insert(iri.to_string());
        Some(local_name(iri).to_string())
    }
}

/// Extracts the record for `uri`.
///
/// # Errors
///
/// Returns [`ExtractError::EmptyIdentifier`] for a blank identifier.
pub fn extract(store: &dyn TripleStore, uri: &str) -> Result<EntityRecord, ExtractError> {
    if uri.trim().is_empty() {
        return Err(ExtractError::EmptyIdentifier);
    }
    extract_term(store, &Term::iri(uri))
}

/// Extracts the record for an arbitrary term.
///
/// # Errors
///
/// Returns [`ExtractError::NotAResource`] for literals and
/// [`ExtractError::EmptyIdentifier`] for empty IRIs.
pub fn extract_term(
    store: &dyn TripleStore,
    subject: &Term,
) -> Result<EntityRecord, ExtractError> {
    if subject.is_literal() {
        return Err(ExtractError::NotAResource(subject.value().to_string()));
    }
    if subject.value().trim().is_empty() {
        return Err(ExtractError::EmptyIdentifier);
    }

    let uri = subject.value().to_string();
    let mut record = EntityRecord {
        local_name: local_name(&uri).to_string(),
        uri,
        ..EntityRecord::default()
    };

    for predicate in [vocab::RDFS_LABEL, vocab::SKOS_ALT_LABEL] {
        record
            .labels
            .extend(store.objects(subject, predicate).map(|o| o.value().to_string()));
    }
    for predicate in [vocab::RDFS_COMMENT, vocab::SKOS_DEFINITION, vocab::DC_DESCRIPTION] {
        record
            .descriptions
            .extend(store.objects(subject, predicate).map(|o| o.value().to_string()));
    }

    for type_term in store.objects(subject, vocab::RDF_TYPE) {
        record.rdf_types.insert(local_name(type_term.value()).to_string());
        if let Some(kind) = type_term.as_iri().and_then(EntityKind::from_type_iri) {
            record.kinds.insert(kind);
        }
    }

    if !record.is(EntityKind::Class) && is_implicit_class(store, subject) {
        record.kinds.insert(EntityKind::Class);
    }

    // Object and datatype properties share one extension; run it once.
    let mut populated: HashSet<EntityKind> = HashSet::new();
    let kinds: Vec<EntityKind> = record.kinds.iter().copied().collect();
    for kind in kinds {
        let family = if kind.is_property() {
            EntityKind::ObjectProperty
        } else {
            kind
        };
        if populated.insert(family) {
            kind.populate(store, subject, &mut record);
        }
    }

    Ok(record)
}

/// Secondary classification: any subject or object of `rdfs:subClassOf` is
/// treated as a class.
fn is_implicit_class(store: &dyn TripleStore, subject: &Term) -> bool {
    store.objects(subject, vocab::RDFS_SUBCLASS_OF).next().is_some()
        || store.subjects(vocab::RDFS_SUBCLASS_OF, subject).next().is_some()
}

fn populate_class(store: &dyn TripleStore, subject: &Term, record: &mut EntityRecord) {
    for sub in store.subjects(vocab::RDFS_SUBCLASS_OF, subject) {
        if let Some(name) = record.relate(&sub) {
            record.subclasses.push(name);
        }
    }
    for sup in store.objects(subject, vocab::RDFS_SUBCLASS_OF) {
        if let Some(name) = record.relate(&sup) {
            record.superclasses.push(name);
        }
    }
    for instance in store.subjects(vocab::RDF_TYPE, subject) {
        if &instance == subject {
            continue;
        }
        if let Some(name) = record.relate(&instance) {
            record.instances.push(name);
        }
    }
}

fn populate_property(store: &dyn TripleStore, subject: &Term, record: &mut EntityRecord) {
    for domain in store.objects(subject, vocab::RDFS_DOMAIN) {
        if let Some(name) = record.relate(&domain) {
            record.domains.push(name);
        }
    }
    for range in store.objects(subject, vocab::RDFS_RANGE) {
        if let Some(name) = record.relate(&range) {
            record.ranges.push(name);
        }
    }

    record.characteristics = Characteristic::ALL
        .into_iter()
        .filter(|c| store.contains(subject, vocab::RDF_TYPE, &Term::iri(c.class_iri())))
        .collect();

    for inverse in store.objects(subject, vocab::OWL_INVERSE_OF) {
        if let Some(name) = record.relate(&inverse) {
            record.inverse_properties.push(name);
        }
    }
    for sub in store.subjects(vocab::RDFS_SUBPROPERTY_OF, subject) {
        if let Some(name) = record.relate(&sub) {
            record.subproperties.push(name);
        }
    }
    for sup in store.objects(subject, vocab::RDFS_SUBPROPERTY_OF) {
        if let Some(name) = record.relate(&sup) {
            record.superproperties.push(name);
        }
    }
}

fn populate_individual(store: &dyn TripleStore, subject: &Term, record: &mut EntityRecord) {
    for class in store.objects(subject, vocab::RDF_TYPE) {
        if class.as_iri() == Some(vocab::OWL_NAMED_INDIVIDUAL) {
            continue;
        }
        if let Some(name) = record.relate(&class) {
            record.instance_of.push(name);
        }
    }

    for triple in store.triples_matching(Some(subject), None, None) {
        if triple.predicate == vocab::RDF_TYPE {
            continue;
        }
        let property = local_name(&triple.predicate).to_string();
        let value = match triple.object {
            Term::Iri(iri) => {
                record.related_entities.insert(iri.clone());
                PropertyValue {
                    property,
                    value: iri,
                    is_uri: true,
                }
            }
            Term::Literal(lexical) => PropertyValue {
                property,
                value: lexical,
                is_uri: false,
            },
            Term::BlankNode(_) => continue,
        };
        record.property_values.push(value);
    }
}
