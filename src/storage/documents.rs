use crate::model::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Document = Map<String, Value>;

const ID_FIELD: &str = "id";

/// Equality conditions on top-level document fields, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

fn has_id(document: &Document, id: &RecordId) -> bool {
    document.get(ID_FIELD).and_then(Value::as_str) == Some(id.as_str())
}

/// One collection's documents in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentSet(Vec<Document>);

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn find(&self, filter: &Filter) -> Vec<Document> {
        self.0
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect()
    }

    pub fn find_by_id(&self, id: &RecordId) -> Option<Document> {
        self.0.iter().find(|doc| has_id(doc, id)).cloned()
    }

    /// Assigns a fresh id and appends the document. Any `id` the caller
    /// supplied is replaced.
    pub fn insert(&mut self, mut fields: Document) -> Document {
        let id = loop {
            let candidate = RecordId::generate();
            if !self.0.iter().any(|doc| has_id(doc, &candidate)) {
                break candidate;
            }
        };

        fields.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        self.0.push(fields.clone());
        fields
    }

    /// Merges `fields` into the document. The `id` key is never overwritten.
    pub fn update_by_id(&mut self, id: &RecordId, fields: Document) -> Option<Document> {
        let doc = self.0.iter_mut().find(|doc| has_id(doc, id))?;
        for (key, value) in fields {
            if key != ID_FIELD {
                doc.insert(key, value);
            }
        }
        Some(doc.clone())
    }

    pub fn delete_by_id(&mut self, id: &RecordId) -> Option<Document> {
        let pos = self.0.iter().position(|doc| has_id(doc, id))?;
        Some(self.0.remove(pos))
    }
}
