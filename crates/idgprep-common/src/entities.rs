//! Core entity types for IDG target lists.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// IDG protein family of a target, in canonical spelling.
///
/// Known families are matched case-insensitively; anything else is kept
/// exactly as it appeared in the source row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdgFamily {
    Gpcr,
    IonChannel,
    Kinase,
    /// Unrecognised family text, verbatim.
    Other(String),
}

impl IdgFamily {
    pub fn as_str(&self) -> &str {
        match self {
            IdgFamily::Gpcr       => "GPCR",
            IdgFamily::IonChannel => "IonChannel",
            IdgFamily::Kinase     => "Kinase",
            IdgFamily::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, IdgFamily::Other(_))
    }
}

impl fmt::Display for IdgFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (gene, family) row of a target list.
///
/// Equality, hashing and ordering all use the composite of the gene text and
/// the canonical family text, so two records are the same record exactly when
/// they would serialise to the same output row. Ordering is by gene first,
/// then by family.
#[derive(Debug, Clone)]
pub struct TargetRecord {
    pub gene: String,
    pub family: IdgFamily,
}

impl TargetRecord {
    pub fn new(gene: impl Into<String>, family: IdgFamily) -> Self {
        Self { gene: gene.into(), family }
    }

    fn key(&self) -> (&str, &str) {
        (self.gene.as_str(), self.family.as_str())
    }
}

impl PartialEq for TargetRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TargetRecord {}

impl Hash for TargetRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for TargetRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TargetRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_family_canonical_spelling() {
        assert_eq!(IdgFamily::Gpcr.as_str(), "GPCR");
        assert_eq!(IdgFamily::IonChannel.to_string(), "IonChannel");
        assert_eq!(IdgFamily::Kinase.as_str(), "Kinase");
        assert_eq!(IdgFamily::Other("Non-IDG".into()).as_str(), "Non-IDG");
        assert!(!IdgFamily::Other("tclin".into()).is_known());
    }

    #[test]
    fn test_records_equal_on_gene_and_family_text() {
        let a = TargetRecord::new("ABL1", IdgFamily::Kinase);
        let b = TargetRecord::new("ABL1", IdgFamily::Kinase);
        let c = TargetRecord::new("ABL1", IdgFamily::Gpcr);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_records_order_by_gene_then_family() {
        let mut records = vec![
            TargetRecord::new("BRCA1", IdgFamily::Kinase),
            TargetRecord::new("ABL1", IdgFamily::Kinase),
            TargetRecord::new("BRCA1", IdgFamily::Gpcr),
        ];
        records.sort();
        let keys: Vec<_> = records.iter().map(|r| (r.gene.as_str(), r.family.as_str())).collect();
        assert_eq!(keys, vec![("ABL1", "Kinase"), ("BRCA1", "GPCR"), ("BRCA1", "Kinase")]);
    }
}
