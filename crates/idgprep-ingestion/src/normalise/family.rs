//! IDG family normalisation.
//!
//! The IDG vocabulary is small and fixed, so matching is a case-insensitive
//! comparison against each known spelling. Text outside the vocabulary is
//! passed through untouched, casing included.
//!
//! ```
//! use idgprep_common::IdgFamily;
//! use idgprep_ingestion::normalise::normalise_family;
//!
//! assert_eq!(normalise_family("gPcR"), IdgFamily::Gpcr);
//! assert_eq!(normalise_family("Tclin"), IdgFamily::Other("Tclin".into()));
//! ```

use idgprep_common::IdgFamily;

/// Lower-case match key → canonical family.
pub const KNOWN_FAMILIES: &[(&str, IdgFamily)] = &[
    ("gpcr",       IdgFamily::Gpcr),
    ("ionchannel", IdgFamily::IonChannel),
    ("kinase",     IdgFamily::Kinase),
];

/// Normalise a raw family field. Total: every input maps to some family.
pub fn normalise_family(raw: &str) -> IdgFamily {
    let lowered = raw.to_lowercase();
    KNOWN_FAMILIES
        .iter()
        .find(|(key, _)| lowered == *key)
        .map(|(_, family)| family.clone())
        .unwrap_or_else(|| IdgFamily::Other(raw.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
