//! Ordered header synonym rules
//!
//! A header is folded (trimmed, lower-cased, accents removed) and then tested
//! against every rule from top to bottom. Each matching rule overwrites the
//! previous decision, so the last matching rule wins. Generic patterns come
//! first and more specific ones later: `SD1neg` contains `sd1`, and the later
//! `sd1neg` rule moves it from `z_pos1` to `z_neg1`. A rule without a field
//! drops the header; the default table ends with one for BMI columns, which
//! would otherwise look like weights (`IMC (peso/altura²)`).

use super::field::CanonicalField;

/// A single `(patterns, field)` rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymRule {
    /// Folded substrings; any of them matching selects the field
    pub patterns: Vec<String>,
    /// Field the header maps to; `None` drops the column
    pub field: Option<CanonicalField>,
}

impl SynonymRule {
    pub fn new(field: CanonicalField, patterns: &[&str]) -> Self {
        Self::build(Some(field), patterns)
    }

    /// A rule that drops every matching header
    pub fn ignore(patterns: &[&str]) -> Self {
        Self::build(None, patterns)
    }

    fn build(field: Option<CanonicalField>, patterns: &[&str]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| fold_header(p)).collect(),
            field,
        }
    }

    /// Whether an already folded header matches this rule
    #[must_use]
    pub fn matches(&self, folded_header: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| !pattern.is_empty() && folded_header.contains(pattern.as_str()))
    }
}

/// Explicit ordered list of header rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
    rules: Vec<SynonymRule>,
}

const DEFAULT_RULES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::StudentName,
        &["aluno", "nome", "name", "student", "estudante"],
    ),
    (
        CanonicalField::RegistrationId,
        &["matri", "registration", "registro", "enrollment"],
    ),
    (CanonicalField::Age, &["idade", "age"]),
    (CanonicalField::Gender, &["genero", "sexo", "gender", "sex"]),
    (CanonicalField::WeightKg, &["peso", "weight"]),
    (
        CanonicalField::HeightCm,
        &["altura", "estatura", "height", "comprimento"],
    ),
    (
        CanonicalField::Occasion,
        &[
            "trimestre",
            "bimestre",
            "quarter",
            "occasion",
            "medicao",
            "mediçao",
        ],
    ),
    (CanonicalField::ZPos1, &["z_pos1", "z_1pos", "z+1", "sd1"]),
    (CanonicalField::ZPos2, &["z_pos2", "z_2pos", "z+2", "sd2"]),
    (CanonicalField::ZPos3, &["z_pos3", "z_3pos", "z+3", "sd3"]),
    (CanonicalField::ZNeg1, &["z_neg1", "z_1neg", "z-1", "sd1neg"]),
    (CanonicalField::ZNeg2, &["z_neg2", "z_2neg", "z-2", "sd2neg"]),
    (CanonicalField::ZNeg3, &["z_neg3", "z_3neg", "z-3", "sd3neg"]),
    (CanonicalField::Z0, &["z_0", "median", "mediana", "sd0"]),
];

/// Body-mass index columns; never a canonical field
const IGNORED_PATTERNS: &[&str] = &["imc", "bmi", "indice de massa", "body mass"];

impl Default for SynonymTable {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(field, patterns)| SynonymRule::new(*field, patterns))
                .chain(std::iter::once(SynonymRule::ignore(IGNORED_PATTERNS)))
                .collect(),
        }
    }
}

impl SynonymTable {
    /// An empty table that recognizes nothing
    #[must_use]
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it takes precedence over every earlier rule
    #[must_use]
    pub fn with_rule(mut self, field: CanonicalField, patterns: &[&str]) -> Self {
        self.rules.push(SynonymRule::new(field, patterns));
        self
    }

    /// Append a rule dropping matching headers; it takes precedence over every earlier rule
    #[must_use]
    pub fn with_ignored(mut self, patterns: &[&str]) -> Self {
        self.rules.push(SynonymRule::ignore(patterns));
        self
    }

    #[must_use]
    pub fn rules(&self) -> &[SynonymRule] {
        &self.rules
    }

    /// Resolve a raw header to its canonical field
    ///
    /// `None` when no rule matches or the last matching rule drops the header.
    #[must_use]
    pub fn resolve(&self, header: &str) -> Option<CanonicalField> {
        let folded = fold_header(header);
        // Last matching rule wins
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(&folded))
            .and_then(|rule| rule.field)
    }
}

/// Fold a header for matching: trim, lower-case and strip a fixed set of accents
#[must_use]
pub fn fold_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'é' | 'ê' => 'e',
            'í' => 'i',
            'â' | 'ã' => 'a',
            other => other,
        })
        .collect()
}
