use std::fmt;

use serde::{Deserialize, Serialize};

/// Sample identifier as it arrives from the plate layout: a text token or a
/// number. Spreadsheets hand integer-like sample indices back as floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(f64),
    Text(String),
}

impl Identifier {
    /// Blank text and numeric zero mark control wells without a sample.
    pub fn is_present(&self) -> bool {
        match self {
            Identifier::Number(n) => *n != 0.0,
            Identifier::Text(s) => !s.is_empty(),
        }
    }

    /// A numeric identifier with a non-zero fractional part.
    pub fn is_fractional(&self) -> bool {
        match self {
            Identifier::Number(n) => n.fract() != 0.0,
            Identifier::Text(_) => false,
        }
    }

    /// Canonical text form, used as grouping and lookup key.
    /// Integer-valued numbers drop the trailing ".0".
    pub fn key(&self) -> String {
        match self {
            Identifier::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            Identifier::Number(n) => format!("{n}"),
            Identifier::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Text(value.to_string())
    }
}

impl From<f64> for Identifier {
    fn from(value: f64) -> Self {
        Identifier::Number(value)
    }
}

/// Replicate readings of one (gene, type, sample) combination.
///
/// Never mutated after construction; each normalization stage builds new
/// records through [`Measurement::with_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub data: Vec<Option<f64>>,
    pub gene_name: Option<String>,
    pub gene_type: Option<String>,
    pub identifier: Option<Identifier>,
}

impl Measurement {
    pub fn new(
        data: Vec<Option<f64>>,
        gene_name: Option<&str>,
        gene_type: Option<&str>,
        identifier: Option<Identifier>,
    ) -> Self {
        Self {
            data,
            gene_name: gene_name.map(str::to_string),
            gene_type: gene_type.map(str::to_string),
            identifier,
        }
    }

    /// Same labels, new readings.
    pub fn with_data(&self, data: Vec<Option<f64>>) -> Self {
        Self {
            data,
            gene_name: self.gene_name.clone(),
            gene_type: self.gene_type.clone(),
            identifier: self.identifier.clone(),
        }
    }

    pub fn has_identifier(&self) -> bool {
        self.identifier.as_ref().is_some_and(Identifier::is_present)
    }

    pub fn identifier_key(&self) -> Option<String> {
        self.identifier.as_ref().map(Identifier::key)
    }

    pub fn gene_label(&self) -> &str {
        self.gene_name.as_deref().unwrap_or("")
    }

    pub fn type_label(&self) -> &str {
        self.gene_type.as_deref().unwrap_or("")
    }

    pub fn replicate_count(&self) -> usize {
        self.data.len()
    }

    /// Subtracts `norm` from every present reading; absent stays absent.
    pub fn shifted_by(&self, norm: f64) -> Self {
        self.with_data(self.data.iter().map(|x| x.map(|v| v - norm)).collect())
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Measurement(gene_name={}, gene_type={}, identifier={}, data=[",
            self.gene_name.as_deref().unwrap_or("-"),
            self.gene_type.as_deref().unwrap_or("-"),
            match &self.identifier {
                Some(Identifier::Number(n)) => format!("{n:?}"),
                Some(Identifier::Text(s)) => format!("{s:?}"),
                None => "-".to_string(),
            },
        )?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match x {
                Some(v) => write!(f, "{v}")?,
                None => f.write_str("-")?,
            }
        }
        f.write_str("])")
    }
}

/// Arithmetic mean over present readings, `None` when nothing is present.
pub fn mean_present(data: &[Option<f64>]) -> Option<f64> {
    let mut sum = 0.0f64;
    let mut n = 0usize;
    for v in data.iter().flatten() {
        sum += v;
        n += 1;
    }
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Left-pads with zeros to `width` characters, keeping a leading sign in
/// front of the padding.
pub fn zero_pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let pad = "0".repeat(width - len);
    match s.chars().next() {
        Some(sign @ ('+' | '-')) => format!("{sign}{pad}{}", &s[1..]),
        _ => format!("{pad}{s}"),
    }
}
