use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Font weight
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// One style property value. Keys live in [`CellStyle`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StyleValue {
    /// Color name or hex string, e.g. `"blue-100"` or `"#ff0000"`
    Color(String),
    Weight(FontWeight),
    Alignment(Alignment),
}

/// Open set of style keys (`"backgroundColor"`, `"fontWeight"`, ...) to closed values.
pub type CellStyle = FxHashMap<String, StyleValue>;

/// Raw cell content. Untagged in serde so `["John", 30]` reads naturally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Text(String::new())
    }
}

impl Scalar {
    /// True for the empty string, which is what unset cells hold.
    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.is_empty())
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// Render a number the way a browser's `String(n)` does, so that the text
/// parses back to the same value on import.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }
    // Exponent form with an explicit sign: 1e+21, 1.5e-7
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    pub value: Scalar,
    /// Edit-source text shown instead of the value while editing. Never evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
}

/// What reads return for positions that were never written.
pub static EMPTY_CELL: Cell = Cell {
    value: Scalar::Text(String::new()),
    formula: None,
    style: None,
};

impl Cell {
    pub fn new(value: impl Into<Scalar>) -> Self {
        Self {
            value: value.into(),
            formula: None,
            style: None,
        }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: StyleValue) -> Self {
        self.style
            .get_or_insert_with(CellStyle::default)
            .insert(key.into(), value);
        self
    }

    /// Text an edit session starts from: the formula if there is one, else the value.
    pub fn edit_text(&self) -> String {
        match self.formula.as_deref() {
            Some(formula) if !formula.is_empty() => formula.to_string(),
            _ => self.value.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_blank() && self.formula.is_none() && self.style.is_none()
    }
}
