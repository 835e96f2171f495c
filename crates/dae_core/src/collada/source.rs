//! Generic COLLADA source/accessor decoding.
//!
//! A COLLADA `source` wraps a flat whitespace-separated array plus an
//! `accessor` describing how to regroup it: the stride equals the number
//! of declared params, and each param names and types one tuple slot.

use xmltree::Element;

use super::types::Value;
use super::xml;
use super::{ExtractError, ExtractResult};

/// Declared type of one accessor param.
///
/// This is a closed vocabulary: anything other than floats and names is
/// a fatal error, deliberately not extensible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType {
    Float,
    Name,
}

impl ParamType {
    /// Map a `type` attribute to its caster.
    pub fn from_decl(decl: &str) -> ExtractResult<Self> {
        match decl {
            "float" => Ok(ParamType::Float),
            "name" | "Name" => Ok(ParamType::Name),
            other => Err(ExtractError::UnknownParamType(other.to_string())),
        }
    }

    /// Cast one raw token. Float parse failures are fatal, the document
    /// is malformed and no partial result is produced.
    pub fn cast(self, token: &str) -> ExtractResult<Value> {
        match self {
            ParamType::Float => token
                .parse::<f32>()
                .map(Value::Float)
                .map_err(|_| ExtractError::InvalidFloat(token.to_string())),
            ParamType::Name => Ok(Value::Name(token.to_string())),
        }
    }
}

/// Result of decoding one source: the ordered, lower-cased param names
/// and the regrouped tuples. Consumed immediately by the caller, never
/// persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedSource {
    pub fields: Vec<String>,
    pub tuples: Vec<Vec<Value>>,
}

/// Split raw array text on whitespace and regroup it into tuples of
/// length `casters.len()`, casting each token positionally.
///
/// A trailing group shorter than the stride is kept as-is; truncated
/// arrays are tolerated but logged so they stay observable.
pub fn parse_value_groups(text: &str, casters: &[ParamType]) -> ExtractResult<Vec<Vec<Value>>> {
    if casters.is_empty() {
        return Ok(Vec::new());
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if !tokens.is_empty() && tokens.len() % casters.len() != 0 {
        log::warn!(
            "value array holds {} tokens, not a multiple of stride {}; keeping partial trailing group",
            tokens.len(),
            casters.len()
        );
    }

    let mut groups = Vec::with_capacity(tokens.len() / casters.len() + 1);
    let mut group = Vec::with_capacity(casters.len());
    for (index, token) in tokens.iter().enumerate() {
        group.push(casters[index % casters.len()].cast(token)?);
        if group.len() == casters.len() {
            groups.push(std::mem::replace(&mut group, Vec::with_capacity(casters.len())));
        }
    }
    if !group.is_empty() {
        groups.push(group);
    }

    Ok(groups)
}

/// Decode a `source` element into named, typed tuples.
///
/// Returns `Ok(None)` when the source has no accessor or its array
/// reference does not resolve, both are treated as purely referential or
/// malformed-but-tolerated sources. Unknown param types and unparseable
/// floats are fatal.
pub fn decode_source(source: &Element) -> ExtractResult<Option<DecodedSource>> {
    let accessor = match xml::find(source, "technique_common/accessor") {
        Some(accessor) => accessor,
        None => return Ok(None),
    };

    // Intra-document fragment reference to the sibling array element
    let array_id = match accessor.attributes.get("source") {
        Some(url) => url.trim_start_matches('#'),
        None => return Ok(None),
    };
    let values = match xml::child_by_id(source, array_id) {
        Some(values) => values,
        None => return Ok(None),
    };

    let mut casters = Vec::new();
    let mut fields = Vec::new();
    for param in xml::children(accessor, "param") {
        let decl = param.attributes.get("type").map(String::as_str).unwrap_or("");
        casters.push(ParamType::from_decl(decl)?);
        let name = param.attributes.get("name").map(String::as_str).unwrap_or("");
        fields.push(name.to_lowercase());
    }

    let tuples = parse_value_groups(&xml::text(values), &casters)?;
    Ok(Some(DecodedSource { fields, tuples }))
}
