//! Namespace-qualified queries over a parsed COLLADA document tree.
//!
//! COLLADA elements live in a fixed XML namespace, so a plain name match
//! is not enough: every lookup here compares both the local element name
//! and the resolved namespace. Zero matches is a normal outcome for all
//! of these functions, never an error.

use std::borrow::Cow;

use xmltree::{Element, XMLNode};

/// The COLLADA schema namespace. Every element we query is expected to
/// be qualified with this namespace.
pub const COLLADA_NS: &str = "http://www.collada.org/2005/11/COLLADASchema";

fn matches(el: &Element, local: &str) -> bool {
    el.name == local && el.namespace.as_deref() == Some(COLLADA_NS)
}

/// All direct child elements, regardless of name or namespace.
pub fn elements(el: &Element) -> impl Iterator<Item = &Element> {
    el.children.iter().filter_map(XMLNode::as_element)
}

/// Direct children with the given local name in the COLLADA namespace.
pub fn children<'a>(el: &'a Element, local: &str) -> Vec<&'a Element> {
    elements(el).filter(|child| matches(child, local)).collect()
}

/// First direct child with the given local name, or `None`.
pub fn child<'a>(el: &'a Element, local: &str) -> Option<&'a Element> {
    elements(el).find(|child| matches(child, local))
}

/// Chained direct-child descent along a `a/b/c` path of local names.
pub fn find<'a>(el: &'a Element, path: &str) -> Option<&'a Element> {
    let mut current = el;
    for segment in path.split('/') {
        current = child(current, segment)?;
    }
    Some(current)
}

/// First direct child with the given local name carrying `attr="value"`.
///
/// This is the attribute-predicate lookup used to resolve an identifier
/// to its defining element within a library section.
pub fn child_with_attr<'a>(
    el: &'a Element,
    local: &str,
    attr: &str,
    value: &str,
) -> Option<&'a Element> {
    elements(el)
        .filter(|child| matches(child, local))
        .find(|child| child.attributes.get(attr).map(String::as_str) == Some(value))
}

/// First direct child of any element name whose `id` attribute equals `id`.
///
/// Accessor `source` references point at a sibling array element whose
/// name varies (`float_array`, `Name_array`, ...), so this match is a
/// wildcard over the element name.
pub fn child_by_id<'a>(el: &'a Element, id: &str) -> Option<&'a Element> {
    elements(el).find(|child| child.attributes.get("id").map(String::as_str) == Some(id))
}

/// Concatenated text content of an element, empty if it has none.
pub fn text(el: &Element) -> Cow<'_, str> {
    el.get_text().unwrap_or(Cow::Borrowed(""))
}
