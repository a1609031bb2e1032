use html::{Document, ElementData};

use crate::syntax::parse_declarations;

/// The raw `style` attribute of an element, if any.
pub fn get_inline_style(element: &ElementData) -> Option<&str> {
    element.attr("style")
}

/// Declarations of an element's `style` attribute. A property declared twice
/// keeps its last value.
fn specified_declarations(element: &ElementData) -> Vec<(String, String)> {
    let Some(inline) = get_inline_style(element) else {
        return Vec::new();
    };
    let mut winners: Vec<(String, String)> = Vec::new();
    for decl in parse_declarations(inline) {
        match winners.iter_mut().find(|(property, _)| *property == decl.name) {
            Some((_, value)) => *value = decl.value,
            None => winners.push((decl.name, decl.value)),
        }
    }
    winners
}

/// Store the specified declarations of every element's `style` attribute on
/// the element, ready for [`crate::StyleMap::compute`].
pub fn attach_inline_styles(doc: &mut Document) {
    let elements: Vec<_> = doc.ids().filter(|&id| doc.is_element(id)).collect();
    for id in elements {
        let Some(element) = doc.element(id) else {
            continue;
        };
        let declarations = specified_declarations(element);
        if !declarations.is_empty() {
            doc.set_specified_style(id, declarations);
        }
    }
}
