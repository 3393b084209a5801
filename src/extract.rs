use sxd_document::Package;
use sxd_document::dom::{ChildOfElement, Document};
use sxd_xpath::Value;
use sxd_xpath::nodeset::Node;

use crate::error::{Field, Result, ScrapeError};
use crate::selectors::SiteSelectorSet;

/// Field values as they appear on the page, before any normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExtraction {
    pub cover_image: String,
    pub pages: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub publication_date: String,
}

pub fn parse_document(html: &str) -> Package {
    sxd_html::parse_html(html)
}

pub fn extract_fields(doc: &Document<'_>, selectors: &SiteSelectorSet) -> Result<RawExtraction> {
    let first = |field: Field| first_match(doc, field, selectors.expr(field));

    Ok(RawExtraction {
        cover_image: first(Field::CoverImage)?,
        pages: first(Field::Pages)?,
        title: first(Field::Title)?,
        content: first(Field::Content)?,
        author: first(Field::Author)?,
        publication_date: first(Field::PublicationDate)?,
    })
}

/// Evaluates `expr` and returns the text of its first match in document
/// order: attribute value for `@attr` steps; for elements, the leading text
/// before any child element when the field holds a short value (page count,
/// author, date), all descendant text otherwise.
pub fn first_match(doc: &Document<'_>, field: Field, expr: &str) -> Result<String> {
    let value = sxd_xpath::evaluate_xpath(doc, expr).map_err(|err| {
        ScrapeError::malformed(
            field.config_key(),
            format!("cannot evaluate {expr:?}: {err:?}"),
        )
    })?;

    let text = match value {
        Value::Nodeset(nodes) => nodes
            .document_order_first()
            .map(|node| node_text(node, field)),
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
    };

    match text {
        Some(text) if !text.is_empty() => {
            tracing::debug!(%field, expr, "field extracted");
            Ok(text)
        }
        _ => Err(ScrapeError::FieldNotFound {
            field,
            expr: expr.to_owned(),
        }),
    }
}

fn node_text(node: Node<'_>, field: Field) -> String {
    match node {
        Node::Element(element) if field.is_leading_text() => element
            .children()
            .into_iter()
            .next()
            .and_then(|child| match child {
                ChildOfElement::Text(text) => Some(text.text().to_owned()),
                _ => None,
            })
            .unwrap_or_default(),
        other => other.string_value(),
    }
}
