//! Identifier extraction from undocumented page-rendering responses
//!
//! Two endpoints only make sense after scraping: search results come back as
//! a tree of page components with selling units buried inside, and bundle
//! relations only show up as component ids inside the serialized page. Both
//! routines are configured rather than hard-coded so a vendor format change
//! means a new [`ResponseSchema`] or pattern, not new traversal code.

use crate::error::{ApiError, ApiResult};
use crate::models::SellingUnit;
use crate::schema::ResponseSchema;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Component id prefix of bundle items on the bundle overview page
pub const BUNDLE_ITEM_PATTERN: &str = r"product-page-bundle-item-(s[0-9]+)";

/// Sole article id as it appears in serialized selling unit tiles
pub const SOLE_ARTICLE_ID_PATTERN: &str = r#""sole_article_id":"([0-9]+)""#;

/// Keys that lead from a page node to its children
const CHILD_KEYS: [&str; 3] = ["body", "child", "children"];

static BUNDLE_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(BUNDLE_ITEM_PATTERN).expect("bundle item pattern is valid"));

static SOLE_ARTICLE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(SOLE_ARTICLE_ID_PATTERN).expect("sole article id pattern is valid"));

/// Turns a raw response into something typed
pub trait Extractor {
    /// Extraction result
    type Output;

    /// Run the extraction over a decoded response body
    fn extract(&self, response: &Value) -> ApiResult<Self::Output>;
}

/// Collects selling units from a page-rendering tree
///
/// Walks the tree depth-first in document order, following `body`, `child`
/// and `children`, and picks up `content.<field>` for the first configured
/// field name that is present on a node. Depth counts `children` lists, so
/// `max_depth` 2 reaches nodes in a list inside a list below the root.
#[derive(Debug, Clone)]
pub struct SellingUnitExtractor {
    fields: Vec<String>,
    max_depth: usize,
}

impl SellingUnitExtractor {
    /// Extractor for a named response schema
    #[must_use]
    pub fn for_schema(schema: ResponseSchema) -> Self {
        Self {
            fields: schema
                .selling_unit_fields()
                .iter()
                .map(|f| (*f).to_string())
                .collect(),
            max_depth: schema.max_depth(),
        }
    }

    /// Extractor with explicit field names and depth limit
    pub fn new<I, S>(fields: I, max_depth: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            max_depth,
        }
    }

    fn visit(&self, node: &Value, depth: usize, out: &mut Vec<SellingUnit>) -> ApiResult<()> {
        match node {
            Value::Array(items) => {
                for item in items {
                    self.visit(item, depth, out)?;
                }
            }
            Value::Object(map) => {
                if let Some(unit) = self.selling_unit_of(node)? {
                    out.push(unit);
                }
                if depth >= self.max_depth {
                    return Ok(());
                }
                for key in CHILD_KEYS {
                    if let Some(child) = map.get(key) {
                        // `body` and `child` wrap a single node; only lists nest
                        let next = if key == "children" { depth + 1 } else { depth };
                        self.visit(child, next, out)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn selling_unit_of(&self, node: &Value) -> ApiResult<Option<SellingUnit>> {
        let Some(content) = node.get("content") else {
            return Ok(None);
        };
        let Some(raw) = self.fields.iter().find_map(|f| content.get(f.as_str())) else {
            return Ok(None);
        };

        let mut unit: SellingUnit = serde_json::from_value(raw.clone()).map_err(|e| {
            ApiError::parse(format!("selling unit could not be decoded: {e}"))
        })?;

        if unit.sole_article_id.is_none() {
            unit.sole_article_id = sole_article_id_in(node);
        }
        Ok(Some(unit))
    }
}

impl Default for SellingUnitExtractor {
    fn default() -> Self {
        Self::for_schema(ResponseSchema::default())
    }
}

impl Extractor for SellingUnitExtractor {
    type Output = Vec<SellingUnit>;

    fn extract(&self, response: &Value) -> ApiResult<Self::Output> {
        if !response.is_object() {
            warn!("search response root is not an object");
            return Err(ApiError::parse(
                "search response is not a page object; the page format may have changed",
            ));
        }

        let mut units = Vec::new();
        self.visit(response, 0, &mut units)?;
        debug!(count = units.len(), "extracted selling units");
        Ok(units)
    }
}

/// Scrapes bundle article ids from a bundle overview page
///
/// The whole page is serialized back to a string and searched with a regex
/// whose first capture group is the id. Ids are returned once each, in the
/// order they first appear.
///
/// A page without a single match is reported as [`ApiError::Parse`]. That
/// is also what a product without bundles looks like, so callers cannot tell
/// "no bundles" apart from "the page format changed".
#[derive(Debug, Clone)]
pub struct BundleIdExtractor {
    pattern: Regex,
    context: Option<String>,
}

impl BundleIdExtractor {
    /// Extractor with a custom pattern; capture group 1 must hold the id
    #[must_use]
    pub fn with_pattern(pattern: Regex) -> Self {
        Self {
            pattern,
            context: None,
        }
    }

    /// Name the article in error messages
    #[must_use]
    pub fn for_article(mut self, sole_article_id: impl Into<String>) -> Self {
        self.context = Some(sole_article_id.into());
        self
    }
}

impl Default for BundleIdExtractor {
    fn default() -> Self {
        Self::with_pattern(BUNDLE_ITEM_RE.clone())
    }
}

impl Extractor for BundleIdExtractor {
    type Output = Vec<String>;

    fn extract(&self, response: &Value) -> ApiResult<Self::Output> {
        let serialized = serde_json::to_string(response)?;
        let ids = unique_captures(&self.pattern, &serialized);

        if ids.is_empty() {
            let article = self.context.as_deref().unwrap_or("unknown article");
            warn!(article, "no bundle items found on bundle overview page");
            return Err(ApiError::parse(format!(
                "no bundle item ids found for {article}; the article has no bundles \
                 or the bundle overview page format changed"
            )));
        }
        Ok(ids)
    }
}

/// First sole article id mentioned anywhere inside a node
fn sole_article_id_in(node: &Value) -> Option<String> {
    let serialized = serde_json::to_string(node).ok()?;
    SOLE_ARTICLE_ID_RE
        .captures(&serialized)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Capture group 1 of every match, deduplicated, first-seen order
fn unique_captures(pattern: &Regex, haystack: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    pattern
        .captures_iter(haystack)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}
