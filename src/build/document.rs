use serde::{Deserialize, Serialize};

/// One page of the documentation, as exported for indexing.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Page identifier, e.g. `sites/api-gateway`.
    pub docname: String,
    /// Source path, e.g. `sites/api-gateway.rst`.
    pub filename: String,
    pub title: String,
    /// Section headings. Their words are indexed as title terms.
    #[serde(default)]
    pub headings: Vec<String>,
    /// Body text.
    #[serde(default)]
    pub text: String,
    /// Objects documented on this page.
    #[serde(default)]
    pub objects: Vec<ObjectInput>,
}

/// A documented object (function, class, option, ...).
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInput {
    /// Full dotted name, e.g. `sphindex.format.parse_index`.
    pub name: String,
    /// Domain that registered the object, e.g. `py`.
    pub domain: String,
    /// Object type within the domain, e.g. `function`.
    #[serde(rename = "type")]
    pub objtype: String,
    /// Human-readable type name. Defaults to `objtype`.
    #[serde(default)]
    pub label: Option<String>,
    /// 0 important, 1 default, 2 unimportant, negative hidden.
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Fragment identifier on the page. Defaults to the full name.
    #[serde(default)]
    pub anchor: Option<String>,
}

fn default_priority() -> i32 {
    1
}

impl ObjectInput {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.objtype)
    }

    pub fn anchor(&self) -> &str {
        self.anchor.as_deref().unwrap_or(&self.name)
    }
}
