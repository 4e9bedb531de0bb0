//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use eltools_browser::BrowserNode;
use eltools_core::{ApplyOutcome, ElementSnapshot};

/// Configuration for an `ElementTools` instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ToolsConfig {
    /// When set, a plain click selects and interception stays active for
    /// successive selections. Otherwise a click must carry Cmd/Ctrl and
    /// selecting deactivates interception.
    #[serde(default)]
    pub toggle_mode: bool,
    /// Id of the preview iframe in the host page. Defaults to
    /// `previewiframe`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iframe_id: Option<String>,
    /// Class of the panel container whose subtree is never selectable.
    /// Defaults to `lc-element-tools-container`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_class: Option<String>,
}

/// One attribute on a selected element.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct AttributeJson {
    pub name: String,
    pub value: String,
}

/// Selected-element snapshot as handed to JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotJson {
    pub selector: String,
    pub tag_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub classes: Vec<String>,
    #[serde(rename = "innerHTML")]
    pub inner_html: String,
    #[serde(rename = "outerHTML")]
    pub outer_html: String,
    pub attributes: Vec<AttributeJson>,
    pub is_root: bool,
}

impl From<&ElementSnapshot<BrowserNode>> for SnapshotJson {
    fn from(snapshot: &ElementSnapshot<BrowserNode>) -> Self {
        Self {
            selector: snapshot.selector.clone(),
            tag_name: snapshot.tag_name.to_string(),
            id: snapshot.id.as_ref().map(|id| id.to_string()),
            classes: snapshot.classes.iter().map(|c| c.to_string()).collect(),
            inner_html: snapshot.inner_html.clone(),
            outer_html: snapshot.outer_html.clone(),
            attributes: snapshot
                .attributes
                .iter()
                .map(|(name, value)| AttributeJson {
                    name: name.to_string(),
                    value: value.clone(),
                })
                .collect(),
            is_root: snapshot.is_root(),
        }
    }
}

/// Transient apply status surfaced to the panel UI.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct StatusJson {
    /// `"saving"`, `"success"` or `"error"`.
    pub status: String,
    pub message: String,
}

impl StatusJson {
    pub fn saving() -> Self {
        Self {
            status: "saving".to_string(),
            message: "Saving changes...".to_string(),
        }
    }
}

impl From<&ApplyOutcome> for StatusJson {
    fn from(outcome: &ApplyOutcome) -> Self {
        Self {
            status: outcome.status.as_str().to_string(),
            message: outcome.message.clone(),
        }
    }
}
