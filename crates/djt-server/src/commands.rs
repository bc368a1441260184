use serde_json::Value;
use tower_lsp_server::ls_types;

/// Reports the template the given document extends.
pub const SHOW_TEMPLATE_HIERARCHY: &str = "djt.showTemplateHierarchy";

pub const COMMANDS: &[&str] = &[SHOW_TEMPLATE_HIERARCHY];

/// The document URI a command was invoked with.
///
/// Accepts a bare URI string or an object carrying it under `uri`.
pub fn uri_argument(arguments: &[Value]) -> Option<ls_types::Uri> {
    let text = match arguments.first()? {
        Value::String(text) => text.as_str(),
        Value::Object(object) => object.get("uri")?.as_str()?,
        _ => return None,
    };
    text.parse().ok()
}
