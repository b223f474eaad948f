//! Script tags that bring gtag.js into the page, and the document surface they are written to.

use std::sync::Mutex;

use url::Url;

use crate::analytics::constants::GTAG_FUNCTION_NAME;
use crate::analytics::error::{script_injection_failed, AnalyticsResult};

/// A `<script>` element to append to the document head.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptTag {
    pub src: Option<String>,
    pub is_async: bool,
    pub inline: Option<String>,
}

/// The asynchronously loaded vendor library, `<script async src="{base}?id={site_id}">`.
pub fn loader_script(base_url: &str, site_id: &str) -> AnalyticsResult<ScriptTag> {
    let url = Url::parse_with_params(base_url, &[("id", site_id)])
        .map_err(|err| script_injection_failed(format!("invalid gtag script URL `{base_url}`: {err}")))?;
    Ok(ScriptTag {
        src: Some(url.into()),
        is_async: true,
        inline: None,
    })
}

/// Inline bootstrap defining the data layer and the global `gtag` function, followed by the
/// initial `js` and `config` calls.
pub fn bootstrap_script(data_layer: &str, site_id: &str) -> ScriptTag {
    let layer = js_string(data_layer);
    let id = js_string(site_id);
    let inline = format!(
        "\n        window[{layer}] = window[{layer}] || [];\n        \
         function {GTAG_FUNCTION_NAME}(){{window[{layer}].push(arguments);}}\n        \
         {GTAG_FUNCTION_NAME}('js', new Date());\n        \
         {GTAG_FUNCTION_NAME}('config', {id});"
    );
    ScriptTag {
        src: None,
        is_async: false,
        inline: Some(inline),
    }
}

// JSON string literals are valid JS string literals; `</` is split so the text cannot close the
// surrounding <script> element.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

/// The parts of the host document the adapter touches.
pub trait HostDocument: Send + Sync {
    fn append_to_head(&self, script: &ScriptTag) -> AnalyticsResult<()>;
    fn set_title(&self, title: &str);
    fn title(&self) -> String;
    fn location_href(&self) -> String;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryDocumentState {
    pub head: Vec<ScriptTag>,
    pub title: String,
    pub location: String,
}

/// Document stand-in for non-browser hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    state: Mutex<MemoryDocumentState>,
    fail_head_mutations: Mutex<bool>,
}

impl MemoryDocument {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(MemoryDocumentState {
                location: location.into(),
                ..Default::default()
            }),
            fail_head_mutations: Mutex::new(false),
        }
    }

    /// When enabled, `append_to_head` fails the way a locked-down DOM would.
    pub fn fail_head_mutations(&self, fail: bool) {
        *self.fail_head_mutations.lock().unwrap() = fail;
    }

    pub fn set_location(&self, location: impl Into<String>) {
        self.state.lock().unwrap().location = location.into();
    }

    pub fn head_scripts(&self) -> Vec<ScriptTag> {
        self.state.lock().unwrap().head.clone()
    }

    pub fn snapshot(&self) -> MemoryDocumentState {
        self.state.lock().unwrap().clone()
    }
}

impl HostDocument for MemoryDocument {
    fn append_to_head(&self, script: &ScriptTag) -> AnalyticsResult<()> {
        if *self.fail_head_mutations.lock().unwrap() {
            return Err(script_injection_failed("document head rejected the script element"));
        }
        self.state.lock().unwrap().head.push(script.clone());
        Ok(())
    }

    fn set_title(&self, title: &str) {
        self.state.lock().unwrap().title = title.to_string();
    }

    fn title(&self) -> String {
        self.state.lock().unwrap().title.clone()
    }

    fn location_href(&self) -> String {
        self.state.lock().unwrap().location.clone()
    }
}

#[cfg(all(target_arch = "wasm32", feature = "wasm-web"))]
pub use browser::BrowserDocument;

#[cfg(all(target_arch = "wasm32", feature = "wasm-web"))]
mod browser {
    use wasm_bindgen::JsCast;

    use super::{HostDocument, ScriptTag};
    use crate::analytics::error::{script_injection_failed, AnalyticsResult};

    /// The page's `window.document`.
    #[derive(Clone, Debug, Default)]
    pub struct BrowserDocument;

    impl BrowserDocument {
        pub fn new() -> Self {
            Self
        }

        fn document(&self) -> Option<web_sys::Document> {
            web_sys::window().and_then(|window| window.document())
        }
    }

    impl HostDocument for BrowserDocument {
        fn append_to_head(&self, tag: &ScriptTag) -> AnalyticsResult<()> {
            let document = self
                .document()
                .ok_or_else(|| script_injection_failed("Document not available"))?;
            let script = document
                .create_element("script")
                .map_err(|err| script_injection_failed(format!("Failed to create script: {err:?}")))?
                .dyn_into::<web_sys::HtmlScriptElement>()
                .map_err(|_| script_injection_failed("Script element has wrong type"))?;
            script.set_async(tag.is_async);
            if let Some(src) = &tag.src {
                script.set_src(src);
            }
            if let Some(inline) = &tag.inline {
                script.set_text(inline).map_err(|err| {
                    script_injection_failed(format!("Failed to set script text: {err:?}"))
                })?;
            }
            let head = document
                .head()
                .ok_or_else(|| script_injection_failed("No <head> element found"))?;
            head.append_child(&script)
                .map_err(|err| script_injection_failed(format!("Failed to append script to <head>: {err:?}")))?;
            Ok(())
        }

        fn set_title(&self, title: &str) {
            if let Some(document) = self.document() {
                document.set_title(title);
            }
        }

        fn title(&self) -> String {
            self.document().map(|document| document.title()).unwrap_or_default()
        }

        fn location_href(&self) -> String {
            web_sys::window()
                .and_then(|window| window.location().href().ok())
                .unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::constants::GTAG_URL;

    #[test]
    fn loader_script_is_async_with_site_id() {
        let tag = loader_script(GTAG_URL, "G-ABC123").unwrap();
        assert!(tag.is_async);
        assert_eq!(
            tag.src.as_deref(),
            Some("https://www.googletagmanager.com/gtag/js?id=G-ABC123")
        );
        assert_eq!(tag.inline, None);
    }

    #[test]
    fn loader_script_encodes_site_id() {
        let tag = loader_script(GTAG_URL, "G 1&x").unwrap();
        assert_eq!(
            tag.src.as_deref(),
            Some("https://www.googletagmanager.com/gtag/js?id=G+1%26x")
        );
    }

    #[test]
    fn loader_script_rejects_relative_base() {
        let err = loader_script("not a url", "G-1").unwrap_err();
        assert_eq!(err.code_str(), "analytics/script-injection");
    }

    #[test]
    fn bootstrap_defines_gtag_and_issues_js_then_config() {
        let tag = bootstrap_script("dataLayer", "G-ABC123");
        assert!(!tag.is_async);
        assert_eq!(tag.src, None);
        let inline = tag.inline.unwrap();
        assert!(inline.contains("window[\"dataLayer\"] = window[\"dataLayer\"] || [];"));
        assert!(inline.contains("function gtag(){window[\"dataLayer\"].push(arguments);}"));
        let js = inline.find("gtag('js', new Date());").unwrap();
        let config = inline.find("gtag('config', \"G-ABC123\");").unwrap();
        assert!(js < config);
    }

    #[test]
    fn bootstrap_escapes_site_id() {
        let inline = bootstrap_script("dataLayer", "x\"</script>").inline.unwrap();
        assert!(inline.contains(r#"gtag('config', "x\"<\/script>");"#));
    }

    #[test]
    fn memory_document_records_and_can_fail() {
        let document = MemoryDocument::new("https://example.com/");
        document.append_to_head(&ScriptTag::default()).unwrap();
        document.fail_head_mutations(true);
        assert!(document.append_to_head(&ScriptTag::default()).is_err());
        assert_eq!(document.head_scripts().len(), 1);

        document.set_title("Home");
        assert_eq!(document.title(), "Home");
        assert_eq!(document.location_href(), "https://example.com/");
    }
}
