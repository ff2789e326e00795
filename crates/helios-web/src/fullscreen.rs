use helios_core::constants::WEBKIT_ALLOW_KEYBOARD_INPUT;
use helios_core::error::FullscreenError;
use helios_core::fullscreen::{FullscreenApi, FullscreenHost};
use wasm_bindgen::prelude::*;

/// Vendor-prefixed fullscreen API reached through the document.
pub struct BrowserFullscreen {
    document: web_sys::Document,
}

impl BrowserFullscreen {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Which prefixed API this browser exposes, if any.
    pub fn probe(&self) -> Option<FullscreenApi> {
        FullscreenApi::detect(|member| {
            js_sys::Reflect::has(self.document.as_ref(), &JsValue::from_str(member)).unwrap_or(false)
        })
    }
}

impl FullscreenHost for BrowserFullscreen {
    type Element = web_sys::Element;

    fn is_fullscreen(&self, api: FullscreenApi) -> Result<bool, FullscreenError> {
        let member = match api {
            FullscreenApi::Webkit => "webkitIsFullScreen",
            FullscreenApi::Moz => "mozFullScreen",
        };
        let value = js_sys::Reflect::get(self.document.as_ref(), &JsValue::from_str(member))
            .map_err(host_error)?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn request(
        &self,
        api: FullscreenApi,
        element: Option<&web_sys::Element>,
    ) -> Result<(), FullscreenError> {
        let target: JsValue = match element {
            Some(element) => element.clone().into(),
            None => self
                .document
                .body()
                .ok_or_else(|| FullscreenError::Host("document has no body".into()))?
                .into(),
        };
        match api {
            FullscreenApi::Webkit => call_method(
                &target,
                "webkitRequestFullScreen",
                &[JsValue::from(WEBKIT_ALLOW_KEYBOARD_INPUT)],
            ),
            FullscreenApi::Moz => call_method(&target, "mozRequestFullScreen", &[]),
        }
    }

    fn cancel(&self, api: FullscreenApi) -> Result<(), FullscreenError> {
        call_method(self.document.as_ref(), api.probe_member(), &[])
    }
}

fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<(), FullscreenError> {
    let method = js_sys::Reflect::get(target, &JsValue::from_str(name)).map_err(host_error)?;
    let method: js_sys::Function = method
        .dyn_into()
        .map_err(|_| FullscreenError::Host(format!("{name} is not a function")))?;
    let args: js_sys::Array = args.iter().collect();
    method.apply(target, &args).map_err(host_error)?;
    Ok(())
}

fn host_error(e: JsValue) -> FullscreenError {
    FullscreenError::Host(format!("{e:?}"))
}
