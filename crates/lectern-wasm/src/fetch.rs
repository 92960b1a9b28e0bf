use lectern_core::media::MediaFetcher;
use lectern_core::LecternError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

/// Fetches the media directory with `window.fetch`, relative to the page URL.
pub struct BrowserFetcher {
    window: Window,
}

impl BrowserFetcher {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

fn js_err(err: JsValue) -> LecternError {
    LecternError::Fetch(err.as_string().unwrap_or_else(|| "unknown js error".into()))
}

impl MediaFetcher for BrowserFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, LecternError> {
        tracing::debug!(path, "Fetching media directory");
        let value = JsFuture::from(self.window.fetch_with_str(path))
            .await
            .map_err(js_err)?;
        let resp: Response = value.dyn_into().map_err(js_err)?;

        if !resp.ok() {
            return Err(LecternError::Status {
                status: resp.status(),
                path: path.to_string(),
            });
        }

        let body = JsFuture::from(resp.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        body.as_string()
            .ok_or_else(|| LecternError::Fetch("response body is not text".into()))
    }
}
