//! Submission backends for the browser

use chrono::{SecondsFormat, Utc};
use readsign_config::SubmitConfig;
use readsign_form::{SubmitBackend, SubmitError};
use readsign_ipc::{FormSnapshot, SubmitReceipt};
use tracing::info;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

fn js_error(value: JsValue) -> SubmitError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    SubmitError::Transport(message)
}

/// POSTs the snapshot as JSON and expects a JSON receipt back
pub struct FetchBackend {
    endpoint: String,
}

impl SubmitBackend for FetchBackend {
    async fn submit(&self, snapshot: FormSnapshot) -> Result<SubmitReceipt, SubmitError> {
        let body = snapshot
            .to_json()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&body));
        let request = Request::new_with_str_and_init(&self.endpoint, &init).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let window =
            web_sys::window().ok_or_else(|| SubmitError::Transport("Missing window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        if !response.ok() {
            return Err(SubmitError::Transport(format!(
                "HTTP {} {}",
                response.status(),
                response.status_text()
            )));
        }

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .ok_or_else(|| SubmitError::InvalidResponse("body is not text".into()))?;
        SubmitReceipt::from_json(&text).map_err(|e| SubmitError::InvalidResponse(e.to_string()))
    }
}

/// Accepts everything after a fixed delay; used when no endpoint is set
pub struct SimulatedBackend {
    delay_ms: u64,
}

impl SubmitBackend for SimulatedBackend {
    async fn submit(&self, snapshot: FormSnapshot) -> Result<SubmitReceipt, SubmitError> {
        info!(
            "Submitting data: {} {} ({}), {} / {} / {} / {} @ {}, read={} privacy={}",
            snapshot.first_name,
            snapshot.last_name,
            snapshot.staff_id,
            snapshot.position,
            snapshot.division,
            snapshot.department,
            snapshot.section,
            snapshot.location,
            snapshot.ack_read,
            snapshot.ack_priv
        );

        let delay = i32::try_from(self.delay_ms).unwrap_or(i32::MAX);
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().map(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, delay)
            });
            if !matches!(scheduled, Some(Ok(_))) {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        JsFuture::from(promise).await.map_err(js_error)?;

        Ok(SubmitReceipt {
            ok: true,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

pub enum AnyBackend {
    Fetch(FetchBackend),
    Simulated(SimulatedBackend),
}

impl AnyBackend {
    pub fn from_config(config: &SubmitConfig) -> Self {
        match config.endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => {
                info!("Submitting to {}", endpoint);
                AnyBackend::Fetch(FetchBackend {
                    endpoint: endpoint.to_string(),
                })
            }
            _ => {
                info!("No endpoint configured, using simulated backend");
                AnyBackend::Simulated(SimulatedBackend {
                    delay_ms: config.simulated_delay_ms,
                })
            }
        }
    }
}

impl SubmitBackend for AnyBackend {
    async fn submit(&self, snapshot: FormSnapshot) -> Result<SubmitReceipt, SubmitError> {
        match self {
            AnyBackend::Fetch(backend) => backend.submit(snapshot).await,
            AnyBackend::Simulated(backend) => backend.submit(snapshot).await,
        }
    }
}
