//! DOM lookup, rendering and control reading

use std::str::FromStr;

use readsign_config::ReadSignConfig;
use readsign_form::{FormView, StatusKind};
use readsign_ipc::{CanvasRect, Consent, FieldId, WidgetEvent};
use readsign_pad::PixelSurface;
use tracing::warn;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, Element, EventTarget, HtmlButtonElement,
    HtmlCanvasElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ImageData,
};

const CONFIG_ELEMENT_ID: &str = "readsign-config";
const CONSENT_IDS: [(&str, Consent); 2] =
    [("ackRead", Consent::Read), ("ackPriv", Consent::Privacy)];

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{id} has unexpected type")))
}

/// Configuration from the page's JSON script block, or defaults
pub fn read_config(document: &Document) -> ReadSignConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return ReadSignConfig::default();
    };

    match ReadSignConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            ReadSignConfig::default()
        }
    }
}

/// Every element the widget reads or writes
pub struct Elements {
    pub form: HtmlFormElement,
    pub submit: HtmlButtonElement,
    pub message: HtmlElement,
    pub canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Canvas parent; carries `has-signature` / `invalid`
    container: Element,
    signature_warning: HtmlElement,
    pub clear_button: HtmlButtonElement,
    consent_warning: HtmlElement,
    modal: HtmlElement,
    pub backdrop: Option<Element>,
    detail: HtmlElement,
    timer: HtmlElement,
    pub ok_button: HtmlButtonElement,
}

impl Elements {
    pub fn lookup(document: &Document) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = get_element(document, "signatureCanvas")?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let container = canvas
            .parent_element()
            .ok_or_else(|| JsValue::from_str("Signature canvas has no container"))?;
        let modal: HtmlElement = get_element(document, "successModal")?;
        let backdrop = modal.query_selector(".modal-backdrop")?;

        Ok(Self {
            form: get_element(document, "readSignForm")?,
            submit: get_element(document, "submitBtn")?,
            message: get_element(document, "formMessage")?,
            canvas,
            ctx,
            container,
            signature_warning: get_element(document, "signatureWarning")?,
            clear_button: get_element(document, "clearSignature")?,
            consent_warning: get_element(document, "consentWarning")?,
            modal,
            backdrop,
            detail: get_element(document, "successDetail")?,
            timer: get_element(document, "successTimer")?,
            ok_button: get_element(document, "successOkBtn")?,
        })
    }

    /// Every control's current value plus the page's own verdict, as the
    /// events an edit would have produced
    pub fn read_controls(&self, document: &Document) -> Vec<WidgetEvent> {
        let ids = FieldId::ALL
            .into_iter()
            .map(FieldId::name)
            .chain(CONSENT_IDS.map(|(id, _)| id));
        let mut events: Vec<WidgetEvent> = ids
            .filter_map(|id| match document.get_element_by_id(id) {
                Some(element) => control_event(&element),
                None => {
                    warn!("Missing form control #{}", id);
                    None
                }
            })
            .collect();
        events.push(self.validity());
        events
    }

    pub fn validity(&self) -> WidgetEvent {
        WidgetEvent::ValidityChanged {
            valid: self.form.check_validity(),
        }
    }

    pub fn canvas_rect(&self) -> CanvasRect {
        let rect = self.canvas.get_bounding_client_rect();
        CanvasRect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    /// Mirror the controller's view onto the page
    pub fn render(&self, view: &FormView) {
        let indicators = &view.indicators;
        toggle(&self.container, "has-signature", indicators.has_signature_style);
        toggle(&self.container, "invalid", indicators.signature_invalid);
        toggle(&self.signature_warning, "show", indicators.signature_warning);
        toggle(&self.consent_warning, "show", indicators.consent_warning);
        toggle(&self.submit, "loading", indicators.busy);
        self.submit.set_disabled(!indicators.submit_enabled);

        match &view.status {
            Some(status) => {
                self.message.set_text_content(Some(&status.text));
                self.message.set_class_name(match status.kind {
                    StatusKind::Info => "form-message show",
                    StatusKind::Error => "form-message show error",
                });
            }
            None => {
                self.message.set_class_name("form-message");
                self.message.set_text_content(None);
            }
        }

        match &view.dialog {
            Some(dialog) => {
                self.detail.set_text_content(Some(&dialog.detail));
                self.timer.set_text_content(Some(&dialog.timer_text));
                toggle(&self.modal, "show", true);
            }
            None => toggle(&self.modal, "show", false),
        }
    }

    /// Copy the whole surface to the canvas, resizing its backing store
    pub fn paint(&self, surface: &PixelSurface) {
        if self.canvas.width() != surface.width {
            self.canvas.set_width(surface.width);
        }
        if self.canvas.height() != surface.height {
            self.canvas.set_height(surface.height);
        }
        if surface.is_empty() {
            return;
        }
        self.put(surface.as_bytes(), surface.width, surface.height, 0, 0);
    }

    /// Copy one rectangle of the surface to the canvas
    pub fn paint_region(&self, surface: &PixelSurface, x: u32, y: u32, width: u32, height: u32) {
        if self.canvas.width() != surface.width || self.canvas.height() != surface.height {
            self.paint(surface);
            return;
        }

        let bytes = surface.as_bytes();
        let stride = surface.width as usize * 4;
        let row_len = width as usize * 4;
        let mut region = Vec::with_capacity(row_len * height as usize);
        for row in y..y + height {
            let start = row as usize * stride + x as usize * 4;
            match bytes.get(start..start + row_len) {
                Some(line) => region.extend_from_slice(line),
                None => {
                    warn!("Dirty region {}x{}+{}+{} outside surface", width, height, x, y);
                    return;
                }
            }
        }
        self.put(&region, width, height, x, y);
    }

    fn put(&self, bytes: &[u8], width: u32, height: u32, x: u32, y: u32) {
        let result = ImageData::new_with_u8_clamped_array_and_sh(Clamped(bytes), width, height)
            .and_then(|image| self.ctx.put_image_data(&image, x as f64, y as f64));
        if let Err(e) = result {
            warn!("Canvas paint failed: {:?}", e);
        }
    }
}

fn toggle(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        warn!("Could not toggle .{}: {:?}", class, e);
    }
}

/// Translate an `input`/`change` event target into a widget event
pub fn control_event(target: &EventTarget) -> Option<WidgetEvent> {
    let element = target.dyn_ref::<Element>()?;
    let id = element.id();

    let consent = CONSENT_IDS
        .into_iter()
        .find_map(|(consent_id, consent)| (consent_id == id).then_some(consent));
    if let Some(consent) = consent {
        let checked = element.dyn_ref::<HtmlInputElement>()?.checked();
        return Some(WidgetEvent::ConsentChanged { consent, checked });
    }

    let field = FieldId::from_str(&id).ok()?;
    Some(WidgetEvent::FieldChanged {
        field,
        value: control_value(element)?,
    })
}

fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else {
        element.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
    }
}
