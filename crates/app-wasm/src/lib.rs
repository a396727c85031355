//! Read & Sign WASM build
//!
//! Binds the signature pad and form controller to the page's DOM. All
//! widget state lives in [`FormController`]; this crate only translates
//! browser events in and mirrors the controller's view back out.

use std::cell::RefCell;
use std::rc::Rc;

use readsign_form::{run_submission, Effect, FormController, TimerKind};
use readsign_ipc::WidgetEvent;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod backend;
mod dom;
mod events;
mod timers;

use backend::AnyBackend;
use dom::Elements;
use timers::BrowserTimers;

thread_local! {
    /// The mounted widget, kept for [`teardown`]
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

/// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        // A second init (e.g. hot reload) only fails to replace the logger
        let _ = console_log::init_with_level(log::Level::Info);
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let app = App::mount(window, document)?;
    events::install(&app)?;
    APP.with(|slot| *slot.borrow_mut() = Some(app));

    info!("Read & Sign initialized");
    Ok(())
}

/// Cancel every pending timer of the mounted widget and detach it. Listeners
/// stay registered but no longer change anything or start timers.
#[wasm_bindgen]
pub fn teardown() {
    APP.with(|slot| {
        if let Some(app) = slot.borrow().as_ref() {
            app.form.borrow_mut().teardown();
        }
    });
}

/// One widget instance on the page
pub(crate) struct App {
    window: Window,
    document: Document,
    dom: Elements,
    form: RefCell<FormController<BrowserTimers>>,
    backend: AnyBackend,
}

impl App {
    fn mount(window: Window, document: Document) -> Result<Rc<Self>, JsValue> {
        let config = dom::read_config(&document);
        let dom = Elements::lookup(&document)?;
        let backend = AnyBackend::from_config(&config.submit);
        let form = FormController::new(&config, BrowserTimers::new(window.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let app = Rc::new(Self {
            window,
            document,
            dom,
            form: RefCell::new(form),
            backend,
        });
        app.form.borrow().timers().bind(Rc::downgrade(&app));
        app.sync_controls();
        Ok(app)
    }

    /// Feed one page event to the controller and refresh the page
    fn dispatch(&self, event: WidgetEvent) {
        let effects = self.form.borrow_mut().handle(event);
        self.refresh(&effects);
    }

    /// Seed the controller from the controls as the page shows them now.
    /// Covers restored, autofilled and markup-default values, which arrive
    /// without input events.
    fn sync_controls(&self) {
        let events = self.dom.read_controls(&self.document);
        {
            let mut form = self.form.borrow_mut();
            for event in events {
                form.handle(event);
            }
        }
        self.render();
    }

    fn on_timer(&self, kind: TimerKind) {
        let effects = self.form.borrow_mut().on_timer(kind);
        self.refresh(&effects);
    }

    /// Size the pad to the canvas as currently laid out
    fn setup_canvas(&self) {
        let rect = self.dom.canvas_rect();
        let dpr = self.window.device_pixel_ratio() as f32;
        let effects = self.form.borrow_mut().setup_canvas(rect, dpr);
        self.refresh(&effects);
    }

    fn is_drawing(&self) -> bool {
        self.form.borrow().pad().is_drawing()
    }

    async fn submit(self: Rc<Self>) {
        self.sync_controls();
        let outcome =
            run_submission(&self.form, &self.backend, |effects| self.refresh(effects)).await;
        debug!("Submission finished: {:?}", outcome);
    }

    fn refresh(&self, effects: &[Effect]) {
        // Render first so the dialog is visible before it takes focus
        self.render();
        self.apply(effects);
    }

    fn render(&self) {
        self.dom.render(&self.form.borrow().view());
    }

    /// The controller is only borrowed for painting; the other effects can
    /// fire DOM events synchronously that dispatch back into it.
    fn apply(&self, effects: &[Effect]) {
        for effect in effects {
            match *effect {
                Effect::RepaintCanvas => self.dom.paint(self.form.borrow().pad().surface()),
                Effect::RepaintRegion {
                    x,
                    y,
                    width,
                    height,
                } => self.dom.paint_region(
                    self.form.borrow().pad().surface(),
                    x,
                    y,
                    width,
                    height,
                ),
                Effect::ReportValidity(violation) => {
                    debug!("Form not submittable: {}", violation);
                    self.dom.form.report_validity();
                }
                Effect::ResetForm => {
                    self.dom.form.reset();
                    self.sync_controls();
                }
                Effect::FocusDialogOk => {
                    if let Err(e) = self.dom.ok_button.focus() {
                        warn!("Could not focus dialog button: {:?}", e);
                    }
                }
            }
        }
    }
}
