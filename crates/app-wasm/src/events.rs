//! Event listener wiring

use std::rc::Rc;

use readsign_ipc::{PointerInput, TouchPoint, WidgetEvent};
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, KeyboardEvent, MouseEvent, TouchEvent, TouchList,
};

use crate::dom;
use crate::App;

/// Attach every listener the widget needs. Listeners live as long as the
/// page.
pub fn install(app: &Rc<App>) -> Result<(), JsValue> {
    install_canvas(app)?;
    install_form(app)?;
    install_dialog(app)?;
    install_window(app)?;
    prevent_gestures(&app.document)?;
    Ok(())
}

fn listen(
    target: &EventTarget,
    name: &str,
    passive: Option<bool>,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    match passive {
        Some(passive) => {
            let options = AddEventListenerOptions::new();
            options.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                name,
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
        }
        None => {
            target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())?
        }
    }
    callback.forget();
    Ok(())
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|touch| TouchPoint {
            client_x: touch.client_x() as f32,
            client_y: touch.client_y() as f32,
        })
        .collect()
}

fn pointer_input(event: &Event) -> PointerInput {
    // Desktop browsers may not define TouchEvent at all, so no instanceof
    if event.type_().starts_with("touch") {
        let touch = event.unchecked_ref::<TouchEvent>();
        return PointerInput::touch(
            touch_points(&touch.touches()),
            touch_points(&touch.changed_touches()),
        );
    }
    match event.dyn_ref::<MouseEvent>() {
        Some(mouse) => PointerInput::mouse(mouse.client_x() as f32, mouse.client_y() as f32),
        None => PointerInput::default(),
    }
}

fn install_canvas(app: &Rc<App>) -> Result<(), JsValue> {
    let canvas: &EventTarget = &app.dom.canvas;

    for (name, passive) in [("touchstart", Some(false)), ("mousedown", None)] {
        let app = app.clone();
        listen(canvas, name, passive, move |event| {
            event.prevent_default();
            app.dispatch(WidgetEvent::PenDown {
                input: pointer_input(&event),
                rect: app.dom.canvas_rect(),
            });
        })?;
    }

    for (name, passive) in [("touchmove", Some(false)), ("mousemove", None)] {
        let app = app.clone();
        listen(canvas, name, passive, move |event| {
            if !app.is_drawing() {
                return;
            }
            event.prevent_default();
            app.dispatch(WidgetEvent::PenMove {
                input: pointer_input(&event),
                rect: app.dom.canvas_rect(),
            });
        })?;
    }

    let stops: [(&str, Option<bool>, fn() -> WidgetEvent); 4] = [
        ("touchend", Some(false), || WidgetEvent::PenUp),
        ("touchcancel", Some(false), || WidgetEvent::PenCancel),
        ("mouseup", None, || WidgetEvent::PenUp),
        ("mouseleave", None, || WidgetEvent::PenLeave),
    ];
    for (name, passive, make) in stops {
        let app = app.clone();
        listen(canvas, name, passive, move |event| {
            event.prevent_default();
            app.dispatch(make());
        })?;
    }

    let clear_app = app.clone();
    listen(&app.dom.clear_button, "click", None, move |_| {
        clear_app.dispatch(WidgetEvent::ClearSignature);
    })?;

    Ok(())
}

fn install_form(app: &Rc<App>) -> Result<(), JsValue> {
    let form: &EventTarget = &app.dom.form;

    for name in ["input", "change"] {
        let app = app.clone();
        listen(form, name, None, move |event| {
            if let Some(event) = event.target().as_ref().and_then(dom::control_event) {
                app.dispatch(event);
                app.dispatch(app.dom.validity());
            }
        })?;
    }

    let submit_app = app.clone();
    listen(form, "submit", None, move |event| {
        event.prevent_default();
        wasm_bindgen_futures::spawn_local(submit_app.clone().submit());
    })?;

    Ok(())
}

fn install_dialog(app: &Rc<App>) -> Result<(), JsValue> {
    let ok_app = app.clone();
    listen(&app.dom.ok_button, "click", None, move |_| {
        ok_app.dispatch(WidgetEvent::DialogOk);
    })?;

    match &app.dom.backdrop {
        Some(backdrop) => {
            let backdrop_app = app.clone();
            listen(backdrop, "click", None, move |_| {
                backdrop_app.dispatch(WidgetEvent::DialogBackdrop);
            })?;
        }
        None => warn!("Success dialog has no .modal-backdrop"),
    }

    let key_app = app.clone();
    listen(&app.document, "keydown", None, move |event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            key_app.dispatch(WidgetEvent::KeyDown { key: event.key() });
        }
    })?;

    Ok(())
}

fn install_window(app: &Rc<App>) -> Result<(), JsValue> {
    let resize_app = app.clone();
    listen(&app.window, "resize", None, move |_| {
        resize_app.dispatch(WidgetEvent::Resize {
            rect: resize_app.dom.canvas_rect(),
            device_pixel_ratio: resize_app.window.device_pixel_ratio() as f32,
        });
    })?;

    if app.document.ready_state() == "complete" {
        after_layout(app)
    } else {
        let load_app = app.clone();
        listen(&app.window, "load", None, move |_| {
            if let Err(e) = after_layout(&load_app) {
                warn!("Canvas setup not scheduled: {:?}", e);
            }
        })
    }
}

/// Size the canvas two animation frames from now, once fonts and layout
/// have settled
fn after_layout(app: &Rc<App>) -> Result<(), JsValue> {
    let window = app.window.clone();
    let setup_app = app.clone();
    let first_frame = Closure::once_into_js(move || {
        let second_frame = Closure::once_into_js(move || setup_app.setup_canvas());
        if let Err(e) = window.request_animation_frame(second_frame.unchecked_ref()) {
            warn!("requestAnimationFrame failed: {:?}", e);
        }
    });
    app.window
        .request_animation_frame(first_frame.unchecked_ref())?;
    Ok(())
}

/// Keep iOS pinch gestures from zooming the page while signing
fn prevent_gestures(document: &EventTarget) -> Result<(), JsValue> {
    for name in ["gesturestart", "gesturechange", "gestureend"] {
        listen(document, name, Some(false), |event| event.prevent_default())?;
    }
    Ok(())
}
