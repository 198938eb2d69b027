//! Full-viewport canvas animation driven by `requestAnimationFrame`.

use crate::dom;
use crate::particles::{PARTICLE_COUNT, ParticleField};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

const LINK_WIDTH: f64 = 0.8;

fn viewport(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn fit_canvas(canvas: &HtmlCanvasElement, (width, height): (f64, f64)) {
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
}

fn draw(ctx: &CanvasRenderingContext2d, field: &ParticleField, (width, height): (f64, f64)) {
    ctx.clear_rect(0.0, 0.0, width, height);

    let particles = field.particles();
    ctx.set_line_width(LINK_WIDTH);
    for link in field.links() {
        let (a, b) = (&particles[link.from], &particles[link.to]);
        ctx.begin_path();
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
        ctx.set_stroke_style_str(&link.stroke_style());
        ctx.stroke();
    }

    for p in particles {
        ctx.begin_path();
        if ctx.arc(p.x, p.y, p.radius, 0.0, TAU).is_ok() {
            ctx.set_fill_style_str(&p.fill_style());
            ctx.fill();
        }
    }
}

fn request_frame(window: &Window, cb: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window.request_animation_frame(cb.as_ref().unchecked_ref())
}

/// Size the canvas to the viewport and start the frame loop.
pub fn start(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into()?;

    let window = dom::window();
    let size = Rc::new(RefCell::new(viewport(&window)));
    fit_canvas(canvas, *size.borrow());

    let (width, height) = *size.borrow();
    let field = Rc::new(RefCell::new(ParticleField::new(
        &mut rand::thread_rng(),
        width,
        height,
        PARTICLE_COUNT,
    )));

    // ── Resize ──
    {
        let canvas = canvas.clone();
        let field = Rc::clone(&field);
        let size = Rc::clone(&size);
        let on_resize = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let viewport = viewport(&dom::window());
            fit_canvas(&canvas, viewport);
            *size.borrow_mut() = viewport;
            field.borrow_mut().resize(viewport.0, viewport.1);
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    // ── Frame loop ──
    // The closure re-schedules itself, so it holds a handle to its own slot.
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&frame);
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        draw(&ctx, &field.borrow(), *size.borrow());
        field.borrow_mut().step();
        if let Some(cb) = next.borrow().as_ref() {
            let _ = request_frame(&dom::window(), cb);
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = frame.borrow().as_ref() {
        request_frame(&window, cb)?;
    }
    Ok(())
}
