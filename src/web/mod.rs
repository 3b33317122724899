//! Browser shell: creates the full-window canvas, preloads images, then runs
//! the session from a `requestAnimationFrame` loop with pointer and resize
//! listeners feeding it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window, window};

use crate::engine::Rng;
use crate::game::{GameConfig, GameScene, GameSession, assets};

mod loader;
mod render;

use loader::Images;

const CANVAS_ID: &str = "balloon-canvas";

struct WebGame {
    ctx: CanvasRenderingContext2d,
    images: Images,
    scene: GameScene,
    session: GameSession,
    last_ts: Option<f64>,
}

thread_local! {
    static GAME: RefCell<Option<WebGame>> = RefCell::new(None);
}

fn with_game<R>(f: impl FnOnce(&mut WebGame) -> R) -> Option<R> {
    GAME.with(|cell| cell.borrow_mut().as_mut().map(f))
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    launch(GameConfig::default())
}

/// Start with a JSON config; missing fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?;
    launch(config)
}

#[wasm_bindgen]
pub fn burst_count() -> u32 {
    with_game(|g| g.session.burst_count() as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn is_complete() -> bool {
    with_game(|g| g.session.is_complete()).unwrap_or(false)
}

fn launch(config: GameConfig) -> Result<(), JsValue> {
    // Already initialised when the page starts a second game.
    let _ = console_log::init_with_level(log::Level::Info);
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let (w, h) = viewport_size(&win);

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_attribute("style", "position:fixed; left:0; top:0; display:block;")?;
        body.set_attribute("style", "margin:0; overflow:hidden;")?;
        body.append_child(&c)?;
        c
    };
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let manifest = assets::manifest(&config.asset_base, config.pool_size);
    log::info!("loading {} assets", manifest.len());
    loader::load_all(manifest, move |images| {
        if let Err(err) = begin(config, canvas, ctx, images) {
            log::error!("failed to start balloon pump: {:?}", err);
        }
    })
}

fn begin(
    config: GameConfig,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: Images,
) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let mut scene = GameScene::new(w, h);
    let texture_size = |key: &str| {
        images
            .get(key)
            .map(|img| (img.natural_width() as f32, img.natural_height() as f32))
            .unwrap_or((0.0, 0.0))
    };
    let session = GameSession::new(config, &mut scene, texture_size, seed_rng(&win))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    GAME.with(|cell| {
        cell.replace(Some(WebGame {
            ctx,
            images,
            scene,
            session,
            last_ts: None,
        }))
    });
    attach_listeners(&win, &canvas)?;
    start_frame_loop();
    log::info!("balloon pump started at {}x{}", w, h);
    Ok(())
}

fn viewport_size(win: &Window) -> (f32, f32) {
    let w = win
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let h = win
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    (w as f32, h as f32)
}

fn seed_rng(win: &Window) -> Rng {
    let clock_seed = win.performance().map(|p| p.now().to_bits()).unwrap_or(1);
    #[cfg(feature = "rng")]
    {
        Rng::from_entropy(clock_seed)
    }
    #[cfg(not(feature = "rng"))]
    {
        Rng::new(clock_seed)
    }
}

fn attach_listeners(win: &Window, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // Pointer presses go to whatever sprite is on top.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let (x, y) = (evt.offset_x() as f32, evt.offset_y() as f32);
            with_game(|g| g.session.pointer_down(x, y, &mut g.scene));
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keep the canvas matched to the window.
    {
        let canvas_resize = canvas.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let Some(win) = window() else {
                return;
            };
            let (w, h) = viewport_size(&win);
            canvas_resize.set_width(w as u32);
            canvas_resize.set_height(h as u32);
            with_game(|g| g.session.resize(w, h, &mut g.scene));
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_game(|game| frame(game, ts));
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn frame(game: &mut WebGame, ts: f64) {
    let dt = game.last_ts.map(|last| (ts - last).max(0.0)).unwrap_or(0.0);
    game.last_ts = Some(ts);
    game.session.tick(dt as f32, &mut game.scene);
    if let Err(err) = render::draw(&game.ctx, &game.scene.stage, &game.images) {
        log::error!("draw failed: {:?}", err);
    }
}
