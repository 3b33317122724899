// Image preloading. Every manifest entry gets an <img>; once the last one has
// loaded the ready callback runs with all of them keyed by texture key. A
// failed load is logged and the callback never runs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use crate::game::assets::AssetEntry;

pub(super) type Images = HashMap<String, HtmlImageElement>;

type ReadyFn = Box<dyn FnOnce(Images)>;

struct Pending {
    images: Images,
    remaining: usize,
    failed: bool,
    on_ready: Option<ReadyFn>,
}

pub(super) fn load_all(
    entries: Vec<AssetEntry>,
    on_ready: impl FnOnce(Images) + 'static,
) -> Result<(), JsValue> {
    let pending = Rc::new(RefCell::new(Pending {
        images: HashMap::with_capacity(entries.len()),
        remaining: entries.len(),
        failed: false,
        on_ready: Some(Box::new(on_ready)),
    }));

    for entry in entries {
        let img = HtmlImageElement::new()?;

        {
            let pending = pending.clone();
            let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
                // Take what we need out of the borrow before calling back into game code.
                let ready = {
                    let mut p = pending.borrow_mut();
                    p.remaining = p.remaining.saturating_sub(1);
                    if p.remaining == 0 && !p.failed {
                        p.on_ready
                            .take()
                            .map(|f| (f, std::mem::take(&mut p.images)))
                    } else {
                        None
                    }
                };
                if let Some((f, images)) = ready {
                    f(images);
                }
            }) as Box<dyn FnMut(_)>);
            img.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let pending = pending.clone();
            let path = entry.path.clone();
            let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
                log::error!("failed to load asset {}", path);
                pending.borrow_mut().failed = true;
            }) as Box<dyn FnMut(_)>);
            img.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        pending.borrow_mut().images.insert(entry.key, img.clone());
        img.set_src(&entry.path);
    }
    Ok(())
}
