//! Cake Party entry point
//!
//! Handles platform-specific initialization and wires events to the scene.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use cake_party::audio::Microphone;
    use cake_party::codec;
    use cake_party::platform::{dom, spawn_frame_loop};
    use cake_party::renderer::{CanvasBackend, Sprite, Sprites, render_confetti, render_scene};
    use cake_party::scene::{Frame, Party, PartyEvent, to_canvas_with_offset};
    use cake_party::{CanvasSize, Settings};

    /// App instance holding all state
    struct App {
        party: Party,
        settings: Settings,
        size: CanvasSize,
        cake_layer: CanvasBackend,
        confetti_layer: CanvasBackend,
    }

    impl App {
        /// Redraw the cake and refresh the counter
        fn redraw(&self) {
            let candles = self.party.candles();
            self.cake_layer.execute(&render_scene(candles.candles(), self.size));
            dom::set_counter(&candles.counter_label());
        }

        /// Run one confetti frame and paint it
        fn confetti_frame(&mut self) -> Frame {
            let size = self.size;
            let layer = &self.confetti_layer;
            self.party
                .confetti_frame(|particles| layer.execute(&render_confetti(particles, size)))
        }
    }

    /// React to everything the party reported since the last call
    fn handle_events(app: &Rc<RefCell<App>>) {
        let events = app.borrow_mut().party.drain_events();
        let mut redrawn = false;
        for event in events {
            match event {
                PartyEvent::Redraw => {
                    // One redraw per batch is enough
                    if !redrawn {
                        app.borrow().redraw();
                        redrawn = true;
                    }
                }
                PartyEvent::AllExtinguished => dom::show_message(),
                PartyEvent::ConfettiStarted => {
                    let app = app.clone();
                    spawn_frame_loop("confetti", move |_time: f64| {
                        let frame = app.borrow_mut().confetti_frame();
                        handle_events(&app);
                        frame
                    });
                }
                PartyEvent::ConfettiFinished => log::info!("Confetti cleared"),
            }
        }
    }

    fn canvas_by_id(document: &web_sys::Document, id: &str) -> Option<HtmlCanvasElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Cake Party starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("no window/document");
            return;
        };
        let (Some(cake_canvas), Some(confetti_canvas)) = (
            canvas_by_id(&document, "cakeCanvas"),
            canvas_by_id(&document, "confettiCanvas"),
        ) else {
            log::error!("cakeCanvas/confettiCanvas missing");
            return;
        };

        // Both layers share the cake canvas dimensions
        confetti_canvas.set_width(cake_canvas.width());
        confetti_canvas.set_height(cake_canvas.height());

        let mut settings = Settings::load();
        settings.canvas_width = cake_canvas.width() as f32;
        settings.canvas_height = cake_canvas.height() as f32;
        let size = settings.canvas_size();

        let Some(sprites) = Sprites::load().map(Rc::new) else {
            log::error!("could not create image elements");
            return;
        };
        let (Some(cake_layer), Some(confetti_layer)) = (
            CanvasBackend::new(&cake_canvas, sprites.clone()),
            CanvasBackend::new(&confetti_canvas, sprites.clone()),
        ) else {
            log::error!("2d context unavailable");
            return;
        };

        let mut party = Party::new(&settings);
        let initial = codec::load_from_query(&dom::page_search());
        if !initial.is_empty() {
            party.load(initial);
        }

        let app = Rc::new(RefCell::new(App {
            party,
            settings,
            size,
            cake_layer,
            confetti_layer,
        }));
        app.borrow().redraw();
        handle_events(&app);

        // Images arrive asynchronously; paint again once each is ready
        for sprite in [Sprite::Cake, Sprite::Flame] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut()>::new(move || app.borrow().redraw());
            sprites
                .get(sprite)
                .set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        setup_click_handler(&cake_canvas, app.clone());
        setup_share_button(&document, app.clone());
        start_microphone(app);

        log::info!("Cake Party running!");
    }

    fn setup_click_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            {
                let mut a = app.borrow_mut();
                let pos = to_canvas_with_offset(
                    Vec2::new(event.client_x() as f32, event.client_y() as f32),
                    Vec2::new(rect.left() as f32, rect.top() as f32),
                    a.settings.pointer_y_offset,
                );
                a.party.click(pos.x, pos.y);
            }
            handle_events(&app);
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_share_button(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("shareBtn") else {
            log::warn!("shareBtn missing, sharing disabled");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let Some((origin, path)) = dom::page_base() else {
                log::error!("cannot read page location");
                return;
            };
            let url = codec::share_url(&origin, &path, app.borrow().party.candles().candles());
            wasm_bindgen_futures::spawn_local(dom::share(url));
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn start_microphone(app: Rc<RefCell<App>>) {
        wasm_bindgen_futures::spawn_local(async move {
            match Microphone::acquire().await {
                Ok(mic) => {
                    if !app.borrow_mut().party.attach_microphone(Box::new(mic)) {
                        return;
                    }
                    spawn_frame_loop("blow-monitor", move |_time: f64| {
                        let frame = app.borrow_mut().party.monitor_frame();
                        handle_events(&app);
                        frame
                    });
                }
                Err(e) => app.borrow_mut().party.microphone_failed(e),
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cake Party (native) starting...");
    log::info!("The interactive cake runs in the browser - build for wasm32 and serve index.html");

    headless_party();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted party: place candles, blow them out, let the confetti fall
#[cfg(not(target_arch = "wasm32"))]
fn headless_party() {
    use cake_party::codec;
    use cake_party::scene::{Frame, Party, PartyEvent};
    use cake_party::Settings;

    let settings = Settings::load();
    let mut party = Party::new(&settings);
    for x in [180.0, 240.0, 300.0, 360.0, 420.0] {
        party.click(x, 150.0);
    }
    println!("{}", party.candles().counter_label());
    println!(
        "Share token: {}",
        codec::encode(party.candles().candles())
    );

    party.blow();
    println!("{}", party.candles().counter_label());
    if party.drain_events().contains(&PartyEvent::AllExtinguished) {
        println!("🎉 Happy Birthday!");
    }

    let mut frames = 0;
    while party.confetti_frame(|_| {}) == Frame::Continue {
        frames += 1;
    }
    println!("Confetti fell for {frames} frames");
}
