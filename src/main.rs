//! Sword Swarm entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, KeyboardEvent, MouseEvent};

    use sword_swarm::renderer::{RenderState, frame_vertices};
    use sword_swarm::sim::{Surface, Swarm};
    use sword_swarm::{ConfigField, SwarmConfig};

    /// Controls wired to config fields: (element id, event, field, text mirror id)
    const CONTROLS: [(&str, &str, ConfigField, Option<&str>); 6] = [
        ("countControl", "input", ConfigField::Count, Some("countDisplay")),
        ("speedControl", "input", ConfigField::Speed, Some("speedDisplay")),
        ("radiusControl", "input", ConfigField::OrbitRadius, Some("radiusDisplay")),
        ("colorControl", "input", ConfigField::Color, None),
        ("trajectoryControl", "change", ConfigField::TrajectoryStyle, None),
        ("attackMode", "change", ConfigField::AttackMode, None),
    ];

    /// App instance holding all state
    struct App {
        swarm: Swarm,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// One display frame: advance the swarm, then draw it
        fn frame(&mut self) {
            self.swarm.tick();
            let vertices = frame_vertices(&self.swarm);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Match the canvas to the window and tell the swarm and GPU surface
        fn resize(&mut self) {
            let (logical_w, logical_h, dpr) = window_size();
            let width = (logical_w * dpr) as u32;
            let height = (logical_h * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);

            if let Some(ref mut render_state) = self.render_state {
                render_state.scale_factor = dpr as f32;
                render_state.resize(width, height);
            }
            self.swarm.on_resize(logical_w as f32, logical_h as f32);
        }
    }

    /// Window inner size in CSS pixels and the device pixel ratio
    fn window_size() -> (f64, f64, f64) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0, 1.0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w, h, window.device_pixel_ratio())
    }

    /// Current value of an input or select element
    fn control_value(el: &web_sys::Element) -> Option<String> {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        el.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sword Swarm starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = canvas
            .get_attribute("data-config")
            .map(|json| SwarmConfig::from_json_or_default(&json))
            .unwrap_or_default();

        let (logical_w, logical_h, dpr) = window_size();
        let width = (logical_w * dpr) as u32;
        let height = (logical_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let surface = Surface::new(logical_w as f32, logical_h as f32);
        let app = Rc::new(RefCell::new(App {
            swarm: Swarm::new(seed, surface, config),
            render_state: None,
            canvas: canvas.clone(),
        }));
        log::info!("Swarm initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, dpr as f32)
            .await
            .expect("Failed to create device");
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(app.clone());
        setup_controls(app.clone());

        request_animation_frame(app);

        log::info!("Sword Swarm running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Pointer movement
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .swarm
                    .on_pointer_move(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Space bar strikes
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    app.borrow_mut().swarm.trigger_attack();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Attack button
        if let Some(btn) = document.get_element_by_id("attackBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().swarm.trigger_attack();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for (id, event_name, field, display_id) in CONTROLS {
            let Some(el) = document.get_element_by_id(id) else {
                log::debug!("Control #{} not found, skipping", id);
                continue;
            };

            let display = display_id.and_then(|d| document.get_element_by_id(d));
            if let (Some(display), Some(value)) = (&display, initial_display(&app, field)) {
                display.set_text_content(Some(&value));
            }

            let app = app.clone();
            let source = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(value) = control_value(&source) else {
                    return;
                };
                if app.borrow_mut().swarm.apply_config(field, &value).is_ok() {
                    if let Some(ref display) = display {
                        display.set_text_content(Some(&value));
                    }
                }
            });
            let _ = el.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Text shown next to a numeric control before the user touches it
    fn initial_display(app: &Rc<RefCell<App>>, field: ConfigField) -> Option<String> {
        let app = app.borrow();
        let config = app.swarm.config();
        match field {
            ConfigField::Count => Some(config.count.to_string()),
            ConfigField::Speed => Some(config.speed.to_string()),
            ConfigField::OrbitRadius => Some(config.orbit_radius.to_string()),
            _ => None,
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            animation_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animation_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sword_swarm::SwarmConfig;

    env_logger::init();
    log::info!("Sword Swarm (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the interactive version");

    // Optional second blob replaces the config partway through the run
    let mut args = std::env::args().skip(1);
    let config = args
        .next()
        .map(|json| SwarmConfig::from_json_or_default(&json))
        .unwrap_or_default();
    let later = args.next().map(|json| SwarmConfig::from_json_or_default(&json));

    let snapshot = headless::run(config, later);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use sword_swarm::polar_to_cartesian;
    use sword_swarm::renderer::frame_vertices;
    use sword_swarm::sim::{Surface, Swarm, SwarmSnapshot};
    use sword_swarm::SwarmConfig;

    const FRAMES: u32 = 360;
    const STRIKE_FRAME: u32 = 120;
    const RECONFIGURE_FRAME: u32 = 240;

    /// Drive the swarm with a pointer circling the screen, strike once,
    /// optionally swap in `later`, and return where everything ended up
    pub fn run(config: SwarmConfig, mut later: Option<SwarmConfig>) -> SwarmSnapshot {
        let surface = Surface::default();
        let mut swarm = Swarm::new(0x5eed, surface, config);
        log::info!(
            "{} swords, attack mode {}",
            swarm.len(),
            swarm.config().attack_mode.as_str()
        );

        for frame in 0..FRAMES {
            let t = frame as f32 / 60.0;
            let pointer = surface.center() + polar_to_cartesian(150.0, t);
            swarm.on_pointer_move(pointer.x, pointer.y);

            if frame == STRIKE_FRAME {
                swarm.trigger_attack();
            }
            if frame == RECONFIGURE_FRAME {
                if let Some(next) = later.take() {
                    swarm.set_config(next);
                    log::info!("Reconfigured: {} swords", swarm.len());
                }
            }
            swarm.tick();

            if frame % 60 == 0 {
                let attacking = swarm.swords().iter().filter(|s| s.is_attacking()).count();
                log::info!("frame {}: {} attacking", frame, attacking);
            }
        }

        let vertices = frame_vertices(&swarm);
        log::info!("Final frame: {} vertices", vertices.len());
        swarm.snapshot()
    }
}
