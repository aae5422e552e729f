//! Browser bindings
//!
//! The JS side owns the three.js scene. Each animation frame it calls
//! [`Runner::frame`] and draws the returned snapshot; key and pointer events are
//! forwarded as they arrive. Everything shares the one JS thread, so input set by
//! an event handler is seen by the next frame.

use glam::{Vec2, Vec3};
use wasm_bindgen::prelude::*;

use crate::sim::{Camera, GamePhase, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Already initialized if the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// One game session driven from JS
#[wasm_bindgen]
pub struct Runner {
    state: GameState,
    input: TickInput,
    camera: Camera,
}

#[wasm_bindgen]
impl Runner {
    /// Create a runner; `tuning_json` may override any subset of the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<Runner, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        log::info!("Lane Runner created with seed {}", seed);
        Ok(Self {
            state: GameState::with_tuning(seed, tuning),
            input: TickInput::default(),
            camera: Camera::default(),
        })
    }

    /// The player model finished loading
    pub fn player_loaded(&mut self) {
        self.state.attach_player();
    }

    pub fn key_down(&mut self, code: &str) {
        match code {
            "KeyA" | "ArrowLeft" => self.input.keys.left = true,
            "KeyD" | "ArrowRight" => self.input.keys.right = true,
            "KeyW" | "ArrowUp" => self.input.keys.forward = true,
            "KeyS" | "ArrowDown" => self.input.keys.back = true,
            "Space" => self.input.jump = true,
            "KeyP" | "Escape" => self.input.pause = true,
            "KeyE" => self.input.activate_time_stop = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, code: &str) {
        match code {
            "KeyA" | "ArrowLeft" => self.input.keys.left = false,
            "KeyD" | "ArrowRight" => self.input.keys.right = false,
            "KeyW" | "ArrowUp" => self.input.keys.forward = false,
            "KeyS" | "ArrowDown" => self.input.keys.back = false,
            _ => {}
        }
    }

    pub fn start(&mut self) {
        self.input.start = true;
    }

    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn activate_time_stop(&mut self) {
        self.input.activate_time_stop = true;
    }

    /// Keep the pick camera in step with the render camera
    pub fn set_camera(&mut self, eye_x: f32, eye_y: f32, eye_z: f32, target_x: f32, target_y: f32, target_z: f32) {
        self.camera.eye = Vec3::new(eye_x, eye_y, eye_z);
        self.camera.target = Vec3::new(target_x, target_y, target_z);
    }

    /// Pointer click during time-stop; returns the zapped obstacle id
    pub fn zap(&mut self, x: f32, y: f32, width: f32, height: f32) -> Option<u32> {
        self.state
            .zap_at(&self.camera, Vec2::new(x, y), Vec2::new(width, height), now_ms())
    }

    /// Whether JS should keep requesting animation frames
    pub fn wants_frames(&self) -> bool {
        self.state.phase != GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.state.display_score()
    }

    /// Advance one frame and return the snapshot as JSON
    pub fn frame(&mut self) -> Result<String, JsValue> {
        self.input.now_ms = now_ms();
        tick(&mut self.state, &self.input);

        // Clear one-shot inputs after processing
        self.input.jump = false;
        self.input.pause = false;
        self.input.start = false;
        self.input.restart = false;
        self.input.activate_time_stop = false;

        for event in self.state.drain_events() {
            log::debug!("{:?}", event);
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&Snapshot::capture(&self.state)).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
