// The motion models are driven from the browser; native builds only run their tests.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod content;
mod cursor;
mod device;
mod easing;
mod motion;
mod navigation;
mod particles;
mod reveal;
mod scheduler;
mod scroll;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
