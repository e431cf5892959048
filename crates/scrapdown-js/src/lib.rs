//! WASM bindings for the scrapdown page.
//!
//! ```js
//! import init, { mount } from "scrapdown-js";
//! import md2sb from "md2sb";
//!
//! await init();
//! const page = mount(md2sb, { debounceMs: 300 });
//! ```

mod page;
mod types;

pub use page::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_tracing();
}

fn init_tracing() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let reg = Registry::default().with(wasm_layer);

    // A host page may have installed its own subscriber already.
    let _ = set_global_default(reg);
}
