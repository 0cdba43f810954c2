// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

// Conditional logging shim: uses `tracing` when enabled, the browser console on
// wasm32, and eprintln! everywhere else.

#[cfg(feature = "tracing")]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        tracing::warn!($($arg)*);
    }};
}

#[cfg(feature = "tracing")]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        tracing::info!($($arg)*);
    }};
}

#[cfg(feature = "tracing")]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        tracing::debug!($($arg)*);
    }};
}

#[cfg(all(not(feature = "tracing"), target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        web_sys::console::warn_1(&format!($($arg)*).into());
    }};
}

#[cfg(all(not(feature = "tracing"), target_arch = "wasm32"))]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        web_sys::console::log_1(&format!($($arg)*).into());
    }};
}

#[cfg(all(not(feature = "tracing"), target_arch = "wasm32"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        web_sys::console::debug_1(&format!($($arg)*).into());
    }};
}

#[cfg(all(not(feature = "tracing"), not(target_arch = "wasm32")))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
    }};
}

#[cfg(all(not(feature = "tracing"), not(target_arch = "wasm32")))]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
    }};
}

// Native builds without tracing drop debug output.
#[cfg(all(not(feature = "tracing"), not(target_arch = "wasm32")))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

pub(crate) use {log_debug, log_info, log_warn};
