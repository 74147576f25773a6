// Ctrl+C handling: records that the user wants out and forwards the
// request to whichever studio is registered

use crate::studio::StudioHandle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Set once Ctrl+C was pressed
static APP_SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);

/// Studio that should be asked to stop recording on Ctrl+C
static STUDIO_HANDLE: Mutex<Option<StudioHandle>> = Mutex::new(None);

/// Mark the app as quitting
pub fn signal_shutdown() {
    APP_SHUTTING_DOWN.store(true, Ordering::SeqCst);
    crate::info!("Quit requested");
}

/// True once `signal_shutdown()` ran
pub fn is_shutting_down() -> bool {
    APP_SHUTTING_DOWN.load(Ordering::SeqCst)
}

/// Register the studio so the signal handler can stop an active recording
pub fn register_studio(handle: StudioHandle) {
    if let Ok(mut guard) = STUDIO_HANDLE.lock() {
        *guard = Some(handle);
    }
}

/// Forget the registered studio
pub fn unregister_studio() {
    if let Ok(mut guard) = STUDIO_HANDLE.lock() {
        *guard = None;
    }
}

/// Flag shutdown and ask the registered studio to stop recording
///
/// A recording in flight still finalizes so the take is not lost.
pub fn request_stop() -> bool {
    signal_shutdown();
    let handle = STUDIO_HANDLE.lock().ok().and_then(|g| g.as_ref().cloned());
    match handle {
        Some(handle) => handle.request_stop(),
        None => false,
    }
}

/// Install the Ctrl+C handler
pub fn install_signal_handler() {
    if let Err(e) = ctrlc::set_handler(|| {
        request_stop();
    }) {
        crate::warn!("Failed to set Ctrl+C handler: {}", e);
    }
}

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod tests;
