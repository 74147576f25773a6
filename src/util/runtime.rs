//! Tokio runtime helper for synchronous entry points.

/// Run an async future to completion from synchronous code.
///
/// Handles two scenarios:
/// 1. If a multi-threaded Tokio runtime is already running, uses `block_in_place`.
/// 2. Otherwise builds a multi-threaded runtime for the duration of the call.
///
/// # Errors
/// Returns an error if a runtime could not be built.
pub fn run_async<F, T>(future: F) -> std::io::Result<T>
where
    F: std::future::Future<Output = T>,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => Ok(tokio::task::block_in_place(|| handle.block_on(future))),
        Err(_) => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            Ok(rt.block_on(future))
        }
    }
}

#[cfg(test)]
#[path = "runtime_test.rs"]
mod tests;
