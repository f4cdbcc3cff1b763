#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG controls verbosity
    env_logger::init();

    // File dialogs run as tokio tasks
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    let _guard = runtime.enter();

    cynet_viewer::run_app()?;
    Ok(())
}

// The web build starts through `cynet_viewer::start_web`.
#[cfg(target_arch = "wasm32")]
fn main() {}
