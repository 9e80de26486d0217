fn main() {
    // Only the Node.js addon build needs the napi linker setup.
    if std::env::var_os("CARGO_FEATURE_NAPI").is_some() {
        napi_build::setup();
    }
}
