fn main() {
    // Only emit the ESP-IDF link environment when building for the target.
    // Host builds (tests, clippy) skip it entirely.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
