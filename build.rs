fn main() {
    // No-op when the ESP-IDF environment is absent (host-side test builds).
    embuild::espidf::sysenv::output();
}
