fn main() {
    // Export ESP-IDF sysenv variables for the device build; a plain host
    // build (no `espidf` feature) has nothing to link against here.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
