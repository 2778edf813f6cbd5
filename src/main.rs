fn main() {
    std::process::exit(bundle_launcher_lib::run());
}
