// Build script for multitool - embeds version at compile time

fn main() {
    // Packagers can stamp their own version; otherwise use Cargo.toml
    let version = std::env::var("MULTITOOL_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=MULTITOOL_VERSION={}", version);

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=MULTITOOL_VERSION");
}
