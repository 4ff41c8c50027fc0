use std::env;
use std::fs;
use std::path::Path;

// Copies config.toml and the default network beside the built binary,
// where Config::load looks first.
fn main() {
    println!("cargo:rerun-if-changed=config.toml");
    println!("cargo:rerun-if-changed=assets/network.json");

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .nth(3)
        .expect("OUT_DIR sits three levels below the profile directory");

    fs::copy("config.toml", target_dir.join("config.toml")).expect("copy config.toml");

    let assets_dir = target_dir.join("assets");
    fs::create_dir_all(&assets_dir).expect("create assets directory");
    fs::copy("assets/network.json", assets_dir.join("network.json"))
        .expect("copy assets/network.json");
}
