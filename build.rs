use std::{env, fs, path::Path};

const CONFIG_FILE: &str = "config.json";

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_FILE}");

    // OUT_DIR = target/<profile>/build/<crate>-<hash>/out
    let Ok(out_dir) = env::var("OUT_DIR") else {
        println!("cargo:warning=OUT_DIR not set, {CONFIG_FILE} not copied");
        return;
    };

    // target/<profile> is three levels above OUT_DIR
    let Some(profile_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        println!("cargo:warning=cannot resolve target directory from {out_dir}");
        return;
    };

    let dst = profile_dir.join(CONFIG_FILE);
    if let Err(e) = fs::copy(CONFIG_FILE, &dst) {
        println!("cargo:warning=could not copy {CONFIG_FILE} to {}: {e}", dst.display());
    }
}
