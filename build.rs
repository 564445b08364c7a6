use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    // Cross-compilation safe: check the target, not the host
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("macos") {
        return Ok(());
    }

    // Add framework search paths - order matters!
    println!(
        "cargo:rustc-link-search=framework=/Applications/Xcode.app/Contents/Developer/Platforms/\
         MacOSX.platform/Developer/SDKs/MacOSX.sdk/System/Library/Frameworks"
    );
    println!("cargo:rustc-link-search=framework=/System/Library/Frameworks");
    println!("cargo:rustc-link-search=framework=/Library/Frameworks");

    // Link required frameworks
    println!("cargo:rustc-link-lib=framework=IOKit");
    println!("cargo:rustc-link-lib=framework=CoreFoundation");
    println!("cargo:rustc-link-lib=framework=Metal");

    Ok(())
}
