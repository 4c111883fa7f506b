fn main() {
    println!("cargo:rerun-if-changed=data/resources.gresource.xml");
    println!("cargo:rerun-if-changed=data/style.css");

    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR not set");
    let output = std::path::Path::new(&out_dir).join("genius.gresource");
    let status = std::process::Command::new("glib-compile-resources")
        .arg("--sourcedir=data")
        .arg("--target")
        .arg(&output)
        .arg("data/resources.gresource.xml")
        .status()
        .expect("failed to execute glib-compile-resources");

    if !status.success() {
        panic!("glib-compile-resources failed");
    }
}
