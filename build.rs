#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    let mut res = WindowsResource::new();
    res.set("FileDescription", "ntflow CLI")
        .set("ProductName", "ntflow")
        .set("OriginalFilename", "ntflow.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed resource metadata");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
