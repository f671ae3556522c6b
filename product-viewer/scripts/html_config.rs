use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

fn main() -> io::Result<()> {
    //  Environment variable parameter - the distributed directory
    let staging_dir = env::var("TRUNK_STAGING_DIR")
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;

    //  Using the configured html output name (set in Trunk.toml)
    let staged_html_path = PathBuf::from(staging_dir).join("ProductViewer.html");

    let html_change = fs::read_to_string(&staged_html_path)?;

    // Script paths must be relative so the viewer can live in any iframe subpath
    let html_change = html_change
        .replace("/product-viewer.js", "./product-viewer.js")
        .replace("/product-viewer_bg.wasm", "./product-viewer_bg.wasm");

    fs::write(staged_html_path, html_change)
}
