use std::{env::var, path::Path};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let protos_path = Path::new(&var("CARGO_MANIFEST_DIR")?).join("../../protos");
    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(&[protos_path.join("ctrl.proto")], &[protos_path])?;
    Ok(())
}
