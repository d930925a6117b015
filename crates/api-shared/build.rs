//! Build script for the `api-shared` crate.
//!
//! Compiles `neofeed.proto` into Rust types for both APIs. Every generated message also derives
//! serde and utoipa traits so the REST layer can reuse it as a JSON body. A file-descriptor set is
//! written next to the generated code for gRPC reflection.

use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let proto_file = manifest_dir.join("neofeed.proto");
    let descriptor_path = Path::new(&std::env::var("OUT_DIR")?).join("neofeed_descriptor.bin");

    println!("cargo:rerun-if-changed={}", proto_file.display());

    tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .type_attribute(
            ".",
            "#[derive(serde::Serialize, serde::Deserialize, utoipa::ToSchema)]",
        )
        .file_descriptor_set_path(descriptor_path)
        .compile_protos(std::slice::from_ref(&proto_file), &[manifest_dir])?;

    Ok(())
}
