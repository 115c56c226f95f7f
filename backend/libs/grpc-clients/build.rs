fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Client and server stubs live together so the gateway and the backends
    // compile against one copy of each message type.
    let protos = [
        "../../proto/storefront/auth_service.proto",
        "../../proto/storefront/payment_service.proto",
    ];

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .type_attribute(".", "#[derive(serde::Serialize, serde::Deserialize)]")
        .type_attribute(".", "#[serde(default)]")
        .compile_protos(&protos, &["../../proto/storefront"])?;

    println!("cargo:rerun-if-changed=../../proto/storefront/");
    Ok(())
}
