fn main() {
    // Compile the sensor telemetry proto
    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/sensor.proto"], &["proto"])
        .unwrap();

    println!("cargo:rerun-if-changed=proto/sensor.proto");
}
