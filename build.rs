use flate2::Compression;
use flate2::write::GzEncoder;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=assets/search");

    let out_dir = env::var("OUT_DIR").unwrap();
    let input_dir = "assets/search";
    let output_path = Path::new(&out_dir).join("searchdata.js.gz");

    // Collect the bundled index shards in sorted order so the embedded
    // table is deterministic across builds
    let mut shards: Vec<_> = fs::read_dir(input_dir)
        .expect("Failed to read assets/search")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "js"))
        .collect();
    shards.sort();

    let mut bundle = Vec::new();
    for shard in &shards {
        println!("cargo:rerun-if-changed={}", shard.display());
        let data =
            fs::read(shard).unwrap_or_else(|e| panic!("Failed to read {}: {}", shard.display(), e));
        bundle.extend_from_slice(&data);
        if !bundle.ends_with(b"\n") {
            bundle.push(b'\n');
        }
    }

    // Compress the concatenated shards
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(&bundle)
        .expect("Failed to compress bundled search index");
    let compressed = encoder.finish().expect("Failed to finish compression");

    fs::write(&output_path, &compressed).expect("Failed to write compressed search index");

    println!(
        "cargo:warning=Bundled search index: {} shard(s), {} bytes ({} bytes compressed)",
        shards.len(),
        bundle.len(),
        compressed.len()
    );
}
