use byte_bitmap::BitMap;
use tracing_subscriber::EnvFilter;

fn combinations(
    idx: usize,
    bitmap: &mut BitMap,
    seen: &mut Vec<String>,
) -> byte_bitmap::Result<()> {
    if idx == bitmap.bit_capacity() {
        let picks: Vec<bool> = bitmap.get_range(.., 1)?;
        println!("{picks:?} -> {}", bitmap.to_hex_string());
        seen.push(bitmap.to_hex_string());
        return Ok(());
    }
    if !bitmap.test(idx)? {
        bitmap.set(idx)?;
        combinations(idx + 1, bitmap, seen)?;
        bitmap.unset(idx)?;
    }
    combinations(idx + 1, bitmap, seen)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut bitmap = BitMap::new(4);
    let mut seen = Vec::new();
    combinations(0, &mut bitmap, &mut seen)?;

    let path = std::env::temp_dir().join("byte_bitmap_demo.bin");
    let first = BitMap::from_hex_string(&seen[0])?;
    first.save_to_file(&path)?;
    let loaded = BitMap::load_from_file(&path, Some(first.bit_capacity()))?;
    println!("reloaded {} from {}", loaded.to_binary_string(), path.display());
    std::fs::remove_file(&path)?;
    Ok(())
}
