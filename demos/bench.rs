use benchmarking::measure_function_with_times;
use std::time::Duration;

const SIDE: u32 = 128;

fn synthetic_wad(count: u32) -> Vec<u8> {
    let level_bytes: u32 = (0..4).map(|l| (SIDE >> l) * (SIDE >> l)).sum();
    let lump_size = 40 + level_bytes + 2 + 256 * 3;
    let directory_offset = 12 + count * lump_size;

    let mut wad = Vec::new();
    wad.extend(b"WAD3");
    wad.extend(count.to_le_bytes());
    wad.extend(directory_offset.to_le_bytes());

    let names: Vec<[u8; 16]> = (0..count)
        .map(|i| {
            let mut name = [0u8; 16];
            let label = format!("tex{i}");
            name[..label.len()].copy_from_slice(label.as_bytes());
            name
        })
        .collect();

    for name in &names {
        wad.extend(name);
        wad.extend(SIDE.to_le_bytes());
        wad.extend(SIDE.to_le_bytes());

        let mut offset = 40u32;

        for level in 0..4 {
            wad.extend(offset.to_le_bytes());
            offset += (SIDE >> level) * (SIDE >> level);
        }

        wad.extend((0..level_bytes).map(|p| (p * 7) as u8));
        wad.extend(256u16.to_le_bytes());
        wad.extend((0..256 * 3).map(|c| c as u8));
    }

    for (i, name) in names.iter().enumerate() {
        wad.extend((12 + i as u32 * lump_size).to_le_bytes());
        wad.extend((lump_size as i32).to_le_bytes());
        wad.extend((lump_size as i32).to_le_bytes());
        wad.extend([b'C', 0, 0, 0]);
        wad.extend(name);
    }

    wad
}

fn measure(parse: fn(&[u8]) -> bool, wad: &[u8]) -> Duration {
    let wad = wad.to_vec();

    let results = measure_function_with_times(10, move |measurer| {
        measurer.measure(|| {
            assert!(parse(&wad));
        });
    })
    .unwrap();

    results.elapsed()
}

fn main() {
    for count in [100, 1000, 3000] {
        let wad = synthetic_wad(count);

        let sequential =
            measure(|bytes| wad_util::parse(bytes).is_complete(), &wad);
        let parallel =
            measure(|bytes| wad_util::parse_parallel(bytes).is_complete(), &wad);

        println!(
            "{count} textures ({} KiB): sequential {:?}, parallel {:?}",
            wad.len() / 1024,
            sequential,
            parallel
        );
    }
}
