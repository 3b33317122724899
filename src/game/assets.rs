// Asset manifest: texture keys and the files they load from.

pub const BACKGROUND: &str = "background";
pub const PUMP_HANDLE: &str = "pumpHandle";
pub const PUMP_BODY: &str = "pumpBody";
pub const PUMP_PIPE: &str = "pumpPipe";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub key: String,
    pub path: String,
}

fn balloon_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Texture key of pool slot `index` (`balloonA`, `balloonB`, ...).
pub fn balloon_key(index: usize) -> String {
    format!("balloon{}", balloon_letter(index))
}

/// Every image the game needs, in load order, with paths under `base`.
pub fn manifest(base: &str, pool_size: usize) -> Vec<AssetEntry> {
    let entry = |key: String, file: String| AssetEntry {
        key,
        path: format!("{}{}", base, file),
    };
    let mut out = vec![
        entry(BACKGROUND.to_string(), "Background.png".to_string()),
        entry(PUMP_HANDLE.to_string(), "Handle.png".to_string()),
        entry(PUMP_BODY.to_string(), "Body.png".to_string()),
        entry(PUMP_PIPE.to_string(), "Pipe.png".to_string()),
    ];
    for i in 0..pool_size {
        out.push(entry(
            balloon_key(i),
            format!("Balloon{}.png", balloon_letter(i)),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balloon_keys_are_lettered() {
        assert_eq!(balloon_key(0), "balloonA");
        assert_eq!(balloon_key(25), "balloonZ");
    }

    #[test]
    fn manifest_lists_pump_parts_then_balloons() {
        let m = manifest("assets/", 26);
        assert_eq!(m.len(), 30);
        assert_eq!(m[0].path, "assets/Background.png");
        assert_eq!(m[1].key, PUMP_HANDLE);
        assert_eq!(m[4].key, "balloonA");
        assert_eq!(m[4].path, "assets/BalloonA.png");
        assert_eq!(m[29].path, "assets/BalloonZ.png");
    }
}
