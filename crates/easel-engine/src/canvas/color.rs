//! Packed `0xAARRGGBB` color helpers.

pub const BLACK: u32 = 0xFF00_0000;
pub const WHITE: u32 = 0xFFFF_FFFF;
/// Default sketch background.
pub const DEFAULT_BACKGROUND: u32 = 0xFFCC_CCCC;

pub fn gray(v: u8) -> u32 {
    rgb(v, v, v)
}

pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    argb(0xFF, r, g, b)
}

pub fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    u32::from_be_bytes([a, r, g, b])
}

pub fn alpha(c: u32) -> u8 {
    (c >> 24) as u8
}

/// Source-over compositing of `src` onto `dst`.
pub fn blend(dst: u32, src: u32) -> u32 {
    let sa = alpha(src) as u32;
    match sa {
        0 => dst,
        255 => src,
        _ => {
            let [da, dr, dg, db] = dst.to_be_bytes();
            let [_, sr, sg, sb] = src.to_be_bytes();
            let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * (255 - sa) + 127) / 255) as u8;
            let out_a = (sa + (da as u32 * (255 - sa) + 127) / 255).min(255) as u8;
            argb(out_a, mix(sr, dr), mix(sg, dg), mix(sb, db))
        }
    }
}

/// Inverts the color channels, keeping alpha.
pub fn invert(c: u32) -> u32 {
    (c & 0xFF00_0000) | (!c & 0x00FF_FFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing() {
        assert_eq!(rgb(0x12, 0x34, 0x56), 0xFF123456);
        assert_eq!(gray(0xCC), DEFAULT_BACKGROUND);
        assert_eq!(alpha(argb(0x80, 0, 0, 0)), 0x80);
    }

    #[test]
    fn blending_extremes() {
        assert_eq!(blend(BLACK, WHITE), WHITE);
        assert_eq!(blend(BLACK, 0x00FFFFFF), BLACK);
        assert_eq!(blend(BLACK, argb(0x80, 0xFF, 0xFF, 0xFF)), 0xFF808080);
    }

    #[test]
    fn invert_keeps_alpha() {
        assert_eq!(invert(0x80102030), 0x80EFDFCF);
    }
}
