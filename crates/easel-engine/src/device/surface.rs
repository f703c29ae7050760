use super::SurfaceErrorAction;

/// How canvas pixels are laid out for the swapchain format.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UploadLayout {
    /// `[B, G, R, A]` per pixel: the little-endian bytes of `0xAARRGGBB`.
    Bgra,
    /// `[R, G, B, A]` per pixel.
    Rgba,
}

impl UploadLayout {
    pub fn for_format(format: wgpu::TextureFormat) -> Option<Self> {
        match format {
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => Some(Self::Bgra),
            wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Writes `pixels` into `out` in this layout. `out` is resized as needed.
    pub fn encode(self, pixels: &[u32], out: &mut Vec<u8>) {
        out.clear();
        match self {
            UploadLayout::Bgra if cfg!(target_endian = "little") => {
                out.extend_from_slice(bytemuck::cast_slice(pixels));
            }
            UploadLayout::Bgra => {
                for p in pixels {
                    out.extend_from_slice(&p.to_le_bytes());
                }
            }
            UploadLayout::Rgba => {
                for p in pixels {
                    let [a, r, g, b] = p.to_be_bytes();
                    out.extend_from_slice(&[r, g, b, a]);
                }
            }
        }
    }
}

pub(crate) fn choose_surface_format(caps: &wgpu::SurfaceCapabilities, prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    let preferred: [wgpu::TextureFormat; 2] = if prefer_srgb {
        [wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb]
    } else {
        [wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8Unorm]
    };
    preferred
        .into_iter()
        .find(|f| caps.formats.contains(f))
        .or_else(|| {
            caps.formats
                .iter()
                .copied()
                .find(|f| UploadLayout::for_format(*f).is_some())
        })
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if config.width > 0 && config.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_for_common_formats() {
        assert_eq!(
            UploadLayout::for_format(wgpu::TextureFormat::Bgra8UnormSrgb),
            Some(UploadLayout::Bgra)
        );
        assert_eq!(
            UploadLayout::for_format(wgpu::TextureFormat::Rgba8Unorm),
            Some(UploadLayout::Rgba)
        );
        assert_eq!(UploadLayout::for_format(wgpu::TextureFormat::Rgba16Float), None);
    }

    #[test]
    fn encodings_reorder_channels() {
        let mut out = Vec::new();
        UploadLayout::Bgra.encode(&[0x80112233], &mut out);
        assert_eq!(out, vec![0x33, 0x22, 0x11, 0x80]);
        UploadLayout::Rgba.encode(&[0x80112233], &mut out);
        assert_eq!(out, vec![0x11, 0x22, 0x33, 0x80]);
    }
}
