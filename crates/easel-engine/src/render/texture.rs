use anyhow::{Context, Result};

/// Decoded RGBA8 pixels, row-major from the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl ImageData {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "image must not be empty ({width}x{height})");
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            rgba.len() == expected,
            "image data is {} bytes, expected {expected} for {width}x{height} RGBA8",
            rgba.len()
        );
        Ok(Self { width, height, rgba })
    }

    /// A single-colour image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width.max(1) as usize * height.max(1) as usize;
        Self {
            width: width.max(1),
            height: height.max(1),
            rgba: rgba.repeat(pixels),
        }
    }

    /// A two-colour checkerboard with `cell`-pixel squares.
    pub fn checkerboard(size: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let size = size.max(1);
        let cell = cell.max(1);
        let mut rgba = Vec::with_capacity(size as usize * size as usize * 4);
        for y in 0..size {
            for x in 0..size {
                let px = if (x / cell + y / cell) % 2 == 0 { a } else { b };
                rgba.extend_from_slice(&px);
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Fails when either side exceeds `max_dimension` texels.
    pub fn check_fits(&self, max_dimension: u32) -> Result<()> {
        anyhow::ensure!(
            self.width <= max_dimension && self.height <= max_dimension,
            "image is {}x{}, the device allows at most {max_dimension} texels per side",
            self.width,
            self.height
        );
        Ok(())
    }
}

/// A sampled 2D texture: nearest filtering, clamp-to-edge, no mipmaps.
pub struct Texture2D {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl Texture2D {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Uploads `image`; images larger than the device's 2D texture limit are rejected.
    pub fn from_image(device: &wgpu::Device, queue: &wgpu::Queue, image: &ImageData, label: &str) -> Result<Self> {
        image
            .check_fits(device.limits().max_texture_dimension_2d)
            .with_context(|| format!("cannot create texture `{label}`"))?;

        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        log::debug!("uploaded texture `{label}` ({}x{})", image.width, image.height);

        Ok(Self { texture, view, sampler })
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_length() {
        assert!(ImageData::new(2, 2, vec![0; 16]).is_ok());
        assert!(ImageData::new(2, 2, vec![0; 15]).is_err());
        assert!(ImageData::new(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn solid_fills_every_pixel() {
        let img = ImageData::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(img.rgba().len(), 24);
        assert!(img.rgba().chunks(4).all(|px| px == [1, 2, 3, 4]));
    }

    #[test]
    fn checkerboard_alternates() {
        let a = [255, 255, 255, 255];
        let b = [0, 0, 0, 255];
        let img = ImageData::checkerboard(4, 2, a, b);
        let px = |x: usize, y: usize| &img.rgba()[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
        assert_eq!(px(0, 0), a);
        assert_eq!(px(2, 0), b);
        assert_eq!(px(2, 2), a);
        assert_eq!(px(1, 3), b);
    }

    #[test]
    fn oversized_images_do_not_fit() {
        let img = ImageData::solid(10, 4, [0, 0, 0, 255]);
        assert!(img.check_fits(10).is_ok());
        assert!(img.check_fits(8192).is_ok());

        let err = img.check_fits(8).unwrap_err();
        assert!(err.to_string().contains("10x4"));
        assert!(ImageData::solid(2, 9, [0; 4]).check_fits(8).is_err());
    }
}
