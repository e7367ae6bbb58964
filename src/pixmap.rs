use thiserror::Error;

use super::Color;

/// A half-open rectangular pixel region `[min_x, max_x) × [min_y, max_y)`.
///
/// Coordinates are signed and the minima need not be zero, matching the
/// bounds descriptors of common decoders (sub-images, cropped views).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Inclusive left edge.
    pub min_x: i32,
    /// Inclusive top edge.
    pub min_y: i32,
    /// Exclusive right edge.
    pub max_x: i32,
    /// Exclusive bottom edge.
    pub max_y: i32,
}

impl Bounds {
    /// Creates a bounds region from its four edges.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Bounds {
        Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a `width × height` region with its origin at `(0, 0)`.
    pub fn of_size(width: u32, height: u32) -> Bounds {
        Bounds::new(0, 0, width as i32, height as i32)
    }

    /// Width in pixels, clamped at zero for inverted bounds.
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).max(0) as u32
    }

    /// Height in pixels, clamped at zero for inverted bounds.
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).max(0) as u32
    }

    /// Total number of pixels in the region.
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Returns `true` if the region contains no pixels.
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Returns `true` if `(x, y)` lies inside the region.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}

/// Read access to a decoded raster image.
///
/// This is the engine's input contract: per-pixel RGBA reads over a
/// rectangular bounds region. Implementations must return the same pixel for
/// the same coordinates for the duration of a call into the engine.
pub trait PixelSource {
    /// The addressable region of the image.
    fn bounds(&self) -> Bounds;

    /// The color at `(x, y)`.
    ///
    /// Callers only pass coordinates inside [`bounds`](PixelSource::bounds);
    /// implementations may panic otherwise.
    fn pixel(&self, x: i32, y: i32) -> Color;
}

/// Errors from [`Pixmap`] construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PixmapError {
    /// The supplied pixel buffer does not cover the bounds exactly.
    #[error("pixel buffer length {len} does not match bounds {width}x{height}")]
    LengthMismatch {
        /// Length of the supplied buffer.
        len: usize,
        /// Width of the requested bounds.
        width: u32,
        /// Height of the requested bounds.
        height: u32,
    },
}

/// An owned RGBA image stored in row-major order.
///
/// This is the engine's output type, and doubles as a convenient input for
/// tests and callers that already hold raw pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    bounds: Bounds,
    data: Vec<Color>,
}

impl Pixmap {
    /// Creates a fully transparent pixmap covering `bounds`.
    pub fn new(bounds: Bounds) -> Pixmap {
        Pixmap::filled(bounds, Color::new(0, 0, 0, 0))
    }

    /// Creates a pixmap covering `bounds` with every pixel set to `color`.
    pub fn filled(bounds: Bounds, color: Color) -> Pixmap {
        Pixmap {
            bounds,
            data: vec![color; bounds.area()],
        }
    }

    /// Wraps a row-major pixel buffer.
    ///
    /// The buffer length must equal `bounds.area()`.
    pub fn from_raw(bounds: Bounds, data: Vec<Color>) -> Result<Pixmap, PixmapError> {
        if data.len() != bounds.area() {
            return Err(PixmapError::LengthMismatch {
                len: data.len(),
                width: bounds.width(),
                height: bounds.height(),
            });
        }
        Ok(Pixmap { bounds, data })
    }

    /// Deep-copies any [`PixelSource`] into an owned pixmap.
    pub fn from_source<S: PixelSource + ?Sized>(source: &S) -> Pixmap {
        let bounds = source.bounds();
        let mut data = Vec::with_capacity(bounds.area());
        for y in bounds.min_y..bounds.max_y {
            for x in bounds.min_x..bounds.max_x {
                data.push(source.pixel(x, y));
            }
        }
        Pixmap { bounds, data }
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// Panics if `(x, y)` is outside the bounds.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        let index = self.index(x, y);
        self.data[index] = color;
    }

    /// The underlying row-major pixel buffer.
    pub fn data(&self) -> &[Color] {
        &self.data
    }

    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.bounds.contains(x, y),
            "pixel ({x}, {y}) outside bounds {:?}",
            self.bounds
        );
        let row = (y - self.bounds.min_y) as usize;
        let col = (x - self.bounds.min_x) as usize;
        row * self.bounds.width() as usize + col
    }
}

impl PixelSource for Pixmap {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        self.data[self.index(x, y)]
    }
}

#[cfg(feature = "image")]
impl PixelSource for image::RgbaImage {
    fn bounds(&self) -> Bounds {
        let (width, height) = self.dimensions();
        Bounds::of_size(width, height)
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        let image::Rgba([r, g, b, a]) = *self.get_pixel(x as u32, y as u32);
        Color::new(r, g, b, a)
    }
}
