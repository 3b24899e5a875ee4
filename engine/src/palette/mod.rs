//! # Palette
//!
//! Derives six color roles from a wallpaper and publishes them as CSS custom
//! properties that the status bar and other consumers import:
//!
//! ```css
//! :root {
//!   --m3-primary: #282a36;
//!   --m3-secondary: #44475a;
//!   ...
//! }
//! ```
//!
//! The stylesheet is replaced atomically and only when its content would
//! change. A wallpaper that cannot be decoded leaves the previous file alone.
//!
//! A [`PalettePipeline`] keeps at most one detached extraction alive. Every
//! request takes a new generation; an extraction only writes while its
//! generation is still the latest, so a slow run for an old wallpaper can
//! never land after the palette of a newer one.

mod quantize;

pub use quantize::{Swatch, median_cut};

use crate::common::{PaletteError, TaskError};
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tempfile::NamedTempFile;
use tokio::task::{AbortHandle, JoinHandle};

/// Role names in population order.
pub const ROLES: [&str; 6] = [
    "primary",
    "secondary",
    "tertiary",
    "neutral",
    "surface",
    "outline",
];

/// Longest edge of the thumbnail that gets sampled.
pub const SAMPLE_EDGE: u32 = 340;

/// Six colors, one per entry of [`ROLES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [[u8; 3]; 6],
}

impl Palette {
    /// Build from raw pixels. Missing roles repeat the least populous
    /// cluster.
    pub fn from_pixels(pixels: &[[u8; 3]]) -> Option<Self> {
        let swatches = median_cut(pixels, ROLES.len());
        let last = swatches.last()?.rgb;
        let mut colors = [last; 6];
        for (slot, swatch) in colors.iter_mut().zip(&swatches) {
            *slot = swatch.rgb;
        }
        Some(Self { colors })
    }

    pub fn roles(&self) -> impl Iterator<Item = (&'static str, [u8; 3])> + '_ {
        ROLES.iter().copied().zip(self.colors.iter().copied())
    }

    pub fn hex(rgb: [u8; 3]) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
    }

    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (role, rgb) in self.roles() {
            let _ = writeln!(css, "  --m3-{role}: {};", Self::hex(rgb));
        }
        css.push_str("}\n");
        css
    }
}

/// Decode `image`, downsample it, and quantize it.
pub fn extract_palette(image: &Path) -> Result<Palette, PaletteError> {
    if !image.is_file() {
        return Err(PaletteError::NotFound {
            path: image.to_path_buf(),
        });
    }

    let decoded = image::open(image).map_err(|e| PaletteError::Decode {
        path: image.to_path_buf(),
        reason: e.to_string(),
    })?;
    let thumb = if decoded.width() > SAMPLE_EDGE || decoded.height() > SAMPLE_EDGE {
        decoded.thumbnail(SAMPLE_EDGE, SAMPLE_EDGE).to_rgb8()
    } else {
        decoded.to_rgb8()
    };
    let pixels: Vec<[u8; 3]> = thumb.pixels().map(|p| p.0).collect();

    Palette::from_pixels(&pixels).ok_or_else(|| PaletteError::Empty {
        path: image.to_path_buf(),
    })
}

/// Replace `path` with `css` unless it already holds exactly that.
///
/// Returns whether the file was written.
pub fn write_css_vars(path: &Path, css: &str) -> Result<bool, PaletteError> {
    if fs::read_to_string(path).is_ok_and(|current| current == css) {
        return Ok(false);
    }

    let write_err = |source| PaletteError::Write {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_err)?;

    // Unique temporary name so concurrent writers never share a file.
    let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(css.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(true)
}

/// Wallpaper to stylesheet pipeline bound to one output file.
#[derive(Debug)]
pub struct PalettePipeline {
    output: PathBuf,
    generation: AtomicU64,
    /// Held while checking the generation and writing.
    write_lock: Mutex<()>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl PalettePipeline {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            generation: AtomicU64::new(0),
            write_lock: Mutex::new(()),
            in_flight: Mutex::new(None),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Extract and write synchronously, superseding any detached run.
    /// Returns the palette and whether the stylesheet changed.
    pub fn update(&self, image: &Path) -> Result<(Palette, bool), PaletteError> {
        let generation = self.next_generation();
        let palette = extract_palette(image)?;
        let written = self.publish(generation, image, &palette)?;
        Ok((palette, written))
    }

    /// Run the extraction on the blocking pool and hand back a handle.
    ///
    /// A detached run still queued from an earlier call is aborted, and one
    /// already running is superseded: it finishes without writing.
    pub fn spawn_detached(self: &Arc<Self>, image: PathBuf) -> PaletteTask {
        let generation = self.next_generation();
        let pipeline = Arc::clone(self);
        let task_image = image.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let result = extract_palette(&task_image)
                .and_then(|palette| pipeline.publish(generation, &task_image, &palette));
            if let Err(e) = &result {
                log::warn!("Palette update failed: {e}");
            }
            result
        });

        let previous = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle.abort_handle());
        if let Some(previous) = previous {
            previous.abort();
        }

        PaletteTask { image, handle }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn publish(
        &self,
        generation: u64,
        image: &Path,
        palette: &Palette,
    ) -> Result<bool, PaletteError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Palette for {} superseded", image.display());
            return Ok(false);
        }

        let written = write_css_vars(&self.output, &palette.to_css())?;
        if written {
            log::info!(
                "Palette from {} written to {}",
                image.display(),
                self.output.display()
            );
        } else {
            log::debug!("Palette for {} unchanged", image.display());
        }
        Ok(written)
    }
}

/// Handle to a palette extraction running in the background.
#[derive(Debug)]
pub struct PaletteTask {
    image: PathBuf,
    handle: JoinHandle<Result<bool, PaletteError>>,
}

impl PaletteTask {
    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the extraction to finish. `false` when the stylesheet was
    /// already current or a newer request superseded this one.
    pub async fn wait(self) -> Result<bool, PaletteError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(false),
            Err(e) => Err(TaskError::Panicked(e.to_string()).into()),
        }
    }
}
