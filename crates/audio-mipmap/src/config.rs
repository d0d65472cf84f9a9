use crate::window::WindowFunction;

/// Tap count used for every pyramid level unless overridden.
pub const DEFAULT_TAPS: usize = 200;

/// Number of pyramid levels built when a caller has no preference.
pub const DEFAULT_DEPTH: usize = 4;

/// Pyramid build parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MipMapConfig {
    /// Number of levels including the unfiltered level 0.
    pub depth: usize,
    /// Kernel length for each filtered level.
    pub taps: usize,
    /// Window applied to each level's kernel.
    pub window: WindowFunction,
    /// Build levels and channels on the rayon pool.
    pub parallel: bool,
}

impl MipMapConfig {
    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

impl Default for MipMapConfig {
    /// 200-tap Hamming kernels, built sequentially.
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            taps: DEFAULT_TAPS,
            window: WindowFunction::Hamming,
            parallel: false,
        }
    }
}
