//! Analysis constants and reference values
//!
//! Compile-time defaults for every pipeline stage. The sampling, clustering
//! and scene values seed [`AnalyzerConfig`](crate::AnalyzerConfig); the
//! matching values are fixed.

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 represents average daylight with a correlated
/// color temperature of 6504K. Lab values are reported relative to it.
pub mod d65 {
    /// D65 white point in CIE XYZ color space (Xn, Yn, Zn)
    /// Source: CIE 15:2004 Colorimetry, 3rd edition
    pub const WHITE_POINT_XYZ: [f32; 3] = [0.95047, 1.00000, 1.08883];

    /// Breakpoint between the cube-root and linear segments of the Lab transfer function
    pub const LAB_EPSILON: f32 = 0.008856;

    /// Slope of the linear Lab segment
    pub const LAB_LINEAR_SLOPE: f32 = 7.787;
}

/// Re-export D65 white point at top level for convenience
pub const D65_WHITE_POINT_XYZ: [f32; 3] = d65::WHITE_POINT_XYZ;

/// Pixel sampling and noise rejection
pub mod sampling {
    /// Pixels with alpha below this are treated as transparent
    pub const MIN_ALPHA: u8 = 128;

    /// `r + g + b` below this is shadow or sensor noise
    pub const MIN_CHANNEL_SUM: u32 = 30;

    /// `r + g + b` above this is glare or background
    pub const MAX_CHANNEL_SUM: u32 = 750;

    /// Adaptive stride table: (pixel count strictly above, stride)
    ///
    /// Ordered from the largest tier down; the first match wins.
    pub const STRIDE_TIERS: [(u64, usize); 4] = [
        (500_000, 50),
        (200_000, 25),
        (100_000, 15),
        (50_000, 8),
    ];

    /// Stride for images at or below the smallest tier
    pub const DEFAULT_STRIDE: usize = 4;

    /// Bytes per RGBA pixel
    pub const BYTES_PER_PIXEL: usize = 4;
}

/// K-means clustering parameters
pub mod clustering {
    /// Number of centroids seeded
    pub const CLUSTER_COUNT: usize = 8;

    /// Upper bound on refinement rounds
    pub const MAX_ITERATIONS: usize = 20;

    /// Total centroid displacement below which the loop stops
    pub const CONVERGENCE_THRESHOLD: f64 = 5.0;

    /// Clusters holding less than this percentage of samples are dropped
    pub const MIN_DOMINANCE: f32 = 1.0;

    /// Maximum number of colors reported
    pub const MAX_COLORS: usize = 6;

    /// Cluster confidence = min(MAX, BASE + dominance * WEIGHT), on a 0-100 scale
    pub const BASE_CONFIDENCE: f32 = 60.0;
    pub const DOMINANCE_WEIGHT: f32 = 2.0;
    pub const MAX_CONFIDENCE: f32 = 95.0;
}

/// Chemical matching heuristics
///
/// Coarse pattern rules, not colorimetry. Values and check order are kept
/// stable so rankings stay comparable with existing reference data.
pub mod matching {
    /// Range text contains the cluster's nearest color name
    pub const NAME_MATCH_SCORE: f32 = 0.9;

    /// Range mentions purple and the hex carries a purple/indigo byte
    pub const PURPLE_PATTERN_SCORE: f32 = 0.8;

    /// Range mentions blue and blue is the strongest channel
    pub const BLUE_DOMINANT_SCORE: f32 = 0.7;

    /// Range mentions orange and r > g > b
    pub const ORANGE_ORDER_SCORE: f32 = 0.7;

    /// Score when no rule fires
    pub const BASELINE_SCORE: f32 = 0.3;

    /// Hex fragments of the purple (#800080), dark magenta (#8b008b) and
    /// indigo (#4b0082) reference colors
    pub const PURPLE_HEX_FRAGMENTS: [&str; 3] = ["80", "8b", "4b"];

    /// Matches kept per color
    pub const MAX_MATCHES: usize = 3;
}

/// Lighting and image quality classification
pub mod scene {
    /// Mean brightness above this is bright
    pub const BRIGHT_ABOVE: f64 = 200.0;

    /// Mean brightness below this is dim
    pub const DIM_BELOW: f64 = 80.0;

    /// Mean brightness strictly inside (NORMAL_MIN, NORMAL_MAX) is normal;
    /// the remaining gaps classify as mixed
    pub const NORMAL_MIN: f64 = 120.0;
    pub const NORMAL_MAX: f64 = 180.0;

    /// Quality tiers: (resolution strictly above, RGB variance strictly above)
    pub const EXCELLENT: (u64, f64) = (1_000_000, 1000.0);
    pub const GOOD: (u64, f64) = (500_000, 500.0);
    pub const FAIR: (u64, f64) = (100_000, 200.0);

    /// Fewer surviving colors than this triggers the variation advisory
    pub const MIN_COLORS_FOR_VARIATION: usize = 3;
}
