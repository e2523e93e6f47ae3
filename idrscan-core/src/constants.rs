// =============================================================================
// =============================================================================

/// Version string for idrscan
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Domain decomposition defaults
// =============================================================================

/// Default disorder score cutoff; residues scoring strictly above it are disordered
pub const DEFAULT_DISORDER_THRESHOLD: f64 = 0.42;

/// Disordered runs of this many residues or fewer are discarded
pub const DEFAULT_MINIMUM_IDR_SIZE: usize = 12;

/// Gaps shorter than this are candidates for reclassification as disordered
pub const DEFAULT_MINIMUM_FOLDED_DOMAIN: usize = 50;

/// Largest gap size closed between two disordered stretches
pub const DEFAULT_GAP_CLOSURE: usize = 10;

/// Second folded-domain size tier
pub const FOLDED_DOMAIN_MIN_SIZE_1: usize = 35;

/// Third folded-domain size tier
pub const FOLDED_DOMAIN_MIN_SIZE_2: usize = 20;

/// Fraction of the threshold a gap below `minimum_folded_domain` must exceed
pub const TIER_1_THRESHOLD_FACTOR: f64 = 0.75;

/// Fraction of the threshold a gap below [`FOLDED_DOMAIN_MIN_SIZE_1`] must exceed
pub const TIER_2_THRESHOLD_FACTOR: f64 = 0.35;

/// Fraction of the threshold a gap below [`FOLDED_DOMAIN_MIN_SIZE_2`] must exceed
pub const TIER_3_THRESHOLD_FACTOR: f64 = 0.25;

// =============================================================================
// Smoothing
// =============================================================================

/// Savitzky-Golay window length
pub const DEFAULT_SMOOTHING_WINDOW: usize = 25;

/// Savitzky-Golay polynomial order
pub const DEFAULT_POLY_ORDER: usize = 3;

// =============================================================================
// Mask values
// =============================================================================

/// Mask value for an ordered residue
pub const ORDERED: u8 = 0;

/// Mask value for a disordered residue
pub const DISORDERED: u8 = 1;

/// Padding value marking the ends of the mask during size filtering
pub const BOUNDARY: u8 = 2;

// =============================================================================
// Built-in propensity scorer
// =============================================================================

/// Window used to average residue propensities
pub const DEFAULT_PROPENSITY_WINDOW: usize = 15;

/// Steepness of the logistic applied to the averaged propensity
pub const PROPENSITY_LOGISTIC_SLOPE: f64 = 5.0;
