use phf::{Map, phf_map};

// Standard atomic weights (IUPAC, natural isotopic abundance), in g/mol.
#[rustfmt::skip]
static STANDARD_ATOMIC_WEIGHTS: Map<&'static str, f64> = phf_map! {
    // --- Period 1 ---
    "H"  => 1.008,   "He" => 4.0026,

    // --- Period 2 ---
    "Li" => 6.94,    "Be" => 9.0122,  "B"  => 10.81,   "C"  => 12.011,
    "N"  => 14.007,  "O"  => 15.999,  "F"  => 18.998,  "Ne" => 20.180,

    // --- Period 3 ---
    "Na" => 22.990,  "Mg" => 24.305,  "Al" => 26.982,  "Si" => 28.085,
    "P"  => 30.974,  "S"  => 32.06,   "Cl" => 35.45,   "Ar" => 39.948,

    // --- Period 4 ---
    "K"  => 39.098,  "Ca" => 40.078,  "Ti" => 47.867,  "Cr" => 51.996,
    "Mn" => 54.938,  "Fe" => 55.845,  "Co" => 58.933,  "Ni" => 58.693,
    "Cu" => 63.546,  "Zn" => 65.38,   "Ga" => 69.723,  "Ge" => 72.630,
    "As" => 74.922,  "Se" => 78.971,  "Br" => 79.904,  "Kr" => 83.798,

    // --- Period 5 ---
    "Rb" => 85.468,  "Sr" => 87.62,   "Pd" => 106.42,  "Ag" => 107.87,
    "Cd" => 112.41,  "In" => 114.82,  "Sn" => 118.71,  "Sb" => 121.76,
    "Te" => 127.60,  "I"  => 126.90,  "Xe" => 131.29,

    // --- Period 6 ---
    "Cs" => 132.91,  "Ba" => 137.33,  "Pt" => 195.08,  "Au" => 196.97,
    "Hg" => 200.59,  "Pb" => 207.2,   "Bi" => 208.98,
};

/// Returns the standard atomic weight of an element symbol, `0.0` if unknown.
pub fn standard_atomic_weight(symbol: &str) -> f64 {
    STANDARD_ATOMIC_WEIGHTS
        .get(symbol.trim())
        .copied()
        .unwrap_or(0.0)
}

pub fn is_known_element(symbol: &str) -> bool {
    STANDARD_ATOMIC_WEIGHTS.contains_key(symbol.trim())
}
