// Deterministic pseudo-random draws for seeded initialization.
//
// A plain linear congruential generator is enough here: the requirement is
// bit-for-bit reproducibility for a given seed across runs and platforms,
// not statistical quality.

pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next draw in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        (self.state >> 33) as f64 / (1u64 << 31) as f64
    }

    /// Uniform index in [0, n). Callers guarantee n >= 1.
    pub fn next_index(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n.saturating_sub(1))
    }

    /// Unit-norm vector of centered draws.
    pub fn unit_vector(&mut self, len: usize) -> Vec<f64> {
        let mut v: Vec<f64> = (0..len).map(|_| self.next_f64() - 0.5).collect();
        let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > f64::EPSILON {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}
