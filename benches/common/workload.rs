//! Score streams for top-N benchmarks.
//!
//! Every stream is deterministic for a given seed so runs stay comparable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Zipf};

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform scores in `[0, universe)`.
    Uniform,
    /// Strictly increasing scores; every element is admitted.
    Ascending,
    /// Strictly decreasing scores; everything after the first `n` is rejected.
    Descending,
    /// Few distinct scores; most elements tie.
    FewDistinct { distinct: u64 },
    /// Zipfian scores: low values are common, high values rare.
    Zipfian { exponent: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub universe: u64,
    pub workload: Workload,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn scores(self, len: usize) -> Vec<u64> {
        let universe = self.universe.max(1);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        match self.workload {
            Workload::Uniform => (0..len).map(|_| rng.random::<u64>() % universe).collect(),
            Workload::Ascending => (0..len as u64).collect(),
            Workload::Descending => (0..len as u64).rev().collect(),
            Workload::FewDistinct { distinct } => {
                let distinct = distinct.max(1);
                (0..len).map(|_| rng.random::<u64>() % distinct).collect()
            },
            Workload::Zipfian { exponent } => {
                let zipf = match Zipf::new(universe as f64, exponent) {
                    Ok(zipf) => zipf,
                    Err(e) => panic!("invalid zipf parameters: {e}"),
                };
                (0..len)
                    .map(|_| zipf.sample(&mut rng) as u64)
                    .collect()
            },
        }
    }
}

/// Named workloads shared by the benchmark groups.
pub fn standard_suite(universe: u64, seed: u64) -> Vec<(&'static str, WorkloadSpec)> {
    let spec = |workload| WorkloadSpec {
        universe,
        workload,
        seed,
    };
    vec![
        ("uniform", spec(Workload::Uniform)),
        ("ascending", spec(Workload::Ascending)),
        ("descending", spec(Workload::Descending)),
        ("few_distinct", spec(Workload::FewDistinct { distinct: 16 })),
        ("zipfian_1.1", spec(Workload::Zipfian { exponent: 1.1 })),
    ]
}
