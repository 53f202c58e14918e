use crate::args::{PositiveU64, PositiveUsize};

/// Partition of a run into worker batches of at most `quantum` fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkPlan {
    iterations: u64,
    quantum: u64,
}

impl WorkPlan {
    #[must_use]
    pub fn new(iterations: PositiveU64, quantum: PositiveUsize) -> Self {
        Self {
            iterations: iterations.get(),
            quantum: u64::try_from(quantum.get()).unwrap_or(u64::MAX),
        }
    }

    #[must_use]
    pub const fn iterations(&self) -> u64 {
        self.iterations
    }

    #[must_use]
    pub const fn quantum(&self) -> u64 {
        self.quantum
    }

    /// `ceil(iterations / quantum)`.
    #[must_use]
    pub const fn worker_count(&self) -> u64 {
        self.iterations.div_ceil(self.quantum)
    }

    /// Batch sizes in dispatch order: full quanta, then the remainder.
    #[must_use]
    pub const fn batch_sizes(&self) -> BatchSizes {
        BatchSizes {
            remaining: self.iterations,
            quantum: self.quantum,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchSizes {
    remaining: u64,
    quantum: u64,
}

impl Iterator for BatchSizes {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let size = self.remaining.min(self.quantum);
        self.remaining = self.remaining.saturating_sub(size);
        Some(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(iterations: u64, quantum: usize) -> Result<WorkPlan, String> {
        let iterations = PositiveU64::try_from(iterations).map_err(|err| err.to_string())?;
        let quantum = PositiveUsize::try_from(quantum).map_err(|err| err.to_string())?;
        Ok(WorkPlan::new(iterations, quantum))
    }

    #[test]
    fn partition_invariants_hold() -> Result<(), String> {
        for iterations in 1..=60u64 {
            for quantum in 1..=13usize {
                let plan = plan(iterations, quantum)?;
                let sizes: Vec<u64> = plan.batch_sizes().collect();
                let expected_workers = iterations.div_ceil(quantum as u64);

                if plan.worker_count() != expected_workers
                    || sizes.len() as u64 != expected_workers
                {
                    return Err(format!(
                        "worker count mismatch for {}/{}: {:?}",
                        iterations, quantum, sizes
                    ));
                }
                if sizes.iter().sum::<u64>() != iterations {
                    return Err(format!("sizes do not sum for {}/{}", iterations, quantum));
                }
                if sizes.iter().any(|size| *size == 0 || *size > quantum as u64) {
                    return Err(format!("size out of range for {}/{}", iterations, quantum));
                }
            }
        }
        Ok(())
    }

    #[test]
    fn exact_quantum_is_one_full_batch() -> Result<(), String> {
        let sizes: Vec<u64> = plan(250, 250)?.batch_sizes().collect();
        if sizes != [250] {
            return Err(format!("Unexpected sizes: {:?}", sizes));
        }
        Ok(())
    }

    #[test]
    fn one_past_quantum_spills_into_second_batch() -> Result<(), String> {
        let sizes: Vec<u64> = plan(251, 250)?.batch_sizes().collect();
        if sizes != [250, 1] {
            return Err(format!("Unexpected sizes: {:?}", sizes));
        }
        Ok(())
    }

    #[test]
    fn remainder_lands_in_last_batch() -> Result<(), String> {
        let plan = plan(260, 250)?;
        let sizes: Vec<u64> = plan.batch_sizes().collect();
        if plan.worker_count() != 2 || sizes != [250, 10] {
            return Err(format!("Unexpected plan: {:?}", sizes));
        }
        Ok(())
    }

    #[test]
    fn small_run_uses_single_worker() -> Result<(), String> {
        let plan = plan(3, 250)?;
        if plan.worker_count() != 1 || plan.batch_sizes().collect::<Vec<_>>() != [3] {
            return Err("Expected a single batch of 3".to_owned());
        }
        Ok(())
    }
}
