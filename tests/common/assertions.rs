//! Custom test assertions

use taskgate::core::batch::BatchResult;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

/// Invariants every batch result must satisfy
pub trait BatchResultAssertions {
    /// Counts agree with each other and with the input length
    fn assert_accounted(&self, input_len: usize);
}

impl<I, R> BatchResultAssertions for BatchResult<I, R> {
    fn assert_accounted(&self, input_len: usize) {
        let totals = self.totals;
        assert_eq!(totals.total, input_len, "total does not match input length");
        assert_eq!(
            totals.success + totals.failure,
            totals.total,
            "success + failure != total"
        );
        assert_eq!(self.successful.len(), totals.success);
        assert_eq!(self.failed.len(), totals.failure);

        let mut indices: Vec<usize> = self
            .successful
            .iter()
            .map(|s| s.index)
            .chain(self.failed.iter().map(|f| f.index))
            .collect();
        indices.sort_unstable();
        assert_eq!(
            indices,
            (0..input_len).collect::<Vec<_>>(),
            "every input index must appear exactly once"
        );
    }
}
