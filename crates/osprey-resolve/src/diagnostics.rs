use crate::error::ResolveError;

/// Collects user-facing errors in the order they were found.
///
/// With a non-zero limit, errors past the limit are counted but dropped.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    errors: Vec<ResolveError>,
    limit: usize,
    dropped: usize,
}

impl Diagnostics {
    pub fn with_limit(limit: usize) -> Self {
        Self { errors: Vec::new(), limit, dropped: 0 }
    }

    pub fn push(&mut self, error: ResolveError) {
        if self.limit != 0 && self.errors.len() >= self.limit {
            if self.dropped == 0 {
                log::warn!("diagnostic limit of {} reached, dropping further errors", self.limit);
            }
            self.dropped += 1;
            return;
        }
        log::debug!("resolve error: {error}");
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[ResolveError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn into_parts(self) -> (Vec<ResolveError>, usize) {
        (self.errors, self.dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(offset: usize) -> ResolveError {
        ResolveError::SuperAtCrateScope { span: (offset, 5).into() }
    }

    #[test]
    fn limit_drops_but_counts() {
        let mut diagnostics = Diagnostics::with_limit(2);
        for offset in 0..5 {
            diagnostics.push(err(offset));
        }
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.dropped(), 3);
    }

    #[test]
    fn zero_means_unlimited() {
        let mut diagnostics = Diagnostics::with_limit(0);
        for offset in 0..50 {
            diagnostics.push(err(offset));
        }
        assert_eq!(diagnostics.len(), 50);
        assert_eq!(diagnostics.dropped(), 0);
    }
}
