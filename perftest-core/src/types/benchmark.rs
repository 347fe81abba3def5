//! Benchmark identity: what is run, on what, and how often.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::options::{Backend, Grid, Precision, RuntimeKind};
use crate::errors::ArgumentError;

/// Three-dimensional problem size. All extents are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u32; 3]", into = "[u32; 3]")]
pub struct Domain {
    ni: u32,
    nj: u32,
    nk: u32,
}

impl Domain {
    pub fn new(ni: u32, nj: u32, nk: u32) -> Result<Self, ArgumentError> {
        if ni == 0 || nj == 0 || nk == 0 {
            return Err(ArgumentError::InvalidDomain {
                value: format!("{ni}x{nj}x{nk}"),
                message: "all extents must be positive".to_string(),
            });
        }
        Ok(Self { ni, nj, nk })
    }

    pub fn ni(&self) -> u32 {
        self.ni
    }

    pub fn nj(&self) -> u32 {
        self.nj
    }

    pub fn nk(&self) -> u32 {
        self.nk
    }

    /// Extents as `(ni, nj, nk)`.
    pub fn extents(&self) -> (u32, u32, u32) {
        (self.ni, self.nj, self.nk)
    }

    /// Domain enlarged by `halo` points on both sides of every axis.
    /// Fails if an enlarged extent does not fit in a `u32`.
    pub fn with_halo(&self, halo: u32) -> Result<Self, ArgumentError> {
        let grow = |extent: u32| {
            halo.checked_mul(2)
                .and_then(|h| extent.checked_add(h))
                .ok_or_else(|| ArgumentError::InvalidDomain {
                    value: self.to_string(),
                    message: format!("extent overflows with halo {halo}"),
                })
        };
        Ok(Self {
            ni: grow(self.ni)?,
            nj: grow(self.nj)?,
            nk: grow(self.nk)?,
        })
    }
}

/// The standard perftest domain, 128x128x80.
impl Default for Domain {
    fn default() -> Self {
        Self {
            ni: 128,
            nj: 128,
            nk: 80,
        }
    }
}

impl TryFrom<[u32; 3]> for Domain {
    type Error = ArgumentError;

    fn try_from([ni, nj, nk]: [u32; 3]) -> Result<Self, Self::Error> {
        Self::new(ni, nj, nk)
    }
}

impl From<Domain> for [u32; 3] {
    fn from(d: Domain) -> Self {
        [d.ni, d.nj, d.nk]
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.ni, self.nj, self.nk)
    }
}

/// Parses `128x128x80` (separators `x`, `×` or `,`).
impl FromStr for Domain {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| ArgumentError::InvalidDomain {
            value: s.to_string(),
            message: message.to_string(),
        };
        let parts: Vec<&str> = s
            .split(|c| c == 'x' || c == 'X' || c == '×' || c == ',')
            .map(str::trim)
            .collect();
        if parts.len() != 3 {
            return Err(invalid("expected three extents, e.g. 128x128x80"));
        }
        let mut extents = [0u32; 3];
        for (slot, part) in extents.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| invalid("extents must be integers"))?;
        }
        Self::try_from(extents)
    }
}

/// Identifies one executable benchmark unit.
///
/// The kernel set is determined by the runtime and grid. Constructed once
/// from user input and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    runtime: RuntimeKind,
    grid: Grid,
    precision: Precision,
    backend: Backend,
    domain: Domain,
    repeat: usize,
}

impl BenchmarkConfig {
    pub fn new(
        runtime: RuntimeKind,
        grid: Grid,
        precision: Precision,
        backend: Backend,
        domain: Domain,
        repeat: usize,
    ) -> Result<Self, ArgumentError> {
        if repeat == 0 {
            return Err(ArgumentError::InvalidRepeat { value: repeat });
        }
        Ok(Self {
            runtime,
            grid,
            precision,
            backend,
            domain,
            repeat,
        })
    }

    pub fn runtime(&self) -> RuntimeKind {
        self.runtime
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn repeat(&self) -> usize {
        self.repeat
    }

    /// Identity of the kernel set, e.g. `gridtools/strgrid`.
    pub fn kernel_set_id(&self) -> String {
        format!("{}/{}", self.runtime, self.grid)
    }
}

impl fmt::Display for BenchmarkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} domain={} repeat={}",
            self.runtime, self.grid, self.backend, self.precision, self.domain, self.repeat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_rejects_zero_extent() {
        assert!(Domain::new(128, 0, 80).is_err());
    }

    #[test]
    fn domain_parses_separators() {
        let d: Domain = "128x64×80".parse().unwrap();
        assert_eq!(d.extents(), (128, 64, 80));
        let d: Domain = "1, 2, 3".parse().unwrap();
        assert_eq!(d.to_string(), "1x2x3");
    }

    #[test]
    fn domain_rejects_wrong_arity() {
        assert!("128x128".parse::<Domain>().is_err());
        assert!("axbxc".parse::<Domain>().is_err());
    }

    #[test]
    fn domain_halo_grows_both_sides() {
        let d = Domain::new(10, 20, 30).unwrap().with_halo(3).unwrap();
        assert_eq!(d.extents(), (16, 26, 36));
    }

    #[test]
    fn domain_halo_overflow_is_an_error() {
        let d = Domain::new(u32::MAX, 1, 1).unwrap();
        assert!(matches!(d.with_halo(2), Err(ArgumentError::InvalidDomain { .. })));
        assert!(Domain::new(1, 1, 1).unwrap().with_halo(u32::MAX).is_err());
        assert_eq!(d.with_halo(0).unwrap(), d);
    }

    #[test]
    fn domain_serializes_as_array() {
        let d = Domain::new(128, 128, 80).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "[128,128,80]");
        assert!(serde_json::from_str::<Domain>("[0,1,1]").is_err());
    }

    #[test]
    fn config_requires_positive_repeat() {
        let domain = Domain::new(1, 1, 1).unwrap();
        let err = BenchmarkConfig::new(
            RuntimeKind::Gridtools,
            Grid::Strgrid,
            Precision::Double,
            Backend::Host,
            domain,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, ArgumentError::InvalidRepeat { value: 0 }));
    }

    #[test]
    fn kernel_set_id_joins_runtime_and_grid() {
        let config = BenchmarkConfig::new(
            RuntimeKind::Stella,
            Grid::Strgrid,
            Precision::Float,
            Backend::Cuda,
            Domain::new(8, 8, 8).unwrap(),
            3,
        )
        .unwrap();
        assert_eq!(config.kernel_set_id(), "stella/strgrid");
    }
}
