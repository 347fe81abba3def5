//! Closed option sets: runtimes, grids, precisions, backends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ArgumentError;

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ArgumentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ArgumentError::Unknown {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

option_enum! {
    /// Software that provides the stencil binaries.
    RuntimeKind, "runtime" { Stella => "stella", Gridtools => "gridtools" }
}

option_enum! {
    /// Grid type: structured or icosahedral.
    Grid, "grid" { Strgrid => "strgrid", Icgrid => "icgrid" }
}

option_enum! {
    /// Floating point precision the stencils were compiled with.
    Precision, "precision" { Float => "float", Double => "double" }
}

option_enum! {
    /// Hardware execution target.
    Backend, "backend" { Cuda => "cuda", Host => "host" }
}

option_enum! {
    /// Which timestamp orders a run in a history:
    /// when the job ran, or when the runtime was committed.
    TimestampSource, "timestamp source" { Job => "job", Commit => "commit" }
}
