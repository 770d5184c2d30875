/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Domain tag assigned to a variable group at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDomain {
    Continuous,
    Integer,
    Binary,
}

impl VarDomain {
    /// Single-character code used by the type vector.
    pub fn code(self) -> char {
        match self {
            VarDomain::Continuous => 'C',
            VarDomain::Integer => 'I',
            VarDomain::Binary => 'B',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VarDomain::Continuous => "continuous",
            VarDomain::Integer => "integer",
            VarDomain::Binary => "binary",
        }
    }
}

/// Bounds for a variable instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

/// Model-wide solve status.
///
/// `Ok` is the only state in which solution and dual vectors may be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelStatus {
    /// No solve result attached yet.
    #[default]
    Initialized,
    /// Solve succeeded.
    Ok,
    /// Solve finished with a non-optimal but usable result.
    Warning,
}

impl ModelStatus {
    /// Check if the status signals a successful solve.
    pub fn is_ok(self) -> bool {
        matches!(self, ModelStatus::Ok)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelStatus::Initialized => "initialized",
            ModelStatus::Ok => "ok",
            ModelStatus::Warning => "warning",
        }
    }
}

impl std::fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
