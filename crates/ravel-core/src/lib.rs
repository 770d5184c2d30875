//! Ravel core: labeled optimization model and its matrix/vector views.

pub mod matrices;
pub mod model;
pub mod solver;
pub mod types;

pub use matrices::{CooMatrix, MatrixAccessor, MatrixError, View, scatter};
pub use model::{
    BoundSpec, ConstraintGroup, ConstraintGroupView, Constraints, FlatConstraints, FlatVariables,
    Model, ModelError, ModelSnapshot, Objective, ObjectiveView, SnapshotMetadata, VariableGroup,
    VariableGroupSpec, VariableGroupView, Variables,
};
pub use solver::SolveResult;
pub use types::{Bounds, ModelStatus, Sense, VarDomain};
