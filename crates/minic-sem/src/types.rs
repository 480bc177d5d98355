//! The resolved type lattice used throughout semantic analysis.
//!
//! Distinct from `minic_par::ast::Type`: that one is just the four
//! declarable spellings written in source; this one adds `Error`, the
//! type every ill-typed expression is pinned to so analysis can keep
//! going without a second, nullable representation.

use std::fmt;

use minic_par::ast::Type as DeclaredType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    Bool,
    Void,
    Error,
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Bool => "bool",
            Type::Void => "void",
            Type::Error => "error",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// `to` accepts a value of type `from` without an explicit cast.
    pub fn assignable(to: Type, from: Type) -> bool {
        to == from || (to == Type::Float && from == Type::Int)
    }
}

impl From<DeclaredType> for Type {
    fn from(t: DeclaredType) -> Self {
        match t {
            DeclaredType::Int => Type::Int,
            DeclaredType::Float => Type::Float,
            DeclaredType::Bool => Type::Bool,
            DeclaredType::Void => Type::Void,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
