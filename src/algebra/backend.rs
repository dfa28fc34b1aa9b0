//! Boundary with the symbolic-algebra backend
//!
//! The backend itself is external: anything implementing [`AlgebraBackend`]. A [`SymbolicEngine`]
//! owns one, loads its capability modules once in [`SymbolicEngine::initialize`], and turns every
//! failure of the backend (error or panic) into a [`SymbolicError`].

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{SymbolicError, SymbolicResult};
use crate::parser::nodes::{Derivative, Integral};

use super::{from_algebra_result, to_algebra_dialect};


/// A symbolic-algebra library taking expressions in the algebra dialect and returning typeset markup.
pub trait AlgebraBackend {
    /// Error reported by the backend
    type Error : fmt::Display;

    /// Loads the calculus and algebra capabilities. Called once, before any other method.
    fn load_modules(&mut self) -> Result<(), Self::Error>;

    /// Differentiates `expression` `order` times with respect to `variable`.
    fn differentiate(&self, expression : &str, variable : &str, order : u32) -> Result<String, Self::Error>;

    /// Computes an antiderivative of `expression` with respect to `variable`.
    fn integrate(&self, expression : &str, variable : &str) -> Result<String, Self::Error>;
}

/// An initialized backend, ready to differentiate and integrate constructs.
#[derive(Debug)]
pub struct SymbolicEngine<B> {
    backend : B,
}

impl<B : AlgebraBackend> SymbolicEngine<B> {
    /// Loads the capability modules of `backend`. This is the only place they get loaded.
    pub fn initialize(mut backend : B) -> SymbolicResult<Self> {
        if let Err(error) = backend.load_modules() {
            warn!("algebra backend failed to load its modules: {}", error);
            return Err(SymbolicError::NotInitialized(error.to_string().into_boxed_str()));
        }
        debug!("algebra backend initialized");
        Ok(Self { backend })
    }

    /// The underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Differentiates the body of `derivative`, returning the result as markup.
    pub fn derivative(&self, derivative : &Derivative) -> SymbolicResult<String> {
        let expression = translate(&derivative.body)?;
        let variable = translate(&derivative.variable)?;
        self.call(|backend| backend.differentiate(&expression, &variable, derivative.order))
    }

    /// Computes an antiderivative of the body of `integral`, returning it as markup.
    /// Bounds are ignored: the value of a definite integral is the graphing engine's business.
    pub fn integral(&self, integral : &Integral) -> SymbolicResult<String> {
        let expression = translate(&integral.body)?;
        let variable = translate(&integral.differential_variable)?;
        self.call(|backend| backend.integrate(&expression, &variable))
    }

    fn call<F>(&self, computation : F) -> SymbolicResult<String>
    where F : FnOnce(&B) -> Result<String, B::Error>
    {
        match panic::catch_unwind(AssertUnwindSafe(|| computation(&self.backend))) {
            Ok(Ok(result)) => Ok(from_algebra_result(&result)),
            Ok(Err(error)) => {
                warn!("algebra backend rejected the expression: {}", error);
                Err(SymbolicError::Backend(error.to_string().into_boxed_str()))
            },
            Err(_) => {
                warn!("algebra backend panicked");
                Err(SymbolicError::Panicked)
            },
        }
    }
}

fn translate(markup : &str) -> SymbolicResult<String> {
    let translated = match panic::catch_unwind(|| to_algebra_dialect(markup)) {
        Ok(translated) => translated,
        Err(_) => {
            warn!("translating {:?} for the algebra backend panicked", markup);
            return Err(SymbolicError::Panicked);
        },
    };
    if translated.trim().is_empty() {
        return Err(SymbolicError::EmptyExpression);
    }
    Ok(translated)
}
