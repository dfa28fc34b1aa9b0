//! Named functions the markup may contain and their identifiers in the algebra dialect

/// How a function's argument and power are read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FunctionKind {
    /// `\sin`, `\cos`, ...: `\sin^{2}x` is a power of the call, `\sin^{-1}x` is the inverse function
    Trigonometric,
    /// `\arcsin`, `\sinh`, ...: a power applies to the call, never read as an inverse
    Plain,
    /// `\ln`, `\log`: may carry a base subscript
    Logarithm,
    /// `\exp`
    Exponential,
}

/// A named function, as spelled in the markup and in the algebra dialect
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Function {
    /// The markup command name, without the backslash
    pub name         : &'static str,
    /// The identifier the algebra backend expects
    pub algebra_name : &'static str,
    /// How the function's power and argument are read
    pub kind         : FunctionKind,
}

/// Bare function names the normalizer escape-marks (`sin` becomes `\sin`).
pub const BARE_FUNCTION_NAMES : &[&str] = &["sin", "cos", "tan", "sec", "csc", "cot", "ln", "log", "exp"];

/// Multi-character identifiers of the algebra dialect that are immediately followed by their call parenthesis.
///
/// Every identifier [`Function::from_name`] can produce must be listed here, otherwise
/// implicit multiplication splits it from its argument (`sin*(x)`).
pub const ALGEBRA_FUNCTION_NAMES : &[&str] = &[
    "asin", "acos", "atan",
    "sinh", "cosh", "tanh",
    "sin", "cos", "tan", "sec", "csc", "cot",
    "log10", "log", "exp",
    "sqrt", "abs",
];

impl Function {
    /// Looks up a function by its markup name, e.g. `"sin"` for `\sin`.
    pub fn from_name(name : &str) -> Option<Function> {
        use self::FunctionKind::*;
        let (name, algebra_name, kind) = match name {
            "sin"    => ("sin", "sin", Trigonometric),
            "cos"    => ("cos", "cos", Trigonometric),
            "tan"    => ("tan", "tan", Trigonometric),
            "sec"    => ("sec", "sec", Trigonometric),
            "csc"    => ("csc", "csc", Trigonometric),
            "cot"    => ("cot", "cot", Trigonometric),

            "arcsin" => ("arcsin", "asin", Plain),
            "arccos" => ("arccos", "acos", Plain),
            "arctan" => ("arctan", "atan", Plain),
            "sinh"   => ("sinh", "sinh", Plain),
            "cosh"   => ("cosh", "cosh", Plain),
            "tanh"   => ("tanh", "tanh", Plain),

            // ln is the natural log, log is base 10 in the markup but natural in the backend
            "ln"     => ("ln", "log", Logarithm),
            "log"    => ("log", "log10", Logarithm),

            "exp"    => ("exp", "exp", Exponential),
            _        => return None,
        };
        Some(Function { name, algebra_name, kind })
    }

    /// The algebra identifier of the inverse function, for `\sin^{-1}`.
    pub fn inverse(&self) -> Option<&'static str> {
        match self.name {
            "sin" => Some("asin"),
            "cos" => Some("acos"),
            "tan" => Some("atan"),
            _     => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_algebra_name_is_whitelisted() {
        let names = [
            "sin", "cos", "tan", "sec", "csc", "cot",
            "arcsin", "arccos", "arctan", "sinh", "cosh", "tanh",
            "ln", "log", "exp",
        ];
        for name in names {
            eprintln!("Function: {}", name);
            let function = Function::from_name(name).unwrap();
            assert!(ALGEBRA_FUNCTION_NAMES.contains(&function.algebra_name));
            if let Some(inverse) = function.inverse() {
                assert!(ALGEBRA_FUNCTION_NAMES.contains(&inverse));
            }
        }
    }

    #[test]
    fn bare_names_are_known_functions() {
        for name in BARE_FUNCTION_NAMES {
            assert!(Function::from_name(name).is_some(), "{}", name);
        }
        assert_eq!(Function::from_name("alpha"), None);
    }

    #[test]
    fn logarithms_do_not_collide() {
        let ln  = Function::from_name("ln").unwrap();
        let log = Function::from_name("log").unwrap();
        assert_ne!(ln.algebra_name, log.algebra_name);
        assert_eq!(log.inverse(), None);
    }
}
