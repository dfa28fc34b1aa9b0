//! Classified math constructs, the output of [`classify`](crate::parser::classify::classify)

use std::fmt;


/// Outcome of scanning an optional subscript and superscript, cf [`parse_bounds`](crate::parser::scanner::parse_bounds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsResult {
    /// The argument of `_`, if any
    pub lower_bound : Option<String>,
    /// The argument of `^`, if any
    pub upper_bound : Option<String>,
    /// Offset just past the last scanned argument
    pub end_offset  : usize,
}

impl BoundsResult {
    /// No bounds found, scan ends where it started
    pub fn empty(offset : usize) -> Self {
        Self { lower_bound: None, upper_bound: None, end_offset: offset }
    }

    /// Returns both bounds if both were found and neither is empty
    pub fn complete(&self) -> Option<(&str, &str)> {
        let lower = self.lower_bound.as_deref().filter(|bound| !bound.is_empty())?;
        let upper = self.upper_bound.as_deref().filter(|bound| !bound.is_empty())?;
        Some((lower, upper))
    }
}


/// One user expression, classified and decomposed into the parts the graphing pipeline needs.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    /// Anything that is not one of the constructs below, e.g. `y = x^{2}`
    Plain(Plain),
    /// `\sum_{..}^{..} ..` with both bounds
    Summation(Summation),
    /// `\int .. dx`, definite or not
    Integral(Integral),
    /// `\frac{d}{dx} ..`, possibly of higher order, possibly evaluated at a point
    Derivative(Derivative),
}

/// An expression with no further structure
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plain {
    /// Canonical markup of the expression
    pub latex : String,
}

/// A summation with both bounds
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summation {
    /// Canonical markup of the whole summation
    pub latex       : String,
    /// The subscript of `\sum`, e.g. `n=1`
    pub lower_bound : String,
    /// The superscript of `\sum`, e.g. `10`
    pub upper_bound : String,
}

/// An integral, with a differential variable and, if definite, bounds
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integral {
    /// The integrand
    pub body : String,
    /// The variable of the trailing `d<variable>`, e.g. `x` or `\theta`
    pub differential_variable : String,
    /// Present only if both bounds were found and are non-empty
    #[serde(default)]
    pub bounds : Option<IntegralBounds>,
}

/// Bounds of a definite integral
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegralBounds {
    /// Lower bound
    pub lower : String,
    /// Upper bound
    pub upper : String,
}

/// A derivative `\frac{d^n}{dx^n} body`, possibly evaluated at a point
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivative {
    /// Order of the derivative, at least 1
    pub order    : u32,
    /// The variable of differentiation
    pub variable : String,
    /// The expression being differentiated, without the evaluation suffix
    pub body     : String,
    /// The point of a trailing `|_{x=3}`
    #[serde(default)]
    pub evaluation_point : Option<EvaluationPoint>,
}

/// The point at which a derivative is evaluated
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationPoint {
    /// Same variable as [`Derivative::variable`]
    pub variable : String,
    /// The value, e.g. `3`
    pub value    : String,
}

impl Construct {
    /// Short name of the construct kind, used in logs and reports
    pub fn kind_name(&self) -> &'static str {
        match self {
            Construct::Plain(_)      => "plain",
            Construct::Summation(_)  => "summation",
            Construct::Integral(_)   => "integral",
            Construct::Derivative(_) => "derivative",
        }
    }
}

impl Integral {
    /// Checks if the integral has bounds
    pub fn is_definite(&self) -> bool {
        self.bounds.is_some()
    }
}


/// Writes `dx`, `d\theta`, ...
fn write_differential(f : &mut fmt::Formatter, variable : &str) -> fmt::Result {
    write!(f, "d{}", variable)
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Construct::Plain(plain)           => f.write_str(&plain.latex),
            Construct::Summation(summation)   => f.write_str(&summation.latex),
            Construct::Integral(integral)     => fmt::Display::fmt(integral, f),
            Construct::Derivative(derivative) => fmt::Display::fmt(derivative, f),
        }
    }
}

impl fmt::Display for Integral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(r"\int")?;
        if let Some(IntegralBounds { lower, upper }) = &self.bounds {
            write!(f, "_{{{}}}^{{{}}}", lower, upper)?;
        }
        write!(f, " {} ", self.body)?;
        write_differential(f, &self.differential_variable)
    }
}

impl fmt::Display for Derivative {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.order == 1 {
            f.write_str(r"\frac{d}{")?;
            write_differential(f, &self.variable)?;
            f.write_str("}")?;
        }
        else {
            write!(f, r"\frac{{d^{{{}}}}}{{", self.order)?;
            write_differential(f, &self.variable)?;
            write!(f, "^{{{}}}}}", self.order)?;
        }
        f.write_str(&self.body)?;
        if let Some(EvaluationPoint { variable, value }) = &self.evaluation_point {
            write!(f, "|_{{{}={}}}", variable, value)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_bounds() {
        let bounds = BoundsResult { lower_bound: Some("0".into()), upper_bound: Some("1".into()), end_offset: 3 };
        assert_eq!(bounds.complete(), Some(("0", "1")));

        let bounds = BoundsResult { lower_bound: Some("0".into()), upper_bound: Some("".into()), end_offset: 3 };
        assert_eq!(bounds.complete(), None);

        let bounds = BoundsResult { lower_bound: None, upper_bound: Some("1".into()), end_offset: 3 };
        assert_eq!(bounds.complete(), None);
    }

    #[test]
    fn display_as_markup() {
        let integral = Integral {
            body: "x^{2}".into(),
            differential_variable: "x".into(),
            bounds: Some(IntegralBounds { lower: "0".into(), upper: "1".into() }),
        };
        assert_eq!(integral.to_string(), r"\int_{0}^{1} x^{2} dx");

        let integral = Integral { bounds: None, differential_variable: r"\theta".into(), ..integral };
        assert_eq!(integral.to_string(), r"\int x^{2} d\theta");

        let derivative = Derivative {
            order: 1,
            variable: "x".into(),
            body: "x^{2}".into(),
            evaluation_point: Some(EvaluationPoint { variable: "x".into(), value: "3".into() }),
        };
        assert_eq!(derivative.to_string(), r"\frac{d}{dx}x^{2}|_{x=3}");

        let derivative = Derivative { order: 2, evaluation_point: None, ..derivative };
        assert_eq!(derivative.to_string(), r"\frac{d^{2}}{dx^{2}}x^{2}");
    }
}
