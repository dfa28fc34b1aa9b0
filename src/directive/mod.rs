//! Turns a [`Construct`] into the named sub-expressions a graphing engine plots
//!
//! Every construct gives a small fixed set of [`Directive`]s: curves, a shaded region, hidden
//! values and helper definitions. Their ids derive from the expression's own id, so re-processing
//! an edited expression replaces its directives instead of duplicating them.

pub mod format;

use crate::error::SettingsResult;
use crate::parser::nodes::{Construct, Derivative, Integral, IntegralBounds, Plain, Summation};
use crate::parser::scanner::{contains_variable, control_sequence, next_char, substitute_variable};
use crate::settings::Settings;


/// What a directive stands for, relative to the expression it comes from
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveRole {
    /// The expression being integrated or differentiated, or a plain expression itself
    Parent,
    /// The integral or the derivative
    Result,
    /// Not meant to be seen, e.g. a function definition other directives refer to
    Helper,
}

/// What the graphing engine does with a directive
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// A plotted curve, like `y = x^{2}`
    Curve,
    /// A shaded region
    Region,
    /// A number, computed for a label
    Value,
    /// A function definition
    Definition,
}

/// Stroke of a curve
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Results
    Solid,
    /// Parent curves
    Dotted,
}

/// One sub-expression handed to the graphing engine
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Stable id, `<expression id>_<suffix>`
    pub id         : String,
    /// Markup of the sub-expression
    pub latex      : String,
    /// What the directive stands for
    pub role       : DirectiveRole,
    /// What the engine does with it
    pub kind       : DirectiveKind,
    /// Stroke, for curves
    pub line_style : LineStyle,
    /// Hidden directives are computed but never drawn
    pub hidden     : bool,
}

/// Which directives the consumer wants drawn
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Parent and result
    #[default]
    All,
    /// Only parent curves
    Parent,
    /// Only results
    Result,
    /// Nothing
    None,
}

impl Visibility {
    /// Checks if `directive` gets drawn. Hidden directives never are.
    pub fn shows(self, directive : &Directive) -> bool {
        if directive.hidden {
            return false;
        }
        match self {
            Visibility::All    => directive.role != DirectiveRole::Helper,
            Visibility::Parent => directive.role == DirectiveRole::Parent,
            Visibility::Result => directive.role == DirectiveRole::Result,
            Visibility::None   => false,
        }
    }
}

impl Directive {
    fn new(id : String, latex : String, role : DirectiveRole, kind : DirectiveKind) -> Self {
        Self { id, latex, role, kind, line_style: LineStyle::Solid, hidden: false }
    }

    fn dotted(mut self) -> Self {
        self.line_style = LineStyle::Dotted;
        self
    }

    fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}


/// Builds the directives of constructs, given some [`Settings`].
///
/// ```
/// use texgraph::directive::DirectiveBuilder;
/// use texgraph::settings::Settings;
///
/// let settings = Settings::default();
/// let builder = DirectiveBuilder::new(&settings).unwrap();
/// let directives = builder.build("3", &texgraph::process(r"\int_{0}^{1} x^{2} dx"));
///
/// assert!(directives.iter().any(|directive| directive.latex == "y = x^{2}"));
/// assert!(directives.iter().any(|directive| directive.latex.contains(r"0 \le x \le 1")));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DirectiveBuilder<'s> {
    settings : &'s Settings,
}

impl<'s> DirectiveBuilder<'s> {
    /// Creates a builder, after checking the settings are consistent.
    pub fn new(settings : &'s Settings) -> SettingsResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Builds the directives of `construct`, the classification of expression `expression_id`.
    pub fn build(&self, expression_id : &str, construct : &Construct) -> Vec<Directive> {
        let directives = match construct {
            Construct::Plain(plain)           => self.plain(expression_id, plain),
            Construct::Summation(summation)   => self.summation(expression_id, summation),
            Construct::Integral(integral)     => self.integral(expression_id, integral),
            Construct::Derivative(derivative) => self.derivative(expression_id, derivative),
        };
        debug!("{} directives for {} expression {:?}", directives.len(), construct.kind_name(), expression_id);
        directives
    }

    fn plain(&self, expression_id : &str, plain : &Plain) -> Vec<Directive> {
        let latex = plain.latex.trim();
        if latex.is_empty() {
            return Vec::new();
        }

        let latex = if self.settings.implicit_y
            && !has_top_level_relation(latex)
            && contains_variable(latex, &self.settings.primary_variable)
        {
            format!("y = {}", latex)
        }
        else {
            latex.to_string()
        };

        vec![Directive::new(id(expression_id, "plain"), latex, DirectiveRole::Parent, DirectiveKind::Curve)]
    }

    fn summation(&self, expression_id : &str, summation : &Summation) -> Vec<Directive> {
        vec![
            Directive::new(id(expression_id, "value"), summation.latex.clone(), DirectiveRole::Result, DirectiveKind::Value)
                .hidden(),
        ]
    }

    fn integral(&self, expression_id : &str, integral : &Integral) -> Vec<Directive> {
        let Settings { primary_variable : x, dummy_variable : t, accumulator_origin : origin, .. } = self.settings;
        let body = substitute_variable(&integral.body, &integral.differential_variable, x);

        let mut directives = vec![
            Directive::new(id(expression_id, "parent"), format!("y = {}", body), DirectiveRole::Parent, DirectiveKind::Curve)
                .dotted(),
        ];

        match &integral.bounds {
            None => {
                let t = fresh_dummy(integral, t, x);
                let integrand = substitute_variable(&integral.body, &integral.differential_variable, t);
                let accumulator = format!(r"y = \int_{{{}}}^{{{}}} {} d{}", origin, x, integrand, t);
                directives.push(Directive::new(id(expression_id, "accumulator"), accumulator, DirectiveRole::Result, DirectiveKind::Curve));
            },
            Some(IntegralBounds { lower, upper }) => {
                let region = format!(
                    r"\min\left(0,{body}\right) \le y \le \max\left(0,{body}\right) \left\{{{lower} \le {x} \le {upper}\right\}}",
                    body = body, lower = lower, upper = upper, x = x,
                );
                directives.push(Directive::new(id(expression_id, "region"), region, DirectiveRole::Result, DirectiveKind::Region));
                directives.push(
                    Directive::new(id(expression_id, "value"), integral.to_string(), DirectiveRole::Result, DirectiveKind::Value)
                        .hidden()
                );
            },
        }
        directives
    }

    fn derivative(&self, expression_id : &str, derivative : &Derivative) -> Vec<Directive> {
        let x = &self.settings.primary_variable;
        let function = format!("{}_{{{}}}", self.settings.function_name, subscript(expression_id));
        let body = substitute_variable(&derivative.body, &derivative.variable, x);

        let derivative_curve = format!("y = {}", derivative_of(&function, derivative.order, x, x));

        let mut directives = vec![
            Directive::new(id(expression_id, "definition"), format!("{}({}) = {}", function, x, body), DirectiveRole::Helper, DirectiveKind::Definition)
                .hidden(),
            Directive::new(id(expression_id, "parent"), format!("y = {}({})", function, x), DirectiveRole::Parent, DirectiveKind::Curve)
                .dotted(),
            Directive::new(id(expression_id, "derivative"), derivative_curve, DirectiveRole::Result, DirectiveKind::Curve),
        ];

        if let Some(point) = &derivative.evaluation_point {
            let value = derivative_of(&function, derivative.order, x, &point.value);
            directives.push(
                Directive::new(id(expression_id, "value"), value, DirectiveRole::Result, DirectiveKind::Value)
                    .hidden()
            );
        }
        directives
    }
}

fn id(expression_id : &str, suffix : &str) -> String {
    format!("{}_{}", expression_id, suffix)
}

/// Expression ids as function subscripts: only letters and digits survive.
fn subscript(expression_id : &str) -> String {
    expression_id.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// `f'(a)` up to the third order, `\frac{d^{n}}{dx^{n}}f(a)` above.
fn derivative_of(function : &str, order : u32, x : &str, argument : &str) -> String {
    match order {
        0 ..= 3 => format!("{}{}({})", function, "'".repeat(order as usize), argument),
        _       => format!(r"\frac{{d^{{{n}}}}}{{d{x}^{{{n}}}}}{f}({a})", n = order, x = x, f = function, a = argument),
    }
}

/// The integration variable of an accumulator. The configured dummy, unless the integrand already
/// uses it as a free variable.
fn fresh_dummy<'a>(integral : &Integral, dummy : &'a str, x : &str) -> &'a str {
    let free = |candidate : &str| candidate == integral.differential_variable
        || !contains_variable(&integral.body, candidate);

    if free(dummy) {
        return dummy;
    }
    match DUMMY_CANDIDATES.iter().copied().find(|&candidate| candidate != x && free(candidate)) {
        Some(candidate) => {
            debug!("{:?} is taken by the integrand, integrating over {:?}", dummy, candidate);
            candidate
        },
        None => dummy,
    }
}

const DUMMY_CANDIDATES : &[&str] = &["t", "s", "u", "v", "w", r"\tau", r"\xi"];

/// Checks for `=`, `<`, `>` or a relation command outside of any group, as in `y = x` or `x^{2} \le 1`.
fn has_top_level_relation(latex : &str) -> bool {
    let mut depth : i32 = 0;
    let mut index = 0;
    while let Some((character, after)) = next_char(latex, index) {
        if let Some((command, end)) = control_sequence(latex, index) {
            match command {
                r"\le" | r"\leq" | r"\ge" | r"\geq" | r"\lt" | r"\gt" | r"\ne" | r"\neq" if depth == 0 => return true,
                r"\{" => depth += 1,
                r"\}" => depth -= 1,
                _ => (),
            }
            index = end;
            continue;
        }

        match character {
            '{' | '(' | '[' => depth += 1,
            '}' | ')' | ']' => depth -= 1,
            '=' | '<' | '>' if depth == 0 => return true,
            _ => (),
        }
        index = after;
    }
    false
}
