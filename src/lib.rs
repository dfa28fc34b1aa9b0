/*! # Graphable constructs out of math-input LaTeX

This crate sits between a math-input widget and a graphing engine. It takes the markup a user
typed (e.g. `\int_0^1 x^2\,dx`), canonicalizes it, recognizes which calculus construct it is and
produces the sub-expressions the graphing engine should plot. It also translates markup into the
flat functional syntax a symbolic-algebra library understands.

## Basic usage

[`process`] canonicalizes and classifies in one call:

```
use texgraph::parser::Construct;

let construct = texgraph::process(r"\int_{0}^{1} x^{2}\,dx");
match construct {
    Construct::Integral(integral) => {
        assert_eq!(integral.body, "x^{2}");
        assert_eq!(integral.differential_variable, "x");
        assert!(integral.is_definite());
    },
    _ => panic!("not an integral"),
}
```

The construct then goes through a [`DirectiveBuilder`](crate::directive::DirectiveBuilder), configured
by [`Settings`](crate::settings::Settings):

```
use texgraph::directive::{DirectiveBuilder, Visibility};
use texgraph::settings::Settings;

let settings = Settings::default();
let builder  = DirectiveBuilder::new(&settings).expect("default settings are valid");

for directive in builder.build("expr1", &texgraph::process(r"\frac{d}{dx}x^{2}")) {
    if Visibility::All.shows(&directive) {
        println!("{}: {}", directive.id, directive.latex);
    }
}
```

## More complex cases

[`process`] chains three steps which may be called separately:

  1. [`normalize`](crate::parser::normalize) rewrites cosmetic variants (spacing commands, `\dfrac`, sized parentheses, bare function names) into one canonical spelling.
  2. [`rewrite_abs`](crate::parser::rewrite_abs) turns every spelling of an absolute value into `\left| .. \right|`.
  3. [`classify`](crate::parser::classify) recognizes a summation, an integral or a derivative, and decomposes it into a [`Construct`](crate::parser::Construct).

None of these fail: markup they don't understand passes through, or ends up as a plain expression.

Symbolic derivatives and antiderivatives go through [`to_algebra_dialect`](crate::algebra::to_algebra_dialect)
and a [`SymbolicEngine`](crate::algebra::backend::SymbolicEngine), which wraps any
[`AlgebraBackend`](crate::algebra::backend::AlgebraBackend):

```
assert_eq!(texgraph::algebra::to_algebra_dialect(r"\sin^2x"), "(sin(x))^2");
```

## Logging

The crate logs through the `log` facade: `trace!` for each rewrite pass that changed the text,
`debug!` for classification outcomes and `warn!` for backend failures. Install any logger to see them.
*/



#[macro_use]
extern crate serde_derive;



#[macro_use]
extern crate log;

#[deny(missing_docs)]
pub mod error;
#[deny(missing_docs)]
pub mod parser;
#[deny(missing_docs)]
pub mod algebra;
#[deny(missing_docs)]
pub mod directive;
#[deny(missing_docs)]
pub mod helpers;
#[deny(missing_docs)]
pub mod settings;

use crate::parser::{classify, normalize, rewrite_abs, Construct};


/// Normalizes `raw` markup and canonicalizes its absolute values.
pub fn canonicalize(raw : &str) -> String {
    rewrite_abs(&normalize(raw))
}

/// Canonicalizes `raw` markup and classifies the result.
pub fn process(raw : &str) -> Construct {
    classify(&canonicalize(raw))
}
