//! Turns raw math-input markup into canonical markup and classifies it into a [`Construct`]
//!
//! The markup side of the pipeline, leaf first:
//!  - [`scanner`] : brace groups, single-token arguments, control sequences and `_`/`^` bounds.
//!  - [`normalize`](normalize::normalize) : cosmetic variants into one canonical spelling.
//!  - [`rewrite_abs`](abs::rewrite_abs) : every absolute-value spelling into `\left| .. \right|`.
//!  - [`classify`](classify::classify) : plain expression, summation, integral or derivative.
//!
//! None of these fail: unrecognized or malformed markup passes through, or classifies as
//! [`Construct::Plain`].


#[deny(missing_docs)]
pub mod nodes;
#[deny(missing_docs)]
pub mod scanner;
#[deny(missing_docs)]
pub mod functions;
#[deny(missing_docs)]
pub mod normalize;
#[deny(missing_docs)]
pub mod abs;
#[deny(missing_docs)]
pub mod classify;

pub use self::abs::rewrite_abs;
pub use self::classify::classify;
pub use self::nodes::Construct;
pub use self::normalize::normalize;
