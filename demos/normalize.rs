use clap::Parser;
use texgraph::algebra::to_algebra_dialect;
use texgraph::directive::{DirectiveBuilder, Visibility};
use texgraph::parser::Construct;
use texgraph::settings::Settings;

const DEFAULT_FORMULA : &str = r"\int_0^1 x^2\,\mathrm{d}x";
const DEFAULT_EXPRESSION_ID : &str = "1";

#[derive(Parser)]
struct Options {
    #[arg(default_value_t = DEFAULT_FORMULA.to_string(), help = "Formula to process")]
    formula : String,

    #[arg(short = 'i', long, conflicts_with("formula"))]
    formula_path : Option<std::path::PathBuf>,

    #[arg(long = "id", default_value_t = DEFAULT_EXPRESSION_ID.to_string(), help = "Expression id the directive ids derive from")]
    expression_id : String,

    #[arg(short = 'c', long = "config", help = "YAML file with directive settings")]
    settings_path : Option<std::path::PathBuf>,

    #[arg(short, long, default_value_t = false, help = "Also print hidden and helper directives")]
    all : bool,
}

fn main() {
    env_logger::init();
    // -- Parse command-line options
    let Options { mut formula, formula_path, expression_id, settings_path, all } = Options::parse();
    if let Some(formula_path) = formula_path {
        formula = String::from_utf8(std::fs::read(&formula_path).unwrap()).unwrap();
    }

    let settings : Settings = match settings_path {
        Some(path) => serde_yaml::from_reader(std::fs::File::open(path).unwrap()).unwrap(),
        None       => Settings::default(),
    };


    // -- canonicalize & classify
    let canonical = texgraph::canonicalize(&formula);
    let construct = texgraph::parser::classify(&canonical);
    println!("canonical : {}", canonical);
    println!("construct : {}", serde_json::to_string_pretty(&construct).unwrap());


    // -- translate what a backend would get
    let translated = match &construct {
        Construct::Derivative(derivative) => to_algebra_dialect(&derivative.body),
        Construct::Integral(integral)     => to_algebra_dialect(&integral.body),
        _                                 => to_algebra_dialect(&canonical),
    };
    println!("algebra   : {}", translated);


    // -- directives
    let builder = DirectiveBuilder::new(&settings).unwrap();
    let directives : Vec<_> = builder
        .build(&expression_id, &construct)
        .into_iter()
        .filter(|directive| all || Visibility::All.shows(directive))
        .collect();
    println!("directives: {}", serde_json::to_string_pretty(&directives).unwrap());
}
