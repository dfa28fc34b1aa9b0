extern crate texgraph;
extern crate serde_yaml;
extern crate serde_json;

use texgraph::directive::{Directive, DirectiveBuilder, DirectiveKind, DirectiveRole, LineStyle, Visibility};
use texgraph::error::SettingsError;
use texgraph::process;
use texgraph::settings::Settings;


fn build(settings : &Settings, id : &str, raw : &str) -> Vec<Directive> {
    let builder = DirectiveBuilder::new(settings).expect("valid settings");
    builder.build(id, &process(raw))
}

fn find<'d>(directives : &'d [Directive], id : &str) -> &'d Directive {
    directives
        .iter()
        .find(|directive| directive.id == id)
        .unwrap_or_else(|| panic!("no directive {} in {:?}", id, directives))
}

#[test]
fn definite_integral_end_to_end() {
    let directives = build(&Settings::default(), "3", r"\int_{0}^{1} x^{2} dx");

    let parent = find(&directives, "3_parent");
    assert_eq!(parent.latex, "y = x^{2}");
    assert_eq!(parent.line_style, LineStyle::Dotted);

    let region = find(&directives, "3_region");
    assert_eq!(region.kind, DirectiveKind::Region);
    assert!(region.latex.contains(r"0 \le x \le 1"), "{}", region.latex);

    let value = find(&directives, "3_value");
    assert!(value.hidden);
    assert_eq!(value.latex, r"\int_{0}^{1} x^{2} dx");
}

#[test]
fn reprocessing_gives_same_ids() {
    let settings = Settings::default();
    let before : Vec<_> = build(&settings, "5", r"\frac{d}{dx}x^{2}").into_iter().map(|directive| directive.id).collect();
    let after  : Vec<_> = build(&settings, "5", r"\frac{d}{dx}x^{3}").into_iter().map(|directive| directive.id).collect();
    assert_eq!(before, after);
}

#[test]
fn settings_from_yaml() {
    let yaml = "
primary_variable: u
dummy_variable: s
function_name: g
";
    let settings : Settings = serde_yaml::from_str(yaml).expect("failed to parse settings");
    assert_eq!(settings.accumulator_origin, "0");
    assert!(settings.implicit_y);

    let directives = build(&settings, "1", r"\int \cos x\,dx");
    assert_eq!(find(&directives, "1_parent").latex, r"y = \cos u");
    assert_eq!(find(&directives, "1_accumulator").latex, r"y = \int_{0}^{u} \cos s ds");

    let directives = build(&settings, "2", r"\frac{d}{dx}x^{2}|_{x=4}");
    assert_eq!(find(&directives, "2_definition").latex, "g_{2}(u) = u^{2}");
    assert_eq!(find(&directives, "2_derivative").latex, "y = g_{2}'(u)");
    assert_eq!(find(&directives, "2_value").latex, "g_{2}'(4)");
}

#[test]
fn invalid_settings_from_json() {
    let settings : Settings = serde_json::from_str(r#"{ "primary_variable": "t" }"#).expect("failed to parse settings");
    assert_eq!(
        DirectiveBuilder::new(&settings).unwrap_err(),
        SettingsError::DummyVariableClash("t".into()),
    );
}

#[test]
fn visibility_of_a_derivative() {
    let directives = build(&Settings::default(), "9", r"\frac{d^{4}}{dx^{4}}\sin x");
    let shown : Vec<_> = directives
        .iter()
        .filter(|directive| Visibility::Result.shows(directive))
        .map(|directive| (directive.role, directive.latex.as_str()))
        .collect();
    assert_eq!(shown, vec![(DirectiveRole::Result, r"y = \frac{d^{4}}{dx^{4}}f_{9}(x)")]);
}

#[test]
fn plain_expressions() {
    let settings = Settings::default();
    assert_eq!(find(&build(&settings, "1", r"\sin x"), "1_plain").latex, r"y = \sin x");
    assert_eq!(find(&build(&settings, "1", "y=|x|"), "1_plain").latex, r"y=\left|x\right|");
    assert!(build(&settings, "1", "").is_empty());

    let summation = build(&settings, "4", r"\sum_{n=1}^{10} n");
    assert_eq!(summation.len(), 1);
    assert!(summation[0].hidden);
    assert_eq!(summation[0].kind, DirectiveKind::Value);
}
