//! Diagnostics over whole documents

use ini_core::diagnostics::{
    MULTIPLE_DECLARATIONS_OF_PROPERTY, MULTIPLE_DECLARATIONS_OF_SECTION,
    REDUNDANT_PROPERTY_DECLARATION,
};
use ini_core::{Diagnostic, DiagnosticEngine, Severity, parse_text};
use rowan::{TextRange, TextSize};

fn analyze(source: &str) -> Vec<Diagnostic> {
    DiagnosticEngine::new().analyze_all(&parse_text(source))
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_duplicate_section_flags_only_the_later_header() {
    let source = "[a]\nx=1\n[A]\ny=2\n";
    let diagnostics = analyze(source);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].id, MULTIPLE_DECLARATIONS_OF_SECTION);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(&source[diagnostics[0].range], "A");
    assert_eq!(u32::from(diagnostics[0].range.start()), 9);
}

#[test]
fn test_redundant_property_first_wins() {
    let source = "[a]\nx=1\nx=1\nx=2\n";
    let diagnostics = analyze(source);

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| u32::from(d.range.start()) >= 8));

    assert_eq!(diagnostics[0].id, REDUNDANT_PROPERTY_DECLARATION);
    assert_eq!(u32::from(diagnostics[0].range.start()), 8);
    assert_eq!(&source[diagnostics[0].range], "x=1");

    assert_eq!(diagnostics[1].id, MULTIPLE_DECLARATIONS_OF_PROPERTY);
    assert_eq!(u32::from(diagnostics[1].range.start()), 12);
    assert_eq!(&source[diagnostics[1].range], "x");
}

#[test]
fn test_mixed_document() {
    let source = concat!(
        "; config\n[server\nhost = localhost\nport 8080\n[]\n#bad\n",
        "[Server]\nhost = localhost\ntimeout =\n",
    );
    let diagnostics = analyze(source);

    insta::assert_snapshot!(render(&diagnostics), @r"
    error[MissingSectionClosingBracket] 16..16: ']' expected
    error[MissingPropertyDelimiter] 43..43: '=' expected
    error[SectionNameExpected] 45..45: Section name expected
    error[UnrecognizedContent] 47..51: Unrecognized content
    warning[MultipleDeclarationsOfSection] 53..59: Multiple declarations of section 'Server'
    warning[RedundantPropertyDeclaration] 61..77: Redundant declaration of property 'host'
    ");
}

#[test]
fn test_well_formed_document_is_clean() {
    let source = concat!(
        "; Global\nname = demo\n\n",
        "[server]\nhost = localhost ; primary\nport = 8080\n\n",
        "[client]\nport = 8080\n",
    );
    assert!(analyze(source).is_empty());
}

#[test]
fn test_empty_and_trivia_only_documents() {
    assert!(analyze("").is_empty());
    assert!(analyze("\n\n; only a comment\n\r\n").is_empty());
}

#[test]
fn test_query_range_limits_results() {
    let source = "[a]\nx=1\nx=1\n[b]\ny\n";
    let tree = parse_text(source);
    let engine = DiagnosticEngine::new();

    let all = engine.analyze_all(&tree);
    assert_eq!(all.len(), 2);

    let first_section = TextRange::new(TextSize::from(0), TextSize::from(7));
    assert!(engine.analyze(&tree, first_section).is_empty());

    let second_property = TextRange::new(TextSize::from(8), TextSize::from(9));
    let found = engine.analyze(&tree, second_property);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, REDUNDANT_PROPERTY_DECLARATION);
}

#[test]
fn test_diagnostics_serialize_to_json() {
    let diagnostics = analyze("[a\n");
    let json = serde_json::to_string(&diagnostics).unwrap();
    assert!(json.contains("\"id\":\"MissingSectionClosingBracket\""));
    assert!(json.contains("\"severity\":\"Error\""));
}
